//! Build script for greenhouse-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates greenhouse.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use greenhouse_core::config::GreenhouseConfig;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate greenhouse.toml at compile time
///
/// The firmware parses the same file at boot with a small no_std parser;
/// this catches mistakes before flashing.
fn validate_config() {
    println!("cargo:rerun-if-changed=greenhouse.toml");

    let config_path = Path::new("greenhouse.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: greenhouse.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds greenhouse.toml as its configuration.       ║\n\
            ║  Please create one in the greenhouse-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read greenhouse.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Unknown sections are rejected by the firmware parser too
    let value: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => panic_box("Invalid TOML syntax in greenhouse.toml", &[e.to_string()]),
    };
    validate_sections(&value);

    let config: GreenhouseConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => panic_box("Invalid value in greenhouse.toml", &[e.to_string()]),
    };

    if let Err(e) = config.validate() {
        panic_box(
            "Invalid configuration in greenhouse.toml",
            &[format!("{:?}", e), describe(&config)],
        );
    }

    println!("cargo:warning=greenhouse.toml validated successfully");
}

/// Check that only known sections and keys are present
fn validate_sections(value: &toml::Value) {
    const SECTIONS: &[(&str, &[&str])] = &[
        ("buttons", &["debounce_ms"]),
        ("clock", &["second_ms"]),
        ("display", &["blink_ms", "splash_s"]),
        ("sensors", &["sample_interval_ms"]),
        ("moisture", &["dry_threshold", "wet_threshold"]),
        (
            "watering",
            &[
                "min_flow_lph",
                "flow_settle_ms",
                "flow_k_factor_x10",
                "flow_window_ms",
            ],
        ),
        (
            "lighting",
            &["uv_threshold", "window_start_hhmm", "window_end_hhmm"],
        ),
        ("temperature", &["limit_half_c"]),
        ("flow_fault", &["resume_to"]),
    ];

    let table = match value.as_table() {
        Some(t) => t,
        None => return,
    };

    let mut errors = Vec::new();

    for (name, section) in table {
        let keys = match SECTIONS.iter().find(|(s, _)| s == name) {
            Some((_, keys)) => keys,
            None => {
                errors.push(format!("unknown section [{}]", name));
                continue;
            }
        };

        let section = match section.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        for key in section.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }

    if !errors.is_empty() {
        panic_box("Unknown entries in greenhouse.toml", &errors);
    }
}

/// Summarise the values validation looks at
fn describe(config: &GreenhouseConfig) -> String {
    format!(
        "moisture {}..{}, light {:04}-{:04}, limit {}/2 C",
        config.moisture.dry_threshold,
        config.moisture.wet_threshold,
        config.lighting.window_start_hhmm,
        config.lighting.window_end_hhmm,
        config.temperature.limit_half_c
    )
}

/// Abort the build with a boxed error message
fn panic_box(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .flat_map(|msg| msg.lines())
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
