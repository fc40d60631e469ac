//! Screen rendering
//!
//! Builds the five controller screens from a `Snapshot`. The renderer
//! never changes controller state; it only reads the snapshot.

use core::fmt::Write;

use heapless::String;

use greenhouse_core::clock::TimeCursors;
use greenhouse_core::controller::Snapshot;
use greenhouse_core::safety::FaultKind;
use greenhouse_core::state::{ClockInputState, DisplayMode};

use crate::screen::{Screen, LINE_LEN};

type Line = String<LINE_LEN>;

/// Row holding the editable clock digits on the setup screen
const SET_CLOCK_DIGIT_ROW: usize = 6;

/// Column of the first clock digit on the setup screen
const SET_CLOCK_DIGIT_COL: u8 = 6;

/// Screen renderer for the display modes
pub struct Renderer {
    screen: Screen,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a new renderer
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the screen for the snapshot's display mode
    pub fn render(&mut self, snapshot: &Snapshot) {
        match snapshot.mode {
            DisplayMode::StartupImage => self.render_startup(),
            DisplayMode::SetClock => self.render_set_clock(snapshot),
            DisplayMode::ReadoutValues => self.render_readout(snapshot),
            DisplayMode::ServiceMode => self.render_service(snapshot),
            DisplayMode::FlowFault => self.render_flow_fault(snapshot),
        }
    }

    /// Render the startup image
    pub fn render_startup(&mut self) {
        self.screen.clear();
        self.screen.set_line(1, "    .  \\ | /  .");
        self.screen.set_line(2, "     GREENHOUSE");
        self.screen.set_line(3, "     CONTROLLER");
        self.screen.set_line(4, "    ~~~~~~~~~~~");
        self.screen.set_line(6, " Press MODE to set");
        self.screen.set_line(7, "     the clock");
    }

    /// Render the clock setup screen
    ///
    /// The digit being edited blinks; the separators blink once the
    /// clock is running.
    pub fn render_set_clock(&mut self, snapshot: &Snapshot) {
        self.screen.clear();
        self.screen.set_line(0, "Set current time");
        self.screen.set_line(1, "Use the buttons:");
        self.screen.set_line(2, "SET = inc. p.val");
        self.screen.set_line(3, "MODE = h or min");
        self.screen.set_line(5, "      HH MM SS");

        let separator = if snapshot.clock_running && !snapshot.blink_on {
            ' '
        } else {
            ':'
        };
        let edited = edited_digit(snapshot.clock_input);

        let mut line = Line::new();
        for _ in 0..SET_CLOCK_DIGIT_COL {
            let _ = line.push(' ');
        }
        let digits = digits(&snapshot.time);
        for (i, digit) in digits.iter().enumerate() {
            if i == 2 || i == 4 {
                let _ = line.push(separator);
            }
            let c = if Some(i) == edited && !snapshot.blink_on {
                ' '
            } else {
                (b'0' + digit) as char
            };
            let _ = line.push(c);
        }
        self.screen.set_line(SET_CLOCK_DIGIT_ROW, &line);

        if let Some(i) = edited {
            // Digit index to column, skipping the separators
            let col = SET_CLOCK_DIGIT_COL + i as u8 + (i as u8 / 2);
            self.screen.set_highlight(SET_CLOCK_DIGIT_ROW, col, col + 1);
        } else {
            self.screen.set_line(7, "MODE = start program");
        }
    }

    /// Render the sensor readout screen
    pub fn render_readout(&mut self, snapshot: &Snapshot) {
        self.screen.clear();
        let r = &snapshot.readings;

        let mut line = Line::new();
        let _ = line.push_str("Time     ");
        let blank = snapshot.clock_running && !snapshot.blink_on;
        write_time(&mut line, &snapshot.time, blank);
        self.screen.set_line(0, &line);

        line.clear();
        let _ = line.push_str("Moisture ");
        match (r.moisture, snapshot.moisture_level) {
            (Some(m), Some(level)) => {
                let _ = write!(line, "{:4} {}", m, level.label());
            }
            _ => {
                let _ = line.push_str("  --");
            }
        }
        self.screen.set_line(1, &line);

        line.clear();
        let _ = line.push_str("Temp     ");
        match r.temperature_c_x10 {
            Some(t) => {
                write_tenths(&mut line, t);
                let _ = line.push('C');
                if snapshot.over_temperature {
                    let _ = line.push_str(" HIGH");
                }
            }
            None => {
                let _ = line.push_str("--");
            }
        }
        self.screen.set_line(2, &line);

        line.clear();
        let _ = line.push_str("UV index ");
        match r.uv_index {
            Some(uv) => {
                let _ = write!(line, "{}", uv);
            }
            None => {
                let _ = line.push_str("--");
            }
        }
        self.screen.set_line(3, &line);

        line.clear();
        let _ = write!(line, "Flow     {} L/h", r.flow_lph);
        self.screen.set_line(4, &line);

        line.clear();
        let _ = write!(
            line,
            "Pump {:3}  LED {:3}",
            on_off(snapshot.actuators.pump_on),
            on_off(snapshot.actuators.led_on)
        );
        self.screen.set_line(5, &line);

        if snapshot.alarm_banner_enabled && snapshot.faults.any() {
            line.clear();
            let _ = line.push_str("ALARM");
            for kind in snapshot.faults.active() {
                let _ = line.push(' ');
                let _ = line.push_str(kind.label());
            }
            let len = line.len() as u8;
            self.screen.set_line(7, &line);
            self.screen.set_highlight(7, 0, len);
        }
    }

    /// Render the service screen
    pub fn render_service(&mut self, snapshot: &Snapshot) {
        self.screen.clear();
        self.screen.set_line(0, "=== SERVICE MODE ===");

        let faults = &snapshot.faults;
        let rows = [
            ("Water level", FaultKind::WaterLevel),
            ("Water flow", FaultKind::WaterFlow),
            ("LED light", FaultKind::LedLight),
        ];
        let mut line = Line::new();
        for (i, (label, kind)) in rows.iter().enumerate() {
            line.clear();
            let _ = write!(
                line,
                "{:<13}{}",
                label,
                if faults.is_set(*kind) { "FAULT" } else { "OK" }
            );
            self.screen.set_line(1 + i, &line);
            if faults.is_set(*kind) {
                self.screen.set_highlight(1 + i, 13, 18);
            }
        }

        line.clear();
        let _ = write!(line, "{:<13}{}", "Program", on_off(snapshot.program_enabled));
        self.screen.set_line(4, &line);

        line.clear();
        let _ = write!(line, "{:<13}", "Temp limit");
        write_tenths(&mut line, snapshot.temp_limit.celsius_x10());
        let _ = line.push('C');
        self.screen.set_line(5, &line);
        self.screen.set_line(6, "Turn knob to adjust");

        line.clear();
        let _ = write!(line, "{:<13}", "Clock");
        write_time(&mut line, &snapshot.time, false);
        self.screen.set_line(7, &line);
    }

    /// Render the water flow fault screen
    pub fn render_flow_fault(&mut self, snapshot: &Snapshot) {
        self.screen.clear();
        self.screen.set_line(0, "! WATER FLOW FAULT !");
        self.screen.set_highlight(0, 0, 20);
        self.screen.set_line(1, "Pump stopped. Check");
        self.screen.set_line(2, "hose and water pump.");

        let active = snapshot.faults.water_flow();
        self.screen.set_line(
            4,
            if active {
                "Fault code:  ACTIVE"
            } else {
                "Fault code:  CLEARED"
            },
        );
        self.screen.set_line(
            6,
            if active {
                "SET  = clear fault"
            } else {
                "SET  = keep fault"
            },
        );
        self.screen.set_line(
            7,
            if active {
                "MODE = reboot"
            } else {
                "MODE = resume"
            },
        );
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}

/// The six clock digits in display order
fn digits(time: &TimeCursors) -> [u8; 6] {
    [
        time.hour_tens,
        time.hour_units,
        time.minute_tens,
        time.minute_units,
        time.second_tens,
        time.second_units,
    ]
}

/// Index into `digits()` of the digit being edited
fn edited_digit(input: ClockInputState) -> Option<usize> {
    match input {
        ClockInputState::Hour2 => Some(0),
        ClockInputState::Hour1 => Some(1),
        ClockInputState::Minute2 => Some(2),
        ClockInputState::Minute1 => Some(3),
        ClockInputState::Completed => None,
    }
}

/// Append HH:MM:SS, with blank separators when `blank_separators` is set
fn write_time(line: &mut Line, time: &TimeCursors, blank_separators: bool) {
    let sep = if blank_separators { ' ' } else { ':' };
    let _ = write!(
        line,
        "{:02}{}{:02}{}{:02}",
        time.hours(),
        sep,
        time.minutes(),
        sep,
        time.seconds()
    );
}

/// Append a 0.1 unit fixed-point value as `12.3`
fn write_tenths(line: &mut Line, value: i16) {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let _ = write!(line, "{}{}.{}", sign, abs / 10, abs % 10);
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenhouse_core::config::GreenhouseConfig;
    use greenhouse_core::controller::{Controller, SensorReadings};
    use greenhouse_core::input::{ButtonId, InputEvent};

    fn press(c: &mut Controller, id: ButtonId, times: usize) {
        for _ in 0..times {
            c.process_input(InputEvent::Button(id));
        }
    }

    fn readout_controller() -> Controller {
        let mut c = Controller::new(GreenhouseConfig::default());
        press(&mut c, ButtonId::Mode, 1);
        press(&mut c, ButtonId::Set, 1);
        press(&mut c, ButtonId::Mode, 1);
        press(&mut c, ButtonId::Set, 2);
        press(&mut c, ButtonId::Mode, 4);
        assert_eq!(c.state().mode(), DisplayMode::ReadoutValues);
        c
    }

    fn line(r: &Renderer, row: usize) -> &str {
        r.screen().get_line(row).unwrap_or("")
    }

    #[test]
    fn test_startup_screen() {
        let c = Controller::new(GreenhouseConfig::default());
        let mut r = Renderer::new();
        r.render(&c.snapshot());
        assert!(line(&r, 2).contains("GREENHOUSE"));
    }

    #[test]
    fn test_set_clock_screen_highlights_edited_digit() {
        let mut c = Controller::new(GreenhouseConfig::default());
        press(&mut c, ButtonId::Mode, 2);
        press(&mut c, ButtonId::Set, 3);

        let mut r = Renderer::new();
        r.render(&c.snapshot());
        assert_eq!(line(&r, 0), "Set current time");
        assert_eq!(line(&r, SET_CLOCK_DIGIT_ROW), "      03:00:00");
        // Hour units is the second digit
        assert_eq!(r.screen().get_highlight(SET_CLOCK_DIGIT_ROW), Some((7, 8)));
    }

    #[test]
    fn test_set_clock_screen_blinks_edited_digit() {
        let mut c = Controller::new(GreenhouseConfig::default());
        press(&mut c, ButtonId::Mode, 4);
        let mut snapshot = c.snapshot();
        snapshot.blink_on = false;

        let mut r = Renderer::new();
        r.render(&snapshot);
        // Minute units blank, separators steady while the clock is stopped
        assert_eq!(line(&r, SET_CLOCK_DIGIT_ROW), "      00:0 :00");
        assert_eq!(r.screen().get_highlight(SET_CLOCK_DIGIT_ROW), Some((10, 11)));
    }

    #[test]
    fn test_set_clock_completed_prompts_start() {
        let mut c = Controller::new(GreenhouseConfig::default());
        press(&mut c, ButtonId::Mode, 5);
        let mut snapshot = c.snapshot();
        snapshot.blink_on = false;

        let mut r = Renderer::new();
        r.render(&snapshot);
        assert_eq!(line(&r, SET_CLOCK_DIGIT_ROW), "      00 00 00");
        assert_eq!(line(&r, 7), "MODE = start program");
        assert_eq!(r.screen().get_highlight(SET_CLOCK_DIGIT_ROW), None);
    }

    #[test]
    fn test_readout_screen_values() {
        let mut c = readout_controller();
        c.update_readings(
            SensorReadings {
                moisture: Some(250),
                temperature_c_x10: Some(315),
                uv_index: Some(6),
                tank_low: false,
                flow_lph: 120,
            },
            0,
        );

        let mut r = Renderer::new();
        r.render(&c.snapshot());
        assert_eq!(line(&r, 0), "Time     12:00:00");
        assert_eq!(line(&r, 1), "Moisture  250 DRY");
        assert_eq!(line(&r, 2), "Temp     31.5C HIGH");
        assert_eq!(line(&r, 3), "UV index 6");
        assert_eq!(line(&r, 4), "Flow     120 L/h");
        assert_eq!(line(&r, 5), "Pump ON   LED OFF");
        assert_eq!(line(&r, 7), "");
    }

    #[test]
    fn test_readout_missing_values() {
        let c = readout_controller();
        let mut r = Renderer::new();
        r.render(&c.snapshot());
        assert_eq!(line(&r, 1), "Moisture   --");
        assert_eq!(line(&r, 2), "Temp     --");
    }

    #[test]
    fn test_readout_alarm_banner() {
        let mut c = readout_controller();
        c.update_readings(
            SensorReadings {
                tank_low: true,
                ..SensorReadings::default()
            },
            0,
        );

        let mut r = Renderer::new();
        r.render(&c.snapshot());
        assert_eq!(line(&r, 7), "ALARM LEVEL");
        assert_eq!(r.screen().get_highlight(7), Some((0, 11)));

        // Banner disabled after a service mode round trip
        press(&mut c, ButtonId::Mode, 2);
        r.render(&c.snapshot());
        assert_eq!(line(&r, 7), "");
    }

    #[test]
    fn test_service_screen() {
        let mut c = readout_controller();
        c.update_readings(
            SensorReadings {
                tank_low: true,
                ..SensorReadings::default()
            },
            0,
        );
        press(&mut c, ButtonId::Mode, 1);

        let mut r = Renderer::new();
        r.render(&c.snapshot());
        assert_eq!(line(&r, 0), "=== SERVICE MODE ===");
        assert_eq!(line(&r, 1), "Water level  FAULT");
        assert_eq!(line(&r, 2), "Water flow   OK");
        assert_eq!(line(&r, 4), "Program      ON");
        assert_eq!(line(&r, 5), "Temp limit   30.0C");
        assert_eq!(r.screen().get_highlight(1), Some((13, 18)));
    }

    #[test]
    fn test_flow_fault_screen() {
        let c = Controller::new(GreenhouseConfig::default());
        let mut snapshot = c.snapshot();
        snapshot.mode = DisplayMode::FlowFault;

        let mut r = Renderer::new();
        r.render(&snapshot);
        assert_eq!(line(&r, 4), "Fault code:  CLEARED");
        assert_eq!(line(&r, 7), "MODE = resume");
    }

    #[test]
    fn test_tenths_formatting() {
        let mut l = Line::new();
        write_tenths(&mut l, -45);
        assert_eq!(l.as_str(), "-4.5");
        l.clear();
        write_tenths(&mut l, 7);
        assert_eq!(l.as_str(), "0.7");
    }
}
