//! Main controller coordinating the state machine and the control loop
//!
//! The controller is the central brain that:
//! - Processes debounced button presses and encoder detents
//! - Advances the clock from elapsed tick time
//! - Evaluates sensor readings into fault latches and actuator commands
//! - Produces the snapshot the renderer draws from
//!
//! It is hardware independent; the firmware feeds it from Embassy tasks.

use crate::clock::TimeCursors;
use crate::config::GreenhouseConfig;
use crate::control::{
    led_fault, light_need, water_need, FlowMonitor, MoistureLevel, TemperatureLimit,
};
use crate::input::{ButtonId, InputEvent, Rotation};
use crate::safety::{FaultKind, FaultLatches};
use crate::state::{ClockInputState, Command, DisplayMode, GreenhouseState, Transition};

/// Latest sensor values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReadings {
    /// Trimmed mean of the moisture probes (10-bit scale)
    pub moisture: Option<u16>,
    /// Air temperature in 0.1 °C
    pub temperature_c_x10: Option<i16>,
    /// Measured UV index
    pub uv_index: Option<u16>,
    /// Tank level switch reports low water
    pub tank_low: bool,
    /// Measured pump flow (litres per hour)
    pub flow_lph: u16,
}

/// Requested actuator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCommand {
    pub pump_on: bool,
    pub led_on: bool,
}

impl ActuatorCommand {
    /// Everything off
    pub const OFF: Self = Self {
        pump_on: false,
        led_on: false,
    };
}

/// Result of processing one input event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputOutcome {
    /// Nothing changed
    Ignored,
    /// Screen content changed without a mode transition
    Updated,
    /// MODE press applied a transition
    Transitioned(Transition),
}

/// What a tick changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The clock advanced at least one second
    pub second_elapsed: bool,
    /// The blink phase flipped
    pub blink_toggled: bool,
    /// The startup image timed out
    pub transition: Option<Transition>,
}

impl TickOutcome {
    /// Check if the screen needs redrawing
    pub fn needs_redraw(&self) -> bool {
        self.second_elapsed || self.blink_toggled || self.transition.is_some()
    }
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub mode: DisplayMode,
    pub clock_input: ClockInputState,
    pub time: TimeCursors,
    pub clock_running: bool,
    pub faults: FaultLatches,
    pub program_enabled: bool,
    pub alarm_banner_enabled: bool,
    pub readings: SensorReadings,
    pub moisture_level: Option<MoistureLevel>,
    pub actuators: ActuatorCommand,
    pub temp_limit: TemperatureLimit,
    pub over_temperature: bool,
    /// Blink phase for the edited digit and the clock separators
    pub blink_on: bool,
}

/// Controller state for coordinating subsystems
pub struct Controller {
    state: GreenhouseState,
    config: GreenhouseConfig,
    readings: SensorReadings,
    moisture_level: Option<MoistureLevel>,
    actuators: ActuatorCommand,
    temp_limit: TemperatureLimit,
    flow_monitor: FlowMonitor,
    /// Last tick timestamp (ms)
    last_tick_ms: Option<u32>,
    /// Time not yet turned into clock seconds
    second_acc_ms: u32,
    blink_acc_ms: u32,
    blink_on: bool,
    /// Time spent on the startup image
    splash_ms: u32,
}

impl Controller {
    /// Create a controller in the boot state
    pub fn new(config: GreenhouseConfig) -> Self {
        Self {
            state: GreenhouseState::new(config.flow_fault.resume_to),
            config,
            readings: SensorReadings::default(),
            moisture_level: None,
            actuators: ActuatorCommand::OFF,
            temp_limit: TemperatureLimit::new(config.temperature.limit_half_c),
            flow_monitor: FlowMonitor::new(),
            last_tick_ms: None,
            second_acc_ms: 0,
            blink_acc_ms: 0,
            blink_on: true,
            splash_ms: 0,
        }
    }

    pub fn state(&self) -> &GreenhouseState {
        &self.state
    }

    pub fn config(&self) -> &GreenhouseConfig {
        &self.config
    }

    /// Current actuator command
    pub fn actuator_command(&self) -> ActuatorCommand {
        self.actuators
    }

    pub fn temp_limit(&self) -> TemperatureLimit {
        self.temp_limit
    }

    /// Process a debounced input event
    pub fn process_input(&mut self, input: InputEvent) -> InputOutcome {
        match input {
            InputEvent::Button(ButtonId::Mode) => {
                let transition = self.state.on_mode_press();
                self.after_transition(&transition);
                InputOutcome::Transitioned(transition)
            }
            InputEvent::Button(ButtonId::Set) => {
                if self.state.on_set_press() {
                    InputOutcome::Updated
                } else {
                    InputOutcome::Ignored
                }
            }
            InputEvent::Encoder(rotation) => {
                if self.state.mode() != DisplayMode::ServiceMode {
                    return InputOutcome::Ignored;
                }
                let changed = match rotation {
                    Rotation::Clockwise => self.temp_limit.increase(),
                    Rotation::CounterClockwise => self.temp_limit.decrease(),
                };
                if changed {
                    InputOutcome::Updated
                } else {
                    InputOutcome::Ignored
                }
            }
        }
    }

    /// Periodic tick with the current timestamp
    ///
    /// Elapsed time is accumulated so the clock keeps pace regardless of
    /// the tick period or input handling delays.
    pub fn tick(&mut self, now_ms: u32) -> TickOutcome {
        let elapsed = match self.last_tick_ms {
            Some(last) => now_ms.wrapping_sub(last),
            None => 0,
        };
        self.last_tick_ms = Some(now_ms);

        let mut outcome = TickOutcome::default();

        self.second_acc_ms += elapsed;
        while self.second_acc_ms >= self.config.clock.second_ms {
            self.second_acc_ms -= self.config.clock.second_ms;
            if self.state.tick_second() {
                outcome.second_elapsed = true;
            }
        }

        self.blink_acc_ms += elapsed;
        while self.blink_acc_ms >= self.config.display.blink_ms {
            self.blink_acc_ms -= self.config.display.blink_ms;
            self.blink_on = !self.blink_on;
            outcome.blink_toggled = true;
        }

        let splash_s = self.config.display.splash_s;
        if self.state.mode() == DisplayMode::StartupImage && splash_s > 0 {
            self.splash_ms += elapsed;
            if self.splash_ms >= splash_s as u32 * 1000 {
                let transition = self.state.on_mode_press();
                self.after_transition(&transition);
                outcome.transition = Some(transition);
            }
        } else {
            self.splash_ms = 0;
        }

        outcome
    }

    /// Evaluate a sensor sweep and return the new actuator command
    ///
    /// Runs the watering and lighting loop only while the program is
    /// enabled and the flow fault screen is not shown; otherwise both
    /// actuators are switched off.
    pub fn update_readings(&mut self, readings: SensorReadings, now_ms: u32) -> ActuatorCommand {
        self.readings = readings;
        self.moisture_level = readings
            .moisture
            .map(|m| MoistureLevel::classify(m, &self.config.moisture));

        if !self.state.control_active() {
            self.suspend();
            return self.actuators;
        }

        // Water tank level follows the switch
        self.state.set_fault(FaultKind::WaterLevel, readings.tank_low);

        // Flow is only ever latched here, clearing is up to the operator
        if self.flow_monitor.check(
            self.actuators.pump_on,
            readings.flow_lph,
            now_ms,
            &self.config.watering,
        ) {
            self.state.set_fault(FaultKind::WaterFlow, true);
        }

        let pump_on = self
            .moisture_level
            .is_some_and(|level| water_need(level, self.state.faults()));

        let lighting = &self.config.lighting;
        let led_on = match readings.uv_index {
            Some(uv) => {
                self.state
                    .set_fault(FaultKind::LedLight, led_fault(self.actuators.led_on, uv, lighting));
                light_need(self.state.clock().current_time_as_int(), uv, lighting)
            }
            None => false,
        };

        if !pump_on {
            self.flow_monitor.reset();
        }
        self.actuators = ActuatorCommand { pump_on, led_on };
        self.actuators
    }

    /// Build the renderer snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.state.mode(),
            clock_input: self.state.clock_input(),
            time: *self.state.clock().cursors(),
            clock_running: self.state.clock().is_running(),
            faults: *self.state.faults(),
            program_enabled: self.state.program_enabled(),
            alarm_banner_enabled: self.state.alarm_banner_enabled(),
            readings: self.readings,
            moisture_level: self.moisture_level,
            actuators: self.actuators,
            temp_limit: self.temp_limit,
            over_temperature: self
                .readings
                .temperature_c_x10
                .is_some_and(|t| self.temp_limit.is_exceeded(t)),
            blink_on: self.blink_on,
        }
    }

    fn after_transition(&mut self, transition: &Transition) {
        if transition.has(Command::StopPump) || !self.state.control_active() {
            self.suspend();
        }
        if transition.to.mode == DisplayMode::StartupImage {
            self.splash_ms = 0;
        }
    }

    /// Switch both actuators off
    fn suspend(&mut self) {
        self.actuators = ActuatorCommand::OFF;
        self.flow_monitor.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(c: &mut Controller, id: ButtonId, times: usize) {
        for _ in 0..times {
            c.process_input(InputEvent::Button(id));
        }
    }

    /// Set the clock to `hh:mm` through the buttons and enter the readout screen
    fn running_at(config: GreenhouseConfig, hh: u8, mm: u8) -> Controller {
        let mut c = Controller::new(config);
        press(&mut c, ButtonId::Mode, 1);
        press(&mut c, ButtonId::Set, (hh / 10) as usize);
        press(&mut c, ButtonId::Mode, 1);
        press(&mut c, ButtonId::Set, (hh % 10) as usize);
        press(&mut c, ButtonId::Mode, 1);
        press(&mut c, ButtonId::Set, (mm / 10) as usize);
        press(&mut c, ButtonId::Mode, 1);
        press(&mut c, ButtonId::Set, (mm % 10) as usize);
        press(&mut c, ButtonId::Mode, 2);
        assert_eq!(c.state().mode(), DisplayMode::ReadoutValues);
        c
    }

    fn dry_readings() -> SensorReadings {
        SensorReadings {
            moisture: Some(200),
            temperature_c_x10: Some(215),
            uv_index: Some(10),
            tank_low: false,
            flow_lph: 150,
        }
    }

    #[test]
    fn test_setup_through_buttons() {
        let c = running_at(GreenhouseConfig::default(), 14, 25);
        assert_eq!(c.state().clock().current_time_as_int(), 1425);
        assert!(c.state().program_enabled());
        assert!(c.state().alarm_banner_enabled());
    }

    #[test]
    fn test_clock_follows_elapsed_ticks() {
        let mut c = running_at(GreenhouseConfig::default(), 10, 0);
        c.tick(0);
        for i in 1..=25 {
            c.tick(i * 100);
        }
        assert_eq!(c.state().clock().cursors().seconds(), 2);
        // A late tick catches up
        let outcome = c.tick(5_000);
        assert!(outcome.second_elapsed);
        assert_eq!(c.state().clock().cursors().seconds(), 5);
    }

    #[test]
    fn test_clock_does_not_run_before_setup() {
        let mut c = Controller::new(GreenhouseConfig::default());
        c.tick(0);
        let outcome = c.tick(3_000);
        assert!(!outcome.second_elapsed);
        assert_eq!(c.state().clock().current_time_as_int(), 0);
    }

    #[test]
    fn test_blink_toggles_at_half_period() {
        let mut c = Controller::new(GreenhouseConfig::default());
        c.tick(0);
        let first = c.snapshot().blink_on;
        assert!(!c.tick(400).blink_toggled);
        assert!(c.tick(500).blink_toggled);
        assert_ne!(c.snapshot().blink_on, first);
    }

    #[test]
    fn test_splash_times_out() {
        let mut config = GreenhouseConfig::default();
        config.display.splash_s = 4;
        let mut c = Controller::new(config);
        c.tick(0);
        assert!(c.tick(3_900).transition.is_none());
        let outcome = c.tick(4_000);
        assert!(outcome.transition.is_some());
        assert_eq!(c.state().mode(), DisplayMode::SetClock);
        assert!(c.tick(20_000).transition.is_none());
    }

    #[test]
    fn test_splash_disabled_waits_for_mode() {
        let mut c = Controller::new(GreenhouseConfig::default());
        c.tick(0);
        assert!(c.tick(60_000).transition.is_none());
        assert_eq!(c.state().mode(), DisplayMode::StartupImage);
    }

    #[test]
    fn test_control_loop_idle_before_setup() {
        let mut c = Controller::new(GreenhouseConfig::default());
        let cmd = c.update_readings(dry_readings(), 0);
        assert_eq!(cmd, ActuatorCommand::OFF);
        assert_eq!(c.snapshot().moisture_level, Some(MoistureLevel::Dry));
    }

    #[test]
    fn test_dry_soil_starts_pump() {
        let mut c = running_at(GreenhouseConfig::default(), 12, 0);
        let cmd = c.update_readings(dry_readings(), 0);
        assert!(cmd.pump_on);

        let mut wet = dry_readings();
        wet.moisture = Some(800);
        assert!(!c.update_readings(wet, 1000).pump_on);
    }

    #[test]
    fn test_low_tank_blocks_pump() {
        let mut c = running_at(GreenhouseConfig::default(), 12, 0);
        let mut r = dry_readings();
        r.tank_low = true;
        let cmd = c.update_readings(r, 0);
        assert!(!cmd.pump_on);
        assert!(c.state().faults().water_level());

        // Level fault follows the switch
        r.tank_low = false;
        assert!(c.update_readings(r, 1000).pump_on);
        assert!(!c.state().faults().water_level());
    }

    #[test]
    fn test_no_flow_latches_fault_after_settle() {
        let mut c = running_at(GreenhouseConfig::default(), 12, 0);
        let mut r = dry_readings();
        r.flow_lph = 0;

        assert!(c.update_readings(r, 0).pump_on);
        // First check with the pump running starts the settle time
        assert!(c.update_readings(r, 500).pump_on);
        assert!(!c.state().faults().water_flow());

        let cmd = c.update_readings(r, 1500);
        assert!(c.state().faults().water_flow());
        assert!(!cmd.pump_on);

        // The latch holds even with flow back
        r.flow_lph = 200;
        c.update_readings(r, 2500);
        assert!(c.state().faults().water_flow());
    }

    #[test]
    fn test_flow_fault_screen_and_reboot() {
        let mut c = running_at(GreenhouseConfig::default(), 12, 0);
        c.state.set_fault(FaultKind::WaterFlow, true);

        let outcome = c.process_input(InputEvent::Button(ButtonId::Mode));
        assert!(matches!(outcome, InputOutcome::Transitioned(_)));
        assert_eq!(c.state().mode(), DisplayMode::FlowFault);
        assert_eq!(c.update_readings(dry_readings(), 0), ActuatorCommand::OFF);

        let outcome = c.process_input(InputEvent::Button(ButtonId::Mode));
        match outcome {
            InputOutcome::Transitioned(t) => assert!(t.has(Command::StopPump)),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(c.state().mode(), DisplayMode::StartupImage);
        assert_eq!(c.actuator_command(), ActuatorCommand::OFF);
    }

    #[test]
    fn test_flow_fault_acknowledge_and_resume() {
        let mut c = running_at(GreenhouseConfig::default(), 12, 0);
        c.state.set_fault(FaultKind::WaterFlow, true);
        press(&mut c, ButtonId::Mode, 1);
        assert_eq!(
            c.process_input(InputEvent::Button(ButtonId::Set)),
            InputOutcome::Updated
        );
        press(&mut c, ButtonId::Mode, 1);
        assert_eq!(c.state().mode(), DisplayMode::ServiceMode);
        assert!(c.update_readings(dry_readings(), 0).pump_on);
    }

    #[test]
    fn test_led_on_in_window_when_dark() {
        let mut c = running_at(GreenhouseConfig::default(), 12, 0);
        let mut r = dry_readings();
        r.uv_index = Some(1);
        assert!(c.update_readings(r, 0).led_on);
        assert!(!c.state().faults().led_light());

        // Still dark with LEDs on: LED fault
        c.update_readings(r, 1000);
        assert!(c.state().faults().led_light());

        // Light restored
        r.uv_index = Some(8);
        let cmd = c.update_readings(r, 2000);
        assert!(!cmd.led_on);
        assert!(!c.state().faults().led_light());
    }

    #[test]
    fn test_led_off_at_night() {
        let mut c = running_at(GreenhouseConfig::default(), 2, 0);
        let mut r = dry_readings();
        r.uv_index = Some(0);
        assert!(!c.update_readings(r, 0).led_on);
    }

    #[test]
    fn test_encoder_adjusts_limit_in_service_mode() {
        let mut c = running_at(GreenhouseConfig::default(), 12, 0);
        assert_eq!(
            c.process_input(InputEvent::Encoder(Rotation::Clockwise)),
            InputOutcome::Ignored
        );

        press(&mut c, ButtonId::Mode, 1);
        assert_eq!(c.state().mode(), DisplayMode::ServiceMode);
        assert_eq!(
            c.process_input(InputEvent::Encoder(Rotation::Clockwise)),
            InputOutcome::Updated
        );
        assert_eq!(c.temp_limit().half_c(), 61);
        c.process_input(InputEvent::Encoder(Rotation::CounterClockwise));
        c.process_input(InputEvent::Encoder(Rotation::CounterClockwise));
        assert_eq!(c.temp_limit().half_c(), 59);
    }

    #[test]
    fn test_over_temperature_indicator() {
        let mut c = running_at(GreenhouseConfig::default(), 12, 0);
        let mut r = dry_readings();
        r.temperature_c_x10 = Some(301);
        c.update_readings(r, 0);
        assert!(c.snapshot().over_temperature);
        r.temperature_c_x10 = Some(300);
        c.update_readings(r, 1000);
        assert!(!c.snapshot().over_temperature);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let c = running_at(GreenhouseConfig::default(), 8, 30);
        let s = c.snapshot();
        assert_eq!(s.mode, DisplayMode::ReadoutValues);
        assert_eq!(s.clock_input, ClockInputState::Completed);
        assert_eq!(s.time.as_hhmm(), 830);
        assert!(s.clock_running);
        assert!(s.program_enabled);
        assert!(!s.faults.any());
    }
}
