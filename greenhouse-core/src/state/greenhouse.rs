//! Greenhouse state aggregate
//!
//! Single owner of the display mode, the clock, the fault latches and the
//! enable flags. Only the controller mutates it, one input at a time.

use super::commands::Command;
use super::machine::{ClockInputState, DisplayMode, ModeState, Transition};
use crate::clock::Clock;
use crate::config::FlowFaultPolicy;
use crate::safety::{FaultKind, FaultLatches};

/// Everything the mode state machine owns or reads
#[derive(Debug, Clone)]
pub struct GreenhouseState {
    mode: ModeState,
    clock: Clock,
    faults: FaultLatches,
    /// Watering/lighting control loop enabled
    program_enabled: bool,
    /// Fault banner allowed on the readout screen
    alarm_banner_enabled: bool,
    policy: FlowFaultPolicy,
}

impl Default for GreenhouseState {
    fn default() -> Self {
        Self::new(FlowFaultPolicy::default())
    }
}

impl GreenhouseState {
    /// Boot state: startup image, clock stopped at zero, every flag false
    pub const fn new(policy: FlowFaultPolicy) -> Self {
        Self {
            mode: ModeState::new(),
            clock: Clock::new(),
            faults: FaultLatches::new(),
            program_enabled: false,
            alarm_banner_enabled: false,
            policy,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode.mode
    }

    pub fn clock_input(&self) -> ClockInputState {
        self.mode.clock_input
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn faults(&self) -> &FaultLatches {
        &self.faults
    }

    pub fn program_enabled(&self) -> bool {
        self.program_enabled
    }

    pub fn alarm_banner_enabled(&self) -> bool {
        self.alarm_banner_enabled
    }

    /// Check if the control loop should drive the actuators right now
    pub fn control_active(&self) -> bool {
        self.program_enabled && self.mode.mode.control_allowed()
    }

    /// Handle an accepted MODE press
    ///
    /// The transition is applied as a whole before it is returned; the
    /// caller only has to act on actuator commands.
    pub fn on_mode_press(&mut self) -> Transition {
        let transition = self.mode.advance(self.faults.water_flow(), self.policy);
        self.apply(&transition);
        transition
    }

    /// Handle an accepted SET press
    ///
    /// On the setup screen this edits the current digit; on the flow fault
    /// screen it toggles the flow fault latch so the next MODE press picks
    /// the resume or reboot exit. Returns true if anything changed.
    pub fn on_set_press(&mut self) -> bool {
        match self.mode.mode {
            DisplayMode::SetClock if self.mode.clock_input.is_editing() => {
                self.clock.cursors_mut().increment(self.mode.clock_input);
                true
            }
            DisplayMode::FlowFault => {
                let active = !self.faults.water_flow();
                self.faults.set(FaultKind::WaterFlow, active)
            }
            _ => false,
        }
    }

    /// Advance the clock by one second; returns true if the time changed
    pub fn tick_second(&mut self) -> bool {
        self.clock.tick()
    }

    /// Update a fault latch from sensor evaluation; returns true if it changed
    pub fn set_fault(&mut self, kind: FaultKind, active: bool) -> bool {
        self.faults.set(kind, active)
    }

    fn apply(&mut self, transition: &Transition) {
        self.mode = transition.to;
        for command in &transition.commands {
            match command {
                Command::StartClock => self.clock.start(),
                Command::ResetClock => self.clock.reset(),
                Command::EnableAlarmBanner => self.alarm_banner_enabled = true,
                Command::DisableAlarmBanner => self.alarm_banner_enabled = false,
                Command::EnableControlLoop => self.program_enabled = true,
                Command::DisableControlLoop => self.program_enabled = false,
                Command::ClearFlowFault => {
                    self.faults.set(FaultKind::WaterFlow, false);
                }
                // Carried out by the actuator side
                Command::StopPump => {}
            }
        }
    }
}
