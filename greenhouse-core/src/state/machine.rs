//! Display mode state machine definition
//!
//! The display mode and the clock setup sub-state only change on a MODE
//! press. Each press produces a [`Transition`] naming the next state and
//! the side effects to apply with it.

use heapless::Vec;

use super::commands::Command;
use crate::config::FlowFaultPolicy;

/// Maximum side effects of a single transition
pub const MAX_COMMANDS: usize = 5;

/// Side effects of one transition, in the order they apply
pub type Commands = Vec<Command, MAX_COMMANDS>;

/// Screens the controller can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Power-on image, waits for MODE
    StartupImage,
    /// Operator is entering the time of day
    SetClock,
    /// Normal operation, sensor values and actuator states
    ReadoutValues,
    /// Fault latches and settings
    ServiceMode,
    /// Water flow fault needs operator attention
    FlowFault,
}

impl DisplayMode {
    /// Check if the watering/lighting loop may run on this screen
    pub fn control_allowed(&self) -> bool {
        !matches!(self, DisplayMode::FlowFault)
    }

    /// Check if this is the flow fault screen
    pub fn is_fault(&self) -> bool {
        matches!(self, DisplayMode::FlowFault)
    }

    /// Screen name for logs
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::StartupImage => "STARTUP_IMAGE",
            DisplayMode::SetClock => "SET_CLOCK",
            DisplayMode::ReadoutValues => "READOUT_VALUES",
            DisplayMode::ServiceMode => "SERVICE_MODE",
            DisplayMode::FlowFault => "FLOW_FAULT",
        }
    }
}

/// Clock setup progress, meaningful while the mode is `SetClock`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockInputState {
    /// Editing hour tens
    Hour2,
    /// Editing hour units
    Hour1,
    /// Editing minute tens
    Minute2,
    /// Editing minute units
    Minute1,
    /// Setup done, clock running
    Completed,
}

impl ClockInputState {
    /// Next sub-state; `Completed` stays put
    pub fn next(self) -> Self {
        use ClockInputState::*;
        match self {
            Hour2 => Hour1,
            Hour1 => Minute2,
            Minute2 => Minute1,
            Minute1 | Completed => Completed,
        }
    }

    /// Check if a digit is being edited
    pub fn is_editing(&self) -> bool {
        !matches!(self, ClockInputState::Completed)
    }
}

/// Display mode plus clock setup sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeState {
    pub mode: DisplayMode,
    pub clock_input: ClockInputState,
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one MODE press
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: ModeState,
    pub to: ModeState,
    pub commands: Commands,
}

impl Transition {
    /// Check if the visible screen changed
    pub fn mode_changed(&self) -> bool {
        self.from.mode != self.to.mode
    }

    /// Check if the transition requests a given side effect
    pub fn has(&self, command: Command) -> bool {
        self.commands.contains(&command)
    }
}

fn commands(list: &[Command]) -> Commands {
    let mut out = Commands::new();
    for c in list {
        let _ = out.push(*c);
    }
    out
}

impl ModeState {
    /// Boot state: startup image, setup starting at hour tens
    pub const fn new() -> Self {
        Self {
            mode: DisplayMode::StartupImage,
            clock_input: ClockInputState::Hour2,
        }
    }

    /// Process a MODE press and return the transition to apply
    ///
    /// A latched water flow fault takes priority over the regular table:
    /// from any screen other than `FlowFault` the press leads to `FlowFault`
    /// without side effects. On `FlowFault` the latch selects the exit:
    /// cleared resumes the program, still set reboots to the startup image.
    pub fn advance(self, water_flow_fault: bool, policy: FlowFaultPolicy) -> Transition {
        use ClockInputState::*;
        use Command::*;
        use DisplayMode::*;

        let (mode, clock_input, effects) = match (self.mode, self.clock_input) {
            (m, input) if water_flow_fault && m != FlowFault => (FlowFault, input, commands(&[])),

            (StartupImage, _) => (SetClock, Hour2, commands(&[])),

            (SetClock, Minute1) => (SetClock, Completed, commands(&[StartClock])),
            (SetClock, Completed) => (
                ReadoutValues,
                Completed,
                commands(&[EnableAlarmBanner, EnableControlLoop]),
            ),
            (SetClock, input) => (SetClock, input.next(), commands(&[])),

            (ReadoutValues, input) => (ServiceMode, input, commands(&[DisableAlarmBanner])),
            (ServiceMode, input) => (ReadoutValues, input, commands(&[DisableAlarmBanner])),

            (FlowFault, input) if !water_flow_fault => {
                let resume = match policy {
                    FlowFaultPolicy::ResumeToServiceMode => ServiceMode,
                    FlowFaultPolicy::ResumeToReadout => ReadoutValues,
                };
                (
                    resume,
                    input,
                    commands(&[EnableControlLoop, EnableAlarmBanner]),
                )
            }
            (FlowFault, _) => (
                StartupImage,
                Hour2,
                commands(&[
                    DisableControlLoop,
                    DisableAlarmBanner,
                    ClearFlowFault,
                    StopPump,
                    ResetClock,
                ]),
            ),
        };

        Transition {
            from: self,
            to: ModeState { mode, clock_input },
            commands: effects,
        }
    }
}
