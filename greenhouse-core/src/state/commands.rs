//! Side effects emitted by mode transitions

/// Side effect requested by a mode transition
///
/// Most commands act on the greenhouse state itself; `StopPump` is for
/// the actuator side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Start the time-of-day clock
    StartClock,
    /// Stop the clock and zero it
    ResetClock,
    /// Allow the fault banner on the readout screen
    EnableAlarmBanner,
    /// Hide the fault banner
    DisableAlarmBanner,
    /// Let the watering/lighting control loop run
    EnableControlLoop,
    /// Suspend the watering/lighting control loop
    DisableControlLoop,
    /// Clear the water flow fault latch
    ClearFlowFault,
    /// Switch the water pump off
    StopPump,
}

impl Command {
    /// Check if this command must be carried out by the actuators
    pub fn is_actuator_command(&self) -> bool {
        matches!(self, Command::StopPump)
    }
}
