//! Relay output trait

/// Trait for relay-driven outputs (pump, LED lighting)
///
/// Implementations switch the load via a GPIO-driven relay or MOSFET.
pub trait RelayOutput {
    /// Switch the load on or off
    fn set_on(&mut self, on: bool);

    /// Check if the load is currently switched on
    fn is_on(&self) -> bool;
}
