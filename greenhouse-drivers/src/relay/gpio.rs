//! GPIO relay output
//!
//! Pump and LED lighting are switched through relay module channels
//! driven directly from a GPIO pin.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use greenhouse_core::traits::RelayOutput;

/// GPIO relay output
///
/// Controls a relay channel via a GPIO pin. The pin can be configured as
/// active-high (default) or active-low.
pub struct GpioRelay<P> {
    pin: P,
    /// If true, relay ON = pin LOW
    inverted: bool,
    /// Current logical state (true = load on)
    on: bool,
}

impl<P: OutputPin<Error = Infallible>> GpioRelay<P> {
    /// Create a new GPIO relay output
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the load is ON when pin is LOW (active-low relay boards)
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut relay = Self {
            pin,
            inverted,
            on: false,
        };
        // Ensure the load starts off
        relay.set_on(false);
        relay
    }

    /// Create a new GPIO relay with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO relay with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin<Error = Infallible>> RelayOutput for GpioRelay<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;

        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
