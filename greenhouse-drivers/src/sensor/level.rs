//! Tank level float switch
//!
//! The switch closes when the water drops below it. With the default
//! wiring the pin reads high when the tank is too low.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use greenhouse_core::traits::LevelSwitch;

/// Float switch on a GPIO input
pub struct GpioLevelSwitch<P> {
    pin: P,
    /// If true, tank low = pin LOW
    inverted: bool,
}

impl<P: InputPin<Error = Infallible>> GpioLevelSwitch<P> {
    /// Create a level switch where a high pin means the tank is low
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create a level switch where a low pin means the tank is low
    pub fn new_inverted(pin: P) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

impl<P: InputPin<Error = Infallible>> LevelSwitch for GpioLevelSwitch<P> {
    fn is_tank_low(&mut self) -> bool {
        let high = match self.pin.is_high() {
            Ok(high) => high,
            Err(never) => match never {},
        };
        high != self.inverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_high_means_low_tank() {
        assert!(GpioLevelSwitch::new(MockPin { high: true }).is_tank_low());
        assert!(!GpioLevelSwitch::new(MockPin { high: false }).is_tank_low());
    }

    #[test]
    fn test_inverted() {
        assert!(!GpioLevelSwitch::new_inverted(MockPin { high: true }).is_tank_low());
        assert!(GpioLevelSwitch::new_inverted(MockPin { high: false }).is_tank_low());
    }
}
