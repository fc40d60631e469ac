//! Operator input: debounced buttons and the rotary encoder

pub mod debounce;
pub mod encoder;

pub use debounce::{ButtonId, ButtonInputs, Debouncer};
pub use encoder::{QuadratureDecoder, Rotation};

/// Input events delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Debounced button press
    Button(ButtonId),
    /// One encoder detent
    Encoder(Rotation),
}
