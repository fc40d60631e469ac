//! Display backend trait
//!
//! Defines the interface for different display types.

use crate::screen::Screen;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering to displays.
/// Implementations handle the specifics of OLED, console or other outputs.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert a region on the specified row (for highlighting)
    ///
    /// - `row`: Row number
    /// - `start_col`: Starting column
    /// - `end_col`: Ending column (exclusive)
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

/// Extension methods available on every backend
pub trait DisplayBackendExt: DisplayBackend {
    /// Draw a whole screen buffer and flush it
    ///
    /// Rows beyond the backend's dimensions are skipped.
    fn draw_screen(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        if !self.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        let (_, rows) = self.dimensions();
        self.clear()?;
        for (row, line) in screen.lines().enumerate().take(rows as usize) {
            if !line.is_empty() {
                self.draw_text(row as u8, 0, line)?;
            }
            if let Some((start, end)) = screen.get_highlight(row) {
                self.invert_region(row as u8, start, end)?;
            }
        }
        self.flush()
    }
}

impl<T: DisplayBackend + ?Sized> DisplayBackendExt for T {}
