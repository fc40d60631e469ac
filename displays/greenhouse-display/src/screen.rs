//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

/// Number of character rows (128x64 OLED, 8px font)
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns (128x64 OLED, 6px font)
pub const SCREEN_COLS: usize = 21;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

const EMPTY_LINE: String<LINE_LEN> = String::new();

/// Screen buffer for text-mode displays
///
/// Can be rendered to any `DisplayBackend` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Highlight state per row (start_col, end_col)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [EMPTY_LINE; SCREEN_ROWS],
            highlights: [None; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        for highlight in &mut self.highlights {
            *highlight = None;
        }
        self.dirty = true;
    }

    /// Set the content of a specific row
    ///
    /// Text longer than a row is truncated.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            for c in text.chars() {
                if line.push(c).is_err() {
                    break;
                }
            }
            self.dirty = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Set highlight (invert) region for a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if row < SCREEN_ROWS {
            self.highlights[row] = Some((start_col, end_col));
            self.dirty = true;
        }
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_line() {
        let mut screen = Screen::new();
        screen.set_line(2, "hello");
        assert_eq!(screen.get_line(2), Some("hello"));
        assert_eq!(screen.get_line(0), Some(""));
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_long_line_truncated() {
        let mut screen = Screen::new();
        screen.set_line(0, "0123456789012345678901234");
        assert_eq!(screen.get_line(0).map(str::len), Some(SCREEN_COLS));
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut screen = Screen::new();
        screen.mark_clean();
        screen.set_line(SCREEN_ROWS, "nope");
        assert!(!screen.is_dirty());
    }

    #[test]
    fn test_clear_resets_highlights() {
        let mut screen = Screen::new();
        screen.set_highlight(1, 0, 4);
        screen.clear();
        assert_eq!(screen.get_highlight(1), None);
    }
}
