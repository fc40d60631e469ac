//! Display task
//!
//! Draws the shared screen buffer whenever the controller signals an
//! update. The console backend prints frames over RTT.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use heapless::String;

use greenhouse_display::{
    DisplayBackend, DisplayBackendExt, DisplayError, Screen, SCREEN_COLS, SCREEN_ROWS,
};

use crate::channels::SCREEN_UPDATE;

/// Shared screen buffer protected by mutex
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

const BLANK_ROW: String<SCREEN_COLS> = String::new();

/// Text display printed over the defmt log
pub struct ConsoleDisplay {
    rows: [String<SCREEN_COLS>; SCREEN_ROWS],
    inverted: [Option<(u8, u8)>; SCREEN_ROWS],
}

impl ConsoleDisplay {
    pub const fn new() -> Self {
        Self {
            rows: [BLANK_ROW; SCREEN_ROWS],
            inverted: [None; SCREEN_ROWS],
        }
    }
}

impl DisplayBackend for ConsoleDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for row in &mut self.rows {
            row.clear();
        }
        self.inverted = [None; SCREEN_ROWS];
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let line = self
            .rows
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        while line.len() < col as usize {
            line.push(' ').map_err(|_| DisplayError::InvalidCoordinates)?;
        }
        for c in text.chars() {
            line.push(c).map_err(|_| DisplayError::BufferOverflow)?;
        }
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        let slot = self
            .inverted
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        *slot = Some((start_col, end_col));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        debug!("+---------------------+");
        for (row, inverted) in self.rows.iter().zip(self.inverted.iter()) {
            let marker = if inverted.is_some() { '>' } else { '|' };
            debug!("{}{=str}", marker, row.as_str());
        }
        debug!("+---------------------+");
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Display task - redraws the screen when it changed
#[embassy_executor::task]
pub async fn display_task() {
    info!("Display task started");

    let mut display = ConsoleDisplay::new();
    let mut shown = Screen::new();

    loop {
        SCREEN_UPDATE.wait().await;

        let screen = SCREEN_BUFFER.lock().await.clone();
        if screen.lines().eq(shown.lines()) && highlights_match(&screen, &shown) {
            continue;
        }

        if let Err(e) = display.draw_screen(&screen) {
            warn!("Display update failed: {:?}", e);
            continue;
        }
        shown = screen;
    }
}

fn highlights_match(a: &Screen, b: &Screen) -> bool {
    (0..SCREEN_ROWS).all(|row| a.get_highlight(row) == b.get_highlight(row))
}
