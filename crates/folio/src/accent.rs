//! Accent flash for users who keep flipping the theme.

use folio_overlays::TimedFlag;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::style::Color;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Colors a flash may use.
pub const ACCENT_POOL: [Color; 5] = [
    Color::Rgb(0xFF, 0x69, 0xB4),
    Color::Rgb(0x00, 0xFF, 0x00),
    Color::Rgb(0x00, 0xFF, 0xFF),
    Color::Rgb(0xFF, 0x14, 0x93),
    Color::Rgb(0xFF, 0xD7, 0x00),
];

/// Toggles before flashing starts; the fifth toggle is the first to flash.
pub const FLASH_AFTER_TOGGLES: u32 = 4;

/// How long a flash stays on screen.
pub const FLASH_DURATION: Duration = Duration::from_millis(500);

/// Counts theme toggles and flashes a random accent once they pile up.
#[derive(Debug)]
pub struct AccentFlash {
    toggles: u32,
    color: Color,
    flag: TimedFlag,
    rng: StdRng,
}

impl AccentFlash {
    /// A counter at zero with an OS-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A counter at zero drawing colors from `rng`.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            toggles: 0,
            color: ACCENT_POOL[0],
            flag: TimedFlag::new(FLASH_DURATION),
            rng,
        }
    }

    /// Toggles seen this session.
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    /// Records a theme toggle, returning the flash color if one started.
    #[instrument(skip(self), fields(toggles = self.toggles))]
    pub fn on_toggle(&mut self, now: Instant) -> Option<Color> {
        let flashes = self.toggles >= FLASH_AFTER_TOGGLES;
        self.toggles = self.toggles.saturating_add(1);
        if !flashes {
            return None;
        }

        self.color = ACCENT_POOL[self.rng.random_range(0..ACCENT_POOL.len())];
        self.flag.activate(now);
        debug!(color = ?self.color, "Accent flash");
        Some(self.color)
    }

    /// The flash color while a flash is showing.
    pub fn current(&self) -> Option<Color> {
        self.flag.is_active().then_some(self.color)
    }

    /// When the current flash ends.
    pub fn deadline(&self) -> Option<Instant> {
        self.flag.deadline()
    }

    /// Ends a flash whose time is up.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.flag.poll(now)
    }
}

impl Default for AccentFlash {
    fn default() -> Self {
        Self::new()
    }
}
