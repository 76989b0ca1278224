//! Focus flash - time-decayed highlight after a focus change.
//!
//! The flash is a pure function of a monotonic clock: nothing ticks in the
//! background, values are computed when asked for.
//!
//! # Pattern
//!
//! - A focus change resets the timer and clears any flash in progress
//! - `trigger` resets the timer at full weight (app re-activation, explicit
//!   "look here" requests)
//! - `amount` decays linearly from the weight to zero over the fade time

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::config::FocusConfig;
use crate::types::Rgba;

// =============================================================================
// CLOCK
// =============================================================================

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// =============================================================================
// FLASH STATE
// =============================================================================

/// Flash weight and the instant the focus last changed.
#[derive(Debug, Clone, Copy)]
pub struct FocusFlash {
    weight: f32,
    changed_at: Instant,
    fade: Duration,
    width_min: f32,
    width_max: f32,
    background_alpha_scale: f32,
}

impl FocusFlash {
    pub fn new(config: &FocusConfig, now: Instant) -> Self {
        Self {
            weight: 0.0,
            changed_at: now,
            fade: config.flash_fade(),
            width_min: config.flash_width_min,
            width_max: config.flash_width_max,
            background_alpha_scale: config.background_alpha_scale,
        }
    }

    /// Restart the timer with no flash.
    pub fn reset(&mut self, now: Instant) {
        self.weight = 0.0;
        self.changed_at = now;
    }

    /// Restart the timer at full flash.
    pub fn trigger(&mut self, now: Instant) {
        self.weight = 1.0;
        self.changed_at = now;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.changed_at)
    }

    /// Flash strength in `[0, weight]`.
    pub fn amount(&self, now: Instant) -> f32 {
        let fade = self.fade.as_secs_f32();
        if fade <= 0.0 {
            return 0.0;
        }
        let t = (self.elapsed(now).as_secs_f32() / fade).clamp(0.0, 1.0);
        self.weight * (1.0 - t)
    }

    pub fn width(&self, now: Instant) -> u32 {
        let amount = self.amount(now);
        let width = self.width_min + (self.width_max - self.width_min) * amount;
        width.round().max(0.0) as u32
    }

    /// Focus colour blended toward white by the flash amount.
    ///
    /// While the application is in the background the result is faded so
    /// typing into the wrong window is less likely.
    pub fn color(&self, base: Rgba, now: Instant, app_has_focus: bool) -> Rgba {
        let color = Rgba::lerp(base, Rgba::WHITE, self.amount(now));
        if app_has_focus {
            color
        } else {
            color.scale_alpha(self.background_alpha_scale)
        }
    }
}
