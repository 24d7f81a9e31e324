//! Stacking status effects: a movement slow and a burn-over-time.
//!
//! Re-application never weakens an active effect: the stronger slow factor (lower
//! multiplier) and the higher burn rate win, and the longer remaining duration wins.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct StatusEffects {
    slow_factor: f32,
    slow_remaining: f32,
    burn_dps: f32,
    burn_remaining: f32,
}

impl Default for StatusEffects {
    fn default() -> Self {
        Self {
            slow_factor: 1.0,
            slow_remaining: 0.0,
            burn_dps: 0.0,
            burn_remaining: 0.0,
        }
    }
}

impl StatusEffects {
    pub fn apply_slow(&mut self, factor: f32, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        self.slow_factor = self.slow_factor.min(factor);
        self.slow_remaining = self.slow_remaining.max(duration);
    }

    pub fn apply_burn(&mut self, dps: f32, duration: f32) {
        if dps <= 0.0 || duration <= 0.0 {
            return;
        }
        self.burn_dps = self.burn_dps.max(dps);
        self.burn_remaining = self.burn_remaining.max(duration);
    }

    /// Advance both effects by `dt` and return the burn damage dealt this tick.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let mut burn_damage = 0.0;

        if self.burn_remaining > 0.0 {
            burn_damage = self.burn_dps * dt;
            self.burn_remaining = (self.burn_remaining - dt).max(0.0);
            if self.burn_remaining == 0.0 {
                self.burn_dps = 0.0;
            }
        }

        if self.slow_remaining > 0.0 {
            self.slow_remaining = (self.slow_remaining - dt).max(0.0);
            if self.slow_remaining == 0.0 {
                self.slow_factor = 1.0;
            }
        }

        burn_damage
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        if self.slow_remaining > 0.0 {
            self.slow_factor
        } else {
            1.0
        }
    }

    pub fn slow_factor(&self) -> f32 {
        self.slow_factor
    }

    pub fn slow_remaining(&self) -> f32 {
        self.slow_remaining
    }

    pub fn burn_dps(&self) -> f32 {
        self.burn_dps
    }

    pub fn burn_remaining(&self) -> f32 {
        self.burn_remaining
    }

    pub fn is_burning(&self) -> bool {
        self.burn_remaining > 0.0
    }
}
