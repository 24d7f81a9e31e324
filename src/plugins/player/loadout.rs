//! The player's upgradeable weapon and utility stats.
//!
//! Abilities that are off until first picked (`lightning`, `chain`, `fireball`,
//! `frostbolt`, `aoe`, `knockback`) are `Option`s: the first pick initialises them,
//! later picks scale them.

use crate::plugins::projectiles::{AreaOfEffect, Element, Modifiers, Payload};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightningStrike {
    pub cooldown: f32,
    pub damage: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainLightning {
    pub targets: u32,
    pub radius: f32,
    pub damage_multiplier: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burn {
    pub dps: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chill {
    pub factor: f32,
    pub duration: f32,
}

/// Round-robin queue of enabled elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementRotation {
    queue: Vec<Element>,
    cursor: usize,
}

impl ElementRotation {
    /// Append `element` once; only fire and frost rotate.
    pub fn enable(&mut self, element: Element) {
        if !matches!(element, Element::Fire | Element::Frost) || self.queue.contains(&element) {
            return;
        }
        self.queue.push(element);
    }

    pub fn next(&mut self) -> Option<Element> {
        if self.queue.is_empty() {
            return None;
        }
        let element = self.queue[self.cursor % self.queue.len()];
        self.cursor = (self.cursor + 1) % self.queue.len();
        Some(element)
    }

    pub fn elements(&self) -> &[Element] {
        &self.queue
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loadout {
    pub projectile_damage: f32,
    pub fire_cooldown: f32,
    pub multi_shot_count: u32,
    pub piercing: bool,
    pub life_steal: f32,
    pub projectile_size: f32,
    pub knockback: Option<f32>,
    pub regen_rate: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub aoe: Option<AreaOfEffect>,
    pub pickup_radius: f32,
    pub magnet_radius: f32,
    pub lightning: Option<LightningStrike>,
    pub chain: Option<ChainLightning>,
    pub fireball: Option<Burn>,
    pub frostbolt: Option<Chill>,
    pub rotation: ElementRotation,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            projectile_damage: 12.0,
            fire_cooldown: 0.55,
            multi_shot_count: 0,
            piercing: false,
            life_steal: 0.0,
            projectile_size: 1.0,
            knockback: None,
            regen_rate: 0.0,
            crit_chance: 0.0,
            crit_multiplier: 1.0,
            aoe: None,
            pickup_radius: 1.0,
            magnet_radius: 0.0,
            lightning: None,
            chain: None,
            fireball: None,
            frostbolt: None,
            rotation: ElementRotation::default(),
        }
    }
}

impl Loadout {
    pub fn projectile_modifiers(&self) -> Modifiers {
        Modifiers {
            aoe: self.aoe,
            piercing: self.piercing,
            size: self.projectile_size,
            knockback: self.knockback,
        }
    }

    /// Status payload for an elemental shot; `None` if the element is not unlocked.
    pub fn payload_for(&self, element: Element) -> Option<Payload> {
        match element {
            Element::Fire => self.fireball.map(|b| Payload::Burn {
                dps: b.dps,
                duration: b.duration,
            }),
            Element::Frost => self.frostbolt.map(|c| Payload::Slow {
                factor: c.factor,
                duration: c.duration,
            }),
            Element::Plain | Element::Lightning => None,
        }
    }
}
