use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::plugins::registry::{Appearance, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Element {
    #[default]
    Plain,
    Fire,
    Frost,
    /// Cosmetic lightning markers and chain links.
    Lightning,
}

/// Status effect carried by an elemental projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    Burn { dps: f32, duration: f32 },
    Slow { factor: f32, duration: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaOfEffect {
    pub radius: f32,
    pub multiplier: f32,
}

impl Default for AreaOfEffect {
    fn default() -> Self {
        Self {
            radius: 3.0,
            multiplier: 0.6,
        }
    }
}

/// Hit modifiers copied from the player's loadout at fire time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    pub aoe: Option<AreaOfEffect>,
    pub piercing: bool,
    pub size: f32,
    /// Knockback force; `None` when disabled.
    pub knockback: Option<f32>,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            aoe: None,
            piercing: false,
            size: 1.0,
            knockback: None,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    direction: Vec3,
    pub speed: f32,
    pub damage: f32,
    pub lifetime: f32,
    pub age: f32,
    pub element: Element,
    pub modifiers: Modifiers,
    pub payload: Option<Payload>,
    /// Visual-only; never collides.
    pub cosmetic: bool,
    hit: HashSet<Entity>,
}

impl Projectile {
    /// `direction` is flattened onto the X/Z plane and normalized (zero stays zero).
    pub fn new(direction: Vec3, speed: f32, damage: f32, lifetime: f32) -> Self {
        Self {
            direction: direction.with_y(0.0).normalize_or_zero(),
            speed,
            damage,
            lifetime,
            age: 0.0,
            element: Element::Plain,
            modifiers: Modifiers::default(),
            payload: None,
            cosmetic: false,
            hit: HashSet::default(),
        }
    }

    /// Stationary marker drawn on an enemy hit by a lightning strike.
    pub fn strike_marker() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0, 0.15)
            .with_element(Element::Lightning)
            .with_modifiers(Modifiers {
                piercing: true,
                size: 0.6,
                ..default()
            })
            .into_cosmetic()
    }

    /// Short-lived link drawn from one chain lightning target to the next.
    pub fn chain_link(direction: Vec3) -> Self {
        Self::new(direction, 120.0, 0.0, 0.08)
            .with_element(Element::Lightning)
            .with_modifiers(Modifiers {
                piercing: true,
                size: 0.4,
                ..default()
            })
            .into_cosmetic()
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_payload(mut self, payload: Option<Payload>) -> Self {
        self.payload = payload;
        self
    }

    pub fn into_cosmetic(mut self) -> Self {
        self.cosmetic = true;
        self
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn hit_radius(&self) -> f32 {
        1.0 + self.modifiers.size * 0.3
    }

    #[inline]
    pub fn has_hit(&self, enemy: Entity) -> bool {
        self.hit.contains(&enemy)
    }

    pub fn record_hit(&mut self, enemy: Entity) {
        self.hit.insert(enemy);
    }

    pub fn hit_count(&self) -> usize {
        self.hit.len()
    }

    pub fn appearance(&self) -> Appearance {
        let color = match self.element {
            Element::Plain => Color::srgb_u8(0x9b, 0x59, 0xb6),
            Element::Fire => Color::srgb_u8(0xe7, 0x4c, 0x3c),
            Element::Frost => Color::srgb_u8(0x5d, 0xad, 0xe2),
            Element::Lightning => Color::srgb_u8(0xf4, 0xd0, 0x3f),
        };
        Appearance::new(Shape::Sphere, color, 0.2 * self.modifiers.size)
    }
}
