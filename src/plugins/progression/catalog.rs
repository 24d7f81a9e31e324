//! Static upgrade catalog.
//!
//! Each entry mutates the player in place. Abilities that start disabled are
//! initialised on the first pick and scaled on every later pick.

use crate::common::rng::SimRng;
use crate::plugins::player::{Burn, ChainLightning, Chill, LightningStrike, Player};
use crate::plugins::projectiles::{AreaOfEffect, Element};

pub type UpgradeFn = fn(&mut Player);

#[derive(Debug)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    apply: UpgradeFn,
}

impl UpgradeDef {
    pub fn apply(&self, player: &mut Player) {
        (self.apply)(player);
    }
}

const fn def(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    apply: UpgradeFn,
) -> UpgradeDef {
    UpgradeDef {
        id,
        name,
        description,
        icon,
        apply,
    }
}

pub static CATALOG: [UpgradeDef; 18] = [
    def("fireRate", "Rapid Fire", "Fire 0.08s faster", "⚡", |p| {
        p.loadout.fire_cooldown = (p.loadout.fire_cooldown - 0.08).max(0.1);
    }),
    def("aoeSpell", "Arcane Burst", "+4 projectile damage", "💥", |p| {
        p.loadout.projectile_damage += 4.0;
        p.loadout.aoe.get_or_insert_with(AreaOfEffect::default);
    }),
    def("healthBoost", "Vitality", "+25 max health, full heal", "❤", |p| {
        p.max_health += 25.0;
        p.health = p.max_health;
    }),
    def("damageUp", "Sharpened Spells", "+3 projectile damage", "🗡", |p| {
        p.loadout.projectile_damage += 3.0;
    }),
    def("speedUp", "Swiftness", "+20% movement speed", "👟", |p| {
        p.speed *= 1.2;
    }),
    def("multiShot", "Multishot", "+2 projectiles per shot, +2 damage", "🎯", |p| {
        p.loadout.multi_shot_count += 2;
        p.loadout.projectile_damage += 2.0;
    }),
    def("piercing", "Piercing Bolts", "Projectiles pass through enemies, +2 damage", "➹", |p| {
        p.loadout.piercing = true;
        p.loadout.projectile_damage += 2.0;
    }),
    def("lifeSteal", "Life Steal", "Heal 2 per kill", "🩸", |p| {
        p.loadout.life_steal += 2.0;
    }),
    def("doubleHealth", "Giant's Heart", "Double max health, full heal", "💗", |p| {
        p.max_health *= 2.0;
        p.health = p.max_health;
    }),
    def("projectileSize", "Big Bolts", "Projectiles 50% larger", "⬤", |p| {
        p.loadout.projectile_size *= 1.5;
    }),
    def("knockback", "Force Push", "Hits knock enemies back", "💨", |p| {
        let force = p.loadout.knockback.unwrap_or(1.0);
        p.loadout.knockback = Some(force + 2.0);
    }),
    def("regen", "Regeneration", "Regenerate 0.1 health per second", "✚", |p| {
        p.loadout.regen_rate += 0.1;
    }),
    def("critChance", "Critical Strikes", "+25% chance to deal double damage", "✦", |p| {
        p.loadout.crit_chance += 0.25;
        p.loadout.crit_multiplier = p.loadout.crit_multiplier.max(2.0);
    }),
    def("xpMagnet", "XP Magnet", "Pull experience orbs from further away", "🧲", |p| {
        p.loadout.pickup_radius += 0.6;
        p.loadout.magnet_radius += 3.0;
    }),
    def("lightningStrike", "Lightning Strike", "Periodically strike nearby enemies", "🌩", |p| {
        p.loadout.lightning = Some(match p.loadout.lightning {
            None => LightningStrike {
                cooldown: 4.0,
                damage: 10.0,
                radius: 4.5,
            },
            Some(l) => LightningStrike {
                cooldown: (l.cooldown * 0.85).max(1.2),
                damage: l.damage + 3.0,
                radius: l.radius + 0.5,
            },
        });
    }),
    def("chainLightning", "Chain Lightning", "Hits arc to nearby enemies", "⛓", |p| {
        p.loadout.chain = Some(match p.loadout.chain {
            None => ChainLightning {
                targets: 2,
                radius: 5.0,
                damage_multiplier: 0.6,
            },
            Some(c) => ChainLightning {
                targets: c.targets + 1,
                radius: c.radius + 0.8,
                damage_multiplier: (c.damage_multiplier + 0.05).min(0.85),
            },
        });
    }),
    def("fireball", "Fireball", "Fire shots set enemies ablaze", "🔥", |p| {
        p.loadout.fireball = Some(match p.loadout.fireball {
            None => Burn {
                dps: 4.0,
                duration: 3.0,
            },
            Some(b) => Burn {
                dps: b.dps + 1.5,
                duration: b.duration + 0.6,
            },
        });
        p.loadout.rotation.enable(Element::Fire);
    }),
    def("frostbolt", "Frostbolt", "Frost shots slow enemies", "❄", |p| {
        p.loadout.frostbolt = Some(match p.loadout.frostbolt {
            None => Chill {
                factor: 0.6,
                duration: 2.5,
            },
            Some(c) => Chill {
                factor: (c.factor - 0.05).max(0.4),
                duration: c.duration + 0.4,
            },
        });
        p.loadout.rotation.enable(Element::Frost);
    }),
];

pub fn catalog() -> &'static [UpgradeDef] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static UpgradeDef> {
    CATALOG.iter().find(|u| u.id == id)
}

/// `count` distinct upgrades, drawn without replacement.
pub fn random_upgrades(rng: &mut SimRng, count: usize) -> Vec<&'static UpgradeDef> {
    rng.sample_indices(CATALOG.len(), count)
        .into_iter()
        .map(|i| &CATALOG[i])
        .collect()
}

/// Apply the upgrade with `id`. Returns false for unknown ids.
pub fn apply_upgrade(player: &mut Player, id: &str) -> bool {
    let Some(upgrade) = find(id) else {
        return false;
    };
    upgrade.apply(player);
    true
}
