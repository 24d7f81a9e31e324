//! Player plugin.
//!
//! Pipeline (all inside the simulation chain):
//! - Input: copy the `MoveIntent` resource into the player's velocity.
//! - Entities: fire/auto-cast/lightning timers, regen, movement and arena clamp.
//!   Runs before enemies move, so targeting and lightning see last tick's positions.
//!
//! The player is spawned once at startup and respawned on restart; it is never
//! pruned, even after death.

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::{damage_enemy, pursue_player, Enemy, EnemyLifeState, Health};
use crate::plugins::projectiles::{spawn_projectile, Projectile};
use crate::plugins::registry::{Active, Appearance, EntityKind, Position, Shape, GROUND_Y};
use crate::plugins::session::SimSet;

pub mod firing;
pub mod loadout;

pub use loadout::{Burn, ChainLightning, Chill, ElementRotation, LightningStrike, Loadout};

/// Movement intent from the input collaborator, in `[-1, 1]²` with magnitude ≤ 1.
/// `y` maps to the arena's Z axis.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent(pub Vec2);

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub xp: u32,
    pub kills: u32,
    pub speed: f32,
    pub velocity: Vec3,
    pub fire_timer: f32,
    pub auto_cast_timer: f32,
    pub lightning_timer: f32,
    pub loadout: Loadout,
    alive: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            health: 100.0,
            max_health: 100.0,
            level: 1,
            xp: 0,
            kills: 0,
            speed: 9.0,
            velocity: Vec3::ZERO,
            fire_timer: 0.0,
            auto_cast_timer: Tunables::default().auto_cast_cooldown,
            lightning_timer: 0.0,
            loadout: Loadout::default(),
            alive: true,
        }
    }
}

/// XP needed to go from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u32 {
    30 + level.saturating_sub(1) * 12
}

impl Player {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// One-way transition.
    pub fn die(&mut self) {
        self.alive = false;
        self.velocity = Vec3::ZERO;
    }

    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.die();
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Add XP and return how many levels were gained.
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= xp_for_next_level(self.level) {
            self.xp -= xp_for_next_level(self.level);
            self.level += 1;
            self.on_level_up();
            gained += 1;
        }
        gained
    }

    fn on_level_up(&mut self) {
        self.max_health += 6.0;
        self.heal(6.0);
        self.loadout.fire_cooldown = (self.loadout.fire_cooldown - 0.03).max(0.1);
        self.loadout.projectile_damage += 1.2;
    }

    pub fn set_move_intent(&mut self, intent: Vec2) {
        if !self.alive {
            return;
        }
        let intent = intent.clamp_length_max(1.0);
        self.velocity = Vec3::new(intent.x * self.speed, 0.0, intent.y * self.speed);
    }

    pub fn regenerate(&mut self, dt: f32) {
        if self.loadout.regen_rate > 0.0 {
            self.heal(self.loadout.regen_rate * dt);
        }
    }

    /// Integrate velocity, pin to the ground and clamp into the arena.
    pub fn step(&self, position: &mut Vec3, dt: f32, half_extent: f32) {
        *position += self.velocity * dt;
        position.y = GROUND_Y;
        position.x = position.x.clamp(-half_extent, half_extent);
        position.z = position.z.clamp(-half_extent, half_extent);
    }
}

/// A fresh player; the first element auto-cast waits a full cooldown.
pub fn player_bundle(tunables: &Tunables) -> impl Bundle {
    let player = Player {
        auto_cast_timer: tunables.auto_cast_cooldown,
        ..default()
    };
    (
        Name::new("Player"),
        player,
        EntityKind::Player,
        Position(Vec3::new(0.0, GROUND_Y, 0.0)),
        Active(true),
        Appearance::new(Shape::Sphere, Color::srgb_u8(0x34, 0x98, 0xdb), 0.5),
    )
}

pub fn plugin(app: &mut App) {
    app.init_resource::<MoveIntent>()
        .add_systems(Startup, spawn)
        .add_systems(FixedUpdate, apply_move_intent.in_set(SimSet::Input))
        .add_systems(
            FixedUpdate,
            update_player.before(pursue_player).in_set(SimSet::Entities),
        );
}

pub fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn(player_bundle(&tunables));
}

fn apply_move_intent(intent: Res<MoveIntent>, mut q_player: Query<&mut Player>) {
    let Ok(mut player) = q_player.single_mut() else {
        return;
    };
    player.set_move_intent(intent.0);
}

/// Linear scan for the closest candidate by squared distance; the first wins ties.
pub fn find_nearest_enemy(
    origin: Vec3,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Option<(Entity, Vec3)> {
    let mut best: Option<(Entity, Vec3)> = None;
    let mut best_d2 = f32::INFINITY;
    for (entity, at) in candidates {
        let d2 = origin.distance_squared(at);
        if d2 < best_d2 {
            best_d2 = d2;
            best = Some((entity, at));
        }
    }
    best
}

type EnemyTargets<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static EntityKind,
        &'static Position,
        &'static mut Health,
        &'static mut Active,
        &'static mut EnemyLifeState,
    ),
    (With<Enemy>, Without<Player>),
>;

fn update_player(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut rng: ResMut<SimRng>,
    mut q_player: Query<(&mut Player, &mut Position), Without<Enemy>>,
    mut q_enemies: EnemyTargets,
) {
    let Ok((mut player, mut position)) = q_player.single_mut() else {
        return;
    };
    if !player.is_alive() {
        return;
    }
    let dt = time.delta_secs();
    let origin = position.0.with_y(GROUND_Y);

    let target = find_nearest_enemy(
        origin,
        q_enemies
            .iter()
            .filter(|(_, kind, _, _, active, _)| kind.is_enemy_faction() && active.is_active())
            .map(|(e, _, pos, ..)| (e, pos.0)),
    );

    // Primary weapon.
    player.fire_timer -= dt;
    if let Some((_, aim)) = target
        && player.fire_timer <= 0.0
    {
        player.fire_timer = player.loadout.fire_cooldown;
        let volley = match player.loadout.rotation.next() {
            Some(element) => firing::elemental_volley(
                &player.loadout,
                origin,
                aim,
                element,
                1.0,
                &tunables,
                &mut rng,
            ),
            None => firing::plain_volley(&player.loadout, origin, aim, &tunables, &mut rng),
        };
        for projectile in volley {
            spawn_projectile(&mut commands, projectile, origin);
        }
    }

    // Element auto-cast.
    player.auto_cast_timer -= dt;
    if player.auto_cast_timer <= 0.0 {
        player.auto_cast_timer = tunables.auto_cast_cooldown;
        if let Some((_, aim)) = target
            && let Some(element) = player.loadout.rotation.next()
        {
            let volley = firing::elemental_volley(
                &player.loadout,
                origin,
                aim,
                element,
                firing::AUTO_CAST_DAMAGE_SCALE,
                &tunables,
                &mut rng,
            );
            for projectile in volley {
                spawn_projectile(&mut commands, projectile, origin);
            }
        }
    }

    // Lightning strike.
    if let Some(strike) = player.loadout.lightning {
        player.lightning_timer -= dt;
        if player.lightning_timer <= 0.0 {
            player.lightning_timer = strike.cooldown;
            cast_lightning_strike(&mut commands, origin, strike, &mut q_enemies);
        }
    }

    player.regenerate(dt);
    player.step(&mut position.0, dt, tunables.arena_half_extent);
}

/// Damage every live enemy within the strike radius and mark each one.
/// Kills are left `Slain` for the collision pass to credit.
fn cast_lightning_strike(
    commands: &mut Commands,
    origin: Vec3,
    strike: LightningStrike,
    q_enemies: &mut EnemyTargets,
) {
    let mut struck = 0u32;
    for (_, kind, pos, mut health, mut active, mut life) in q_enemies.iter_mut() {
        if !kind.is_enemy_faction() || !active.is_active() {
            continue;
        }
        if pos.distance(origin) > strike.radius {
            continue;
        }
        if damage_enemy(&mut health, &mut active, strike.damage) {
            *life = EnemyLifeState::Slain;
        }
        spawn_projectile(commands, Projectile::strike_marker(), pos.0);
        struck += 1;
    }
    debug!(struck, "lightning strike");
}
