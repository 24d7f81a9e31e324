mod common;

use bevy::prelude::*;

use arena_survivors::plugins::enemies::{spawn_enemy, EnemyStats, Health};
use arena_survivors::plugins::pickups::XpOrb;
use arena_survivors::plugins::player::LightningStrike;
use arena_survivors::plugins::registry::EnemyVariant;

#[test]
fn default_shot_kills_a_twelve_health_enemy_and_drops_one_orb() {
    let mut app = common::booted();
    let target = common::spawn_dummy(&mut app, Vec3::new(5.0, 0.0, 0.0), 12.0, 8.0);

    for _ in 0..10 {
        app.update();
        if common::player(&mut app).kills == 1 {
            break;
        }
    }

    assert_eq!(common::player(&mut app).kills, 1);

    // Credited kills are pruned at the end of the tick.
    assert!(app.world().get_entity(target).is_err());

    let orbs: Vec<XpOrb> = app
        .world_mut()
        .query::<&XpOrb>()
        .iter(app.world())
        .copied()
        .collect();
    assert_eq!(orbs.len(), 1);
    assert!((6..=10).contains(&orbs[0].value), "orb value {}", orbs[0].value);
}

#[test]
fn enemy_touching_the_player_is_consumed() {
    let mut app = common::booted();
    let enemy = common::spawn_dummy(&mut app, Vec3::new(0.5, 0.0, 0.0), 50.0, 8.0);

    common::tick(&mut app, 2);

    assert!(app.world().get_entity(enemy).is_err());
    let player = common::player(&mut app);
    assert_eq!(player.health, 92.0);
    assert_eq!(player.kills, 0);
}

#[test]
fn lightning_sees_enemy_positions_from_before_they_move() {
    let mut app = common::booted();
    common::player_mut(&mut app).loadout.lightning = Some(LightningStrike {
        cooldown: 4.0,
        damage: 10.0,
        radius: 4.5,
    });
    // One tick of movement (5 u/s * 0.1 s) would carry it inside the radius.
    let stats = EnemyStats {
        variant: EnemyVariant::Standard,
        speed: 5.0,
        health: 30.0,
        contact_damage: 8.0,
    };
    let runner = {
        let world = app.world_mut();
        let e = spawn_enemy(&mut world.commands(), stats, Vec3::new(4.6, 0.0, 0.0));
        world.flush();
        e
    };

    common::tick(&mut app, 1);

    assert_eq!(app.world().get::<Health>(runner).expect("health").current, 30.0);
    assert_eq!(common::player(&mut app).lightning_timer, 4.0);
}
