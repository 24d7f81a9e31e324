//! Chain lightning hop planning.
//!
//! Planning is pure: it walks a snapshot of live enemy positions and returns the
//! hops in order. The caller applies damage and draws the links.

use bevy::prelude::*;

use crate::plugins::player::ChainLightning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainHop {
    pub target: Entity,
    pub from: Vec3,
    pub to: Vec3,
}

/// Greedy nearest-first chain starting at `start` (the struck enemy).
///
/// Each hop picks the closest candidate within `chain.radius` of the previously
/// struck position that has not been visited yet; ties go to the earlier
/// candidate. Stops after `chain.targets` hops or when nothing is in range.
pub fn plan_chain(
    start: Entity,
    start_at: Vec3,
    candidates: &[(Entity, Vec3)],
    chain: ChainLightning,
) -> Vec<ChainHop> {
    let mut visited = vec![start];
    let mut hops = Vec::with_capacity(chain.targets as usize);
    let mut from = start_at;

    for _ in 0..chain.targets {
        let mut best: Option<(Entity, Vec3)> = None;
        let mut best_dist = f32::INFINITY;
        for &(entity, at) in candidates {
            if visited.contains(&entity) {
                continue;
            }
            let d = from.distance(at);
            if d <= chain.radius && d < best_dist {
                best = Some((entity, at));
                best_dist = d;
            }
        }
        let Some((target, to)) = best else {
            break;
        };
        visited.push(target);
        hops.push(ChainHop { target, from, to });
        from = to;
    }
    hops
}
