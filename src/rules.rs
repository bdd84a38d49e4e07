//! Flocking rules: separation and alignment.
//!
//! Every rule scans the whole flock, so one tick costs O(n^2) distance
//! checks. That is fine for the flock sizes this crate targets.

use crate::boid::Boid;
use crate::config::WorldConfig;
use crate::vector::{Vec2, limit, normalize_or_keep};

/// Weighted mean of `own heading - neighbour heading` over the boids within
/// the neighbourhood radius. Zero when there are no neighbours. Exactly
/// opposed headings produce a change along the boid's own heading, so the
/// pair stays opposed.
pub fn alignment_change(index: usize, flock: &[Boid], config: &WorldConfig) -> Vec2 {
    let boid = &flock[index];
    let mut change = Vec2::zeros();
    let mut count = 0usize;
    for (other_index, other) in flock.iter().enumerate() {
        if other_index == index {
            continue;
        }
        let distance = (boid.position - other.position).magnitude();
        if distance < config.neighbourhood_radius {
            change += boid.heading - other.heading;
            count += 1;
        }
    }
    if count > 0 {
        change /= count as f32;
    }
    change * config.alignment_weight
}

/// Weighted change that steers `flock[index]` away from boids closer than
/// the separation distance. Each push is scaled by `1 / distance`, so the
/// closest boids dominate.
///
/// The boid itself is part of `flock` and drops out because its distance
/// to itself is exactly zero.
pub fn separation_change(index: usize, flock: &[Boid], config: &WorldConfig) -> Vec2 {
    let boid = &flock[index];
    let mut change = Vec2::zeros();
    let mut count = 0usize;
    for other in flock {
        let diff = boid.position - other.position;
        let distance = diff.magnitude();
        if distance > 0.0 && distance < config.separation_distance {
            change += normalize_or_keep(diff) / distance;
            count += 1;
        }
    }
    if count > 0 {
        change /= count as f32;
    }
    change * config.separation_weight
}

/// Combined rule output, clamped to `change_limit`.
pub fn heading_change(index: usize, flock: &[Boid], config: &WorldConfig) -> Vec2 {
    let total = alignment_change(index, flock, config) + separation_change(index, flock, config);
    limit(total, config.change_limit)
}

/// The heading `flock[index]` should have after this tick, given the state
/// of the whole flock. If the new heading would be the zero vector the
/// current one is kept.
pub fn steer(index: usize, flock: &[Boid], config: &WorldConfig) -> Vec2 {
    let heading = flock[index].heading;
    (heading + heading_change(index, flock, config))
        .try_normalize(0.0)
        .unwrap_or(heading)
}
