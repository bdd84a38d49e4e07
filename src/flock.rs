use std::f32::consts::TAU;

use rand::Rng;
use rayon::prelude::*;
use tracing::{info, trace};

use crate::boid::Boid;
use crate::config::{ConfigError, WorldConfig};
use crate::rules::steer;
use crate::vector::{Vec2, vec2};

/// How one tick orders the heading, move and wrap updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TickOrder {
    /// Every heading is computed from the state at the start of the tick,
    /// then all boids move, then all boids wrap.
    #[default]
    Snapshot,
    /// Each boid steers, moves and wraps before the next one is looked at,
    /// so later boids see earlier boids' new state. Depends on iteration
    /// order; kept to reproduce the classic sketch's trajectories.
    Interleaved,
}

#[derive(Debug, Clone)]
pub struct Flock {
    boids: Vec<Boid>,
    config: WorldConfig,
    order: TickOrder,
    ticks: u64,
}

impl Flock {
    /// Creates `count` boids spread uniformly over the playfield with
    /// uniformly random headings drawn from `rng`.
    pub fn initialize<R: Rng>(
        count: usize,
        config: WorldConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if count == 0 {
            return Err(ConfigError::EmptyFlock);
        }
        let boids = (0..count)
            .map(|_| {
                let position = vec2(
                    rng.random_range(0.0..config.width),
                    rng.random_range(0.0..config.height),
                );
                Boid::new(position, random_heading(rng))
            })
            .collect();
        info!(count, width = config.width, height = config.height, "flock initialised");
        Ok(Flock {
            boids,
            config,
            order: TickOrder::default(),
            ticks: 0,
        })
    }

    /// Builds a flock from boids placed by the caller. Positions and
    /// headings must be finite and headings non-zero; headings are scaled to
    /// unit length.
    pub fn from_boids(mut boids: Vec<Boid>, config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if boids.is_empty() {
            return Err(ConfigError::EmptyFlock);
        }
        for (index, boid) in boids.iter_mut().enumerate() {
            if !boid.position.iter().all(|c| c.is_finite()) {
                return Err(ConfigError::InvalidBoid {
                    index,
                    problem: "a non-finite position",
                });
            }
            if !boid.heading.iter().all(|c| c.is_finite()) {
                return Err(ConfigError::InvalidBoid {
                    index,
                    problem: "a non-finite heading",
                });
            }
            boid.heading = boid
                .heading
                .try_normalize(0.0)
                .ok_or(ConfigError::InvalidBoid {
                    index,
                    problem: "a zero-length heading",
                })?;
        }
        Ok(Flock {
            boids,
            config,
            order: TickOrder::default(),
            ticks: 0,
        })
    }

    pub fn with_order(mut self, order: TickOrder) -> Self {
        self.order = order;
        self
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn order(&self) -> TickOrder {
        self.order
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) {
        match self.order {
            TickOrder::Snapshot => tick(&mut self.boids, &self.config),
            TickOrder::Interleaved => tick_interleaved(&mut self.boids, &self.config),
        }
        self.ticks += 1;
        trace!(tick = self.ticks, boids = self.boids.len(), "tick complete");
    }
}

fn random_heading<R: Rng>(rng: &mut R) -> Vec2 {
    let angle: f32 = rng.random_range(0.0..TAU);
    vec2(angle.cos(), angle.sin())
}

/// Snapshot tick. Headings are gathered from the untouched flock (in
/// parallel), then applied, then every boid moves, then every boid wraps.
pub fn tick(boids: &mut [Boid], config: &WorldConfig) {
    let snapshot: &[Boid] = &*boids;
    let headings: Vec<Vec2> = (0..snapshot.len())
        .into_par_iter()
        .map(|index| steer(index, snapshot, config))
        .collect();

    for (boid, heading) in boids.iter_mut().zip(headings) {
        boid.heading = heading;
    }
    for boid in boids.iter_mut() {
        boid.advance(config);
    }
    for boid in boids.iter_mut() {
        boid.wrap_around(config);
    }
}

/// Per-boid steer, move, wrap in iteration order.
pub fn tick_interleaved(boids: &mut [Boid], config: &WorldConfig) {
    for index in 0..boids.len() {
        let heading = steer(index, boids, config);
        let boid = &mut boids[index];
        boid.heading = heading;
        boid.advance(config);
        boid.wrap_around(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{limit, normalize_or_keep};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn initialize_places_boids_inside_the_playfield() {
        let config = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let flock = Flock::initialize(200, config, &mut rng).expect("valid flock");
        assert_eq!(flock.boids().len(), 200);
        for boid in flock.boids() {
            assert!((0.0..config.width).contains(&boid.position.x));
            assert!((0.0..config.height).contains(&boid.position.y));
            assert!((boid.heading.magnitude() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn initialize_rejects_empty_flock() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let result = Flock::initialize(0, WorldConfig::default(), &mut rng);
        assert!(matches!(result, Err(ConfigError::EmptyFlock)));
    }

    #[test]
    fn initialize_rejects_bad_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = WorldConfig {
            neighbourhood_radius: -5.0,
            ..WorldConfig::default()
        };
        let result = Flock::initialize(10, config, &mut rng);
        assert!(matches!(result, Err(ConfigError::NotPositive { .. })));
    }

    #[test]
    fn from_boids_rejects_degenerate_boids() {
        let config = WorldConfig::default();
        let cases = [
            (vec2(f32::NAN, 10.0), vec2(1.0, 0.0), "a non-finite position"),
            (vec2(10.0, 10.0), vec2(f32::INFINITY, 0.0), "a non-finite heading"),
            (vec2(10.0, 10.0), Vec2::zeros(), "a zero-length heading"),
        ];
        for (position, heading, expected) in cases {
            let boids = vec![
                Boid::new(vec2(0.0, 0.0), vec2(0.0, 1.0)),
                Boid::new(position, heading),
            ];
            match Flock::from_boids(boids, config) {
                Err(ConfigError::InvalidBoid { index, problem }) => {
                    assert_eq!(index, 1);
                    assert_eq!(problem, expected);
                }
                other => panic!("expected InvalidBoid, got {other:?}"),
            }
        }
    }

    #[test]
    fn from_boids_scales_headings_to_unit_length() {
        let boids = vec![Boid::new(vec2(10.0, 10.0), vec2(3.0, 4.0))];
        let flock = Flock::from_boids(boids, WorldConfig::default()).expect("valid boids");
        let heading = flock.boids()[0].heading;
        assert!((heading.x - 0.6).abs() < 1e-6);
        assert!((heading.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn tick_counts_steps() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut flock = Flock::initialize(5, WorldConfig::default(), &mut rng).expect("valid flock");
        flock.tick();
        flock.tick();
        assert_eq!(flock.ticks(), 2);
    }

    #[test]
    fn snapshot_tick_does_not_depend_on_order() {
        let config = WorldConfig::default();
        let a = Boid::new(vec2(100.0, 100.0), vec2(1.0, 0.0));
        let b = Boid::new(vec2(120.0, 110.0), vec2(0.0, 1.0));

        let mut forward = vec![a.clone(), b.clone()];
        let mut reversed = vec![b, a];
        tick(&mut forward, &config);
        tick(&mut reversed, &config);

        assert_eq!(forward[0], reversed[1]);
        assert_eq!(forward[1], reversed[0]);
    }

    #[test]
    fn interleaved_tick_lets_later_boids_see_earlier_moves() {
        let config = WorldConfig::default();
        let flock = vec![
            Boid::new(vec2(100.0, 100.0), vec2(1.0, 0.0)),
            Boid::new(vec2(120.0, 110.0), vec2(0.0, 1.0)),
        ];

        let mut snapshot = flock.clone();
        let mut interleaved = flock;
        tick(&mut snapshot, &config);
        tick_interleaved(&mut interleaved, &config);

        // The first boid sees the same world either way.
        assert_eq!(snapshot[0], interleaved[0]);
        assert_ne!(snapshot[1], interleaved[1]);
    }

    #[test]
    fn interleaved_tick_matches_hand_computed_sketch_step() {
        let config = WorldConfig {
            separation_weight: 0.0,
            ..WorldConfig::default()
        };
        let a = vec2(1.0, 0.0);
        let b = vec2(0.0, 1.0);
        let mut boids = vec![
            Boid::new(vec2(100.0, 100.0), a),
            Boid::new(vec2(150.0, 100.0), b),
        ];
        tick_interleaved(&mut boids, &config);

        let expected = normalize_or_keep(a + limit(a - b, config.change_limit));
        assert!((boids[0].heading - expected).magnitude() < 1e-6);
        assert!((expected.x - 0.99238).abs() < 1e-4);
        assert!((expected.y + 0.12295).abs() < 1e-4);
        assert!((boids[0].position - (vec2(100.0, 100.0) + expected * config.speed)).magnitude() < 1e-4);

        // The second boid steers against the first boid's new heading.
        let expected = normalize_or_keep(b + limit(b - boids[0].heading, config.change_limit));
        assert!((boids[1].heading - expected).magnitude() < 1e-6);
    }
}
