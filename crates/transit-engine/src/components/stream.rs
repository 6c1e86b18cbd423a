use glam::Vec3;
use serde::Deserialize;
use crate::core::rng::Rng;

/// Cross-section particles are scattered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamShape {
    /// Square of side `spread` centred on the axis.
    Square,
    /// Disc of radius `spread`.
    Disc,
}

/// How a particle stream is laid out and how fast it flows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamConfig {
    /// Number of particles. Fixed for the lifetime of the stream.
    pub count: usize,
    /// Flow speed along local +z, in units per second.
    pub speed: f32,
    /// Local z particles recycle back to.
    pub origin: f32,
    /// Local z past which a particle recycles.
    pub bound: f32,
    pub shape: StreamShape,
    pub spread: f32,
}

impl StreamConfig {
    /// Starlight photons streaming from the star toward the viewer.
    pub fn photons() -> Self {
        Self {
            count: 6000,
            speed: 30.0,
            origin: 0.0,
            bound: 500.0,
            shape: StreamShape::Square,
            spread: 10.0,
        }
    }

    /// Data beam from the satellite down to Earth.
    pub fn beam() -> Self {
        Self {
            count: 500,
            speed: 20.0,
            origin: -50.0,
            bound: 50.0,
            shape: StreamShape::Disc,
            spread: 0.5,
        }
    }
}

/// A fixed-size set of particles flowing along local +z and wrapping around.
/// Particles are never created or destroyed after construction.
#[derive(Debug, Clone)]
pub struct ParticleStream {
    positions: Vec<Vec3>,
    speed: f32,
    origin: f32,
    bound: f32,
}

impl ParticleStream {
    /// Scatter `config.count` particles over the stream volume.
    pub fn scatter(config: &StreamConfig, rng: &mut Rng) -> Self {
        let positions = (0..config.count)
            .map(|_| {
                let (x, y) = match config.shape {
                    StreamShape::Square => (
                        rng.range(-0.5, 0.5) * config.spread,
                        rng.range(-0.5, 0.5) * config.spread,
                    ),
                    StreamShape::Disc => {
                        let r = rng.next_f32() * config.spread;
                        let theta = rng.next_f32() * std::f32::consts::TAU;
                        (r * theta.cos(), r * theta.sin())
                    }
                };
                Vec3::new(x, y, rng.range(config.origin, config.bound))
            })
            .collect();
        Self::from_positions(positions, config.speed, config.origin, config.bound)
    }

    pub fn from_positions(positions: Vec<Vec3>, speed: f32, origin: f32, bound: f32) -> Self {
        Self { positions, speed, origin, bound }
    }

    /// Move every particle forward. Particles past the bound return to the origin.
    /// Returns how many were recycled.
    pub fn advance(&mut self, dt: f32) -> usize {
        let step = self.speed * dt;
        let mut recycled = 0;
        for p in &mut self.positions {
            p.z += step;
            if p.z > self.bound {
                p.z = self.origin;
                recycled += 1;
            }
        }
        recycled
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as packed xyz floats, for the host to upload directly.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_fills_the_volume() {
        let mut rng = Rng::new(42);
        let config = StreamConfig::photons();
        let stream = ParticleStream::scatter(&config, &mut rng);
        assert_eq!(stream.len(), 6000);
        for p in stream.positions() {
            assert!(p.x.abs() <= 5.0 && p.y.abs() <= 5.0);
            assert!(p.z >= 0.0 && p.z <= 500.0);
        }
    }

    #[test]
    fn disc_stays_within_radius() {
        let mut rng = Rng::new(3);
        let stream = ParticleStream::scatter(&StreamConfig::beam(), &mut rng);
        for p in stream.positions() {
            assert!(p.truncate().length() <= 0.5 + 1e-6);
            assert!(p.z >= -50.0 && p.z <= 50.0);
        }
    }

    #[test]
    fn particle_past_bound_recycles_to_origin() {
        let mut stream = ParticleStream::from_positions(
            vec![Vec3::new(1.0, 2.0, 499.9), Vec3::new(0.0, 0.0, 10.0)],
            30.0,
            0.0,
            500.0,
        );
        let recycled = stream.advance(1.0 / 60.0);
        assert_eq!(recycled, 1);
        assert_eq!(stream.positions()[0], Vec3::new(1.0, 2.0, 0.0));
        assert!((stream.positions()[1].z - 10.5).abs() < 1e-5);
        assert_eq!(stream.len(), 2);
        assert_eq!(&stream.positions_flat()[..3], &[1.0, 2.0, 0.0]);
        assert_eq!(stream.positions_flat().len(), 6);
    }

    #[test]
    fn count_never_changes() {
        let mut rng = Rng::new(9);
        let mut stream = ParticleStream::scatter(&StreamConfig::beam(), &mut rng);
        for _ in 0..1000 {
            stream.advance(0.1);
            assert_eq!(stream.len(), 500);
        }
        assert!(stream.positions().iter().all(|p| p.z >= -50.0 && p.z <= 50.0));
    }
}
