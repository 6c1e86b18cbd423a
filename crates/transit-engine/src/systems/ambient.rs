use crate::api::show::ShowContext;
use crate::api::types::ObjectId;

/// Continuous per-frame motion that runs whatever the scroll position:
/// shader time, satellite and Earth spin, particle drift.
/// Advances the clock and returns the delta it applied.
pub fn tick_ambient(ctx: &mut ShowContext, frame_dt: f32) -> f32 {
    let dt = ctx.clock.advance(frame_dt);
    let time = ctx.clock.elapsed();

    for obj in ctx.scene.iter_mut() {
        obj.uniforms.time = time;
    }
    ctx.scene.get_mut(ObjectId::Satellite).rotation.z += ctx.config.satellite_spin * dt;
    ctx.scene.get_mut(ObjectId::RelayBody).rotation.y += ctx.config.relay_spin * dt;

    let recycled = ctx.photons.advance(dt) + ctx.beam.advance(dt);
    if recycled > 0 {
        log::trace!("recycled {recycled} particles");
    }
    dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::show::ShowConfig;

    fn small_config() -> ShowConfig {
        let mut config = ShowConfig::default();
        config.photons.count = 64;
        config.beam.count = 16;
        config
    }

    #[test]
    fn time_uniform_tracks_the_clock() {
        let mut ctx = ShowContext::new(small_config());
        tick_ambient(&mut ctx, 0.05);
        tick_ambient(&mut ctx, 0.05);
        for obj in ctx.scene.iter() {
            assert!((obj.uniforms.time - 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn spins_at_configured_rates() {
        let mut ctx = ShowContext::new(small_config());
        let before = ctx.scene.get(ObjectId::Satellite).rotation;
        for _ in 0..10 {
            tick_ambient(&mut ctx, 0.1);
        }
        let after = ctx.scene.get(ObjectId::Satellite).rotation;
        assert!((after.z - before.z - 0.12).abs() < 1e-5);
        assert_eq!(after.y, before.y);
        assert!((ctx.scene.get(ObjectId::RelayBody).rotation.y - 0.06).abs() < 1e-5);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut ctx = ShowContext::new(small_config());
        assert_eq!(tick_ambient(&mut ctx, 5.0), 0.1);
        assert!((ctx.clock.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn streams_keep_their_size() {
        let mut ctx = ShowContext::new(small_config());
        for _ in 0..500 {
            tick_ambient(&mut ctx, 0.1);
        }
        assert_eq!(ctx.photons.len(), 64);
        assert_eq!(ctx.beam.len(), 16);
        assert!(ctx.photons.positions().iter().all(|p| p.z <= 500.0));
    }
}
