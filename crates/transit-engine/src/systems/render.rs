use crate::api::show::ShowContext;
use crate::api::types::OverlayKey;
use crate::renderer::traits::SceneBackend;

/// Push the whole show state to the backend. Called once per frame before `draw`.
/// The curve path is only pushed when it changed.
pub fn sync_scene<B: SceneBackend + ?Sized>(ctx: &mut ShowContext, backend: &mut B) {
    for obj in ctx.scene.iter() {
        backend.set_position(obj.id, obj.position);
        backend.set_rotation(obj.id, obj.rotation);
        backend.set_visibility(obj.id, obj.visible);
        backend.set_material_uniform(obj.id, "time", obj.uniforms.time);
        backend.set_material_uniform(obj.id, "opacity", obj.uniforms.opacity);
    }
    backend.set_camera(&ctx.camera);
    backend.set_scene_tilt(ctx.tilt.tilt());
    for key in OverlayKey::ALL {
        backend.set_overlay_opacity(key, ctx.overlays[key.index()]);
    }
    if let Some(d) = ctx.take_curve_update() {
        backend.set_curve_path(d);
    }
}
