//! Page-side scene backend.
//!
//! Overlays and the light-curve graph are DOM elements, updated here directly.
//! Object transforms, camera and clock go into a [`FrameBuffer`] that the
//! page's WebGL renderer reads after each `show_tick`.

use glam::{Vec2, Vec3};
use transit_engine::api::types::CURVE_PATH_ID;
use transit_engine::{
    CameraPose, FrameBuffer, ObjectId, OverlayKey, RenderError, SceneBackend, TransitError,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Element the diagnostics are written into.
pub const ERROR_LOG_ID: &str = "error-log";
/// Optional loading screen hidden once the show is up.
pub const LOADER_ID: &str = "loader";

pub fn document() -> Result<Document, TransitError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| TransitError::NoContext("no window.document".into()))
}

fn element(document: &Document, id: &str) -> Result<Element, TransitError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| TransitError::MissingElement(id.to_string()))
}

/// Append a line to the page's error log, falling back to the console.
pub fn report_error(message: &str) {
    web_sys::console::error_1(&message.into());
    let Ok(doc) = document() else { return };
    if let Some(log) = doc.get_element_by_id(ERROR_LOG_ID) {
        let text = log.text_content().unwrap_or_default();
        let joined = if text.is_empty() { message.to_string() } else { format!("{text}\n{message}") };
        log.set_text_content(Some(&joined));
        if let Some(html) = log.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("display", "block");
        }
    }
}

pub struct DomBackend {
    overlays: Vec<HtmlElement>,
    /// Last opacity written per overlay, to skip redundant style writes.
    overlay_opacity: [f32; OverlayKey::COUNT],
    curve_path: Element,
    frame: FrameBuffer,
    /// First DOM write failure since the last draw.
    pending: Option<RenderError>,
}

impl DomBackend {
    /// Look up every element the show drives. Any missing one is a startup failure.
    pub fn new(document: &Document) -> Result<Self, TransitError> {
        let overlays = OverlayKey::ALL
            .iter()
            .map(|key| {
                element(document, key.element_id())?
                    .dyn_into::<HtmlElement>()
                    .map_err(|_| TransitError::MissingElement(key.element_id().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let curve_path = element(document, CURVE_PATH_ID)?;

        if let Some(loader) = document.get_element_by_id(LOADER_ID) {
            if let Some(html) = loader.dyn_ref::<HtmlElement>() {
                let _ = html.style().set_property("display", "none");
            }
        }

        Ok(Self {
            overlays,
            overlay_opacity: [f32::NAN; OverlayKey::COUNT],
            curve_path,
            frame: FrameBuffer::new(),
            pending: None,
        })
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    fn note_failure(&mut self, what: &str) {
        if self.pending.is_none() {
            self.pending = Some(RenderError::Frame(what.to_string()));
        }
    }
}

impl SceneBackend for DomBackend {
    fn set_position(&mut self, id: ObjectId, position: Vec3) {
        self.frame.record_mut(id).position = position.to_array();
    }

    fn set_rotation(&mut self, id: ObjectId, rotation: Vec3) {
        self.frame.record_mut(id).rotation = rotation.to_array();
    }

    fn set_visibility(&mut self, id: ObjectId, visible: bool) {
        self.frame.record_mut(id).visible = if visible { 1.0 } else { 0.0 };
    }

    fn set_material_uniform(&mut self, id: ObjectId, name: &str, value: f32) {
        match name {
            "time" => {
                self.frame.record_mut(id).time = value;
                self.frame.set_clock(value);
            }
            "opacity" => self.frame.record_mut(id).opacity = value,
            other => log::debug!("{} has no uniform '{other}'", id.name()),
        }
    }

    fn set_camera(&mut self, pose: &CameraPose) {
        self.frame.set_camera(pose);
    }

    fn set_scene_tilt(&mut self, tilt: Vec2) {
        self.frame.set_tilt(tilt);
    }

    fn set_overlay_opacity(&mut self, key: OverlayKey, opacity: f32) {
        let i = key.index();
        if self.overlay_opacity[i] == opacity {
            return;
        }
        let result = self.overlays[i].style().set_property("opacity", &opacity.to_string());
        if result.is_err() {
            self.note_failure(key.element_id());
        } else {
            self.overlay_opacity[i] = opacity;
        }
    }

    fn set_curve_path(&mut self, d: &str) {
        if self.curve_path.set_attribute("d", d).is_err() {
            self.note_failure(CURVE_PATH_ID);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.frame.set_viewport(width, height);
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        if let Some(e) = self.pending.take() {
            return Err(e);
        }
        self.frame.commit();
        Ok(())
    }

    fn show_diagnostic(&mut self, message: &str) {
        report_error(message);
    }
}
