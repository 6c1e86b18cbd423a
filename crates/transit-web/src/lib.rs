pub mod audio;
pub mod dom;
pub mod runner;

pub use runner::ShowRunner;

use std::cell::{Cell, RefCell};
use transit_engine::{InputEvent, ShowConfig};
use wasm_bindgen::prelude::*;

use audio::WebAudioCues;
use dom::DomBackend;

type PageRunner = ShowRunner<DomBackend, WebAudioCues>;

thread_local! {
    static RUNNER: RefCell<Option<PageRunner>> = RefCell::new(None);
    static ERROR_LISTENER: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` against the live runner. Returns None before `show_init` succeeded.
fn with_runner<R>(f: impl FnOnce(&mut PageRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// True the first time it is called on this thread.
fn claim_error_listener() -> bool {
    !ERROR_LISTENER.with(|installed| installed.replace(true))
}

/// Route uncaught page errors into the visible error log. Installed once per page.
fn install_error_listener() {
    if !claim_error_listener() {
        return;
    }
    let Some(window) = web_sys::window() else { return };
    let listener = Closure::<dyn FnMut(web_sys::ErrorEvent)>::new(|e: web_sys::ErrorEvent| {
        dom::report_error(&e.message());
    });
    if window
        .add_event_listener_with_callback("error", listener.as_ref().unchecked_ref())
        .is_ok()
    {
        // Lives for the whole page.
        listener.forget();
    }
}

fn start(config_json: &str) -> transit_engine::Result<()> {
    let config = if config_json.trim().is_empty() {
        ShowConfig::default()
    } else {
        ShowConfig::from_json(config_json)?
    };
    let document = dom::document()?;
    let backend = DomBackend::new(&document)?;
    let runner = ShowRunner::new(config, backend, WebAudioCues::new())?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    Ok(())
}

/// Bring the show up. `config_json` may be empty for defaults.
/// On failure the reason is written to the page and the show never starts.
#[wasm_bindgen]
pub fn show_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    install_error_listener();

    match start(config_json) {
        Ok(()) => {
            log::info!("transit show: initialized");
            Ok(())
        }
        Err(e) => {
            log::error!("transit show failed to start: {e}");
            dom::report_error(&e.to_string());
            Err(JsValue::from_str(&e.to_string()))
        }
    }
}

/// Advance one frame. Returns false when the host should stop requesting frames.
#[wasm_bindgen]
pub fn show_tick(dt: f32) -> bool {
    with_runner(|r| r.tick(dt)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn show_scroll(offset: f32, document_height: f32, viewport_height: f32) {
    with_runner(|r| {
        r.push_input(InputEvent::Scroll { offset, document_height, viewport_height })
    });
}

#[wasm_bindgen]
pub fn show_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn show_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn show_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn show_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

/// Click, key press or touch: may unlock audio.
#[wasm_bindgen]
pub fn show_gesture() {
    with_runner(|r| r.push_input(InputEvent::Gesture));
}

// ---- Data accessors ----

/// Copy of the current frame buffer.
#[wasm_bindgen]
pub fn get_frame() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.backend().frame().as_slice()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.backend().frame().ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.backend().frame().len() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_photon_positions_ptr() -> *const f32 {
    with_runner(|r| r.photon_positions_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_photon_positions_len() -> u32 {
    with_runner(|r| r.photon_positions_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_beam_positions_ptr() -> *const f32 {
    with_runner(|r| r.beam_positions_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_beam_positions_len() -> u32 {
    with_runner(|r| r.beam_positions_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_progress() -> f32 {
    with_runner(|r| r.progress()).unwrap_or(0.0)
}
