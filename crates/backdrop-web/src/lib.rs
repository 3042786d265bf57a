//! WASM exports for the backdrop simulation.
//!
//! ```ignore
//! backdrop_init(configJson);
//! // every animation frame:
//! backdrop_tick(canvas.width, canvas.height, dt);
//! const floats = new Float32Array(memory.buffer, backdrop_frame_ptr(), backdrop_frame_len());
//! ```
//!
//! Every export is a no-op returning zero or null until `backdrop_init`
//! has been called.

pub mod runner;

pub use runner::BackdropRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<BackdropRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner, or return `fallback` before init.
fn with_runner<R>(fallback: R, f: impl FnOnce(&mut BackdropRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => fallback,
    })
}

/// Create (or replace) the simulation. `config_json` may be empty.
#[wasm_bindgen]
pub fn backdrop_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = BackdropRunner::from_json(config_json);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("backdrop: initialized");
}

/// Tear down the simulation; state is discarded, not persisted.
#[wasm_bindgen]
pub fn backdrop_dispose() {
    RUNNER.with(|cell| {
        cell.borrow_mut().take();
    });
}

#[wasm_bindgen]
pub fn backdrop_tick(canvas_width: f32, canvas_height: f32, dt: f32) {
    with_runner((), |r| r.tick(canvas_width, canvas_height, dt));
}

#[wasm_bindgen]
pub fn backdrop_set_max_speed(max_speed: f32) {
    with_runner((), |r| r.set_max_speed(max_speed));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn backdrop_drawables_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.drawables_ptr())
}

#[wasm_bindgen]
pub fn backdrop_drawable_count() -> u32 {
    with_runner(0, |r| r.drawable_count())
}

#[wasm_bindgen]
pub fn backdrop_drawable_floats() -> u32 {
    with_runner(0, |r| r.drawable_floats())
}

#[wasm_bindgen]
pub fn backdrop_frame_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.frame_buffer_ptr())
}

#[wasm_bindgen]
pub fn backdrop_frame_len() -> u32 {
    with_runner(0, |r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn backdrop_max_drawables() -> u32 {
    with_runner(0, |r| r.max_drawables())
}
