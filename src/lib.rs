//! Shadow Match core crate.
//!
//! A drag-and-drop matching game for small children: pick a topic, then drag
//! each picture onto its silhouette. Gameplay logic (overlap detection,
//! progression, feedback planning, screen flow) is plain Rust and testable
//! natively; the `web` module wires it to a canvas in the browser.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod config;
pub mod error;
pub mod feedback;
pub mod game;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod matcher;
pub mod progression;
pub mod rng;
pub mod session;
pub mod topics;
mod web;

pub use config::GameConfig;
pub use error::GameError;
pub use game::{Command, Deferred, Game, Screen};
pub use geometry::{Point, Rect};
pub use matcher::{Detection, DropOutcome, MatchDetector};
pub use progression::{ProgressState, Progression};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::mount(GameConfig::default()).map_err(JsValue::from)
}

/// Start with a JSON config; missing fields take their defaults.
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::mount(config).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn topic_ids() -> js_sys::Array {
    topics::topics()
        .iter()
        .map(|t| JsValue::from_str(t.id))
        .collect()
}

/// Percentage of rect A covered by rect B, for page scripts and debugging.
#[wasm_bindgen(js_name = overlap_percentage)]
#[allow(clippy::too_many_arguments)]
pub fn overlap_percentage_js(
    ax: f64,
    ay: f64,
    aw: f64,
    ah: f64,
    bx: f64,
    by: f64,
    bw: f64,
    bh: f64,
) -> f64 {
    geometry::overlap_percentage(&Rect::new(ax, ay, aw, ah), &Rect::new(bx, by, bw, bh))
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
