//! Browser runtime: owns the canvas, forwards pointer events to `Game`, runs
//! the animation loop and executes the commands the game returns.
//!
//! Everything here runs on the single browser event loop. State lives in a
//! thread-local `RefCell`; handlers borrow it for the duration of one event and
//! execute returned commands after the borrow ends, so deferred callbacks never
//! re-enter a live borrow.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Command, Deferred, Game};
use crate::geometry::Point;
use crate::layout::Viewport;
use crate::rng::Lcg;

mod render;
mod sound;

const CANVAS_ID: &str = "sm-board-canvas";

struct Runtime {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game: Game,
    images: render::ImageCache,
    /// Pointer that owns the current drag; other pointers are ignored meanwhile.
    active_pointer: Option<i32>,
    audio_primed: bool,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = RefCell::new(None);
}

fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> Option<R> {
    RUNTIME.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn window_viewport() -> Viewport {
    let Some(win) = window() else {
        return Viewport::new(0.0, 0.0);
    };
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(w, h)
}

/// Create (or reuse) the canvas and start the game. Calling it again replaces
/// the running game but keeps listeners and the frame loop.
pub fn mount(config: GameConfig) -> Result<(), GameError> {
    crate::logging::setup_console_logging(&config.log_level)?;
    let win = window().ok_or_else(|| GameError::Dom("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| GameError::Dom("no document".into()))?;

    let viewport = window_viewport().or_default();
    let game = Game::new(config, viewport, Lcg::from_entropy())?;

    let mut pending = Some(game);
    let replaced = with_runtime(|rt| {
        if let Some(mut g) = pending.take() {
            // Timers armed by the old game may still fire against this one.
            g.continue_after(rt.game.feedback_seq());
            rt.game = g;
        }
        rt.active_pointer = None;
    });
    let Some(game) = pending else {
        debug_assert!(replaced.is_some());
        tracing::info!("game restarted on existing canvas");
        return Ok(());
    };

    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el
            .dyn_into()
            .map_err(|_| GameError::Dom(format!("#{CANVAS_ID} is not a canvas")))?,
        None => {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")
                .map_err(|e| GameError::dom("create canvas", e))?
                .dyn_into()
                .map_err(|_| GameError::Dom("created element is not a canvas".into()))?;
            c.set_id(CANVAS_ID);
            // touch-action:none keeps the browser from scrolling while a child drags.
            c.set_attribute(
                "style",
                "position:fixed; left:0; top:0; width:100vw; height:100vh; touch-action:none; user-select:none; z-index:10;",
            )
            .ok();
            let body = doc
                .body()
                .ok_or_else(|| GameError::Dom("no body".into()))?;
            body.append_child(&c)
                .map_err(|e| GameError::dom("append canvas", e))?;
            c
        }
    };
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| GameError::dom("get_context", e))?
        .ok_or_else(|| GameError::Dom("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| GameError::Dom("context is not 2d".into()))?;

    RUNTIME.with(|cell| {
        cell.replace(Some(Runtime {
            canvas: canvas.clone(),
            ctx,
            game,
            images: render::ImageCache::default(),
            active_pointer: None,
            audio_primed: false,
        }))
    });

    listen_pointer(&canvas, "pointerdown", on_pointer_down)?;
    listen_pointer(&canvas, "pointermove", on_pointer_move)?;
    listen_pointer(&canvas, "pointerup", on_pointer_up)?;
    listen_pointer(&canvas, "pointercancel", on_pointer_cancel)?;

    {
        let closure = Closure::wrap(Box::new(move || {
            let vp = window_viewport();
            with_runtime(|rt| {
                let vp = vp.or_default();
                rt.canvas.set_width(vp.width as u32);
                rt.canvas.set_height(vp.height as u32);
                rt.game.resize(vp);
                rt.active_pointer = None;
            });
        }) as Box<dyn FnMut()>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|e| GameError::dom("resize listener", e))?;
        closure.forget();
    }

    start_loop();
    tracing::info!(
        width = viewport.width,
        height = viewport.height,
        "shadow match mounted"
    );
    Ok(())
}

type PointerHandler = fn(&mut Runtime, &PointerEvent, Point) -> Vec<Command>;

fn listen_pointer(
    canvas: &HtmlCanvasElement,
    kind: &'static str,
    handler: PointerHandler,
) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move |evt: PointerEvent| {
        evt.prevent_default();
        let p = Point::new(evt.offset_x() as f64, evt.offset_y() as f64);
        let cmds = with_runtime(|rt| handler(rt, &evt, p)).unwrap_or_default();
        execute(cmds);
    }) as Box<dyn FnMut(_)>);
    canvas
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(|e| GameError::dom(kind, e))?;
    closure.forget();
    Ok(())
}

fn on_pointer_down(rt: &mut Runtime, evt: &PointerEvent, p: Point) -> Vec<Command> {
    if !rt.audio_primed {
        // First gesture: mobile browsers only allow audio after user interaction.
        rt.audio_primed = true;
        sound::prime(rt.game.audio_sources());
    }
    if rt.active_pointer.is_some() || !evt.is_primary() {
        return Vec::new();
    }
    let cmds = rt.game.pointer_down(p);
    let dragging = rt.game.session().and_then(|s| s.drag()).is_some();
    if dragging {
        rt.active_pointer = Some(evt.pointer_id());
        if let Err(e) = rt.canvas.set_pointer_capture(evt.pointer_id()) {
            tracing::debug!("pointer capture failed: {:?}", e);
        }
    }
    cmds
}

fn on_pointer_move(rt: &mut Runtime, evt: &PointerEvent, p: Point) -> Vec<Command> {
    if rt.active_pointer == Some(evt.pointer_id()) {
        rt.game.pointer_move(p);
    }
    Vec::new()
}

fn on_pointer_up(rt: &mut Runtime, evt: &PointerEvent, p: Point) -> Vec<Command> {
    if rt.active_pointer != Some(evt.pointer_id()) {
        return Vec::new();
    }
    rt.active_pointer = None;
    rt.game.pointer_up(p)
}

fn on_pointer_cancel(rt: &mut Runtime, evt: &PointerEvent, _p: Point) -> Vec<Command> {
    if rt.active_pointer == Some(evt.pointer_id()) {
        rt.active_pointer = None;
        rt.game.pointer_cancel();
    }
    Vec::new()
}

/// Run commands returned by the game. Must not be called while `RUNTIME` is borrowed.
fn execute(cmds: Vec<Command>) {
    for cmd in cmds {
        match cmd {
            Command::Play(req) => sound::play(&req),
            Command::Schedule { delay_ms, action } => schedule(delay_ms, action),
        }
    }
}

/// Fire-and-forget timer; there is no cancellation.
fn schedule(delay_ms: u32, action: Deferred) {
    let Some(win) = window() else {
        return;
    };
    let cb = Closure::once_into_js(move || {
        let cmds = with_runtime(|rt| rt.game.run_deferred(action)).unwrap_or_default();
        execute(cmds);
    });
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay) {
        tracing::warn!("setTimeout failed: {:?}", e);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_runtime(|rt| {
            render::draw(&rt.ctx, &rt.game, &mut rt.images, ts);
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
