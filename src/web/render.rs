//! Canvas drawing for the three screens. Reads `Game` state only.

use std::collections::HashMap;

use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::feedback::EffectKind;
use crate::game::{Game, Screen};
use crate::geometry::{Point, Rect};
use crate::session::Session;
use crate::topics::{Item, topics};

const FONT: &str = "'Comic Sans MS', 'Baloo 2', 'Nunito', sans-serif";
const EMOJI_FONT: &str = "'Noto Color Emoji', 'Apple Color Emoji', sans-serif";

/// Loaded `<img>` elements keyed by asset path.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<&'static str, HtmlImageElement>,
}

impl ImageCache {
    /// The image for `src` once it has finished loading. Starts the load on
    /// first request.
    fn ready(&mut self, src: &'static str) -> Option<&HtmlImageElement> {
        if !self.images.contains_key(src) {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(src);
                    self.images.insert(src, img);
                }
                Err(e) => {
                    tracing::warn!("cannot create image for {}: {:?}", src, e);
                    return None;
                }
            }
        }
        self.images
            .get(src)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

pub fn draw(ctx: &CanvasRenderingContext2d, game: &Game, images: &mut ImageCache, now: f64) {
    let vp = game.viewport();
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    match game.screen() {
        Screen::Home => {
            background(ctx, vp.width, vp.height, "#fff6d5", "#ffd6e8");
            draw_home(ctx, game, now);
        }
        Screen::Playing => {
            background(ctx, vp.width, vp.height, "#e0f4ff", "#d9f7d0");
            if let Some(s) = game.session() {
                draw_board(ctx, s, images, now);
            }
        }
        Screen::Celebration => {
            background(ctx, vp.width, vp.height, "#fff1a8", "#ffc4e1");
            draw_celebration(ctx, game, now);
        }
    }
}

// --- Helpers ---

fn background(ctx: &CanvasRenderingContext2d, w: f64, h: f64, top: &str, bottom: &str) {
    let g = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    if g.add_color_stop(0.0, top).is_ok() && g.add_color_stop(1.0, bottom).is_ok() {
        ctx.set_fill_style_canvas_gradient(&g);
    } else {
        ctx.set_fill_style_str(top);
    }
    ctx.fill_rect(0.0, 0.0, w, h);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: &Rect, radius: f64) {
    let rad = radius.min(r.width / 2.0).min(r.height / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(r.left() + rad, r.top());
    ctx.arc_to(r.right(), r.top(), r.right(), r.bottom(), rad).ok();
    ctx.arc_to(r.right(), r.bottom(), r.left(), r.bottom(), rad).ok();
    ctx.arc_to(r.left(), r.bottom(), r.left(), r.top(), rad).ok();
    ctx.arc_to(r.left(), r.top(), r.right(), r.top(), rad).ok();
    ctx.close_path();
}

fn dashed(ctx: &CanvasRenderingContext2d, on: bool) {
    let pattern = if on {
        Array::of2(&JsValue::from_f64(10.0), &JsValue::from_f64(8.0))
    } else {
        Array::new()
    };
    ctx.set_line_dash(&pattern).ok();
}

fn text(ctx: &CanvasRenderingContext2d, s: &str, at: Point, px: f64, color: &str) {
    ctx.set_font(&format!("bold {px}px {FONT}"));
    ctx.set_fill_style_str(color);
    ctx.fill_text(s, at.x, at.y).ok();
}

fn emoji(ctx: &CanvasRenderingContext2d, s: &str, at: Point, px: f64) {
    ctx.set_font(&format!("{px}px {EMOJI_FONT}"));
    ctx.set_fill_style_str("#000000");
    ctx.fill_text(s, at.x, at.y).ok();
}

fn button(ctx: &CanvasRenderingContext2d, r: &Rect, label: &str, fill: &str) {
    ctx.set_shadow_color("rgba(0,0,0,0.18)");
    ctx.set_shadow_blur(8.0);
    ctx.set_shadow_offset_y(3.0);
    ctx.set_fill_style_str(fill);
    rounded_rect(ctx, r, r.height / 2.0);
    ctx.fill();
    ctx.set_shadow_blur(0.0);
    ctx.set_shadow_offset_y(0.0);
    let px = (r.height * 0.4).clamp(12.0, 28.0);
    text(ctx, label, r.center(), px, "#ffffff");
}

/// Item picture, or its name when the image has not loaded (yet).
fn picture(
    ctx: &CanvasRenderingContext2d,
    images: &mut ImageCache,
    src: &'static str,
    fallback: &str,
    r: &Rect,
    alpha: f64,
) {
    ctx.set_global_alpha(alpha);
    let inset = r.width * 0.1;
    match images.ready(src) {
        Some(img) => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                r.x + inset,
                r.y + inset,
                r.width - 2.0 * inset,
                r.height - 2.0 * inset,
            )
            .ok();
        }
        None => text(ctx, fallback, r.center(), (r.width * 0.16).max(10.0), "#555555"),
    }
    ctx.set_global_alpha(1.0);
}

/// Small vertical bounce, offset per particle.
fn bounce(now: f64, delay_s: f64) -> f64 {
    let t = (now / 1000.0 - delay_s).max(0.0);
    -(t * std::f64::consts::PI * 2.0).sin().abs() * 14.0
}

// --- Home ---

fn draw_home(ctx: &CanvasRenderingContext2d, game: &Game, now: f64) {
    let layout = game.home_layout();
    let vp = layout.viewport;
    text(ctx, "Shadow Match", Point::new(vp.width / 2.0, 56.0), 48.0, "#7a3cff");
    text(
        ctx,
        "Pick a topic and match each picture to its shadow!",
        Point::new(vp.width / 2.0, 100.0),
        20.0,
        "#5a4a7a",
    );

    for (card, topic) in layout.cards.iter().zip(topics().iter()) {
        let selected = game.selected_topic() == Some(topic.id);
        let lift = if selected { -6.0 } else { 0.0 };
        let r = card.translated(0.0, lift);

        ctx.set_shadow_color("rgba(0,0,0,0.15)");
        ctx.set_shadow_blur(if selected { 18.0 } else { 10.0 });
        ctx.set_shadow_offset_y(4.0);
        ctx.set_fill_style_str("#ffffff");
        rounded_rect(ctx, &r, 20.0);
        ctx.fill();
        ctx.set_shadow_blur(0.0);
        ctx.set_shadow_offset_y(0.0);
        ctx.set_line_width(if selected { 5.0 } else { 3.0 });
        ctx.set_stroke_style_str(if selected { "#ff8a00" } else { "#c9b6ff" });
        ctx.stroke();

        let cx = r.center().x;
        let wobble = if selected { (now / 90.0).sin() * 4.0 } else { 0.0 };
        emoji(ctx, topic.emoji, Point::new(cx, r.y + r.height * 0.22 + wobble), r.height * 0.2);
        text(ctx, topic.name, Point::new(cx, r.y + r.height * 0.44), r.height * 0.1, "#3b2a6b");
        text(
            ctx,
            topic.description,
            Point::new(cx, r.y + r.height * 0.58),
            (r.height * 0.055).max(10.0),
            "#6b5a8a",
        );
        let (names, more) = topic.preview_names();
        let mut preview = names.join(", ");
        if more > 0 {
            preview.push_str(&format!(" +{more} more"));
        }
        text(
            ctx,
            &preview,
            Point::new(cx, r.y + r.height * 0.78),
            (r.height * 0.045).max(9.0),
            "#8a7aa8",
        );
    }

    let muted = game.audio().is_muted();
    button(
        ctx,
        &layout.sound_toggle,
        if muted { "🔇 Sound Off" } else { "🔊 Sound On" },
        if muted { "#9e9e9e" } else { "#4caf50" },
    );
    button(ctx, &layout.test_voice, "🗣️ Test Voice", "#2196f3");
}

// --- Board ---

fn draw_board(ctx: &CanvasRenderingContext2d, s: &Session, images: &mut ImageCache, now: f64) {
    let layout = s.layout();
    let vp = layout.viewport;
    let topic = s.topic();
    let prog = s.progression();

    button(ctx, &layout.back_button, "⬅", "#ff7043");
    text(
        ctx,
        &format!("{} {}", topic.emoji, topic.name),
        Point::new(vp.width / 2.0, 30.0),
        26.0,
        "#2a4a7a",
    );
    text(
        ctx,
        &format!("{} / {}", prog.matched_count(), prog.item_count()),
        Point::new(vp.width - 60.0, 30.0),
        22.0,
        "#2a7a4a",
    );

    let hovered = s.drag().and_then(|d| d.hovered);
    for (cand, item) in s.candidates().zip(topic.items.iter()) {
        let r = cand.rect;
        let matched = s.is_matched(item.id);
        ctx.set_fill_style_str(if matched { "rgba(200,255,200,0.8)" } else { "rgba(255,255,255,0.7)" });
        rounded_rect(ctx, &r, 16.0);
        ctx.fill();
        if hovered == Some(item.id) {
            ctx.set_stroke_style_str("#ffb300");
            ctx.set_line_width(5.0);
            dashed(ctx, false);
        } else {
            ctx.set_stroke_style_str(if matched { "#43a047" } else { "#90a4ae" });
            ctx.set_line_width(3.0);
            dashed(ctx, !matched);
        }
        ctx.stroke();
        dashed(ctx, false);

        if matched {
            picture(ctx, images, item.image, item.name, &r, 1.0);
            emoji(ctx, "✅", Point::new(r.right() - 14.0, r.top() + 14.0), 20.0);
        } else {
            picture(ctx, images, item.shadow, "?", &r, 0.85);
        }
    }

    if let Some(r) = s.draggable_rect() {
        draw_draggable(ctx, images, s.current_item(), &r, s.drag().is_some());
    }

    if let Some(effect) = s.effect() {
        let at = effect.position;
        emoji(ctx, effect.mark(), at, 64.0);
        if effect.draws_particles() {
            for p in &effect.particles {
                emoji(ctx, p.glyph, Point::new(p.position.x, p.position.y + bounce(now, p.delay_s)), 28.0);
            }
        }
        let banner = Rect::new(vp.width / 2.0 - 170.0, vp.height * 0.4 - 40.0, 340.0, 80.0);
        ctx.set_fill_style_str("rgba(255,255,255,0.92)");
        rounded_rect(ctx, &banner, 24.0);
        ctx.fill();
        let color = match effect.kind {
            EffectKind::Success => "#2e7d32",
            EffectKind::Failure => "#e65100",
        };
        text(ctx, effect.banner(), banner.center(), 36.0, color);
    }
}

fn draw_draggable(
    ctx: &CanvasRenderingContext2d,
    images: &mut ImageCache,
    item: &'static Item,
    r: &Rect,
    held: bool,
) {
    ctx.set_shadow_color("rgba(0,0,0,0.25)");
    ctx.set_shadow_blur(if held { 22.0 } else { 10.0 });
    ctx.set_shadow_offset_y(if held { 10.0 } else { 4.0 });
    ctx.set_fill_style_str("#ffffff");
    rounded_rect(ctx, r, 20.0);
    ctx.fill();
    ctx.set_shadow_blur(0.0);
    ctx.set_shadow_offset_y(0.0);
    ctx.set_stroke_style_str("#7a3cff");
    ctx.set_line_width(4.0);
    ctx.stroke();
    picture(ctx, images, item.image, item.name, r, 1.0);
    if !held {
        text(ctx, item.name, Point::new(r.center().x, r.top() - 14.0), 18.0, "#3b2a6b");
    }
}

// --- Celebration ---

fn draw_celebration(ctx: &CanvasRenderingContext2d, game: &Game, now: f64) {
    let layout = game.celebration_layout();
    let vp = layout.viewport;
    let cx = vp.width / 2.0;
    let pulse = 1.0 + (now / 250.0).sin() * 0.05;
    emoji(ctx, "🏆", Point::new(cx, vp.height * 0.22), 96.0 * pulse);
    text(ctx, "Great Job! 🎉", Point::new(cx, vp.height * 0.4), 52.0, "#d81b60");
    if let Some(s) = game.session() {
        text(
            ctx,
            &format!("You matched all {} {}!", s.progression().item_count(), s.topic().name),
            Point::new(cx, vp.height * 0.52),
            26.0,
            "#5a4a7a",
        );
    }
    button(ctx, &layout.back_button, "⬅", "#ff7043");
    if game.celebration_revealed() {
        button(ctx, &layout.play_again, "🔄 Play Again", "#7a3cff");
    }
}
