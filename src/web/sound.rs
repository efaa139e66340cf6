//! HTMLAudioElement / speechSynthesis playback. Failures are logged and
//! never surface to the game.

use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlAudioElement, SpeechSynthesisUtterance, window};

use crate::audio::AudioRequest;

/// Clip starts retried once before giving up.
const CLIP_RETRIES: u32 = 1;

pub fn play(req: &AudioRequest) {
    match req {
        AudioRequest::Speech(text) => speak(text),
        AudioRequest::Clip {
            src,
            volume,
            fallback_speech,
        } => play_clip(src.clone(), *volume, fallback_speech.clone(), CLIP_RETRIES),
    }
}

fn play_clip(src: String, volume: f64, fallback: Option<String>, retries: u32) {
    let audio = match HtmlAudioElement::new_with_src(&src) {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!("cannot create audio for {}: {:?}", src, e);
            give_up(fallback);
            return;
        }
    };
    audio.set_volume(volume.clamp(0.0, 1.0));
    match audio.play() {
        Ok(promise) => {
            let on_reject: Closure<dyn FnMut(JsValue)> = Closure::once(move |err: JsValue| {
                tracing::debug!("clip {} rejected: {:?}", src, err);
                retry(src, volume, fallback, retries);
            });
            let _ = promise.catch(&on_reject);
            on_reject.forget();
        }
        Err(e) => {
            tracing::debug!("clip {} failed to start: {:?}", src, e);
            retry(src, volume, fallback, retries);
        }
    }
}

fn retry(src: String, volume: f64, fallback: Option<String>, retries: u32) {
    if retries > 0 {
        play_clip(src, volume, fallback, retries - 1);
    } else {
        tracing::warn!("giving up on clip {}", src);
        give_up(fallback);
    }
}

fn give_up(fallback: Option<String>) {
    if let Some(text) = fallback {
        speak(&text);
    }
}

pub fn speak(text: &str) {
    let Some(synth) = window().and_then(|w| w.speech_synthesis().ok()) else {
        tracing::debug!("speech synthesis unavailable");
        return;
    };
    match SpeechSynthesisUtterance::new_with_text(text) {
        Ok(u) => {
            u.set_rate(0.9);
            u.set_pitch(1.2);
            synth.cancel();
            synth.speak(&u);
        }
        Err(e) => tracing::warn!("cannot build utterance: {:?}", e),
    }
}

/// Start muted playback of `srcs` from inside a user gesture so later clips
/// are allowed to play.
pub fn prime(srcs: [&str; 2]) {
    for src in srcs {
        match HtmlAudioElement::new_with_src(src) {
            Ok(a) => {
                a.set_muted(true);
                if let Err(e) = a.play() {
                    tracing::debug!("priming {} failed: {:?}", src, e);
                }
            }
            Err(e) => tracing::debug!("priming {} failed: {:?}", src, e),
        }
    }
}
