//! Sound settings and cue resolution. Playback itself lives in `web::sound`;
//! this side only decides what (if anything) should be played.

use crate::config::AudioConfig;
use crate::feedback::SoundCue;

/// Phrase spoken by the home screen's "Test Voice" button.
pub const TEST_PHRASE: &str = "Hello! Let's match the shadows!";

/// A concrete playback request for the web runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioRequest {
    Clip {
        src: String,
        volume: f64,
        /// Spoken instead when the clip cannot start.
        fallback_speech: Option<String>,
    },
    Speech(String),
}

#[derive(Clone, Debug)]
pub struct AudioSettings {
    muted: bool,
    config: AudioConfig,
}

impl AudioSettings {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            muted: config.muted,
            config,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        tracing::info!("Sound {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    /// Resolve a cue; `None` when muted.
    pub fn request(&self, cue: &SoundCue) -> Option<AudioRequest> {
        if self.muted {
            return None;
        }
        Some(match cue {
            SoundCue::Success => AudioRequest::Clip {
                src: self.config.success_sound.clone(),
                volume: self.config.success_volume,
                fallback_speech: None,
            },
            SoundCue::Hit => AudioRequest::Clip {
                src: self.config.hit_sound.clone(),
                volume: self.config.hit_volume,
                fallback_speech: None,
            },
            SoundCue::Voice { clip, text } => AudioRequest::Clip {
                src: clip.clone(),
                volume: 1.0,
                fallback_speech: Some(text.clone()),
            },
        })
    }

    /// Clip sources that are worth preloading.
    pub fn sources(&self) -> [&str; 2] {
        [&self.config.success_sound, &self.config.hit_sound]
    }

    pub fn speech(&self, text: &str) -> Option<AudioRequest> {
        (!self.muted).then(|| AudioRequest::Speech(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumes_and_paths() {
        let a = AudioSettings::new(AudioConfig::default());
        assert_eq!(
            a.request(&SoundCue::Hit),
            Some(AudioRequest::Clip {
                src: "/sounds/hit.mp3".into(),
                volume: 0.3,
                fallback_speech: None
            })
        );
        match a.request(&SoundCue::Success) {
            Some(AudioRequest::Clip { volume, .. }) => assert_eq!(volume, 0.7),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_voice_falls_back_to_speech() {
        let a = AudioSettings::new(AudioConfig::default());
        let cue = SoundCue::Voice {
            clip: "/sounds/voice_dog.mp3".into(),
            text: "Dog".into(),
        };
        match a.request(&cue) {
            Some(AudioRequest::Clip { fallback_speech, .. }) => {
                assert_eq!(fallback_speech.as_deref(), Some("Dog"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_mute_silences_everything() {
        let mut a = AudioSettings::new(AudioConfig::default());
        assert!(a.toggle_mute());
        assert_eq!(a.request(&SoundCue::Success), None);
        assert_eq!(a.speech(TEST_PHRASE), None);
        assert!(!a.toggle_mute());
        assert!(a.speech(TEST_PHRASE).is_some());
    }
}
