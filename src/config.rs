//! Game configuration, deserialized from JSON handed over by the page.
//! Every field has a default so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::matcher::DEFAULT_OVERLAP_THRESHOLD;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub muted: bool,
    pub success_volume: f64,
    pub hit_volume: f64,
    pub success_sound: String,
    pub hit_sound: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            muted: false,
            success_volume: 0.7,
            hit_volume: 0.3,
            success_sound: "/sounds/success.mp3".to_string(),
            hit_sound: "/sounds/hit.mp3".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Percent of the dragged item that must cover a shadow.
    pub overlap_threshold: f64,
    /// How long success effects stay up before the next item appears.
    pub success_delay_ms: u32,
    pub failure_delay_ms: u32,
    /// Delay between the success sound and the voice prompt.
    pub voice_delay_ms: u32,
    pub topic_select_delay_ms: u32,
    pub celebration_reveal_ms: u32,
    /// Shuffle the play order on every reset.
    pub shuffle: bool,
    /// Max tracing level forwarded to the browser console.
    pub log_level: String,
    /// Topic to open directly, skipping the home screen.
    pub start_topic: Option<String>,
    pub audio: AudioConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            success_delay_ms: 2000,
            failure_delay_ms: 1000,
            voice_delay_ms: 500,
            topic_select_delay_ms: 200,
            celebration_reveal_ms: 300,
            shuffle: true,
            log_level: "info".to_string(),
            start_topic: None,
            audio: AudioConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.overlap_threshold > 0.0 && self.overlap_threshold <= 100.0) {
            return Err(GameError::InvalidConfig(format!(
                "overlap_threshold must be in (0, 100], got {}",
                self.overlap_threshold
            )));
        }
        for (name, v) in [
            ("audio.success_volume", self.audio.success_volume),
            ("audio.hit_volume", self.audio.hit_volume),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
        }
        if self.log_level.parse::<tracing::level_filters::LevelFilter>().is_err() {
            return Err(GameError::InvalidConfig(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        if let Some(topic) = &self.start_topic {
            crate::topics::find_topic(topic)?;
        }
        Ok(())
    }
}
