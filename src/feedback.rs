//! Visual / audio feedback for a drop outcome.
//!
//! The planner is pure: it decides which effect to show, which sounds to play
//! and after which delays. The web runtime turns the plan into canvas drawing
//! and `setTimeout` callbacks.

use crate::config::GameConfig;
use crate::geometry::Point;
use crate::matcher::DropOutcome;
use crate::rng::Lcg;
use crate::topics::Item;

pub const SUCCESS_PARTICLES: usize = 12;
pub const FAILURE_PARTICLES: usize = 6;
/// Particles land within +-PARTICLE_SPREAD/2 px of the effect centre.
pub const PARTICLE_SPREAD: f64 = 100.0;
pub const PARTICLE_GLYPHS: [&str; 4] = ["🎊", "🌟", "💫", "⭐"];

pub const SUCCESS_BANNER: &str = "Excellent! 🎉";
pub const FAILURE_BANNER: &str = "Try Again! 😊";
pub const SUCCESS_MARK: &str = "✨";
pub const FAILURE_MARK: &str = "❌";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub position: Point,
    /// Seconds before the particle starts bouncing.
    pub delay_s: f64,
    pub glyph: &'static str,
}

/// Transient overlay drawn over the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub position: Point,
    pub particles: Vec<Particle>,
}

impl Effect {
    pub fn banner(&self) -> &'static str {
        match self.kind {
            EffectKind::Success => SUCCESS_BANNER,
            EffectKind::Failure => FAILURE_BANNER,
        }
    }

    pub fn mark(&self) -> &'static str {
        match self.kind {
            EffectKind::Success => SUCCESS_MARK,
            EffectKind::Failure => FAILURE_MARK,
        }
    }

    /// Only success bursts draw their particles.
    pub fn draws_particles(&self) -> bool {
        self.kind == EffectKind::Success
    }
}

pub fn particle_burst(center: Point, kind: EffectKind, rng: &mut Lcg) -> Vec<Particle> {
    let count = match kind {
        EffectKind::Success => SUCCESS_PARTICLES,
        EffectKind::Failure => FAILURE_PARTICLES,
    };
    (0..count)
        .map(|id| Particle {
            id,
            position: Point::new(
                center.x + (rng.next_f64() - 0.5) * PARTICLE_SPREAD,
                center.y + (rng.next_f64() - 0.5) * PARTICLE_SPREAD,
            ),
            delay_s: rng.next_f64() * 0.5,
            glyph: PARTICLE_GLYPHS[id % PARTICLE_GLYPHS.len()],
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Success,
    Hit,
    /// Spoken item name: voice clip first, speech synthesis as fallback.
    Voice { clip: String, text: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledCue {
    pub delay_ms: u32,
    pub cue: SoundCue,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackPlan {
    pub effect: Option<Effect>,
    pub cues: Vec<ScheduledCue>,
    /// When to hide the effect (and, after a correct drop, show the next item).
    pub hide_after_ms: u32,
}

impl FeedbackPlan {
    pub fn none() -> Self {
        Self {
            effect: None,
            cues: Vec::new(),
            hide_after_ms: 0,
        }
    }
}

/// Decide the feedback for `outcome`. `item` is the dragged item.
pub fn plan_feedback(
    outcome: &DropOutcome,
    item: &Item,
    config: &GameConfig,
    rng: &mut Lcg,
) -> FeedbackPlan {
    match outcome {
        DropOutcome::Correct { position, .. } => FeedbackPlan {
            effect: Some(Effect {
                kind: EffectKind::Success,
                position: *position,
                particles: particle_burst(*position, EffectKind::Success, rng),
            }),
            cues: vec![
                ScheduledCue {
                    delay_ms: 0,
                    cue: SoundCue::Success,
                },
                ScheduledCue {
                    delay_ms: config.voice_delay_ms,
                    cue: SoundCue::Voice {
                        clip: item.voice_clip(),
                        text: item.name.to_string(),
                    },
                },
            ],
            hide_after_ms: config.success_delay_ms,
        },
        DropOutcome::Wrong { position, .. } => FeedbackPlan {
            effect: Some(Effect {
                kind: EffectKind::Failure,
                position: *position,
                particles: particle_burst(*position, EffectKind::Failure, rng),
            }),
            cues: vec![ScheduledCue {
                delay_ms: 0,
                cue: SoundCue::Hit,
            }],
            hide_after_ms: config.failure_delay_ms,
        },
        DropOutcome::AlreadyMatched { .. } => FeedbackPlan::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::ANIMALS;

    fn correct() -> DropOutcome {
        DropOutcome::Correct {
            item_id: "cat".into(),
            position: Point::new(100.0, 100.0),
        }
    }

    #[test]
    fn test_success_plan() {
        let cfg = GameConfig::default();
        let plan = plan_feedback(&correct(), &ANIMALS.items[0], &cfg, &mut Lcg::new(1));
        let effect = plan.effect.expect("effect");
        assert_eq!(effect.kind, EffectKind::Success);
        assert_eq!(effect.particles.len(), SUCCESS_PARTICLES);
        assert_eq!(effect.banner(), SUCCESS_BANNER);
        assert_eq!(plan.hide_after_ms, 2000);
        assert_eq!(plan.cues[0].cue, SoundCue::Success);
        assert_eq!(
            plan.cues[1],
            ScheduledCue {
                delay_ms: 500,
                cue: SoundCue::Voice {
                    clip: "/sounds/voice_cat.mp3".into(),
                    text: "Cat".into()
                }
            }
        );
    }

    #[test]
    fn test_failure_plan() {
        let outcome = DropOutcome::Wrong {
            item_id: "cat".into(),
            target_id: None,
            position: Point::new(0.0, 0.0),
        };
        let plan = plan_feedback(&outcome, &ANIMALS.items[0], &GameConfig::default(), &mut Lcg::new(1));
        let effect = plan.effect.expect("effect");
        assert_eq!(effect.particles.len(), FAILURE_PARTICLES);
        assert!(!effect.draws_particles());
        assert_eq!(plan.cues, vec![ScheduledCue { delay_ms: 0, cue: SoundCue::Hit }]);
        assert_eq!(plan.hide_after_ms, 1000);
    }

    #[test]
    fn test_already_matched_is_silent() {
        let outcome = DropOutcome::AlreadyMatched { item_id: "cat".into() };
        let plan = plan_feedback(&outcome, &ANIMALS.items[0], &GameConfig::default(), &mut Lcg::new(1));
        assert_eq!(plan, FeedbackPlan::none());
    }

    #[test]
    fn test_particles_stay_near_center() {
        let c = Point::new(300.0, 200.0);
        for p in particle_burst(c, EffectKind::Success, &mut Lcg::new(5)) {
            assert!((p.position.x - c.x).abs() <= PARTICLE_SPREAD / 2.0);
            assert!((p.position.y - c.y).abs() <= PARTICLE_SPREAD / 2.0);
            assert!((0.0..0.5).contains(&p.delay_s));
            assert_eq!(p.glyph, PARTICLE_GLYPHS[p.id % 4]);
        }
    }
}
