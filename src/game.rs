//! Screen flow (home → board → celebration) on top of `Session`.
//!
//! The game never touches the DOM. Every input returns a list of `Command`s
//! that the web runtime executes: sounds to play now and `Deferred` actions to
//! run later through `setTimeout`. Deferred actions are fire-and-forget; a
//! late one that no longer applies is ignored.

use crate::audio::{AudioRequest, AudioSettings, TEST_PHRASE};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::geometry::Point;
use crate::layout::{CelebrationLayout, HomeLayout, Viewport};
use crate::rng::Lcg;
use crate::session::{FeedbackEnd, Session};
use crate::topics::{Topic, find_topic, topics};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Playing,
    Celebration,
}

/// Work the runtime runs after a delay.
#[derive(Clone, Debug, PartialEq)]
pub enum Deferred {
    StartTopic(&'static str),
    FinishFeedback(u64),
    RevealCelebration,
    Play(AudioRequest),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Play(AudioRequest),
    Schedule { delay_ms: u32, action: Deferred },
}

pub struct Game {
    config: GameConfig,
    rng: Lcg,
    audio: AudioSettings,
    viewport: Viewport,
    screen: Screen,
    session: Option<Session>,
    /// Topic card pressed on the home screen, waiting for its start delay.
    selected_topic: Option<&'static str>,
    celebration_revealed: bool,
    /// Highest feedback sequence handed out by any earlier session.
    last_seq: u64,
}

impl Game {
    pub fn new(config: GameConfig, viewport: Viewport, rng: Lcg) -> Result<Self, GameError> {
        config.validate()?;
        let mut game = Self {
            audio: AudioSettings::new(config.audio.clone()),
            config,
            rng,
            viewport: viewport.or_default(),
            screen: Screen::Home,
            session: None,
            selected_topic: None,
            celebration_revealed: false,
            last_seq: 0,
        };
        if let Some(id) = game.config.start_topic.clone() {
            game.start_topic(&id)?;
        }
        Ok(game)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn audio(&self) -> &AudioSettings {
        &self.audio
    }

    pub fn audio_sources(&self) -> [&str; 2] {
        self.audio.sources()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn selected_topic(&self) -> Option<&'static str> {
        self.selected_topic
    }

    pub fn celebration_revealed(&self) -> bool {
        self.celebration_revealed
    }

    pub fn home_layout(&self) -> HomeLayout {
        HomeLayout::compute(self.viewport, topics().len())
    }

    pub fn celebration_layout(&self) -> CelebrationLayout {
        CelebrationLayout::compute(self.viewport)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport.or_default();
        if let Some(s) = self.session.as_mut() {
            s.resize(self.viewport);
        }
    }

    /// Latest feedback sequence number of this game, across sessions.
    pub fn feedback_seq(&self) -> u64 {
        self.session
            .as_ref()
            .map_or(self.last_seq, |s| s.seq().max(self.last_seq))
    }

    /// Keep new feedback windows clear of sequence numbers used before `seq`,
    /// e.g. by a game this one replaces.
    pub fn continue_after(&mut self, seq: u64) {
        self.last_seq = self.last_seq.max(seq);
        if let Some(s) = self.session.as_mut() {
            s.continue_after(seq);
        }
    }

    /// Begin (or restart) play on `topic_id` with fresh progression.
    pub fn start_topic(&mut self, topic_id: &str) -> Result<(), GameError> {
        let topic: &'static Topic = find_topic(topic_id)?;
        let after = self.feedback_seq();
        let mut session = Session::new(topic, &self.config, self.viewport, &mut self.rng)?;
        session.continue_after(after);
        self.last_seq = after;
        self.session = Some(session);
        self.screen = Screen::Playing;
        self.selected_topic = None;
        self.celebration_revealed = false;
        Ok(())
    }

    /// Reset progress on the current topic and keep playing.
    pub fn restart(&mut self) {
        if let Some(s) = self.session.as_mut() {
            s.reset(&mut self.rng);
            self.screen = Screen::Playing;
        } else {
            self.screen = Screen::Home;
        }
        self.celebration_revealed = false;
    }

    /// Drop the session and go back to topic selection.
    pub fn go_home(&mut self) {
        if let Some(s) = self.session.as_mut() {
            s.reset(&mut self.rng);
        }
        self.last_seq = self.feedback_seq();
        self.session = None;
        self.screen = Screen::Home;
        self.selected_topic = None;
        self.celebration_revealed = false;
    }

    pub fn pointer_down(&mut self, p: Point) -> Vec<Command> {
        match self.screen {
            Screen::Home => self.home_click(p),
            Screen::Playing => {
                let on_back = self
                    .session
                    .as_ref()
                    .is_some_and(|s| s.layout().back_button.contains(p));
                if on_back {
                    self.go_home();
                } else if let Some(s) = self.session.as_mut() {
                    s.pointer_down(p);
                }
                Vec::new()
            }
            Screen::Celebration => {
                let layout = self.celebration_layout();
                if layout.back_button.contains(p) {
                    self.go_home();
                } else if self.celebration_revealed && layout.play_again.contains(p) {
                    self.restart();
                }
                Vec::new()
            }
        }
    }

    fn home_click(&mut self, p: Point) -> Vec<Command> {
        let layout = self.home_layout();
        if layout.sound_toggle.contains(p) {
            self.audio.toggle_mute();
            return Vec::new();
        }
        if layout.test_voice.contains(p) {
            return self.audio.speech(TEST_PHRASE).map(Command::Play).into_iter().collect();
        }
        if self.selected_topic.is_some() {
            return Vec::new();
        }
        let hit = layout
            .cards
            .iter()
            .zip(topics().iter())
            .find(|(card, _)| card.contains(p))
            .map(|(_, topic)| topic.id);
        match hit {
            Some(id) => {
                self.selected_topic = Some(id);
                vec![Command::Schedule {
                    delay_ms: self.config.topic_select_delay_ms,
                    action: Deferred::StartTopic(id),
                }]
            }
            None => Vec::new(),
        }
    }

    pub fn pointer_move(&mut self, p: Point) {
        if self.screen == Screen::Playing {
            if let Some(s) = self.session.as_mut() {
                s.pointer_move(p);
            }
        }
    }

    pub fn pointer_up(&mut self, p: Point) -> Vec<Command> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let Some(result) = session.pointer_up(p, &self.config, &mut self.rng) else {
            return Vec::new();
        };
        let mut cmds = Vec::new();
        for scheduled in &result.plan.cues {
            let Some(req) = self.audio.request(&scheduled.cue) else {
                continue;
            };
            if scheduled.delay_ms == 0 {
                cmds.push(Command::Play(req));
            } else {
                cmds.push(Command::Schedule {
                    delay_ms: scheduled.delay_ms,
                    action: Deferred::Play(req),
                });
            }
        }
        if result.plan.effect.is_some() {
            cmds.push(Command::Schedule {
                delay_ms: result.plan.hide_after_ms,
                action: Deferred::FinishFeedback(result.seq),
            });
        }
        cmds
    }

    pub fn pointer_cancel(&mut self) {
        if let Some(s) = self.session.as_mut() {
            s.pointer_cancel();
        }
    }

    /// Run a deferred action scheduled earlier.
    pub fn run_deferred(&mut self, action: Deferred) -> Vec<Command> {
        match action {
            Deferred::StartTopic(id) => {
                if self.screen == Screen::Home && self.selected_topic == Some(id) {
                    if let Err(e) = self.start_topic(id) {
                        tracing::warn!("cannot start topic: {}", e);
                        self.selected_topic = None;
                    }
                }
                Vec::new()
            }
            Deferred::FinishFeedback(seq) => {
                let end = match self.session.as_mut() {
                    Some(s) => s.finish_feedback(seq),
                    None => FeedbackEnd::Ignored,
                };
                if end == FeedbackEnd::Complete && self.screen == Screen::Playing {
                    self.screen = Screen::Celebration;
                    self.celebration_revealed = false;
                    return vec![Command::Schedule {
                        delay_ms: self.config.celebration_reveal_ms,
                        action: Deferred::RevealCelebration,
                    }];
                }
                Vec::new()
            }
            Deferred::RevealCelebration => {
                if self.screen == Screen::Celebration {
                    self.celebration_revealed = true;
                }
                Vec::new()
            }
            // Mute may have been toggled in between.
            Deferred::Play(req) => {
                if self.audio.is_muted() {
                    Vec::new()
                } else {
                    vec![Command::Play(req)]
                }
            }
        }
    }
}
