//! The game session: owns the data, the current round, score and countdown.
//!
//! All state changes go through [`Session::handle`], one event at a time.
//! Delayed transitions come back as `GameEvent::TransitionElapsed` and are
//! dropped if they belong to a round that has since been replaced.

use tracing::{debug, info, warn};

use super::event::{GameEvent, GameNotice};
use super::high_score::{HighScoreStore, MemoryHighScore};
use super::snapshot::{RoundSnapshot, SessionSnapshot, SessionStatus};
use super::timer::{Countdown, TickOutcome};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::rng::GameRng;
use crate::morphemes::{GameData, MorphemeLookup};
use crate::questions::{build_breakdown, build_hint, QuestionGenerator, Verdict};
use crate::round::{Due, Round, ScheduledTransition, Scheduler, TransitionKind};

/// A game session.
///
/// ## Example
///
/// ```
/// use word_architect::core::GameConfig;
/// use word_architect::morphemes::GameData;
/// use word_architect::session::{GameEvent, GameNotice, MemoryHighScore, Session};
///
/// let data = GameData::from_json_str(r#"{
///     "morphemes": {
///         "prefixes": [{"morpheme": "re", "meaning": "again"}, {"morpheme": "pre", "meaning": "before"}],
///         "roots": [{"morpheme": "act", "meaning": "do", "examples": ["reaction"]},
///                   {"morpheme": "dict", "meaning": "say"}, {"morpheme": "form", "meaning": "shape"}],
///         "suffixes": [{"morpheme": "ion", "meaning": "act of"}, {"morpheme": "able", "meaning": "can be"},
///                      {"morpheme": "er", "meaning": "one who"}]
///     }
/// }"#).unwrap();
///
/// let config = GameConfig::construction().with_seed(1);
/// let mut session = Session::new(config, data, MemoryHighScore::new()).unwrap();
/// session.handle(GameEvent::Start).unwrap();
///
/// for part in ["re", "act", "ion"] {
///     session.handle(GameEvent::AssemblePart(part.into())).unwrap();
/// }
/// let notices = session.handle(GameEvent::SubmitAnswer("Reaction".into())).unwrap();
/// assert!(notices.iter().any(|n| matches!(n, GameNotice::Schedule(_))));
/// ```
#[derive(Debug)]
pub struct Session<S: HighScoreStore = MemoryHighScore> {
    config: GameConfig,
    data: GameData,
    generator: QuestionGenerator,
    rng: GameRng,
    store: S,
    status: SessionStatus,
    round: Option<Round>,
    generation: u64,
    score: u32,
    high_score: u32,
    countdown: Option<Countdown>,
}

impl<S: HighScoreStore> Session<S> {
    /// Create a session in `Ready`. Reads the stored high score.
    pub fn new(config: GameConfig, data: GameData, store: S) -> Result<Self> {
        config.validate()?;
        let high_score = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read high score, starting from 0");
            0
        });
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        Ok(Self {
            generator: QuestionGenerator::from_config(&config),
            countdown: config.timer_seconds.map(Countdown::new),
            config,
            data,
            rng,
            store,
            status: SessionStatus::Ready,
            round: None,
            generation: 0,
            score: 0,
            high_score,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &GameData {
        &self.data
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Seconds left, `None` without a countdown.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one input event.
    ///
    /// Only question generation can fail; every other invalid input is a
    /// no-op that returns no notices.
    pub fn handle(&mut self, event: GameEvent) -> Result<Vec<GameNotice>> {
        match event {
            GameEvent::Start => self.start(),
            _ if self.status != SessionStatus::Playing => {
                debug!(?event, status = ?self.status, "ignoring event outside play");
                Ok(Vec::new())
            }
            GameEvent::SubmitAnswer(text) => Ok(self.submit(&text)),
            GameEvent::RequestHint => Ok(self.hint()),
            GameEvent::RevealAnswer => Ok(self.reveal()),
            GameEvent::AssemblePart(part) => Ok(self.assemble(&part)),
            GameEvent::RemovePart(part) => Ok(self.remove(&part)),
            GameEvent::Skip => Ok(vec![self.next_round()?]),
            GameEvent::Tick => Ok(self.tick()),
            GameEvent::TransitionElapsed(transition) => self.transition_elapsed(transition),
        }
    }

    /// Apply an event and keep `scheduler` in step with the notices.
    ///
    /// Queues emitted transitions, starts ticking on start and stops it when
    /// the session ends.
    pub fn dispatch(
        &mut self,
        event: GameEvent,
        scheduler: &mut Scheduler,
    ) -> Result<Vec<GameNotice>> {
        let starting = matches!(event, GameEvent::Start);
        let notices = self.handle(event)?;

        if starting {
            scheduler.clear();
            if self.countdown.is_some() {
                scheduler.start_ticks();
            }
        }
        for notice in &notices {
            match notice {
                GameNotice::Schedule(transition) => scheduler.schedule(*transition),
                GameNotice::SessionOver { .. } => {
                    scheduler.stop_ticks();
                    scheduler.clear();
                }
                _ => {}
            }
        }
        Ok(notices)
    }

    /// Let `elapsed_ms` pass on `scheduler`, delivering everything that
    /// comes due in order.
    pub fn advance_time(
        &mut self,
        scheduler: &mut Scheduler,
        elapsed_ms: u64,
    ) -> Result<Vec<GameNotice>> {
        let until = scheduler.now_ms().saturating_add(elapsed_ms);
        let mut notices = Vec::new();
        while let Some(due) = scheduler.next_due(until) {
            let event = match due {
                Due::Tick => GameEvent::Tick,
                Due::Transition(t) => GameEvent::TransitionElapsed(t),
            };
            notices.extend(self.dispatch(event, scheduler)?);
        }
        scheduler.set_now(until);
        Ok(notices)
    }

    /// Current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let lookup = MorphemeLookup::new(&self.data.morphemes);
        SessionSnapshot {
            status: self.status,
            score: self.score,
            high_score: self.high_score,
            remaining_seconds: self.remaining_seconds(),
            round: self
                .round
                .as_ref()
                .map(|r| RoundSnapshot::capture(r, &lookup, self.can_reveal(r))),
        }
    }

    fn can_reveal(&self, round: &Round) -> bool {
        !round.is_resolved() && (!self.config.reveal_requires_hint || round.hint_revealed())
    }

    fn start(&mut self) -> Result<Vec<GameNotice>> {
        self.score = 0;
        self.round = None;
        self.status = SessionStatus::Ready;
        let mut notices = vec![self.next_round()?];

        self.status = SessionStatus::Playing;
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.restart();
            notices.push(GameNotice::Countdown {
                remaining: countdown.remaining(),
            });
        }
        info!(mode = ?self.config.mode, timer = ?self.config.timer_seconds, "session started");
        Ok(notices)
    }

    fn next_round(&mut self) -> Result<GameNotice> {
        let question = self.generator.generate(&self.data, &mut self.rng)?;
        self.generation += 1;
        debug!(generation = self.generation, answer = %question.answer, "new round");

        let notice = GameNotice::NewQuestion {
            generation: self.generation,
            definition: question.definition.clone(),
        };
        self.round = Some(Round::new(
            self.generation,
            question,
            self.config.spelling_gate,
        ));
        Ok(notice)
    }

    fn submit(&mut self, text: &str) -> Vec<GameNotice> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        let Some(verdict) = round.submit(text) else {
            return Vec::new();
        };
        debug!(generation = round.generation(), ?verdict, "answer checked");

        match verdict {
            Verdict::Correct => {
                let points = self.config.points_per_correct;
                self.score += points;
                vec![
                    GameNotice::Answered {
                        verdict,
                        points,
                        score: self.score,
                    },
                    GameNotice::Schedule(ScheduledTransition {
                        generation: round.generation(),
                        kind: TransitionKind::Advance,
                        delay_ms: self.config.advance_delay_ms,
                    }),
                ]
            }
            Verdict::Incorrect => vec![GameNotice::Answered {
                verdict,
                points: 0,
                score: self.score,
            }],
        }
    }

    fn hint(&mut self) -> Vec<GameNotice> {
        let lookup = MorphemeLookup::new(&self.data.morphemes);
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        match round.reveal_hint(|q| build_hint(q, &lookup)) {
            Some((text, first)) => vec![GameNotice::Hint {
                text: text.to_string(),
                repeated: !first,
            }],
            None => Vec::new(),
        }
    }

    fn reveal(&mut self) -> Vec<GameNotice> {
        let requires_hint = self.config.reveal_requires_hint;
        let lookup = MorphemeLookup::new(&self.data.morphemes);
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        if requires_hint && !round.hint_revealed() {
            return Vec::new();
        }
        if !round.reveal_answer() {
            return Vec::new();
        }

        let question = round.question();
        vec![
            GameNotice::Revealed {
                answer: question.answer.clone(),
                breakdown: build_breakdown(question, &lookup),
            },
            GameNotice::Schedule(ScheduledTransition {
                generation: round.generation(),
                kind: TransitionKind::AfterReveal,
                delay_ms: self.config.reveal_delay_ms,
            }),
        ]
    }

    fn assemble(&mut self, part: &str) -> Vec<GameNotice> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        match round.assemble(part) {
            Some(change) => vec![GameNotice::Assembly {
                assembled: round.assembled().iter().cloned().collect(),
                spelling_open: change.spelling_open,
                gate_changed: change.gate_changed,
            }],
            None => Vec::new(),
        }
    }

    fn remove(&mut self, part: &str) -> Vec<GameNotice> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        match round.remove(part) {
            Some(change) => vec![GameNotice::Assembly {
                assembled: round.assembled().iter().cloned().collect(),
                spelling_open: change.spelling_open,
                gate_changed: change.gate_changed,
            }],
            None => Vec::new(),
        }
    }

    fn tick(&mut self) -> Vec<GameNotice> {
        let Some(countdown) = self.countdown.as_mut() else {
            return Vec::new();
        };
        match countdown.tick() {
            TickOutcome::Running(remaining) => vec![GameNotice::Countdown { remaining }],
            TickOutcome::Expired => vec![GameNotice::Countdown { remaining: 0 }, self.finish()],
            TickOutcome::Idle => Vec::new(),
        }
    }

    fn finish(&mut self) -> GameNotice {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.stop();
        }
        self.status = SessionStatus::Over;

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
            if let Err(e) = self.store.save(self.score) {
                warn!(error = %e, score = self.score, "could not persist high score");
            }
        }
        info!(score = self.score, high_score = self.high_score, new_high_score, "session over");

        GameNotice::SessionOver {
            final_score: self.score,
            high_score: self.high_score,
            new_high_score,
        }
    }

    fn transition_elapsed(&mut self, transition: ScheduledTransition) -> Result<Vec<GameNotice>> {
        let current = self
            .round
            .as_ref()
            .filter(|r| r.generation() == transition.generation && r.is_resolved());
        if current.is_none() {
            debug!(
                generation = transition.generation,
                current = self.generation,
                "dropping stale transition"
            );
            return Ok(Vec::new());
        }
        Ok(vec![self.next_round()?])
    }
}
