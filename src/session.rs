//! One game session: phase machine, countdown clock, scoring, batch rotation.

use crate::batch::Batch;
use crate::provider::ConfigError;
use crate::reconcile::{reconcile, MatchResult, Outcome, PENDING_TOLERANCE};
use crate::token::Token;
use crate::util::words_per_minute;

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Countdown start, in seconds.
    pub initial_secs: u32,
    pub batch_size: usize,
    /// Clamp runaway overtyping past the target length.
    pub strict: bool,
    pub pending_tolerance: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_secs: 60,
            batch_size: 10,
            strict: true,
            pending_tolerance: PENDING_TOLERANCE,
        }
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_secs == 0 {
            return Err(ConfigError::ZeroTime);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatch);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Over,
}

/// A session owns its batch and conversion state; both live and die with the
/// phase that created them. All mutation happens in `on_input` and `on_tick`,
/// which the host delivers one at a time.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    pool: Vec<Token>,
    phase: Phase,
    score: u32,
    secs_remaining: u32,
    wpm: u32,
    batch: Batch,
    raw_input: String,
    converted: String,
    last_result: Option<MatchResult>,
}

impl Session {
    pub fn new(pool: Vec<Token>, config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let secs_remaining = config.initial_secs;
        Ok(Self {
            config,
            pool,
            phase: Phase::Idle,
            score: 0,
            secs_remaining,
            wpm: 0,
            batch: Batch::empty(),
            raw_input: String::new(),
            converted: String::new(),
            last_result: None,
        })
    }

    /// Begin a run. No-op while already running, and no-op on an empty pool
    /// (an expected soft condition, not an error).
    pub fn start(&mut self) {
        if self.phase == Phase::Running || self.pool.is_empty() {
            return;
        }
        self.score = 0;
        self.wpm = 0;
        self.secs_remaining = self.config.initial_secs;
        self.phase = Phase::Running;
        self.clear_input();
        self.batch = Batch::draw(
            &self.pool,
            self.config.batch_size,
            &Batch::empty(),
            &mut rand::thread_rng(),
        );
    }

    /// Full reset back to Idle. Any tick that was already in flight when the
    /// host reset becomes a no-op through the phase guard in `on_tick`.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.score = 0;
        self.wpm = 0;
        self.secs_remaining = self.config.initial_secs;
        self.batch = Batch::empty();
        self.clear_input();
    }

    /// Process a full-buffer input replacement event.
    ///
    /// Reconciles against the active target, applies the strict clamp, and on
    /// a complete match scores the token, advances the cursor, transparently
    /// redraws an exhausted batch, and clears the buffers.
    pub fn on_input(&mut self, raw: &str) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(target) = self.batch.active().map(|item| item.target.clone()) else {
            return;
        };

        let outcome = reconcile(
            &target,
            raw,
            self.config.strict,
            self.config.pending_tolerance,
        );
        self.raw_input = outcome.clamped_raw.unwrap_or_else(|| raw.to_string());
        self.converted = outcome.converted;
        let complete = outcome.result.complete;
        self.last_result = Some(outcome.result);

        if complete {
            self.score += 1;
            self.batch.advance();
            if self.batch.is_exhausted() {
                self.batch = Batch::draw(
                    &self.pool,
                    self.config.batch_size,
                    &self.batch,
                    &mut rand::thread_rng(),
                );
            }
            self.clear_input();
        }
    }

    /// One second of the countdown. Recomputes WPM and flips to Over at zero.
    pub fn on_tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.secs_remaining = self.secs_remaining.saturating_sub(1);
        self.wpm = words_per_minute(self.score, self.elapsed_secs());
        if self.secs_remaining == 0 {
            self.phase = Phase::Over;
        }
    }

    fn clear_input(&mut self) {
        self.raw_input.clear();
        self.converted.clear();
        self.last_result = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn secs_remaining(&self) -> u32 {
        self.secs_remaining
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.config.initial_secs - self.secs_remaining
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// The reading the user currently has to produce.
    pub fn active_target(&self) -> Option<&str> {
        self.batch.active().map(|item| item.target.as_str())
    }

    /// The raw buffer after any strict clamping; the host mirrors this back
    /// into its own input state.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn converted(&self) -> &str {
        &self.converted
    }

    /// Classification of the active target from the last input event.
    pub fn match_result(&self) -> Option<&MatchResult> {
        self.last_result.as_ref()
    }

    /// Outcome for one character of the active target, Pending when no input
    /// has arrived yet.
    pub fn outcome_at(&self, idx: usize) -> Outcome {
        self.last_result
            .as_ref()
            .and_then(|r| r.outcomes.get(idx).copied())
            .unwrap_or(Outcome::Pending)
    }
}
