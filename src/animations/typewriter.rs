use std::time::Duration;

/// Errors raised when building a typewriter over an invalid phrase list
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TypewriterError {
    #[error("typewriter needs at least one phrase")]
    EmptyPhraseList,

    #[error("phrase {0} is empty")]
    EmptyPhrase(usize),
}

/// Whether each tick grows or shrinks the displayed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Deleting,
}

/// How the tick interval evolves while a phrase is being deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteSpeed {
    /// Every delete tick halves the previous interval, down to the minimum interval
    Halving,
    /// Every delete tick waits the same amount of time
    Constant(Duration),
}

/// Timing knobs for the typewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    /// Delay between typed characters
    pub typing: Duration,
    /// Delay after a phrase is fully typed, before deleting starts
    pub pause: Duration,
    /// Lower bound for any scheduled delay
    pub min_interval: Duration,
    pub delete: DeleteSpeed,
}

impl TypewriterTiming {
    pub const DEFAULT_TYPING: Duration = Duration::from_millis(100);
    pub const DEFAULT_PAUSE: Duration = Duration::from_millis(2000);
    pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1);

    fn clamp(&self, interval: Duration) -> Duration {
        interval.max(self.min_interval)
    }
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            typing: Self::DEFAULT_TYPING,
            pause: Self::DEFAULT_PAUSE,
            min_interval: Self::DEFAULT_MIN_INTERVAL,
            delete: DeleteSpeed::Halving,
        }
    }
}

/// The state of a typewriter cycling through a fixed list of phrases.
///
/// This is the pure part of the animation: [`TypewriterState::tick`] performs exactly one
/// transition and reports the delay until the next one. Driving it over time is the job of
/// [`TypewriterAnimator`](super::animator::TypewriterAnimator).
#[derive(Debug, Clone)]
pub struct TypewriterState {
    phrases: Vec<String>,
    timing: TypewriterTiming,
    word_index: usize,
    /// Number of characters of the current phrase being displayed
    visible_chars: usize,
    phase: Phase,
    interval: Duration,
}

impl TypewriterState {
    pub fn new<I, S>(phrases: I) -> Result<Self, TypewriterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_timing(phrases, TypewriterTiming::default())
    }

    pub fn with_timing<I, S>(phrases: I, timing: TypewriterTiming) -> Result<Self, TypewriterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(TypewriterError::EmptyPhraseList);
        }
        if let Some(index) = phrases.iter().position(|phrase| phrase.is_empty()) {
            return Err(TypewriterError::EmptyPhrase(index));
        }
        Ok(Self {
            phrases,
            interval: timing.clamp(timing.typing),
            timing,
            word_index: 0,
            visible_chars: 0,
            phase: Phase::Typing,
        })
    }

    /// Advance the animation by one step and return the delay until the next step.
    pub fn tick(&mut self) -> Duration {
        let total_chars = self.current_phrase().chars().count();
        match self.phase {
            Phase::Typing => {
                self.visible_chars = (self.visible_chars + 1).min(total_chars);
                if self.visible_chars == total_chars {
                    self.phase = Phase::Deleting;
                    self.interval = self.timing.clamp(self.timing.pause);
                } else {
                    self.interval = self.timing.clamp(self.timing.typing);
                }
            }
            Phase::Deleting => {
                self.visible_chars = self.visible_chars.saturating_sub(1);
                self.interval = match self.timing.delete {
                    DeleteSpeed::Halving => self.timing.clamp(self.interval / 2),
                    DeleteSpeed::Constant(interval) => self.timing.clamp(interval),
                };
                if self.visible_chars == 0 {
                    self.phase = Phase::Typing;
                    self.word_index = (self.word_index + 1) % self.phrases.len();
                    self.interval = self.timing.clamp(self.timing.typing);
                }
            }
        }
        self.interval
    }

    /// The text currently on display, always a prefix of [`Self::current_phrase`].
    pub fn displayed_text(&self) -> &str {
        let phrase = self.current_phrase();
        match phrase.char_indices().nth(self.visible_chars) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.word_index]
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Delay before the next tick
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timing(&self) -> &TypewriterTiming {
        &self.timing
    }
}
