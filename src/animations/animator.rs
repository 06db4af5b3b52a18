use super::scheduler::{Cancellable, Scheduler};
use super::typewriter::{Phase, TypewriterError, TypewriterState, TypewriterTiming};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

/// Callback receiving the displayed text after every tick
pub type RenderCallback = Box<dyn FnMut(&str) + Send + 'static>;

/// A running typewriter: owns its state and the next pending tick.
///
/// Ticks run on the scheduler's thread, one at a time. Each tick mutates the state and invokes
/// the render callback while holding the animator's lock, so [`TypewriterAnimator::stop`] either
/// waits for an in-flight tick to finish or keeps it from happening at all. The render callback
/// must not call back into the same animator.
pub struct TypewriterAnimator {
    shared: Arc<Mutex<Shared>>,
    scheduler: Arc<dyn Scheduler>,
}

struct Shared {
    state: TypewriterState,
    on_text_changed: RenderCallback,
    running: bool,
    /// Bumped on every start/stop so ticks scheduled by a previous run are ignored
    generation: u64,
    pending: Option<Box<dyn Cancellable>>,
}

/// A point-in-time copy of an animator's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatorSnapshot {
    pub text: String,
    pub word_index: usize,
    pub phase: Phase,
    pub interval: Duration,
    pub running: bool,
}

impl TypewriterAnimator {
    pub fn new<I, S, F>(
        phrases: I,
        scheduler: Arc<dyn Scheduler>,
        on_text_changed: F,
    ) -> Result<Self, TypewriterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&str) + Send + 'static,
    {
        Self::with_timing(phrases, TypewriterTiming::default(), scheduler, on_text_changed)
    }

    pub fn with_timing<I, S, F>(
        phrases: I,
        timing: TypewriterTiming,
        scheduler: Arc<dyn Scheduler>,
        on_text_changed: F,
    ) -> Result<Self, TypewriterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&str) + Send + 'static,
    {
        let state = TypewriterState::with_timing(phrases, timing)?;
        let shared = Shared {
            state,
            on_text_changed: Box::new(on_text_changed),
            running: false,
            generation: 0,
            pending: None,
        };
        Ok(Self { shared: Arc::new(Mutex::new(shared)), scheduler })
    }

    /// Begin ticking. Does nothing if already started.
    pub fn start(&self) {
        let mut shared = lock(&self.shared);
        if shared.running {
            return;
        }
        shared.running = true;
        shared.generation += 1;
        tracing::debug!(phrases = shared.state.phrases().len(), "typewriter started");
        schedule_next(&self.shared, &self.scheduler, &mut shared);
    }

    /// Cancel the pending tick. Once this returns, neither the state nor the render callback
    /// will be touched again until the next [`TypewriterAnimator::start`].
    pub fn stop(&self) {
        let mut shared = lock(&self.shared);
        if let Some(pending) = shared.pending.take() {
            pending.cancel();
        }
        if shared.running {
            shared.running = false;
            shared.generation += 1;
            tracing::debug!("typewriter stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).running
    }

    pub fn current_text(&self) -> String {
        lock(&self.shared).state.displayed_text().to_string()
    }

    pub fn snapshot(&self) -> AnimatorSnapshot {
        let shared = lock(&self.shared);
        AnimatorSnapshot {
            text: shared.state.displayed_text().to_string(),
            word_index: shared.state.word_index(),
            phase: shared.state.phase(),
            interval: shared.state.interval(),
            running: shared.running,
        }
    }
}

impl Drop for TypewriterAnimator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn schedule_next(shared: &Arc<Mutex<Shared>>, scheduler: &Arc<dyn Scheduler>, guard: &mut Shared) {
    let generation = guard.generation;
    let weak_shared = Arc::downgrade(shared);
    let weak_scheduler = Arc::downgrade(scheduler);
    let pending = scheduler.schedule(
        guard.state.interval(),
        Box::new(move || run_tick(weak_shared, weak_scheduler, generation)),
    );
    guard.pending = Some(pending);
}

fn run_tick(shared: Weak<Mutex<Shared>>, scheduler: Weak<dyn Scheduler>, generation: u64) {
    let (Some(shared), Some(scheduler)) = (shared.upgrade(), scheduler.upgrade()) else {
        return;
    };
    let mut guard = lock(&shared);
    if !guard.running || guard.generation != generation {
        return;
    }
    let inner = &mut *guard;
    inner.state.tick();
    (inner.on_text_changed)(inner.state.displayed_text());
    schedule_next(&shared, &scheduler, inner);
}
