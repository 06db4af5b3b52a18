use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// A unit of work to run once its delay has elapsed
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A scheduled task that can still be called off
pub trait Cancellable: Send {
    /// Prevent the task from running. Has no effect once it already ran.
    fn cancel(&self);
}

/// The timer primitive animations are driven by
pub trait Scheduler: Send + Sync {
    /// Run `task` once, after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn Cancellable>;
}

#[derive(Clone, Default)]
struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Cancellable for CancelFlag {
    fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}

struct Entry<D> {
    deadline: D,
    seq: u64,
    cancelled: CancelFlag,
    task: Task,
}

impl<D: Ord> PartialEq for Entry<D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl<D: Ord> Eq for Entry<D> {}

impl<D: Ord> PartialOrd for Entry<D> {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl<D: Ord> Ord for Entry<D> {
    // reversed so that `BinaryHeap` pops the earliest deadline first, FIFO among equals
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other.deadline.cmp(&self.deadline).then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A scheduler backed by a single timer thread.
///
/// Tasks run one at a time on that thread, in deadline order. Dropping the scheduler shuts the
/// thread down and discards anything still pending.
pub struct ThreadScheduler {
    sender: Sender<Entry<Instant>>,
    seq: AtomicU64,
}

impl ThreadScheduler {
    /// Spawn the timer thread.
    pub fn new() -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        thread::Builder::new().name("folio-timer".into()).spawn(move || run_timer_loop(receiver))?;
        Ok(Self { sender, seq: AtomicU64::new(0) })
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn Cancellable> {
        let cancelled = CancelFlag::default();
        let entry = Entry {
            deadline: Instant::now() + delay,
            seq: self.seq.fetch_add(1, Ordering::Relaxed),
            cancelled: cancelled.clone(),
            task,
        };
        if self.sender.send(entry).is_err() {
            tracing::warn!("timer thread is gone, dropping scheduled task");
        }
        Box::new(cancelled)
    }
}

fn run_timer_loop(receiver: Receiver<Entry<Instant>>) {
    let mut queue: BinaryHeap<Entry<Instant>> = BinaryHeap::new();
    loop {
        let received = match queue.peek() {
            None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
            Some(next) => {
                let now = Instant::now();
                if next.deadline <= now {
                    if let Some(entry) = queue.pop() {
                        if !entry.cancelled.is_cancelled() {
                            (entry.task)();
                        }
                    }
                    continue;
                }
                receiver.recv_timeout(next.deadline - now)
            }
        };
        match received {
            Ok(entry) => queue.push(entry),
            Err(RecvTimeoutError::Timeout) => (),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// A scheduler running on a virtual clock that only moves when told to.
///
/// Useful to drive animations from a frame loop, and to test them without sleeping.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    seq: u64,
    pending: BinaryHeap<Entry<Duration>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of tasks that are scheduled and not cancelled
    pub fn pending(&self) -> usize {
        self.lock().pending.iter().filter(|entry| !entry.cancelled.is_cancelled()).count()
    }

    /// Delay from now until the next live task is due
    pub fn next_due(&self) -> Option<Duration> {
        let queue = self.lock();
        queue
            .pending
            .iter()
            .filter(|entry| !entry.cancelled.is_cancelled())
            .map(|entry| entry.deadline.saturating_sub(queue.now))
            .min()
    }

    /// Jump to the next live task and run it. Returns whether anything ran.
    pub fn run_next(&self) -> bool {
        loop {
            let entry = {
                let mut queue = self.lock();
                let Some(entry) = queue.pending.pop() else {
                    return false;
                };
                if entry.cancelled.is_cancelled() {
                    continue;
                }
                queue.now = queue.now.max(entry.deadline);
                entry
            };
            (entry.task)();
            return true;
        }
    }

    /// Move the clock forward, running every task that becomes due, including tasks scheduled
    /// by the ones that run. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut ran = 0;
        loop {
            let entry = {
                let mut queue = self.lock();
                match queue.pending.peek() {
                    Some(next) if next.deadline <= target => (),
                    _ => {
                        queue.now = target;
                        return ran;
                    }
                }
                let Some(entry) = queue.pending.pop() else {
                    continue;
                };
                if entry.cancelled.is_cancelled() {
                    continue;
                }
                queue.now = queue.now.max(entry.deadline);
                entry
            };
            (entry.task)();
            ran += 1;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn Cancellable> {
        let cancelled = CancelFlag::default();
        let mut queue = self.lock();
        let entry = Entry {
            deadline: queue.now + delay,
            seq: queue.seq,
            cancelled: cancelled.clone(),
            task,
        };
        queue.seq += 1;
        queue.pending.push(entry);
        Box::new(cancelled)
    }
}
