mod common;

pub mod animator;
pub mod reveal;
pub mod scheduler;
pub mod typewriter;

pub(crate) use common::pulse_color;

pub use animator::{AnimatorSnapshot, RenderCallback, TypewriterAnimator};
pub use reveal::{Direction, Rect, Reveal, RevealStyle, intersection_ratio};
pub use scheduler::{Cancellable, ManualScheduler, Scheduler, Task, ThreadScheduler};
pub use typewriter::{DeleteSpeed, Phase, TypewriterError, TypewriterState, TypewriterTiming};
