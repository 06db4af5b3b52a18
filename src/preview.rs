//! Runs the hero typewriter in the terminal.

use crate::animations::{ThreadScheduler, TypewriterAnimator, TypewriterTiming, pulse_color};
use crossterm::{
    QueueableCommand, cursor,
    event::{self, Event, KeyEventKind},
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

const CARET: char = '▌';
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    #[error(transparent)]
    Typewriter(#[from] crate::animations::TypewriterError),

    #[error("terminal: {0}")]
    Io(#[from] io::Error),
}

/// Keeps the terminal in raw mode for as long as it lives
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Animate `phrases` on the current line until any key is pressed.
pub fn run(phrases: Vec<String>, timing: TypewriterTiming) -> Result<(), PreviewError> {
    let (sender, receiver) = mpsc::channel();
    let scheduler = Arc::new(ThreadScheduler::new()?);
    let animator = TypewriterAnimator::with_timing(phrases, timing, scheduler, move |text: &str| {
        // the receiver only goes away once we're shutting down
        let _ = sender.send(text.to_string());
    })?;

    let mut stdout = io::stdout();
    let _guard = RawModeGuard::enable()?;
    stdout.queue(cursor::Hide)?;
    animator.start();

    let started = Instant::now();
    let mut text = String::new();
    let result = loop {
        if let Some(latest) = receiver.try_iter().last() {
            text = latest;
        }
        if let Err(e) = render_line(&mut stdout, &text, started.elapsed()) {
            break Err(e);
        }
        match event::poll(FRAME_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
                Ok(_) => continue,
                Err(e) => break Err(e),
            },
            Ok(false) => continue,
            Err(e) => break Err(e),
        }
    };
    animator.stop();

    stdout.queue(cursor::Show)?.queue(Print("\r\n"))?;
    stdout.flush()?;
    Ok(result?)
}

/// Redraw the current line: the typed text followed by the pulsing caret.
fn render_line<W: Write>(out: &mut W, text: &str, elapsed: Duration) -> io::Result<()> {
    out.queue(cursor::MoveToColumn(0))?
        .queue(terminal::Clear(ClearType::CurrentLine))?
        .queue(Print(text))?
        .queue(SetForegroundColor(pulse_color(elapsed)))?
        .queue(Print(CARET))?
        .queue(ResetColor)?;
    out.flush()
}
