// SPDX-License-Identifier: MIT
//
// Draw loop — the background thread that puts the screen buffer on screen.
//
// Drawing calls only ever touch the `ScreenBuffer`. This loop is the one
// place that talks to the terminal: each tick it checks whether anything in
// the render region changed, composes a frame, and writes it in one go.
//
// # Adaptive Tick Rate
//
// The tick interval lives in a shared `FrameClock`. After a frame that
// actually changed the screen, the loop switches to the fast interval
// (30 ms); on a tick with nothing dirty it relaxes to the slow one (320 ms).
// Animations read the same clock to pace themselves, so a busy screen
// animates smoothly and an idle one costs almost nothing.
//
// # Cancellation
//
// The loop waits out each tick with `recv_timeout` on the stop channel.
// A stop request therefore wakes it immediately instead of after up to one
// slow interval. A dropped sender counts as a stop. On exit the loop shows
// the cursor again; joining the thread is the completion barrier.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::ansi;
use crate::frame::Frame;
use crate::output::{OutputBuffer, TerminalOutput};
use crate::screen::ScreenBuffer;
use crate::terminal::{self, Size};

// ─── LoopConfig ──────────────────────────────────────────────────────────────

/// Tick intervals for the draw loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Interval after a tick that rendered a changed frame. Default: 30 ms.
    pub fast_interval: Duration,
    /// Interval after a tick with nothing dirty. Default: 320 ms.
    pub slow_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fast_interval: Duration::from_millis(30),
            slow_interval: Duration::from_millis(320),
        }
    }
}

// ─── FrameClock ──────────────────────────────────────────────────────────────

/// The shared, mutable tick interval.
///
/// Written by the draw loop, read by every animation step. Clones share
/// the same value.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Arc<RwLock<Duration>>,
}

impl FrameClock {
    /// A clock starting at `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: Arc::new(RwLock::new(interval)),
        }
    }

    /// The current tick interval.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Duration {
        *self.interval.read()
    }

    /// Set the tick interval, returning the previous one.
    pub fn set(&self, interval: Duration) -> Duration {
        std::mem::replace(&mut *self.interval.write(), interval)
    }

    /// Block the calling thread for one current interval.
    pub fn sleep(&self) {
        thread::sleep(self.get());
    }
}

impl Default for FrameClock {
    /// Starts slow: nothing has been drawn yet.
    fn default() -> Self {
        Self::new(LoopConfig::default().slow_interval)
    }
}

// ─── StopSignal ──────────────────────────────────────────────────────────────

/// A cloneable handle that asks a [`DrawLoop`] to exit.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Sender<()>,
}

impl StopSignal {
    /// Ask the loop to stop. Idempotent; a no-op once the loop has exited.
    pub fn stop(&self) {
        let _ = self.tx.send(());
    }
}

// ─── Renderer ────────────────────────────────────────────────────────────────

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    /// A changed frame was written.
    Rendered,
    /// Cells were dirty but the frame matched the previous one.
    Unchanged,
    /// Nothing in the render region was dirty.
    Idle,
}

/// Per-thread render state: the previous frame and a reusable buffer.
struct Renderer {
    screen: Arc<ScreenBuffer>,
    clock: FrameClock,
    output: TerminalOutput,
    cols: usize,
    rows: usize,
    config: LoopConfig,
    previous: String,
    buf: OutputBuffer,
}

impl Renderer {
    fn new(
        screen: Arc<ScreenBuffer>,
        clock: FrameClock,
        output: TerminalOutput,
        area: Size,
        config: LoopConfig,
    ) -> Self {
        Self {
            screen,
            clock,
            output,
            cols: usize::from(area.cols),
            rows: usize::from(area.rows),
            config,
            previous: String::new(),
            buf: OutputBuffer::new(),
        }
    }

    fn tick(&mut self) -> Tick {
        if !self.screen.take_dirty_within(self.cols, self.rows) {
            self.set_interval(self.config.slow_interval);
            return Tick::Idle;
        }

        let frame = Frame::compose(&self.screen.read(), self.cols, self.rows);
        if frame.text == self.previous {
            return Tick::Unchanged;
        }

        self.set_interval(self.config.fast_interval);

        // Writing into a Vec-backed buffer cannot fail.
        let _ = ansi::cursor_to(&mut self.buf, 0, 0);
        self.buf.push_str(&frame.text);
        let _ = ansi::cursor_to(&mut self.buf, 0, frame.cursor_row);

        trace!(bytes = self.buf.len(), rows = frame.content_rows, "frame");
        if let Err(err) = self.output.write_buffer(&mut self.buf) {
            warn!(%err, "frame write failed");
        }
        self.previous = frame.text;
        Tick::Rendered
    }

    fn set_interval(&self, interval: Duration) {
        let previous = self.clock.set(interval);
        if previous != interval {
            debug!(?interval, "tick interval changed");
        }
    }

    #[allow(clippy::needless_pass_by_value)] // Owned receiver moved into the thread.
    fn run(mut self, stop: Receiver<()>) {
        debug!(cols = self.cols, rows = self.rows, "draw loop started");
        loop {
            match stop.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => break,
                Err(TryRecvError::Empty) => {}
            }

            self.tick();

            match stop.recv_timeout(self.clock.get()) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let _ = ansi::cursor_show(&mut self.buf);
        if let Err(err) = self.output.write_buffer(&mut self.buf) {
            warn!(%err, "failed to restore cursor");
        }
        debug!("draw loop stopped");
    }
}

// ─── DrawLoop ────────────────────────────────────────────────────────────────

/// Handle to the background draw loop thread.
///
/// The loop renders the top-left `area` of the screen buffer until it is
/// stopped. Dropping the handle stops the loop and waits for it.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use n_term::draw_loop::{DrawLoop, FrameClock, LoopConfig};
/// use n_term::output::TerminalOutput;
/// use n_term::screen::ScreenBuffer;
/// use n_term::terminal::Size;
///
/// let screen = Arc::new(ScreenBuffer::new(20, 5));
/// let (output, capture) = TerminalOutput::capture();
/// let draw = DrawLoop::spawn(
///     Arc::clone(&screen),
///     FrameClock::default(),
///     output,
///     Size::new(20, 5),
///     LoopConfig::default(),
/// );
///
/// screen.set_pixel(0, 0, "X");
/// draw.shutdown();
/// assert!(capture.contents().ends_with("\x1b[?25h"));
/// ```
pub struct DrawLoop {
    /// The loop thread. `None` once joined.
    handle: Option<JoinHandle<()>>,
    stop: StopSignal,
}

impl DrawLoop {
    /// Hide the cursor and start the loop thread.
    ///
    /// Installs (once per process) a panic hook that shows the cursor again.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn a new thread (extremely rare).
    #[must_use]
    pub fn spawn(
        screen: Arc<ScreenBuffer>,
        clock: FrameClock,
        output: TerminalOutput,
        area: Size,
        config: LoopConfig,
    ) -> Self {
        terminal::install_panic_hook();

        let mut buf = OutputBuffer::new();
        let _ = ansi::cursor_hide(&mut buf);
        if let Err(err) = output.write_buffer(&mut buf) {
            warn!(%err, "failed to hide cursor");
        }

        let (tx, rx) = mpsc::channel();
        let renderer = Renderer::new(screen, clock, output, area, config);

        let handle = thread::Builder::new()
            .name("draw-loop".into())
            .spawn(move || renderer.run(rx))
            .expect("failed to spawn draw loop thread");

        Self {
            handle: Some(handle),
            stop: StopSignal { tx },
        }
    }

    /// A handle that can stop the loop from any thread.
    #[must_use]
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Ask the loop to stop without waiting.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Block until the loop thread exits.
    ///
    /// Someone must call [`StopSignal::stop`] for this to return.
    /// Idempotent: waiting on a joined loop returns immediately.
    pub fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("draw loop thread panicked");
            }
        }
    }

    /// Stop the loop and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
        self.wait();
    }

    /// Whether the loop thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DrawLoop {
    fn drop(&mut self) {
        self.stop();
        self.wait();
    }
}

impl std::fmt::Debug for DrawLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawLoop")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
