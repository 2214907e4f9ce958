// SPDX-License-Identifier: MIT
//
// Output buffering and the shared terminal sink.
//
// Two components work together to keep terminal I/O cheap and testable:
//
//   OutputBuffer — accumulates all ANSI bytes of one frame in memory so the
//   entire frame reaches the terminal in a single write() call. This
//   eliminates per-escape overhead and keeps the terminal's input parser
//   from ever seeing half a frame.
//
//   TerminalOutput — a cloneable handle to the one writer everything shares
//   (stdout in production). The draw loop, the screen-clear action, and the
//   resolution advisory all go through it, serialized by a mutex. Tests swap
//   in `TerminalOutput::capture()` and read back exactly what was written.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates ANSI output for a single `write()` call.
///
/// Default capacity: 16 KB — enough for most frames without reallocation.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a string verbatim.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to an arbitrary writer and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails. The buffer is cleared
    /// either way: a frame that failed to reach the terminal is stale by
    /// the next tick.
    pub fn flush_to(&mut self, w: &mut (impl Write + ?Sized)) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let result = w.write_all(&self.buf).and_then(|()| w.flush());
        self.buf.clear();
        result
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── TerminalOutput ──────────────────────────────────────────────────────────

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// A cloneable, thread-safe handle to the terminal writer.
///
/// All clones write to the same underlying sink; each call holds the lock
/// for the duration of one write, so frames from the draw loop never
/// interleave with a concurrent screen clear.
#[derive(Clone)]
pub struct TerminalOutput {
    inner: SharedWriter,
}

impl TerminalOutput {
    /// A handle to the process's stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Wrap any writer.
    #[must_use]
    pub fn from_writer(w: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(w))),
        }
    }

    /// An in-memory sink and a [`Capture`] to read back what was written.
    ///
    /// ```
    /// use n_term::output::{OutputBuffer, TerminalOutput};
    ///
    /// let (out, capture) = TerminalOutput::capture();
    /// let mut buf = OutputBuffer::new();
    /// buf.push_str("hi");
    /// out.write_buffer(&mut buf).unwrap();
    /// assert_eq!(capture.contents(), "hi");
    /// ```
    #[must_use]
    pub fn capture() -> (Self, Capture) {
        let capture = Capture::default();
        (Self::from_writer(capture.clone()), capture)
    }

    /// Write and flush a whole buffer under one lock, clearing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_buffer(&self, buf: &mut OutputBuffer) -> io::Result<()> {
        let mut w = self.inner.lock();
        buf.flush_to(&mut **w)
    }
}

impl fmt::Debug for TerminalOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalOutput").finish_non_exhaustive()
    }
}

// ─── Capture ─────────────────────────────────────────────────────────────────

/// Shared in-memory byte sink, the headless counterpart of stdout.
#[derive(Clone, Default)]
pub struct Capture {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    /// Discard everything written so far.
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture").field("len", &self.len()).finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// A writer that always fails, to exercise error paths.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // ── OutputBuffer ────────────────────────────────────────────────────

    #[test]
    fn output_buffer_new_is_empty() {
        let buf = OutputBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn output_buffer_write_trait() {
        let mut buf = OutputBuffer::new();
        write!(buf, "hello {}", 42).unwrap();
        assert_eq!(buf.as_bytes(), b"hello 42");
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn output_buffer_push_str() {
        let mut buf = OutputBuffer::new();
        buf.push_str("ab");
        buf.push_str("█");
        assert_eq!(buf.as_bytes(), "ab█".as_bytes());
    }

    #[test]
    fn output_buffer_clear_keeps_capacity() {
        let mut buf = OutputBuffer::new();
        buf.push_str("data");
        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.buf.capacity() >= DEFAULT_CAPACITY);
    }

    #[test]
    fn output_buffer_flush_to_vec() {
        let mut buf = OutputBuffer::new();
        buf.push_str("frame");
        let mut dest = Vec::new();
        buf.flush_to(&mut dest).unwrap();
        assert_eq!(dest, b"frame");
        assert!(buf.is_empty());
    }

    #[test]
    fn output_buffer_flush_empty_is_noop() {
        let mut buf = OutputBuffer::new();
        let mut dest = Vec::new();
        buf.flush_to(&mut dest).unwrap();
        assert!(dest.is_empty());
    }

    #[test]
    fn output_buffer_failed_flush_still_clears() {
        let mut buf = OutputBuffer::new();
        buf.push_str("frame");
        assert!(buf.flush_to(&mut Broken).is_err());
        assert!(buf.is_empty());
    }

    // ── TerminalOutput ──────────────────────────────────────────────────

    fn send(out: &TerminalOutput, s: &str) -> io::Result<()> {
        let mut buf = OutputBuffer::new();
        buf.push_str(s);
        out.write_buffer(&mut buf)
    }

    #[test]
    fn capture_sees_writes_from_clones() {
        let (out, capture) = TerminalOutput::capture();
        let other = out.clone();
        send(&out, "a").unwrap();
        send(&other, "b").unwrap();
        assert_eq!(capture.contents(), "ab");
        assert_eq!(capture.len(), 2);
    }

    #[test]
    fn write_buffer_drains_buffer() {
        let (out, capture) = TerminalOutput::capture();
        let mut buf = OutputBuffer::new();
        buf.push_str("xyz");
        out.write_buffer(&mut buf).unwrap();
        assert!(buf.is_empty());
        assert_eq!(capture.contents(), "xyz");
    }

    #[test]
    fn broken_writer_reports_error() {
        let out = TerminalOutput::from_writer(Broken);
        assert!(send(&out, "x").is_err());
    }

    #[test]
    fn capture_clear() {
        let (out, capture) = TerminalOutput::capture();
        send(&out, "junk").unwrap();
        capture.clear();
        assert!(capture.is_empty());
    }

    #[test]
    fn concurrent_writes_do_not_interleave() {
        let (out, capture) = TerminalOutput::capture();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let out = out.clone();
                std::thread::spawn(move || {
                    let chunk = format!("[{i}{i}{i}{i}]");
                    for _ in 0..50 {
                        send(&out, &chunk).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let text = capture.contents();
        assert_eq!(text.len(), 4 * 50 * 6);
        for chunk in text.split_inclusive(']') {
            let digits = &chunk[1..5];
            assert!(digits.chars().all(|c| c == digits.as_bytes()[0] as char));
        }
    }
}
