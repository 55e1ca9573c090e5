//! Serialized console output shared by subscribers, strategies and demos.
//!
//! A [`Console`] is a cheap cloneable handle to one writer behind a single
//! mutex. Each [`Console::emit`] call writes and flushes a whole block under
//! one lock acquisition, so concurrent emitters never interleave mid-block.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::errors::{NotifyError, Result};

/// Cloneable handle to a mutex-guarded output stream.
#[derive(Clone)]
pub struct Console {
    target: &'static str,
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Wrap an arbitrary writer. `target` names the stream in IO errors.
    pub fn from_writer(target: &'static str, writer: impl Write + Send + 'static) -> Self {
        Self {
            target,
            out: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    #[must_use]
    pub fn stdout() -> Self {
        Self::from_writer("stdout", io::stdout())
    }

    #[must_use]
    pub fn stderr() -> Self {
        Self::from_writer("stderr", io::stderr())
    }

    #[must_use]
    pub fn discard() -> Self {
        Self::from_writer("discard", io::sink())
    }

    /// In-memory console for golden-output checks.
    #[must_use]
    pub fn capture() -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        (Self::from_writer("capture", buffer.clone()), buffer)
    }

    /// Name of the underlying stream.
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Write `text` verbatim and flush, holding the lock for the whole block.
    pub fn emit(&self, text: &str) -> Result<()> {
        let mut out = self.out.lock();
        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|source| NotifyError::io(self.target, source))
    }

    /// Whether two handles share the same underlying stream.
    #[must_use]
    pub fn same_stream(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.out, &other.out)
    }
}

/// Shared byte buffer backing [`Console::capture`].
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn capture_collects_emitted_blocks_in_order() {
        let (console, buffer) = Console::capture();
        console.emit("first\n").expect("emit");
        console.clone().emit("second\n").expect("emit");
        assert_eq!(buffer.contents(), "first\nsecond\n");
        buffer.clear();
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn concurrent_blocks_never_interleave() {
        let (console, buffer) = Console::capture();
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let console = console.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let block = format!("{worker}{worker}{worker}\n");
                        console.emit(&block).expect("emit");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }
        let contents = buffer.contents();
        assert_eq!(contents.lines().count(), 400);
        for line in contents.lines() {
            let first = line.chars().next().expect("non-empty line");
            assert!(line.chars().all(|c| c == first), "interleaved: {line}");
        }
    }

    #[test]
    fn write_failures_name_the_stream() {
        let console = Console::from_writer("pipe", BrokenPipe);
        let err = console.emit("lost").expect_err("write must fail");
        assert_eq!(err.code(), "NE-3101");
        assert!(err.to_string().contains("pipe"));
    }

    #[test]
    fn clones_share_one_stream() {
        let (console, _buffer) = Console::capture();
        let (other, _) = Console::capture();
        assert!(console.same_stream(&console.clone()));
        assert!(!console.same_stream(&other));
    }
}
