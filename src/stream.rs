//! Output streams
//!
//! A `Stream` is a cheap, cloneable handle to a writable sink. Writes are
//! fire-and-forget: failures are reported through the `log` facade and
//! never reach the caller. A broken pipe is ignored silently so piping
//! output into `head` and friends stays quiet.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A sink the logger can write to
pub trait LogStream: Write + Send {
    /// Whether the sink currently accepts writes
    fn is_writable(&self) -> bool {
        true
    }
}

impl LogStream for io::Stdout {}
impl LogStream for io::Stderr {}
impl LogStream for io::Sink {}
impl LogStream for File {}
impl LogStream for Vec<u8> {}

#[derive(Clone)]
pub struct Stream {
    inner: Arc<Mutex<dyn LogStream>>,
    label: String,
}

impl Stream {
    pub fn new<S: LogStream + 'static>(sink: S, label: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
            label: label.into(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout(), "stdout")
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr(), "stderr")
    }

    /// Discards everything
    pub fn null() -> Self {
        Self::new(io::sink(), "null")
    }

    /// Append to a file, creating it if needed
    pub fn file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file, path.display().to_string()))
    }

    /// Open a stream from a config target: `stdout`, `stderr`, `null` or a file path
    pub fn from_target(target: &str) -> io::Result<Self> {
        match target.trim() {
            "" => Err(io::Error::new(ErrorKind::InvalidInput, "empty stream target")),
            "stdout" | "-" => Ok(Self::stdout()),
            "stderr" => Ok(Self::stderr()),
            "null" | "none" => Ok(Self::null()),
            path => Self::file(path),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_writable(&self) -> bool {
        self.inner.lock().is_writable()
    }

    /// Write the whole string and flush. Errors are swallowed.
    pub fn write_str(&self, text: &str) {
        let mut sink = self.inner.lock();
        let result = sink.write_all(text.as_bytes()).and_then(|_| sink.flush());
        if let Err(e) = result {
            if e.kind() != ErrorKind::BrokenPipe {
                log::debug!(target: "stylelog::stream", "Write to {} failed: {}", self.label, e);
            }
        }
    }

    pub fn flush(&self) {
        if let Err(e) = self.inner.lock().flush() {
            log::debug!(target: "stylelog::stream", "Flush of {} failed: {}", self.label, e);
        }
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream").field("label", &self.label).finish()
    }
}

/// In-memory sink with shared contents; can be closed to become unwritable
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    buffer: Arc<Mutex<Vec<u8>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream handle writing into this buffer
    pub fn stream(&self) -> Stream {
        Stream::new(self.clone(), "memory")
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Contents with ANSI escape sequences removed
    pub fn plain_contents(&self) -> String {
        strip_ansi(&self.contents())
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed.load(Ordering::Relaxed) {
            return Err(io::Error::new(ErrorKind::BrokenPipe, "memory stream closed"));
        }
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogStream for MemoryStream {
    fn is_writable(&self) -> bool {
        !self.closed.load(Ordering::Relaxed)
    }
}

/// Remove ANSI color codes from text
pub fn strip_ansi(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape && ch == 'm' {
            in_escape = false;
        } else if !in_escape {
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_memory_stream_shares_buffer() {
        let memory = MemoryStream::new();
        let stream = memory.stream();
        stream.write_str("hello\n");
        stream.clone().write_str("world\n");
        assert_eq!(memory.contents(), "hello\nworld\n");
    }

    #[test]
    fn test_closed_stream_swallows_writes() {
        let memory = MemoryStream::new();
        let stream = memory.stream();
        memory.close();
        assert!(!stream.is_writable());
        stream.write_str("lost\n");
        assert!(memory.is_empty());
    }

    #[test]
    fn test_file_stream_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        Stream::file(&path).unwrap().write_str("one\n");
        Stream::from_target(path.to_str().unwrap()).unwrap().write_str("two\n");

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn test_targets() {
        assert_eq!(Stream::from_target("stdout").unwrap().label(), "stdout");
        assert_eq!(Stream::from_target("stderr").unwrap().label(), "stderr");
        assert_eq!(Stream::from_target("null").unwrap().label(), "null");
        assert!(Stream::from_target("").is_err());
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31;1mred\x1b[0m plain"), "red plain");
    }
}
