//! Output targets for usage text.
//!
//! Every flag set writes through a [`Sink`]. The default is standard error,
//! matching where command line tools conventionally print help; a component
//! can be pointed elsewhere with `Component::set_output`.

use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::io::{self, Write};
use std::rc::Rc;

/// Where usage text goes.
#[derive(Default)]
pub enum Sink {
    /// The process's standard error stream.
    #[default]
    Stderr,
    /// The process's standard output stream.
    Stdout,
    /// Any other writer.
    Writer(Box<dyn Write>),
}

impl Sink {
    /// Wraps a writer, e.g. a file or a [`Capture`].
    pub fn writer<W: Write + 'static>(writer: W) -> Self {
        Self::Writer(Box::new(writer))
    }

    #[must_use]
    pub fn is_stderr(&self) -> bool {
        matches!(self, Self::Stderr)
    }

    /// Writes `text` in one call and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the write or flush fails.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        match self {
            Self::Stderr => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(text.as_bytes())?;
                stderr.flush()
            }
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()
            }
            Self::Writer(writer) => {
                writer.write_all(text.as_bytes())?;
                writer.flush()
            }
        }
    }
}

impl Debug for Sink {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => formatter.write_str("Stderr"),
            Self::Stdout => formatter.write_str("Stdout"),
            Self::Writer(_) => formatter.write_str("Writer(..)"),
        }
    }
}

/// In-memory writer whose clones share one buffer.
///
/// Hand one clone to a component as its sink and keep another to read back
/// what was written.
#[derive(Clone, Default, Debug)]
pub struct Capture {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl Capture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }

    /// A [`Sink`] writing into this capture's buffer.
    #[must_use]
    pub fn sink(&self) -> Sink {
        Sink::writer(self.clone())
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
