//! Named input and output handles
//!
//! Inputs are line sources: a file or standard input (`-`), read one line at
//! a time. Each read is tri-state: a line, end of source (the read returned
//! no bytes at all), or an I/O error. An empty line is never taken as the
//! end of a source.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

use crate::error::{CountError, Result};
use crate::record::{Count, CountRecord};

pub const STDIN_NAME: &str = "<stdin>";
pub const STDOUT_NAME: &str = "<stdout>";

const IO_BUFFER: usize = 64 * 1024;

/// Whether a command-line input argument names standard input.
pub fn is_stdin_arg(arg: &str) -> bool {
    arg == "-"
}

/// Boxed reader for inputs chosen at runtime.
pub type DynRead = Box<dyn BufRead>;
/// Boxed writer for outputs chosen at runtime.
pub type DynWrite = Box<dyn Write>;

/// Open an input argument: `-` is standard input, anything else a file.
pub fn open_input(arg: &str) -> Result<LineSource<DynRead>> {
    if is_stdin_arg(arg) {
        return Ok(stdin_source());
    }
    let file = File::open(Path::new(arg)).map_err(|source| CountError::FileOpen {
        name: arg.to_string(),
        source,
    })?;
    tracing::debug!("reading {}", arg);
    let reader: DynRead = Box::new(BufReader::with_capacity(IO_BUFFER, file));
    Ok(LineSource::new(arg, reader))
}

/// Standard input as a line source.
pub fn stdin_source() -> LineSource<DynRead> {
    tracing::debug!("reading {}", STDIN_NAME);
    let reader: DynRead = Box::new(io::stdin().lock());
    LineSource::new(STDIN_NAME, reader)
}

/// Open the output: standard output when no argument is given, otherwise
/// the named file (created or truncated).
pub fn open_output(arg: Option<&str>) -> Result<CountWriter<DynWrite>> {
    match arg {
        None => {
            let writer: DynWrite = Box::new(io::stdout().lock());
            Ok(CountWriter::new(STDOUT_NAME, writer))
        }
        Some(path) => {
            let file = File::create(Path::new(path)).map_err(|source| CountError::FileOpen {
                name: path.to_string(),
                source,
            })?;
            tracing::debug!("writing {}", path);
            let writer: DynWrite = Box::new(file);
            Ok(CountWriter::new(path, writer))
        }
    }
}

/// Line-at-a-time reader that remembers its name and position.
pub struct LineSource<R> {
    name: String,
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    saw_data: bool,
    last_terminated: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            buf: Vec::new(),
            line_no: 0,
            saw_data: false,
            last_terminated: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based number of the last line returned.
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Read the next line without its `\n`. `Ok(None)` only when the
    /// underlying read produced no bytes.
    pub fn next_line(&mut self) -> Result<Option<&[u8]>> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| CountError::Read {
                name: self.name.clone(),
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }
        self.saw_data = true;
        self.line_no += 1;
        self.last_terminated = self.buf.last() == Some(&b'\n');
        if self.last_terminated {
            self.buf.pop();
        }
        Ok(Some(self.buf.as_slice()))
    }

    /// After exhaustion: whether the source ended at a line boundary (or
    /// was empty), i.e. whether a line-oriented reader would see one more
    /// empty line before the end.
    pub fn ends_with_empty_line(&self) -> bool {
        !self.saw_data || self.last_terminated
    }
}

/// Parses count records off a [`LineSource`] in a fixed numeric mode.
pub struct CountReader<R, C> {
    lines: LineSource<R>,
    mode: PhantomData<C>,
}

impl<R: BufRead, C: Count> CountReader<R, C> {
    pub fn new(lines: LineSource<R>) -> Self {
        Self {
            lines,
            mode: PhantomData,
        }
    }

    /// Convenience for in-memory or already-open readers.
    pub fn from_reader(name: impl Into<String>, reader: R) -> Self {
        Self::new(LineSource::new(name, reader))
    }

    pub fn source_name(&self) -> &str {
        self.lines.name()
    }

    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }

    /// Next record, `Ok(None)` at end of source.
    pub fn next_record(&mut self) -> Result<Option<CountRecord<C>>> {
        let line_no = self.lines.line_number() + 1;
        let name = self.lines.name().to_string();
        match self.lines.next_line()? {
            None => Ok(None),
            Some(line) => CountRecord::parse(line, &name, line_no).map(Some),
        }
    }
}

/// Buffered `<count>\t<value>\n` writer.
pub struct CountWriter<W: Write> {
    name: String,
    inner: BufWriter<W>,
    written: u64,
}

impl<W: Write> CountWriter<W> {
    pub fn new(name: impl Into<String>, inner: W) -> Self {
        Self {
            name: name.into(),
            inner: BufWriter::with_capacity(IO_BUFFER, inner),
            written: 0,
        }
    }

    pub fn records_written(&self) -> u64 {
        self.written
    }

    pub fn write_record(&mut self, count: &impl Display, value: &[u8]) -> Result<()> {
        self.write_parts(count, value)
            .map_err(|source| CountError::Write {
                name: self.name.clone(),
                source,
            })?;
        self.written += 1;
        Ok(())
    }

    fn write_parts(&mut self, count: &impl Display, value: &[u8]) -> io::Result<()> {
        write!(self.inner, "{}\t", count)?;
        self.inner.write_all(value)?;
        self.inner.write_all(b"\n")
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        let name = self.name;
        self.inner.into_inner().map_err(|err| CountError::Write {
            name,
            source: err.into_error(),
        })
    }
}
