use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    mem,
    path::{Path, PathBuf},
};

use log::{debug, trace, warn};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

use super::{
    error::{RecordError, Result},
    mode::Mode,
    options::StreamOptions,
    record::{Record, SEPARATOR},
};

/// The file a stream currently owns, if any. Reading and writing live in
/// separate variants so a handle can never hold both.
#[derive(Debug)]
enum StreamHandle {
    Unopened,
    Reading(BufReader<File>),
    Writing(BufWriter<File>),
}

impl StreamHandle {
    fn state(&self) -> &'static str {
        match self {
            StreamHandle::Unopened => "not open",
            StreamHandle::Reading(_) => "open for reading",
            StreamHandle::Writing(_) => "open for writing",
        }
    }
}

/// A sequential reader/writer of tab-separated records bound to one file.
///
/// Records are written as their columns joined by [`SEPARATOR`], one per
/// line. Reading surfaces only the first two columns of a line, through
/// out parameters, and reports `false` once there is nothing left to read.
///
/// The file is released by [`DelimitedRecordStream::close`], or when the
/// stream goes out of scope.
///
/// # Issues
/// - A blank line or a line with a single column ends reading, even when
/// more valid lines follow it.
/// - Columns are never quoted, so an embedded tab or line break corrupts the
/// row on the way back in.
/// - Bytes that are not valid UTF-8 are read back as U+FFFD, never as an
/// error.
#[derive(Debug)]
pub struct DelimitedRecordStream {
    options: StreamOptions,
    path: Option<PathBuf>,
    handle: StreamHandle,
    line: Vec<u8>,
    lines_read: usize,
}

/// Iterator over the column pairs left in a stream, see
/// [`DelimitedRecordStream::pairs`].
pub struct Pairs<'a> {
    stream: &'a mut DelimitedRecordStream,
    finished: bool,
}

impl DelimitedRecordStream {
    pub fn new() -> DelimitedRecordStream {
        //! Returns an unopened stream with default [`StreamOptions`].

        DelimitedRecordStream::with_options(StreamOptions::default())
    }

    pub fn with_options(options: StreamOptions) -> DelimitedRecordStream {
        DelimitedRecordStream {
            options,
            path: None,
            handle: StreamHandle::Unopened,
            line: Vec::new(),
            lines_read: 0,
        }
    }

    pub fn open(&mut self, path: impl AsRef<Path>, mode: Mode) -> Result<()> {
        //! Bind the stream to `path` in the given `mode`.
        //!
        //! Read mode needs an existing, readable file. Write mode creates the
        //! file, or truncates it, right away so it exists before the first
        //! write. Any file the stream held before is closed first, and on
        //! failure the stream is left unopened.

        let path = path.as_ref();

        self.close();

        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(RecordError::InvalidArgument(String::from(
                "empty path: a file name is required to open a stream",
            )));
        }

        if self.options.buffer_capacity == 0 {
            return Err(RecordError::InvalidArgument(String::from(
                "buffer capacity 0: must be at least one byte",
            )));
        }

        let capacity = self.options.buffer_capacity;
        let handle = match mode {
            Mode::Read => {
                let file = File::open(path).map_err(|e| RecordError::from_io(path, e))?;
                let is_dir = file
                    .metadata()
                    .map_err(|e| RecordError::from_io(path, e))?
                    .is_dir();
                if is_dir {
                    return Err(RecordError::from_io(
                        path,
                        io::Error::from(io::ErrorKind::IsADirectory),
                    ));
                }
                StreamHandle::Reading(BufReader::with_capacity(capacity, file))
            }
            Mode::Write => {
                let file = File::create(path).map_err(|e| RecordError::from_io(path, e))?;
                StreamHandle::Writing(BufWriter::with_capacity(capacity, file))
            }
        };

        debug!("opened {} for {}", path.display(), mode);

        self.handle = handle;
        self.path = Some(path.to_path_buf());
        self.lines_read = 0;
        Ok(())
    }

    pub fn write<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()> {
        //! Append one record made of `columns` to the file.
        //!
        //! The columns are validated before the stream state is looked at,
        //! so bad input is reported as such even on an unopened stream.

        let record = Record::new(columns)?;
        self.write_record(&record)
    }

    pub fn write_optional<S: AsRef<str>>(&mut self, columns: Option<&[S]>) -> Result<()> {
        //! Like [`DelimitedRecordStream::write`], for callers that may not
        //! have a sequence at all. `None` fails with
        //! [`RecordError::NullInput`].

        let record = Record::from_optional(columns)?;
        self.write_record(&record)
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let line_ending = self.options.line_ending.as_str();
        let path = &self.path;

        let writer = match &mut self.handle {
            StreamHandle::Writing(writer) => writer,
            other => {
                return Err(RecordError::InvalidState {
                    operation: "write",
                    state: other.state(),
                });
            }
        };

        let line = record.to_line();
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(line_ending.as_bytes()))
            .map_err(|e| io_failure(path, e))?;

        trace!("wrote record of {} column(s)", record.len());
        Ok(())
    }

    pub fn read(&mut self, column1: &mut String, column2: &mut String) -> Result<bool> {
        //! Read the next line and put its first two columns in `column1`
        //! and `column2`.
        //!
        //! Returns `Ok(false)` with both outputs emptied at the end of the
        //! file, on a blank line, and on a line with fewer than two columns.
        //! Columns past the second are dropped.
        //!
        //! A line ends at `\n`, `\r\n` or a lone `\r`. A byte order mark at
        //! the start of the file is skipped.

        column1.clear();
        column2.clear();

        let path = &self.path;
        let reader = match &mut self.handle {
            StreamHandle::Reading(reader) => reader,
            other => {
                return Err(RecordError::InvalidState {
                    operation: "read",
                    state: other.state(),
                });
            }
        };

        self.line.clear();
        let bytes = read_line_bytes(reader, &mut self.line).map_err(|e| io_failure(path, e))?;

        if bytes == 0 {
            trace!("end of input reached");
            return Ok(false);
        }

        self.lines_read += 1;
        let decoded = String::from_utf8_lossy(&self.line);
        let line = match self.lines_read {
            1 => decoded
                .strip_prefix(BYTE_ORDER_MARK)
                .unwrap_or(&*decoded),
            _ => &*decoded,
        };

        if line.trim().is_empty() {
            trace!("blank line, treating as end of data");
            return Ok(false);
        }

        let mut fields = line.split(SEPARATOR);
        match (fields.next(), fields.next()) {
            (Some(first), Some(second)) => {
                column1.push_str(first);
                column2.push_str(second);
                Ok(true)
            }
            _ => {
                trace!("short row, treating as end of data");
                Ok(false)
            }
        }
    }

    pub fn read_pair(&mut self) -> Result<Option<(String, String)>> {
        //! Owned variant of [`DelimitedRecordStream::read`].
        //!
        //! Returns `None` where `read` would return `false`.

        let mut column1 = String::new();
        let mut column2 = String::new();

        let found = self.read(&mut column1, &mut column2)?;
        Ok(found.then_some((column1, column2)))
    }

    pub fn pairs(&mut self) -> Pairs<'_> {
        //! Iterate over the remaining pairs until the first "no more rows"
        //! or the first error, whichever comes first.

        Pairs {
            stream: self,
            finished: false,
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        let path = &self.path;
        match &mut self.handle {
            StreamHandle::Writing(writer) => writer.flush().map_err(|e| io_failure(path, e)),
            other => Err(RecordError::InvalidState {
                operation: "flush",
                state: other.state(),
            }),
        }
    }

    pub fn close(&mut self) {
        //! Release whatever file the stream holds. Safe to call any number
        //! of times, including on a stream that was never opened.
        //!
        //! A failed final flush is logged and otherwise ignored, use
        //! [`DelimitedRecordStream::flush`] first to observe it.

        let path = self.path.take();

        match mem::replace(&mut self.handle, StreamHandle::Unopened) {
            StreamHandle::Writing(mut writer) => {
                if let Err(error) = writer.flush() {
                    warn!("flush on close failed for {:?}: {}", path, error);
                }
                debug!("closed {:?} after writing", path);
            }
            StreamHandle::Reading(_) => debug!("closed {:?} after reading", path),
            StreamHandle::Unopened => {}
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        match self.handle {
            StreamHandle::Unopened => None,
            StreamHandle::Reading(_) => Some(Mode::Read),
            StreamHandle::Writing(_) => Some(Mode::Write),
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode().is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &StreamOptions {
        &self.options
    }
}

impl Default for DelimitedRecordStream {
    fn default() -> Self {
        DelimitedRecordStream::new()
    }
}

impl Drop for DelimitedRecordStream {
    fn drop(&mut self) {
        self.close();
    }
}

impl Iterator for Pairs<'_> {
    type Item = Result<(String, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.stream.read_pair() {
            Ok(Some(pair)) => Some(Ok(pair)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

fn io_failure(path: &Option<PathBuf>, source: io::Error) -> RecordError {
    RecordError::from_io(path.clone().unwrap_or_default(), source)
}

fn read_line_bytes<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<usize> {
    //! Append the next line to `line` without its terminator.
    //!
    //! Returns the number of bytes consumed, terminator included, so `0`
    //! means the input is exhausted.

    let mut consumed = 0;

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };

        if available.is_empty() {
            return Ok(consumed);
        }

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(index) => {
                let terminator = available[index];
                line.extend_from_slice(&available[..index]);
                reader.consume(index + 1);
                consumed += index + 1;

                // \r\n is one break, not two
                if terminator == b'\r' && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                    consumed += 1;
                }

                return Ok(consumed);
            }
            None => {
                let length = available.len();
                line.extend_from_slice(available);
                reader.consume(length);
                consumed += length;
            }
        }
    }
}
