//! Persistence of records as tab-separated lines needs the following components
//! - Mode (the exclusive access discipline, read XOR write)
//! - Record (ordered, validated columns, one line each on disk)
//! - Options (line ending and buffering, chosen by the caller)
//! - Stream (owns the file handle, writes records and reads pairs back)
//!

//  All modules of this lib
mod error;
mod mode;
mod options;
mod record;
mod stream;

//  External API
pub use error::{ErrorKind, RecordError, Result};
pub use mode::Mode;
pub use options::{LineEnding, StreamOptions};
pub use record::{Record, SEPARATOR};
pub use stream::{DelimitedRecordStream, Pairs};
