use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::RecordError;

/// The access discipline a stream is opened with. A stream is either
/// reading or writing, never both, so there is no combined variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Read,
    Write,
}

impl Mode {
    /// Numeric value older callers used for [`Mode::Read`].
    pub const READ_FLAG: u8 = 1;
    /// Numeric value older callers used for [`Mode::Write`].
    pub const WRITE_FLAG: u8 = 2;
}

impl TryFrom<u8> for Mode {
    type Error = RecordError;

    fn try_from(flags: u8) -> Result<Self, Self::Error> {
        //! Accept exactly one of the numeric flag values. Unions such as
        //! `READ_FLAG | WRITE_FLAG` are refused instead of picking a side.

        match flags {
            Mode::READ_FLAG => Ok(Mode::Read),
            Mode::WRITE_FLAG => Ok(Mode::Write),
            other => Err(RecordError::InvalidArgument(format!(
                "unknown file mode {}: expected exactly read ({}) or write ({})",
                other,
                Mode::READ_FLAG,
                Mode::WRITE_FLAG
            ))),
        }
    }
}

impl FromStr for Mode {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "read" => Ok(Mode::Read),
            "write" => Ok(Mode::Write),
            other => Err(RecordError::InvalidArgument(format!(
                "unknown file mode '{}': expected 'read' or 'write'",
                other
            ))),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            Mode::Read => "READ",
            Mode::Write => "WRITE",
        };
        write!(f, "{}", mode)
    }
}
