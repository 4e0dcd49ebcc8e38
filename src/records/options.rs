use serde::{Deserialize, Serialize};

const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Which terminator goes after every written record.
///
/// Reading always accepts both `\n` and `\r\n`, whatever is set here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Platform,
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Platform if cfg!(windows) => "\r\n",
            LineEnding::Platform | LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Caller supplied knobs for a [`super::DelimitedRecordStream`].
///
/// There is no config file or environment lookup. An application that
/// keeps these in its own configuration can deserialize them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamOptions {
    pub line_ending: LineEnding,
    pub buffer_capacity: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        StreamOptions {
            line_ending: LineEnding::default(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl StreamOptions {
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }
}
