use std::fmt::Display;

use super::error::{RecordError, Result};

/// The single character placed between two columns of a record.
///
/// Columns are not quoted or escaped, so a column holding this character
/// will shift the column boundaries when the line is read back.
pub const SEPARATOR: char = '\t';

/// One line worth of columns, already checked to be writable.
///
/// A [`Record`] always has at least one column, and none of its columns
/// is empty or made only of whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Vec<String>);

impl Record {
    pub fn new<I, S>(columns: I) -> Result<Record>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        //! Validate the columns and take ownership of them.
        //!
        //! Returns [`RecordError::InvalidArgument`] when there are no
        //! columns at all or when any column is blank.

        let mut values = Vec::new();

        for (index, column) in columns.into_iter().enumerate() {
            let column = column.as_ref();
            if column.trim().is_empty() {
                return Err(RecordError::InvalidArgument(format!(
                    "blank column at index {}: columns cannot be empty or whitespace",
                    index
                )));
            }
            values.push(column.to_string());
        }

        if values.is_empty() {
            return Err(RecordError::InvalidArgument(String::from(
                "no columns: a record needs at least one column",
            )));
        }

        Ok(Record(values))
    }

    pub fn from_optional<I, S>(columns: Option<I>) -> Result<Record>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        //! Same as [`Record::new`], but an absent sequence is reported as
        //! [`RecordError::NullInput`] rather than as an empty one.

        match columns {
            Some(columns) => Record::new(columns),
            None => Err(RecordError::NullInput("columns")),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first_two(&self) -> Option<(&str, &str)> {
        //! The pair a reader will see for this record once written, if the
        //! record has at least two columns.

        match self.0.as_slice() {
            [first, second, ..] => Some((first.as_str(), second.as_str())),
            _ => None,
        }
    }

    pub fn to_line(&self) -> String {
        //! Join the columns with [`SEPARATOR`]. No terminator is added.

        let separator = SEPARATOR.to_string();
        self.0.join(separator.as_str())
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_line())
    }
}
