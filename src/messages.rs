//! Message formatting for the demo output.
//!
//! - Highlight Text (make the text tabline teal but not bold)
//! - System message formatting functions that produce the same
//! format messages.

use colored::{Color, Colorize};

/// Main color of the demo output.
pub(crate) const TABLINE_TEAL: Color = Color::TrueColor {
    r: 64,
    g: 196,
    b: 180,
};

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the tabline teal
    //! color to make it obvious.

    format!("{}", argument.color(TABLINE_TEAL))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Format a message with its source name (like 'writer') in front,
    //! the same way for every line the demo prints.

    let source_formatted = format!("{:6}", source_name.color(TABLINE_TEAL).bold());

    format!("[{}] {}", source_formatted, message)
}
