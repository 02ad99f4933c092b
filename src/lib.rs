#![allow(clippy::module_inception)]

use std::path::Path;

use crate::errors::errors::{ErrorTip, SyntaxError};

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod trace;

/// Returns the text of a 1-based line, without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.trim_end_matches('\r'))
}


/// Prints a syntax error to stderr.
///
/// The first line is the diagnostic itself; it is followed by the offending
/// source line with a marker under the token:
///
/// ```text
/// [line 3] Error at ';': term expected
/// -> Main.jack
///   |
/// 3 | let x = ;
///   | --------^
/// ```
pub fn display_error(error: &SyntaxError, source: &str, file: &Path) {
    eprintln!("{}", error);
    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        eprintln!("  ({})", tip);
    }

    let Some(line_text) = get_line_at_position(source, error.get_line()) else {
        return;
    };

    let line_string = error.get_line().to_string();
    let padding = line_string.len() + 2;

    eprintln!("-> {}", file.display());
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let column = caret_offset(error);
    let arrows = column.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

/// 0-based character offset of the offending token on its line.
fn caret_offset(error: &SyntaxError) -> usize {
    error.get_column().saturating_sub(1) as usize
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
