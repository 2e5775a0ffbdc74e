//! ui::output
//!
//! Buffered output sink and diagnostic helpers.
//!
//! # Design
//!
//! Command output is collected in an [`Output`] buffer and written to stdout
//! exactly once, when the application flushes at the end of a run (normal or
//! error path) or at an explicit stop. Diagnostics (`[debug]`, `warning:`)
//! bypass the buffer and go straight to stderr, gated by [`Verbosity`].

use std::fmt::Display;

use crate::core::config::DEFAULT_WIDTH;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Line-oriented output buffer.
///
/// # Invariants
///
/// - `flush` hands out the accumulated text once; later calls return only
///   what was written after the previous flush
#[derive(Debug, Clone)]
pub struct Output {
    buffer: String,
    width: usize,
}

impl Default for Output {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Output {
    /// Create an empty sink that wraps at `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            buffer: String::new(),
            width: width.max(1),
        }
    }

    /// Column width used for wrapping.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Append a line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.buffer.push_str(text.as_ref());
        self.buffer.push('\n');
    }

    /// Append raw text with no line terminator added.
    pub fn string(&mut self, text: impl AsRef<str>) {
        self.buffer.push_str(text.as_ref());
    }

    /// Append `text` wrapped to the sink width, continuation lines indented by
    /// `indent` spaces.
    pub fn indented_line(&mut self, text: impl AsRef<str>, indent: usize) {
        for line in wrap(text.as_ref(), self.width, indent) {
            self.line(line);
        }
    }

    /// Insert a line before everything written so far.
    pub fn unshift_line(&mut self, text: impl AsRef<str>) {
        let mut head = String::with_capacity(text.as_ref().len() + 1 + self.buffer.len());
        head.push_str(text.as_ref());
        head.push('\n');
        head.push_str(&self.buffer);
        self.buffer = head;
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Peek at the buffered text without flushing.
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Take the buffered text, leaving the sink empty.
    pub fn flush(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

/// Word-wrap `text` to `width` columns with a hanging `indent`.
///
/// Text that fits is returned untouched, internal spacing included. Breaks
/// happen at whitespace; a word longer than the available space is placed on
/// its own line rather than split.
pub fn wrap(text: &str, width: usize, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let mut lines = Vec::new();
    let mut rest = text.trim_end();
    let mut first = true;

    loop {
        let avail = if first {
            width
        } else {
            width.saturating_sub(indent).max(1)
        };
        let prefix = if first { "" } else { pad.as_str() };

        if rest.chars().count() <= avail {
            lines.push(format!("{}{}", prefix, rest));
            break;
        }

        let Some(cut) = split_point(rest, avail) else {
            lines.push(format!("{}{}", prefix, rest));
            break;
        };

        lines.push(format!("{}{}", prefix, rest[..cut].trim_end()));
        rest = rest[cut..].trim_start();
        if rest.is_empty() {
            break;
        }
        first = false;
    }

    lines
}

/// Byte index of the whitespace to break `s` at so that the head fits in
/// `avail` characters, or the first break after it when none fits.
fn split_point(s: &str, avail: usize) -> Option<usize> {
    let leading = s.len() - s.trim_start().len();
    let is_break = |idx: usize, ch: char| ch.is_whitespace() && idx > leading;

    let mut best = None;
    for (count, (idx, ch)) in s.char_indices().enumerate() {
        if count > avail {
            break;
        }
        if is_break(idx, ch) {
            best = Some(idx);
        }
    }

    best.or_else(|| {
        s.char_indices()
            .find(|(idx, ch)| is_break(*idx, *ch))
            .map(|(idx, _)| idx)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    mod verbosity {
        use super::*;

        #[test]
        fn quiet_wins_over_debug() {
            assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
            assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
            assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        }
    }

    mod sink {
        use super::*;

        #[test]
        fn lines_accumulate_in_order() {
            let mut out = Output::default();
            out.line("one");
            out.string("two");
            out.line("");
            assert_eq!(out.contents(), "one\ntwo\n");
        }

        #[test]
        fn flush_hands_out_buffer_once() {
            let mut out = Output::default();
            out.line("hello");

            assert_eq!(out.flush(), "hello\n");
            assert_eq!(out.flush(), "");
            assert!(out.is_empty());
        }

        #[test]
        fn unshift_prepends() {
            let mut out = Output::default();
            out.line("body");
            out.unshift_line("header");
            assert_eq!(out.flush(), "header\nbody\n");
        }

        #[test]
        fn indented_line_wraps_with_hanging_indent() {
            let mut out = Output::new(20);
            out.indented_line("alpha beta gamma delta epsilon", 4);
            assert_eq!(out.flush(), "alpha beta gamma\n    delta epsilon\n");
        }

        #[test]
        fn zero_width_is_clamped() {
            assert_eq!(Output::new(0).width(), 1);
        }
    }

    mod wrapping {
        use super::*;

        #[test]
        fn short_text_single_line() {
            assert_eq!(wrap("fits fine", 80, 4), vec!["fits fine".to_string()]);
        }

        #[test]
        fn fitting_text_keeps_internal_spacing() {
            let lines = wrap("   status     Show state", 80, 14);
            assert_eq!(lines, vec!["   status     Show state".to_string()]);
        }

        #[test]
        fn table_row_wraps_under_description_column() {
            let lines = wrap("   cookie     Read and write stored values", 30, 14);
            assert_eq!(
                lines,
                vec![
                    "   cookie     Read and write".to_string(),
                    "              stored values".to_string()
                ]
            );
        }

        #[test]
        fn long_word_gets_own_line() {
            let lines = wrap("a verylongwordthatoverflows b", 10, 2);
            assert_eq!(
                lines,
                vec![
                    "a".to_string(),
                    "  verylongwordthatoverflows".to_string(),
                    "  b".to_string()
                ]
            );
        }

        #[test]
        fn empty_text_yields_one_empty_line() {
            assert_eq!(wrap("", 10, 2), vec![String::new()]);
        }
    }
}
