//! Clipboard access through the terminal.
//!
//! The dashboard copies phone numbers by writing an OSC 52 escape sequence,
//! which most terminal emulators (and tmux with `set-clipboard on`) turn
//! into a system clipboard write. No clipboard daemon is needed.

use std::fmt;
use std::io;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crossterm::{execute, Command};

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// OSC 52 "set clipboard" sequence for the `c` selection
struct SetClipboard(String);

impl Command for SetClipboard {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b]52;c;{}\x07", STANDARD.encode(self.0.as_bytes()))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "OSC 52 requires an ANSI terminal",
        ))
    }
}

/// Writes to the controlling terminal via stdout
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        execute!(io::stdout(), SetClipboard(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        let mut out = String::new();
        SetClipboard("+46701234567".to_string())
            .write_ansi(&mut out)
            .unwrap();
        assert_eq!(out, "\x1b]52;c;KzQ2NzAxMjM0NTY3\x07");
    }

    #[test]
    fn test_osc52_encodes_utf8() {
        let mut out = String::new();
        SetClipboard("å".to_string()).write_ansi(&mut out).unwrap();
        assert_eq!(out, "\x1b]52;c;w6U=\x07");
    }
}
