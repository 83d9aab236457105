//! Where session answers come from.
//!
//! An interactive terminal gets line editing and history through rustyline.
//! Piped or scripted input is read line by line from any `BufRead`.

use std::io::{self, BufRead, Write};

use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, EditMode};

/// A source of answers to prompts
pub trait LineSource {
    /// Show `prompt` and read one line without its line ending.
    /// Returns `None` at end of input.
    fn read_line<W: Write>(&mut self, prompt: &str, out: &mut W) -> io::Result<Option<String>>;
}

/// Lines from a reader, with prompts echoed to the session output
#[derive(Debug)]
pub struct Scripted<R>(pub R);

impl<R: BufRead> LineSource for Scripted<R> {
    fn read_line<W: Write>(&mut self, prompt: &str, out: &mut W) -> io::Result<Option<String>> {
        write!(out, "{}", prompt)?;
        out.flush()?;

        let mut line = String::new();
        if self.0.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Line editor on an interactive terminal
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut editor = DefaultEditor::new().map_err(into_io)?;
        editor.set_edit_mode(EditMode::Emacs);
        editor.set_auto_add_history(false);
        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn read_line<W: Write>(&mut self, prompt: &str, out: &mut W) -> io::Result<Option<String>> {
        // The editor draws the prompt itself; anything queued must land first
        out.flush()?;

        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl+C and Ctrl+D both leave the current prompt like end of input
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(into_io(err)),
        }
    }
}

fn into_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}
