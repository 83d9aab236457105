//! Interactive command loop.
//!
//! Reads a command token, prompts for whatever the command needs, runs it
//! against the store and prints the outcome. Errors from the collection are
//! printed and the loop moves on to the next command.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::SessionSettings;
use crate::domain::{CollectionError, ItemId, ItemKind, NewBook, NewMovie};
use crate::library::{CollectionStore, PendingItem};

use super::input::{LineSource, Scripted};
use super::render;

const MENU: &str = "\n\n********** Welcome to the Collection Manager. **********
COMMAND    FUNCTION
  ci         Check in an item
  co         Check out an item
  ab         Add a new book
  am         Add a new movie
  db         Display books
  dm         Display movies
  qb         Query for books
  qm         Query for movies
  x          Exit";

const COMMAND_PROMPT: &str = "Please enter a command to proceed: ";
const CONFIRM_PROMPT: &str = "Press enter to add this item to the collection.  Enter 'x' to cancel.";

/// A menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CheckIn,
    CheckOut,
    AddBook,
    AddMovie,
    DisplayBooks,
    DisplayMovies,
    QueryBooks,
    QueryMovies,
    Exit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "ci" => Ok(Command::CheckIn),
            "co" => Ok(Command::CheckOut),
            "ab" => Ok(Command::AddBook),
            "am" => Ok(Command::AddMovie),
            "db" => Ok(Command::DisplayBooks),
            "dm" => Ok(Command::DisplayMovies),
            "qb" => Ok(Command::QueryBooks),
            "qm" => Ok(Command::QueryMovies),
            "x" => Ok(Command::Exit),
            other => anyhow::bail!("Unknown command: {}", other),
        }
    }
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Prompts and replies over a line source and an output
struct Console<L, W> {
    input: L,
    output: W,
}

impl<L: LineSource, W: Write> Console<L, W> {
    /// Show `text` and read one line. Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        self.input.read_line(text, &mut self.output)
    }

    fn say(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }
}

/// Interactive session over a loaded store
pub struct Session<L, W> {
    store: CollectionStore,
    console: Console<L, W>,
    settings: SessionSettings,
}

impl<R: BufRead, W: Write> Session<Scripted<R>, W> {
    /// Session reading answers line by line from `input`
    pub fn new(store: CollectionStore, input: R, output: W, settings: SessionSettings) -> Self {
        Self::with_source(store, Scripted(input), output, settings)
    }
}

impl<L: LineSource, W: Write> Session<L, W> {
    pub fn with_source(
        store: CollectionStore,
        input: L,
        output: W,
        settings: SessionSettings,
    ) -> Self {
        Self {
            store,
            console: Console { input, output },
            settings,
        }
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// Give back the store, e.g. to inspect it after a scripted run
    pub fn into_store(self) -> CollectionStore {
        self.store
    }

    /// Run commands until `x` or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.settings.show_menu {
                self.console.say(MENU)?;
            }

            let Some(token) = self.console.prompt(COMMAND_PROMPT)? else {
                debug!("End of input, leaving session");
                break;
            };

            let command = match token.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    debug!("{}", e);
                    self.console.say("Unknown command.  Please try again.")?;
                    continue;
                }
            };

            if self.dispatch(command)? == Flow::Exit {
                break;
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::CheckIn => self.check_in(),
            Command::CheckOut => self.check_out(),
            Command::AddBook => self.add_book(),
            Command::AddMovie => self.add_movie(),
            Command::DisplayBooks => self.display(ItemKind::Book),
            Command::DisplayMovies => self.display(ItemKind::Movie),
            Command::QueryBooks => self.query(ItemKind::Book),
            Command::QueryMovies => self.query(ItemKind::Movie),
            Command::Exit => Ok(Flow::Exit),
        }
    }

    /// Report a collection error and carry on
    fn report(&mut self, error: CollectionError) -> Result<Flow> {
        warn!(error = %error, "Command failed");
        self.console.say(&error)?;
        Ok(Flow::Continue)
    }

    fn read_id(&mut self, action: &str) -> Result<Option<Result<ItemId, CollectionError>>> {
        let text = format!("Enter the ID for the item you wish to {}: ", action);
        Ok(self
            .console
            .prompt(&text)?
            .map(|answer| answer.parse::<ItemId>()))
    }

    fn check_in(&mut self) -> Result<Flow> {
        let id = match self.read_id("check in")? {
            None => return Ok(Flow::Exit),
            Some(Err(e)) => return self.report(e),
            Some(Ok(id)) => id,
        };

        match self.store.check_in(id) {
            Ok(record) => {
                writeln!(self.console.output, "Your check in with ID {} has succeeded.", id)?;
                render::write_record(&mut self.console.output, record)?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    fn check_out(&mut self) -> Result<Flow> {
        let id = match self.read_id("check out")? {
            None => return Ok(Flow::Exit),
            Some(Err(e)) => return self.report(e),
            Some(Ok(id)) => id,
        };

        match self.store.check_out(id) {
            Ok(record) => {
                writeln!(self.console.output, "Your check out with ID {} has succeeded.", id)?;
                render::write_record(&mut self.console.output, record)?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }

    /// Prompt for each label in turn. `None` if input ends part way.
    fn read_fields<const N: usize>(&mut self, labels: [&str; N]) -> io::Result<Option<[String; N]>> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (value, label) in values.iter_mut().zip(labels) {
            match self.console.prompt(&format!("{}: ", label))? {
                Some(answer) => *value = answer,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    fn add_book(&mut self) -> Result<Flow> {
        self.console
            .say("Please enter the following attributes for the new book.")?;
        let Some([title, author, publisher, pages, year, copies]) =
            self.read_fields(["Title", "Author", "Publisher", "Pages", "Year", "Copies"])?
        else {
            return Ok(Flow::Exit);
        };

        let fields = NewBook {
            title,
            author,
            publisher,
            pages,
            year,
            copies,
        };

        match self.store.create_book(&fields) {
            Ok(pending) => confirm(&mut self.console, pending),
            Err(e) => self.report(e),
        }
    }

    fn add_movie(&mut self) -> Result<Flow> {
        self.console
            .say("Please enter the following attributes for the new movie.")?;
        let Some([title, director, length, genre, year, copies]) =
            self.read_fields(["Title", "Director", "Length", "Genre", "Year", "Copies"])?
        else {
            return Ok(Flow::Exit);
        };

        let fields = NewMovie {
            title,
            director,
            length,
            genre,
            year,
            copies,
        };

        match self.store.create_movie(&fields) {
            Ok(pending) => confirm(&mut self.console, pending),
            Err(e) => self.report(e),
        }
    }

    fn display(&mut self, kind: ItemKind) -> Result<Flow> {
        render::write_records(&mut self.console.output, kind, &self.store.list(kind))?;
        Ok(Flow::Continue)
    }

    fn query(&mut self, kind: ItemKind) -> Result<Flow> {
        let Some(query) = self
            .console
            .prompt("Enter a query string to use for the search: ")?
        else {
            return Ok(Flow::Exit);
        };

        match self.store.search(kind, &query) {
            Ok(results) => {
                render::write_records(&mut self.console.output, kind, &results)?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(e),
        }
    }
}

/// Show a pending item and ask whether to keep it.
///
/// Enter commits, `x` cancels, anything else asks again. End of input
/// cancels and ends the session.
fn confirm<L: LineSource, W: Write>(
    console: &mut Console<L, W>,
    pending: PendingItem<'_>,
) -> Result<Flow> {
    console.say("You have entered the following data:")?;
    render::write_record(&mut console.output, pending.record())?;

    loop {
        let flow = match console.prompt(CONFIRM_PROMPT)? {
            Some(answer) if answer.trim().is_empty() => match pending.commit() {
                Ok(record) => {
                    writeln!(console.output, "Item with ID {} has been added.", record.id())?;
                    return Ok(Flow::Continue);
                }
                Err(e) => {
                    warn!(error = %e, "Item not added");
                    console.say(&e)?;
                    return Ok(Flow::Continue);
                }
            },
            Some(answer) if answer.trim().eq_ignore_ascii_case("x") => Flow::Continue,
            Some(_) => continue,
            None => Flow::Exit,
        };

        let id = pending.cancel();
        writeln!(console.output, "Item discarded; ID {} remains available.", id)?;
        return Ok(flow);
    }
}
