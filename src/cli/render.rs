//! Plain-text rendering of records.

use std::io::{self, Write};

use crate::domain::{ItemDetails, ItemKind, Record};

/// Write one record, one field per line, followed by a blank line
pub fn write_record<W: Write>(out: &mut W, record: &Record) -> io::Result<()> {
    writeln!(out, "ID: {}", record.id())?;
    writeln!(out, "Title: {}", record.title)?;
    writeln!(out, "Year: {}", record.year)?;
    writeln!(out, "Copies: {}", record.copies())?;
    writeln!(out, "Available: {}", record.available())?;

    match &record.details {
        ItemDetails::Book(book) => {
            writeln!(out, "Author: {}", book.author)?;
            writeln!(out, "Publisher: {}", book.publisher)?;
            writeln!(out, "Pages: {}", book.pages)?;
        }
        ItemDetails::Movie(movie) => {
            writeln!(out, "Director: {}", movie.director)?;
            writeln!(out, "Length: {}", movie.length)?;
            writeln!(out, "Genre: {}", movie.genre)?;
        }
    }

    writeln!(out)
}

/// Write a list of records, or a "nothing found" line when it is empty
pub fn write_records<W: Write>(out: &mut W, kind: ItemKind, records: &[&Record]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No related {} are found.", kind.plural());
    }

    for record in records {
        write_record(out, record)?;
    }
    Ok(())
}
