//! Raw field values supplied for a new item.
//!
//! Values arrive as text from the prompt layer. Integer fields are coerced
//! here and a value that does not parse is reported, never defaulted.

use std::str::FromStr;

use super::error::CollectionError;
use super::record::{BookDetails, ItemDetails, MovieDetails};

/// Field values for a new book, in prompt order
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub pages: String,
    pub year: String,
    pub copies: String,
}

/// Field values for a new movie, in prompt order
#[derive(Debug, Clone, Default)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub length: String,
    pub genre: String,
    pub year: String,
    pub copies: String,
}

/// Typed values of a new item, ready to receive an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub year: i32,
    pub copies: u32,
    pub details: ItemDetails,
}

/// Parse an integer field, naming the field in the error
pub fn parse_int<T: FromStr>(field: &'static str, value: &str) -> Result<T, CollectionError> {
    value
        .trim()
        .parse()
        .map_err(|_| CollectionError::invalid_field(field, value))
}

impl NewBook {
    pub fn parse(&self) -> Result<NewItem, CollectionError> {
        Ok(NewItem {
            title: self.title.clone(),
            year: parse_int("Year", &self.year)?,
            copies: parse_int("Copies", &self.copies)?,
            details: ItemDetails::Book(BookDetails {
                author: self.author.clone(),
                publisher: self.publisher.clone(),
                pages: parse_int("Pages", &self.pages)?,
            }),
        })
    }
}

impl NewMovie {
    pub fn parse(&self) -> Result<NewItem, CollectionError> {
        Ok(NewItem {
            title: self.title.clone(),
            year: parse_int("Year", &self.year)?,
            copies: parse_int("Copies", &self.copies)?,
            details: ItemDetails::Movie(MovieDetails {
                director: self.director.clone(),
                genre: self.genre.clone(),
                length: parse_int("Length", &self.length)?,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book() {
        let fields = NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            publisher: "Chilton".to_string(),
            pages: "412".to_string(),
            year: " 1965".to_string(),
            copies: "2".to_string(),
        };

        let item = fields.parse().unwrap();
        assert_eq!(item.year, 1965);
        assert_eq!(item.copies, 2);
        match item.details {
            ItemDetails::Book(b) => assert_eq!(b.pages, 412),
            other => panic!("Expected book details, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_movie_rejects_bad_length() {
        let fields = NewMovie {
            title: "Heat".to_string(),
            length: "long".to_string(),
            year: "1995".to_string(),
            copies: "1".to_string(),
            ..Default::default()
        };

        match fields.parse() {
            Err(CollectionError::InvalidFieldValue { field, value }) => {
                assert_eq!(field, "Length");
                assert_eq!(value, "long");
            }
            other => panic!("Expected InvalidFieldValue, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_copies_rejected() {
        assert!(matches!(
            parse_int::<u32>("Copies", "-1"),
            Err(CollectionError::InvalidFieldValue { field: "Copies", .. })
        ));
    }

    #[test]
    fn test_negative_pages_accepted_like_year() {
        let fields = NewBook {
            title: "Apocrypha".to_string(),
            pages: "-5".to_string(),
            year: "-300".to_string(),
            copies: "1".to_string(),
            ..Default::default()
        };

        let item = fields.parse().unwrap();
        assert_eq!(item.year, -300);
        match item.details {
            ItemDetails::Book(b) => assert_eq!(b.pages, -5),
            other => panic!("Expected book details, got {:?}", other),
        }
    }
}
