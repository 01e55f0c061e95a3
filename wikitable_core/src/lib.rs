//! `wikitable_core` turns MediaWiki table markup (`{|`, `|-`, `|`, `!`, `|+`,
//! `|}`) into a flat, ordered stream of structural [`Event`]s.
//!
//! ## Processing Pipeline
//!
//! ```text
//! wikitext
//!   -> Tokenizer (table vocabulary, leftmost-longest literal matching)
//!   -> token queue owned by the parser
//!   -> WikitextTableParser::step (one token per call, cell text re-tokenized
//!      with the cell vocabulary when a cell closes)
//!   -> event log (TableStart, RowStart, ColStart(Data), ColEnd("..."), ...)
//! ```
//!
//! Nesting is carried by order only: every `*Start` is followed by its
//! matching end event, unless the input ran out first. Parsing never fails.
//!
//! ## Modules
//!
//! - [`attributes`] Lexer for HTML-style attribute text and the style
//!   payload rule used by `TableStyle`, `RowStyle` and `ColStyle`.
//! - [`config`] `wikitable.toml` discovery and [`ParserOptions`].
//!
//! ## Quick Start
//!
//! ```rust
//! use wikitable_core::Event;
//! use wikitable_core::build_tables;
//! use wikitable_core::parse_events;
//!
//! let events = parse_events("{|\n|-\n! Name\n! Score\n|-\n| Ada\n| 9\n|}");
//! assert_eq!(events.first(), Some(&Event::TableStart));
//!
//! let tables = build_tables(&events);
//! assert_eq!(tables[0].rows.len(), 2);
//! assert_eq!(tables[0].rows[1].cells[0].text, "Ada");
//! ```

pub use config::*;
pub use error::*;
pub use event::*;
pub use parser::*;
pub use table::*;
pub use tokenizer::*;
pub use vocabulary::*;

pub mod attributes;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod event;
mod parser;
mod table;
mod tokenizer;
mod vocabulary;

#[cfg(test)]
mod __fixtures;
