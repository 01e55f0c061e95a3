use std::collections::BTreeSet;
use std::fmt::Display;

use derive_more::Deref;

// Table markup reference: https://en.wikipedia.org/wiki/Help:Table#Basic_table_markup

/// Special literals recognised at table-structure level.
///
/// Line-anchored markers include their leading `\n` so that the tokenizer
/// can tell a row delimiter at the start of a line apart from a stray `|-`
/// inside cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableMarker {
	/// `\n{|`
	TableStart,
	/// `\n|+`
	TableCaption,
	/// `\n|-`
	TableRow,
	/// `\n!`
	HeaderCell,
	/// `!!`
	InlineHeaderCell,
	/// `\n|`
	DataCell,
	/// `||`
	InlineDataCell,
	/// `\n|}`
	TableEnd,
	/// `<nowiki>`
	NoWikiStart,
	/// `</nowiki>`
	NoWikiEnd,
}

impl TableMarker {
	pub const ALL: [TableMarker; 10] = [
		TableMarker::TableStart,
		TableMarker::TableCaption,
		TableMarker::TableRow,
		TableMarker::HeaderCell,
		TableMarker::InlineHeaderCell,
		TableMarker::DataCell,
		TableMarker::InlineDataCell,
		TableMarker::TableEnd,
		TableMarker::NoWikiStart,
		TableMarker::NoWikiEnd,
	];

	pub fn literal(self) -> &'static str {
		match self {
			TableMarker::TableStart => "\n{|",
			TableMarker::TableCaption => "\n|+",
			TableMarker::TableRow => "\n|-",
			TableMarker::HeaderCell => "\n!",
			TableMarker::InlineHeaderCell => "!!",
			TableMarker::DataCell => "\n|",
			TableMarker::InlineDataCell => "||",
			TableMarker::TableEnd => "\n|}",
			TableMarker::NoWikiStart => "<nowiki>",
			TableMarker::NoWikiEnd => "</nowiki>",
		}
	}

	pub fn from_literal(literal: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|marker| marker.literal() == literal)
	}
}

impl Display for TableMarker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.literal())
	}
}

/// Special literals recognised inside the text of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellMarker {
	/// `[[`
	LinkStart,
	/// `]]`
	LinkEnd,
	/// `{{`
	TemplateStart,
	/// `}}`
	TemplateEnd,
	/// `style`
	Style,
	/// `|`
	Separator,
}

impl CellMarker {
	pub const ALL: [CellMarker; 6] = [
		CellMarker::LinkStart,
		CellMarker::LinkEnd,
		CellMarker::TemplateStart,
		CellMarker::TemplateEnd,
		CellMarker::Style,
		CellMarker::Separator,
	];

	pub fn literal(self) -> &'static str {
		match self {
			CellMarker::LinkStart => "[[",
			CellMarker::LinkEnd => "]]",
			CellMarker::TemplateStart => "{{",
			CellMarker::TemplateEnd => "}}",
			CellMarker::Style => "style",
			CellMarker::Separator => "|",
		}
	}

	pub fn from_literal(literal: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|marker| marker.literal() == literal)
	}
}

impl Display for CellMarker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.literal())
	}
}

/// An immutable set of special literals a [`Tokenizer`](crate::Tokenizer)
/// recognises.
///
/// Empty literals are dropped on construction since they would match at every
/// position without consuming input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Vocabulary(BTreeSet<String>);

impl Vocabulary {
	pub fn new<I, S>(literals: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(
			literals
				.into_iter()
				.map(Into::into)
				.filter(|literal| !literal.is_empty())
				.collect(),
		)
	}
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self::new(iter)
	}
}

/// The table-structural vocabulary: every [`TableMarker`] literal.
pub fn make_table_vocabulary() -> Vocabulary {
	TableMarker::ALL.iter().map(|marker| marker.literal()).collect()
}

/// The cell-text vocabulary: every [`CellMarker`] literal.
pub fn make_cell_vocabulary() -> Vocabulary {
	CellMarker::ALL.iter().map(|marker| marker.literal()).collect()
}
