use std::fmt::Display;

use serde::Serialize;

/// Whether a cell was opened with a header (`!`) or data (`|`) delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
	Header,
	Data,
}

impl Display for CellType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			CellType::Header => write!(f, "Header"),
			CellType::Data => write!(f, "Data"),
		}
	}
}

/// One structural boundary or attribute discovered while parsing.
///
/// Events carry no parent pointers. Nesting is recovered by pairing each
/// `*Start` with the next matching `*End`, the way a SAX stream is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum Event {
	TableStart,
	TableStyle(String),
	TableCaptionStart,
	TableCaption(String),
	RowStart,
	RowStyle(String),
	/// Stray row-level text that appeared outside any cell, usually empty.
	RowEnd(String),
	ColStart(CellType),
	ColStyle(String),
	/// The cell's content.
	ColEnd(String),
	TableEnd,
}

impl Event {
	/// True for the events that open a structural element.
	pub fn is_start(&self) -> bool {
		matches!(
			self,
			Event::TableStart | Event::TableCaptionStart | Event::RowStart | Event::ColStart(_)
		)
	}

	/// True for the events that close a structural element. A caption is
	/// closed by its [`Event::TableCaption`] payload.
	pub fn is_end(&self) -> bool {
		matches!(
			self,
			Event::TableEnd | Event::TableCaption(_) | Event::RowEnd(_) | Event::ColEnd(_)
		)
	}
}

impl Display for Event {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Event::TableStart => write!(f, "TableStart"),
			Event::TableStyle(text) => write!(f, "TableStyle({text:?})"),
			Event::TableCaptionStart => write!(f, "TableCaptionStart"),
			Event::TableCaption(text) => write!(f, "TableCaption({text:?})"),
			Event::RowStart => write!(f, "RowStart"),
			Event::RowStyle(text) => write!(f, "RowStyle({text:?})"),
			Event::RowEnd(text) => write!(f, "RowEnd({text:?})"),
			Event::ColStart(cell_type) => write!(f, "ColStart({cell_type})"),
			Event::ColStyle(text) => write!(f, "ColStyle({text:?})"),
			Event::ColEnd(text) => write!(f, "ColEnd({text:?})"),
			Event::TableEnd => write!(f, "TableEnd"),
		}
	}
}
