use serde::Serialize;

use crate::CellType;
use crate::Event;

/// A single cell rebuilt from `ColStart` .. `ColEnd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
	pub cell_type: CellType,
	pub style: Option<String>,
	pub text: String,
	/// `false` when the input ended before the cell was closed.
	pub closed: bool,
}

/// A row rebuilt from `RowStart` .. `RowEnd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
	pub style: Option<String>,
	pub cells: Vec<Cell>,
	/// The `RowEnd` payload.
	pub trailing: String,
	pub closed: bool,
}

impl Row {
	fn new() -> Self {
		Self {
			style: None,
			cells: Vec::new(),
			trailing: String::new(),
			closed: false,
		}
	}

	pub fn header_count(&self) -> usize {
		self.cells
			.iter()
			.filter(|cell| cell.cell_type == CellType::Header)
			.count()
	}
}

/// A table rebuilt from an event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
	pub style: Option<String>,
	pub caption: Option<String>,
	pub rows: Vec<Row>,
	pub closed: bool,
}

impl Table {
	/// Number of cells in the widest row.
	pub fn column_count(&self) -> usize {
		self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
	}
}

/// Folds [`Event`]s back into [`Table`]s.
///
/// Events that arrive out of place, for example a `ColEnd` with no open
/// cell, are ignored. Tables still open when the events run out are kept
/// with `closed == false`.
#[derive(Debug, Default)]
pub struct TableBuilder {
	tables: Vec<Table>,
	current: Option<Table>,
}

impl TableBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, event: &Event) {
		match event {
			Event::TableStart => {
				if let Some(table) = self.current.take() {
					self.tables.push(table);
				}
				self.current = Some(Table::default());
			}
			Event::TableStyle(style) => {
				if let Some(table) = self.current.as_mut() {
					table.style = Some(style.clone());
				}
			}
			Event::TableCaptionStart => {
				if let Some(table) = self.current.as_mut() {
					table.caption = Some(String::new());
				}
			}
			Event::TableCaption(caption) => {
				if let Some(table) = self.current.as_mut() {
					table.caption = Some(caption.clone());
				}
			}
			Event::RowStart => {
				if let Some(table) = self.current.as_mut() {
					table.rows.push(Row::new());
				}
			}
			Event::RowStyle(style) => {
				if let Some(row) = self.open_row() {
					row.style = Some(style.clone());
				}
			}
			Event::RowEnd(trailing) => {
				if let Some(row) = self.open_row() {
					row.trailing.clone_from(trailing);
					row.closed = true;
				}
			}
			Event::ColStart(cell_type) => {
				if let Some(row) = self.open_row() {
					row.cells.push(Cell {
						cell_type: *cell_type,
						style: None,
						text: String::new(),
						closed: false,
					});
				}
			}
			Event::ColStyle(style) => {
				if let Some(cell) = self.open_cell() {
					cell.style = Some(style.clone());
				}
			}
			Event::ColEnd(text) => {
				if let Some(cell) = self.open_cell() {
					cell.text.clone_from(text);
					cell.closed = true;
				}
			}
			Event::TableEnd => {
				if let Some(mut table) = self.current.take() {
					table.closed = true;
					self.tables.push(table);
				}
			}
		}
	}

	/// All tables seen so far, including one that is still open.
	pub fn finish(mut self) -> Vec<Table> {
		if let Some(table) = self.current.take() {
			self.tables.push(table);
		}
		self.tables
	}

	fn open_row(&mut self) -> Option<&mut Row> {
		self.current
			.as_mut()
			.and_then(|table| table.rows.last_mut())
			.filter(|row| !row.closed)
	}

	fn open_cell(&mut self) -> Option<&mut Cell> {
		self.open_row()
			.and_then(|row| row.cells.last_mut())
			.filter(|cell| !cell.closed)
	}
}

/// Rebuild every table described by `events`.
pub fn build_tables<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<Table> {
	let mut builder = TableBuilder::new();
	for event in events {
		builder.push(event);
	}
	builder.finish()
}
