use std::cell::OnceCell;
use std::collections::VecDeque;

use crate::CellMarker;
use crate::CellType;
use crate::Event;
use crate::ParserOptions;
use crate::TableMarker;
use crate::Token;
use crate::Tokenizer;
use crate::attributes::style_payload;
use crate::make_cell_vocabulary;
use crate::make_table_vocabulary;

// https://en.wikiversity.org/wiki/Help:Wikitext_quick_reference

/// The structural context the parser is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
	/// Outside any table. Text here is not significant.
	Outside,
	/// Inside a table, before the first row or after a caption.
	Table,
	/// Inside a `|+` caption.
	Caption,
	/// Inside a row, before its first cell.
	Row,
	/// Inside a header or data cell.
	Cell,
}

/// A piece of buffered cell text. `Literal` text came from `<nowiki>` or a
/// nested table and is never searched for an attribute separator.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Fragment {
	Markup(String),
	Literal(String),
}

#[derive(Debug, Default)]
struct CellBuffer {
	fragments: Vec<Fragment>,
}

impl CellBuffer {
	fn push_markup(&mut self, text: &str) {
		if let Some(Fragment::Markup(last)) = self.fragments.last_mut() {
			last.push_str(text);
		} else {
			self.fragments.push(Fragment::Markup(text.to_string()));
		}
	}

	fn push_literal(&mut self, text: &str) {
		if let Some(Fragment::Literal(last)) = self.fragments.last_mut() {
			last.push_str(text);
		} else {
			self.fragments.push(Fragment::Literal(text.to_string()));
		}
	}

	fn take(&mut self) -> Vec<Fragment> {
		std::mem::take(&mut self.fragments)
	}
}

/// Incremental wikitext table parser.
///
/// The source is split into a queue of table-level tokens. Each call to
/// [`step`](Self::step) consumes exactly one token and appends zero or more
/// [`Event`]s to the log. Cell content is re-tokenized with the cell-level
/// tokenizer when the cell closes.
///
/// Malformed input never fails: elements that are still open when the queue
/// runs dry simply have no closing event.
///
/// ```
/// use wikitable_core::CellType;
/// use wikitable_core::Event;
/// use wikitable_core::Tokenizer;
/// use wikitable_core::WikitextTableParser;
/// use wikitable_core::make_cell_vocabulary;
/// use wikitable_core::make_table_vocabulary;
///
/// let mut parser = WikitextTableParser::new(
/// 	Tokenizer::new(make_table_vocabulary()),
/// 	Tokenizer::new(make_cell_vocabulary()),
/// 	"{|\n|-\n|cell1\n|}",
/// 	true,
/// );
///
/// while parser.has_remaining() {
/// 	parser.step();
/// }
///
/// assert_eq!(parser.event_log(), &[
/// 	Event::TableStart,
/// 	Event::RowStart,
/// 	Event::ColStart(CellType::Data),
/// 	Event::ColEnd("cell1".into()),
/// 	Event::RowEnd(String::new()),
/// 	Event::TableEnd,
/// ]);
/// ```
#[derive(Debug)]
pub struct WikitextTableParser {
	table_tokenizer: Tokenizer,
	cell_tokenizer: Tokenizer,
	options: ParserOptions,
	source: String,
	queue: OnceCell<VecDeque<Token>>,
	state: State,
	events: Vec<Event>,
	/// Attribute text of the table or row line being read. `None` once the
	/// line has been flushed.
	attributes: Option<String>,
	/// Caption text, or stray row text outside any cell.
	text: String,
	cell: CellBuffer,
	/// Cell type of the current line, used by the inline `||` and `!!`
	/// delimiters.
	cell_line: CellType,
	/// Inside `<nowiki>`.
	verbatim: bool,
	/// Depth of tables nested inside the current cell.
	nested_depth: usize,
}

impl WikitextTableParser {
	/// Create a parser over `source`. With `eager` the source is tokenized
	/// immediately, otherwise on first access to the token queue.
	pub fn new(
		table_tokenizer: Tokenizer,
		cell_tokenizer: Tokenizer,
		source: &str,
		eager: bool,
	) -> Self {
		let options = ParserOptions {
			eager,
			..ParserOptions::default()
		};

		Self::with_options(table_tokenizer, cell_tokenizer, source, options)
	}

	pub fn with_options(
		table_tokenizer: Tokenizer,
		cell_tokenizer: Tokenizer,
		source: &str,
		options: ParserOptions,
	) -> Self {
		let parser = Self {
			table_tokenizer,
			cell_tokenizer,
			options,
			source: source.to_string(),
			queue: OnceCell::new(),
			state: State::Outside,
			events: Vec::new(),
			attributes: None,
			text: String::new(),
			cell: CellBuffer::default(),
			cell_line: CellType::Data,
			verbatim: false,
			nested_depth: 0,
		};

		if options.eager {
			parser.ensure_tokenized();
		}

		parser
	}

	/// Create a parser with the standard table and cell vocabularies.
	pub fn from_source(source: &str, options: ParserOptions) -> Self {
		Self::with_options(
			Tokenizer::new(make_table_vocabulary()),
			Tokenizer::new(make_cell_vocabulary()),
			source,
			options,
		)
	}

	pub fn options(&self) -> ParserOptions {
		self.options
	}

	pub fn state(&self) -> State {
		self.state
	}

	/// Tokens not consumed yet, front first.
	pub fn remaining_tokens(&self) -> &VecDeque<Token> {
		self.ensure_tokenized()
	}

	pub fn has_remaining(&self) -> bool {
		!self.remaining_tokens().is_empty()
	}

	/// Events emitted so far, in source order.
	pub fn event_log(&self) -> &[Event] {
		&self.events
	}

	/// Consume one token from the queue. Does nothing once the queue is
	/// exhausted.
	pub fn step(&mut self) {
		self.ensure_tokenized();
		let Some(token) = self.queue.get_mut().and_then(VecDeque::pop_front) else {
			tracing::trace!("step called on an exhausted token queue");
			return;
		};

		tracing::trace!(state = ?self.state, %token, "step");
		self.dispatch(&token);
	}

	/// Step until the token queue is empty.
	pub fn run_to_end(&mut self) {
		while self.has_remaining() {
			self.step();
		}
	}

	/// Step until the token queue is empty and return the event log.
	pub fn finish(mut self) -> Vec<Event> {
		self.run_to_end();
		self.events
	}

	fn ensure_tokenized(&self) -> &VecDeque<Token> {
		self.queue.get_or_init(|| {
			if self.source.is_empty() {
				return VecDeque::new();
			}

			// Line-anchored markers start with `\n`, so the first line needs one
			// too.
			let text = format!("\n{}", self.source);
			self.table_tokenizer.tokenize(&text).into()
		})
	}

	fn emit(&mut self, event: Event) {
		tracing::trace!(%event, "emit");
		self.events.push(event);
	}

	fn dispatch(&mut self, token: &Token) {
		let marker = token.table_marker();

		if self.verbatim {
			if marker == Some(TableMarker::NoWikiEnd) {
				self.verbatim = false;
			} else {
				self.push_text(token.as_str(), true);
			}
			return;
		}

		if self.nested_depth > 0 {
			match marker {
				Some(TableMarker::TableStart) => self.nested_depth += 1,
				Some(TableMarker::TableEnd) => self.nested_depth -= 1,
				_ => {}
			}
			self.cell.push_literal(token.as_str());
			return;
		}

		match marker {
			None => self.push_text(token.as_str(), false),
			Some(TableMarker::NoWikiStart) => self.verbatim = true,
			// A stray closer has nothing to close.
			Some(TableMarker::NoWikiEnd) => {}
			Some(marker) => self.on_marker(marker, token.as_str()),
		}
	}

	fn push_text(&mut self, text: &str, literal: bool) {
		match self.state {
			State::Outside => {}
			State::Table | State::Row => self.push_attribute_text(text),
			State::Caption => self.text.push_str(text),
			State::Cell => {
				if literal {
					self.cell.push_literal(text);
				} else {
					self.cell.push_markup(text);
				}
			}
		}
	}

	/// Text on a table or row line is attribute text up to the end of that
	/// line. Row text after it is kept for `RowEnd`; table text is dropped.
	fn push_attribute_text(&mut self, text: &str) {
		let Some(attributes) = self.attributes.as_mut() else {
			if self.state == State::Row {
				self.text.push_str(text);
			}
			return;
		};

		match text.split_once('\n') {
			Some((line, rest)) => {
				attributes.push_str(line);
				self.flush_attributes();
				if self.state == State::Row {
					self.text.push_str(rest);
				}
			}
			None => attributes.push_str(text),
		}
	}

	fn flush_attributes(&mut self) {
		let Some(attributes) = self.attributes.take() else {
			return;
		};

		if attributes.trim().is_empty() {
			return;
		}

		let payload = style_payload(&attributes);
		match self.state {
			State::Table => self.emit(Event::TableStyle(payload)),
			State::Row => self.emit(Event::RowStyle(payload)),
			State::Outside | State::Caption | State::Cell => {}
		}
	}

	fn on_marker(&mut self, marker: TableMarker, literal: &str) {
		match self.state {
			State::Outside => {
				if marker == TableMarker::TableStart {
					self.open_table();
				}
			}
			State::Table => self.on_table_marker(marker),
			State::Caption => {
				match marker {
					TableMarker::InlineDataCell | TableMarker::InlineHeaderCell => {
						self.text.push_str(literal);
					}
					TableMarker::TableStart => {}
					_ => {
						self.close_caption();
						self.on_table_marker(marker);
					}
				}
			}
			State::Row => self.on_row_marker(marker),
			State::Cell => self.on_cell_marker(marker, literal),
		}
	}

	fn on_table_marker(&mut self, marker: TableMarker) {
		match marker {
			TableMarker::TableCaption => {
				self.flush_attributes();
				self.open_caption();
			}
			TableMarker::TableRow => {
				self.flush_attributes();
				self.open_row(true);
			}
			TableMarker::HeaderCell
			| TableMarker::InlineHeaderCell
			| TableMarker::DataCell
			| TableMarker::InlineDataCell => {
				// A cell before any `|-` opens the row implicitly.
				self.flush_attributes();
				self.open_row(false);
				self.on_row_marker(marker);
			}
			TableMarker::TableEnd => {
				self.flush_attributes();
				self.close_table();
			}
			TableMarker::TableStart | TableMarker::NoWikiStart | TableMarker::NoWikiEnd => {}
		}
	}

	fn on_row_marker(&mut self, marker: TableMarker) {
		match marker {
			TableMarker::HeaderCell | TableMarker::InlineHeaderCell => {
				self.flush_attributes();
				self.cell_line = CellType::Header;
				self.open_cell(CellType::Header);
			}
			TableMarker::DataCell | TableMarker::InlineDataCell => {
				self.flush_attributes();
				self.cell_line = CellType::Data;
				self.open_cell(CellType::Data);
			}
			TableMarker::TableRow => {
				self.flush_attributes();
				self.close_row();
				self.open_row(true);
			}
			TableMarker::TableEnd => {
				self.flush_attributes();
				self.close_row();
				self.close_table();
			}
			TableMarker::TableCaption => {
				self.flush_attributes();
				self.close_row();
				self.open_caption();
			}
			TableMarker::TableStart | TableMarker::NoWikiStart | TableMarker::NoWikiEnd => {}
		}
	}

	fn on_cell_marker(&mut self, marker: TableMarker, literal: &str) {
		match marker {
			TableMarker::HeaderCell => {
				self.close_cell();
				self.cell_line = CellType::Header;
				self.open_cell(CellType::Header);
			}
			TableMarker::DataCell => {
				self.close_cell();
				self.cell_line = CellType::Data;
				self.open_cell(CellType::Data);
			}
			TableMarker::InlineDataCell => {
				self.close_cell();
				self.open_cell(self.cell_line);
			}
			// `!!` only separates cells on a header line.
			TableMarker::InlineHeaderCell => {
				if self.cell_line == CellType::Header {
					self.close_cell();
					self.open_cell(CellType::Header);
				} else {
					self.cell.push_markup(literal);
				}
			}
			TableMarker::TableRow => {
				self.close_cell();
				self.close_row();
				self.open_row(true);
			}
			TableMarker::TableEnd => {
				self.close_cell();
				self.close_row();
				self.close_table();
			}
			TableMarker::TableCaption => {
				self.close_cell();
				self.close_row();
				self.open_caption();
			}
			TableMarker::TableStart => {
				self.nested_depth = 1;
				self.cell.push_literal(literal);
			}
			TableMarker::NoWikiStart | TableMarker::NoWikiEnd => {}
		}
	}

	fn open_table(&mut self) {
		tracing::debug!(table = self.table_count(), "table opened");
		self.emit(Event::TableStart);
		self.state = State::Table;
		self.attributes = Some(String::new());
		self.text.clear();
	}

	fn close_table(&mut self) {
		self.emit(Event::TableEnd);
		self.state = State::Outside;
		self.attributes = None;
		self.text.clear();
		tracing::debug!(events = self.events.len(), "table closed");
	}

	fn open_caption(&mut self) {
		self.emit(Event::TableCaptionStart);
		self.state = State::Caption;
		self.text.clear();
	}

	fn close_caption(&mut self) {
		let caption = std::mem::take(&mut self.text);
		self.emit(Event::TableCaption(caption.trim().to_string()));
		self.state = State::Table;
	}

	fn open_row(&mut self, collect_attributes: bool) {
		self.emit(Event::RowStart);
		self.state = State::Row;
		self.attributes = collect_attributes.then(String::new);
		self.text.clear();
	}

	fn close_row(&mut self) {
		let trailing = std::mem::take(&mut self.text);
		self.emit(Event::RowEnd(trailing.trim().to_string()));
		self.attributes = None;
		self.state = State::Table;
	}

	fn open_cell(&mut self, cell_type: CellType) {
		self.emit(Event::ColStart(cell_type));
		self.state = State::Cell;
		self.cell.fragments.clear();
	}

	fn close_cell(&mut self) {
		let fragments = self.cell.take();
		let (style, content) = self.split_cell(fragments);

		if let Some(style) = style {
			self.emit(Event::ColStyle(style_payload(&style)));
		}

		let content = if self.options.trim_cell_text {
			content.trim().to_string()
		} else {
			content
		};

		self.emit(Event::ColEnd(content));
		self.state = State::Row;
	}

	/// Split buffered cell text at its first top-level `|` into attribute
	/// text and content. Separators inside `[[...]]`, `{{...}}` or literal
	/// fragments don't count.
	fn split_cell(&self, fragments: Vec<Fragment>) -> (Option<String>, String) {
		let mut style = None;
		let mut current = String::new();
		let mut link_depth = 0usize;
		let mut template_depth = 0usize;

		for fragment in fragments {
			let markup = match fragment {
				Fragment::Literal(text) => {
					current.push_str(&text);
					continue;
				}
				Fragment::Markup(markup) => markup,
			};

			for token in self.cell_tokenizer.tokenize(&markup) {
				match token.cell_marker() {
					Some(CellMarker::LinkStart) => link_depth += 1,
					Some(CellMarker::LinkEnd) => link_depth = link_depth.saturating_sub(1),
					Some(CellMarker::TemplateStart) => template_depth += 1,
					Some(CellMarker::TemplateEnd) => {
						template_depth = template_depth.saturating_sub(1);
					}
					Some(CellMarker::Separator)
						if style.is_none() && link_depth == 0 && template_depth == 0 =>
					{
						style = Some(std::mem::take(&mut current));
						continue;
					}
					Some(CellMarker::Separator | CellMarker::Style) | None => {}
				}

				current.push_str(token.as_str());
			}
		}

		(style, current)
	}

	fn table_count(&self) -> usize {
		self.events
			.iter()
			.filter(|event| matches!(event, Event::TableStart))
			.count()
	}
}

/// Parse `source` with the standard vocabularies and default options.
pub fn parse_events(source: &str) -> Vec<Event> {
	parse_events_with_options(source, ParserOptions::default())
}

pub fn parse_events_with_options(source: &str, options: ParserOptions) -> Vec<Event> {
	WikitextTableParser::from_source(source, options).finish()
}
