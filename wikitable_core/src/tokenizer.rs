use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

use crate::CellMarker;
use crate::TableMarker;
use crate::Vocabulary;

/// A lexical unit produced by a [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
	/// A maximal run of characters that did not start any vocabulary literal.
	Text(String),
	/// A vocabulary literal, stored exactly as it appeared in the input.
	Special(String),
}

impl Token {
	/// The source text covered by this token.
	pub fn as_str(&self) -> &str {
		match self {
			Token::Text(text) | Token::Special(text) => text,
		}
	}

	pub fn is_special(&self) -> bool {
		matches!(self, Token::Special(_))
	}

	/// The table-level kind of a special token, if it is one.
	pub fn table_marker(&self) -> Option<TableMarker> {
		match self {
			Token::Special(literal) => TableMarker::from_literal(literal),
			Token::Text(_) => None,
		}
	}

	/// The cell-level kind of a special token, if it is one.
	pub fn cell_marker(&self) -> Option<CellMarker> {
		match self {
			Token::Special(literal) => CellMarker::from_literal(literal),
			Token::Text(_) => None,
		}
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Token::Text(text) => write!(f, "Text({text:?})"),
			Token::Special(literal) => write!(f, "Special({literal:?})"),
		}
	}
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
	/// Set when a vocabulary literal ends at this node.
	terminal: bool,
	children: BTreeMap<char, TrieNode>,
}

impl TrieNode {
	fn insert(&mut self, literal: &str) {
		let mut node = self;
		for ch in literal.chars() {
			node = node.children.entry(ch).or_default();
		}
		node.terminal = true;
	}

	/// Byte length of the longest vocabulary literal that prefixes `rest`.
	fn longest_match(&self, rest: &str) -> Option<usize> {
		let mut node = self;
		let mut longest = None;

		for (index, ch) in rest.char_indices() {
			let Some(child) = node.children.get(&ch) else {
				break;
			};

			node = child;
			if node.terminal {
				longest = Some(index + ch.len_utf8());
			}
		}

		longest
	}
}

/// Splits text into [`Token`]s using a fixed [`Vocabulary`].
///
/// Matching is leftmost-longest: at each position the longest literal that
/// starts there wins, so `\n|-` is never read as `\n|` followed by text. The
/// tokenizer keeps no state between calls.
#[derive(Debug, Clone)]
pub struct Tokenizer {
	vocabulary: Vocabulary,
	root: TrieNode,
}

impl Tokenizer {
	pub fn new(vocabulary: Vocabulary) -> Self {
		let mut root = TrieNode::default();
		for literal in vocabulary.iter() {
			root.insert(literal);
		}

		Self { vocabulary, root }
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Tokenize `text`. Concatenating the returned tokens reproduces `text`.
	pub fn tokenize(&self, text: &str) -> Vec<Token> {
		let mut tokens = Vec::new();
		let mut text_start = 0;
		let mut cursor = 0;

		while cursor < text.len() {
			if let Some(length) = self.root.longest_match(&text[cursor..]) {
				if text_start < cursor {
					tokens.push(Token::Text(text[text_start..cursor].to_string()));
				}

				tokens.push(Token::Special(text[cursor..cursor + length].to_string()));
				cursor += length;
				text_start = cursor;
				continue;
			}

			// Not a literal start: step over one whole character.
			let width = text[cursor..].chars().next().map_or(1, char::len_utf8);
			cursor += width;
		}

		if text_start < text.len() {
			tokens.push(Token::Text(text[text_start..].to_string()));
		}

		tracing::trace!(
			input_len = text.len(),
			token_count = tokens.len(),
			"tokenized text"
		);

		tokens
	}
}
