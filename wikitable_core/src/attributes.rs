use logos::Logos;
use serde::Serialize;

/// Raw tokens for the HTML-style attribute text that follows `{|`, `|-` and
/// sits before a cell's `|` separator.
#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
	#[token("=")]
	Equals,
	#[regex(r#""[^"]*""#)]
	DoubleQuoted,
	#[regex(r"'[^']*'")]
	SingleQuoted,
	/// A quote that is never closed runs to the end of the input.
	#[regex(r#""[^"]*"#)]
	UnterminatedDoubleQuoted,
	#[regex(r"'[^']*")]
	UnterminatedSingleQuoted,
	/// An attribute name or an unquoted value, e.g. `border` or `100%`.
	#[regex(r#"[^ \t\r\n\f"'=]+"#)]
	Word,
}

/// A single `name[=value]` pair. Quotes around the value are removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
	pub name: String,
	pub value: Option<String>,
}

/// Split attribute text such as `class="wikitable" border=1 hidden` into
/// [`Attribute`]s. Fragments that cannot start an attribute are skipped.
pub fn parse_attributes(text: &str) -> Vec<Attribute> {
	let raw_tokens: Vec<_> = RawToken::lexer(text).spanned().collect();
	let mut attributes = Vec::new();
	let mut cursor = 0;

	while cursor < raw_tokens.len() {
		let (result, span) = &raw_tokens[cursor];
		let Ok(RawToken::Word) = result else {
			cursor += 1;
			continue;
		};

		let name = text[span.clone()].to_string();
		cursor += 1;

		if !matches!(raw_tokens.get(cursor), Some((Ok(RawToken::Equals), _))) {
			attributes.push(Attribute { name, value: None });
			continue;
		}

		cursor += 1;
		let value = match raw_tokens.get(cursor) {
			Some((Ok(raw), span)) => {
				let slice = &text[span.clone()];
				match raw {
					RawToken::DoubleQuoted | RawToken::SingleQuoted => {
						cursor += 1;
						slice[1..slice.len() - 1].to_string()
					}
					RawToken::UnterminatedDoubleQuoted | RawToken::UnterminatedSingleQuoted => {
						cursor += 1;
						slice[1..].to_string()
					}
					RawToken::Word => {
						cursor += 1;
						slice.to_string()
					}
					RawToken::Equals => String::new(),
				}
			}
			Some((Err(()), _)) | None => String::new(),
		};

		attributes.push(Attribute {
			name,
			value: Some(value),
		});
	}

	attributes
}

/// The payload carried by `TableStyle`, `RowStyle` and `ColStyle` events.
///
/// When the attribute text has a `style` attribute with a value, that value
/// is returned trimmed. Otherwise the whole attribute text is returned
/// trimmed.
pub fn style_payload(text: &str) -> String {
	let trimmed = text.trim();

	parse_attributes(trimmed)
		.into_iter()
		.find(|attribute| attribute.name.eq_ignore_ascii_case("style"))
		.and_then(|attribute| attribute.value)
		.map_or_else(|| trimmed.to_string(), |value| value.trim().to_string())
}
