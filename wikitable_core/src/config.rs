use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::WikitableError;
use crate::WikitableResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"wikitable.toml",
	".wikitable.toml",
	".config/wikitable.toml",
];

/// Options that change how a [`WikitextTableParser`](crate::WikitextTableParser)
/// reads its input.
///
/// ```toml
/// [parser]
/// eager = true
/// trim_cell_text = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
	/// Tokenize the whole source when the parser is constructed. When
	/// `false`, tokenizing is deferred until the token queue is first
	/// observed or stepped. Both modes produce the same events.
	pub eager: bool,
	/// Trim surrounding whitespace from `ColEnd` payloads. Captions, styles
	/// and `RowEnd` payloads are always trimmed.
	pub trim_cell_text: bool,
}

impl Default for ParserOptions {
	fn default() -> Self {
		Self {
			eager: true,
			trim_cell_text: true,
		}
	}
}

/// Configuration loaded from a `wikitable.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WikitableConfig {
	/// Parser behaviour. Missing keys keep their defaults.
	#[serde(default)]
	pub parser: ParserOptions,
}

impl WikitableConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> WikitableResult<Option<WikitableConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content).map_err(|error| {
			match error {
				WikitableError::ConfigParse { reason, .. } => {
					WikitableError::ConfigParse {
						path: config_path.display().to_string(),
						reason,
					}
				}
				other => other,
			}
		})?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Parse a config from TOML source.
	pub fn from_toml(content: &str) -> WikitableResult<WikitableConfig> {
		toml::from_str(content).map_err(|error| {
			WikitableError::ConfigParse {
				path: "<inline>".to_string(),
				reason: error.to_string(),
			}
		})
	}
}
