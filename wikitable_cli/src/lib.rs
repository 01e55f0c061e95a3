use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Inspect the structure of MediaWiki tables.",
	long_about = "wikitable reads wikitext, finds the tables inside it and reports their \
	              structure as a flat stream of events, as raw tokens or as rebuilt \
	              rows and cells.\n\nQuick start:\n  wikitable events page.wiki   Print the \
	              event stream\n  wikitable tokens page.wiki   Print table-level tokens\n  \
	              wikitable tables page.wiki   Summarize every table\n\nPass `-` as the file \
	              to read from stdin."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct WikitableCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory searched for `wikitable.toml`. Defaults to the current
	/// directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output. Raises the default log level to `debug`.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Keep surrounding whitespace in cell text.
	#[arg(long, global = true, default_value_t = false)]
	pub no_trim: bool,

	/// Tokenize the input on first use instead of up front.
	#[arg(long, global = true, default_value_t = false)]
	pub lazy: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Print the events produced for every table in the input.
	///
	/// Each line is one event, for example `RowStart` or `ColEnd("text")`.
	/// Elements left open by truncated input have no closing event.
	Events {
		/// Wikitext file to read, or `-` for stdin.
		file: PathBuf,

		/// Output format. Use `text` for one event per line or `json` for an
		/// array of tagged events.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the tokens the input splits into.
	///
	/// At `table` level the input is split on table markup such as `{|`, `|-`
	/// and `||`. At `cell` level it is split on links, templates and the `|`
	/// attribute separator.
	Tokens {
		/// Wikitext file to read, or `-` for stdin.
		file: PathBuf,

		/// Which vocabulary to tokenize with.
		#[arg(long, value_enum, default_value_t = TokenLevel::Table)]
		level: TokenLevel,

		/// Output format.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Rebuild the tables from the event stream and summarize them.
	///
	/// Prints the caption, style, row count and column count of every table,
	/// then each row with its cell texts.
	Tables {
		/// Wikitext file to read, or `-` for stdin.
		file: PathBuf,

		/// Output format. `json` prints the full rebuilt tables.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TokenLevel {
	/// Table structure markers.
	Table,
	/// Markers found inside a single cell.
	Cell,
}
