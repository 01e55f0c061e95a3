use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use wikitable_cli::Commands;
use wikitable_cli::OutputFormat;
use wikitable_cli::TokenLevel;
use wikitable_cli::WikitableCli;
use wikitable_core::CellType;
use wikitable_core::Event;
use wikitable_core::ParserOptions;
use wikitable_core::Table;
use wikitable_core::Token;
use wikitable_core::Tokenizer;
use wikitable_core::WikitableConfig;
use wikitable_core::WikitableError;
use wikitable_core::WikitextTableParser;
use wikitable_core::build_tables;
use wikitable_core::make_cell_vocabulary;
use wikitable_core::make_table_vocabulary;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,cyan) => {
		if color_enabled() {
			format!("{}", $text.cyan())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = WikitableCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Events { file, format }) => run_events(&args, file, *format),
		Some(Commands::Tokens {
			file,
			level,
			format,
		}) => run_tokens(file, *level, *format),
		Some(Commands::Tables { file, format }) => run_tables(&args, file, *format),
		None => {
			eprintln!("No subcommand specified. Run `wikitable --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<WikitableError>() {
			Ok(error) => {
				let report: miette::Report = (*error).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// wins over `--verbose`.
fn init_logging(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();
}

fn resolve_root(args: &WikitableCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Config file options with command line flags applied on top.
fn parser_options(args: &WikitableCli) -> Result<ParserOptions, WikitableError> {
	let root = resolve_root(args);
	let mut options = WikitableConfig::load(&root)?
		.map(|config| config.parser)
		.unwrap_or_default();

	if args.no_trim {
		options.trim_cell_text = false;
	}

	if args.lazy {
		options.eager = false;
	}

	tracing::debug!(?options, "resolved parser options");

	Ok(options)
}

/// Read wikitext from `file`, or from stdin when `file` is `-`.
fn read_source(file: &Path) -> Result<String, WikitableError> {
	let bytes = if file.as_os_str() == "-" {
		let mut bytes = Vec::new();
		std::io::stdin().read_to_end(&mut bytes)?;
		bytes
	} else {
		std::fs::read(file)?
	};

	String::from_utf8(bytes).map_err(|_| WikitableError::InvalidInput(file.display().to_string()))
}

fn parse(args: &WikitableCli, file: &Path) -> Result<Vec<Event>, WikitableError> {
	let options = parser_options(args)?;
	let source = read_source(file)?;
	let events = WikitextTableParser::from_source(&source, options).finish();
	tracing::debug!(events = events.len(), "parsed input");

	Ok(events)
}

fn run_events(
	args: &WikitableCli,
	file: &Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let events = parse(args, file)?;

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&events)?);
		}
		OutputFormat::Text => {
			for event in &events {
				if matches!(event, Event::TableStart | Event::TableEnd) {
					println!("{}", colored!(event.to_string(), bold));
				} else {
					println!("{event}");
				}
			}
		}
	}

	Ok(())
}

fn run_tokens(
	file: &Path,
	level: TokenLevel,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let source = read_source(file)?;
	let tokenizer = match level {
		TokenLevel::Table => Tokenizer::new(make_table_vocabulary()),
		TokenLevel::Cell => Tokenizer::new(make_cell_vocabulary()),
	};
	let tokens = tokenizer.tokenize(&source);

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&tokens)?);
		}
		OutputFormat::Text => {
			for token in &tokens {
				match token {
					Token::Special(_) => println!("{}", colored!(token.to_string(), cyan)),
					Token::Text(_) => println!("{token}"),
				}
			}
		}
	}

	Ok(())
}

fn run_tables(
	args: &WikitableCli,
	file: &Path,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let tables = build_tables(&parse(args, file)?);

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&tables)?);
		}
		OutputFormat::Text => {
			if tables.is_empty() {
				println!("No tables found.");
				return Ok(());
			}

			for (index, table) in tables.iter().enumerate() {
				if index > 0 {
					println!();
				}
				print_table(index + 1, table);
			}
		}
	}

	Ok(())
}

fn print_table(number: usize, table: &Table) {
	let status = if table.closed { "" } else { " (unclosed)" };
	println!(
		"{}",
		colored!(
			format!(
				"Table {number}: {} row(s), {} column(s){status}",
				table.rows.len(),
				table.column_count()
			),
			bold
		)
	);

	if let Some(caption) = &table.caption {
		print_field("caption", caption);
	}

	if let Some(style) = &table.style {
		print_field("style", style);
	}

	for (index, row) in table.rows.iter().enumerate() {
		let cells: Vec<String> = row
			.cells
			.iter()
			.map(|cell| {
				match cell.cell_type {
					CellType::Header => format!("! {}", cell.text),
					CellType::Data => format!("| {}", cell.text),
				}
			})
			.collect();
		print_field(&format!("row {}", index + 1), cells.join("  "));
	}
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("  {label:<10} {value}");
}
