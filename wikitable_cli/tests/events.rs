mod common;

use clap::Parser;
use serde_json::Value;
use similar_asserts::assert_eq;
use wikitable_cli::Commands;
use wikitable_cli::OutputFormat;
use wikitable_cli::WikitableCli;
use wikitable_core::AnyEmptyResult;

#[test]
fn events_prints_one_event_per_line() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("page.wiki");
	std::fs::write(&file, common::SIMPLE_TABLE)?;

	let output = common::wikitable_cmd()
		.current_dir(tmp.path())
		.arg("events")
		.arg(&file)
		.output()?;

	assert!(output.status.success());
	assert_eq!(
		String::from_utf8(output.stdout)?,
		"TableStart\nRowStart\nColStart(Data)\nColEnd(\"cell1\")\nColStart(Data)\nColEnd(\"cell2\")\nRowEnd(\"\")\nTableEnd\n"
	);

	Ok(())
}

#[test]
fn events_reads_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wikitable_cmd()
		.current_dir(tmp.path())
		.arg("events")
		.arg("-")
		.write_stdin(common::PLANETS_TABLE)
		.assert()
		.success()
		.stdout(predicates::str::contains("TableCaption(\"Planets\")"))
		.stdout(predicates::str::contains("ColStyle(\"color:blue\")"))
		.stdout(predicates::str::contains("ColEnd(\"[[Moon|1]]\")"));

	Ok(())
}

#[test]
fn events_json_is_tagged() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let output = common::wikitable_cmd()
		.current_dir(tmp.path())
		.args(["events", "-", "--format", "json"])
		.write_stdin(common::SIMPLE_TABLE)
		.output()?;

	assert!(output.status.success());
	let events: Value = serde_json::from_slice(&output.stdout)?;
	let events = events.as_array().ok_or("expected a JSON array")?;
	assert_eq!(events.len(), 8);
	assert_eq!(events[0]["event"], Value::from("table_start"));
	assert_eq!(events[2]["event"], Value::from("col_start"));
	assert_eq!(events[2]["value"], Value::from("data"));
	assert_eq!(events[3]["value"], Value::from("cell1"));

	Ok(())
}

#[test]
fn events_no_trim_keeps_whitespace() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wikitable_cmd()
		.current_dir(tmp.path())
		.args(["events", "-", "--no-trim"])
		.write_stdin("{|\n|-\n| padded \n|}")
		.assert()
		.success()
		.stdout(predicates::str::contains("ColEnd(\" padded \")"));

	Ok(())
}

#[test]
fn events_lazy_matches_eager() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let eager = common::wikitable_cmd()
		.current_dir(tmp.path())
		.args(["events", "-"])
		.write_stdin(common::PLANETS_TABLE)
		.output()?;
	let lazy = common::wikitable_cmd()
		.current_dir(tmp.path())
		.args(["events", "-", "--lazy"])
		.write_stdin(common::PLANETS_TABLE)
		.output()?;

	assert!(eager.status.success());
	assert_eq!(
		String::from_utf8(eager.stdout)?,
		String::from_utf8(lazy.stdout)?
	);

	Ok(())
}

#[test]
fn events_missing_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::wikitable_cmd()
		.current_dir(tmp.path())
		.arg("events")
		.arg(tmp.path().join("missing.wiki"))
		.assert()
		.code(2);

	Ok(())
}

#[test]
fn events_rejects_invalid_utf8() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("binary.wiki");
	std::fs::write(&file, [0x7b, 0x7c, 0xff, 0xfe])?;

	common::wikitable_cmd()
		.current_dir(tmp.path())
		.arg("events")
		.arg(&file)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("not valid UTF-8"));

	Ok(())
}

#[test]
fn missing_subcommand_exits_with_usage_hint() {
	common::wikitable_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("wikitable --help"));
}

#[test]
fn events_format_defaults_to_text() {
	let cli = WikitableCli::parse_from(["wikitable", "events", "page.wiki"]);
	match cli.command {
		Some(Commands::Events { file, format }) => {
			assert_eq!(file, std::path::PathBuf::from("page.wiki"));
			assert_eq!(format, OutputFormat::Text);
		}
		_ => panic!("expected Events command"),
	}
	assert!(!cli.lazy);
	assert!(!cli.no_trim);
}

#[test]
fn global_flags_follow_the_subcommand() {
	let cli = WikitableCli::parse_from([
		"wikitable",
		"events",
		"-",
		"--format",
		"json",
		"--lazy",
		"--no-trim",
	]);
	assert!(cli.lazy);
	assert!(cli.no_trim);
	assert!(matches!(
		cli.command,
		Some(Commands::Events {
			format: OutputFormat::Json,
			..
		})
	));
}
