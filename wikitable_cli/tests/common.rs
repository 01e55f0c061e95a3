use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const SIMPLE_TABLE: &str = "{|\n|-\n|cell1\n|cell2\n|}";

pub const PLANETS_TABLE: &str = "{| class=\"wikitable\" style=\"text-align:center\"\n|+ Planets\n|-\n! Name !! Moons\n|-\n| Mercury || 0\n|-\n| style=\"color:blue\" | Earth || [[Moon|1]]\n|}\n";

pub fn wikitable_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("wikitable"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}
