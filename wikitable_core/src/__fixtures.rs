pub const PLANETS_TABLE: &str = r#"{| class="wikitable" style="text-align:center"
|+ Planets
|-
! Name !! Moons
|-
| Mercury || 0
|-
| style="color:blue" | Earth || [[Moon|1]]
|}"#;

pub const SIMPLE_TABLE: &str = "{|\n|-\n|cell1\n|cell2\n|}";

pub const CAPTIONED_TABLE: &str = "{| style=\"width:100%\"\n|+ My Caption\n|-\n! Header1\n|}";

pub const TRUNCATED_TABLE: &str = "{|\n|-\n|cell1";

pub const NESTED_TABLE: &str = "{|\n|-\n| outer\n{|\n|-\n| inner\n|}\n| next\n|}";

pub const SURROUNDED_TABLES: &str =
	"Some intro text.\n{|\n|-\n| a\n|}\nBetween tables.\n{| border=1\n|-\n| b || c\n|}\nOutro.";
