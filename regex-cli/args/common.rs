use lexopt::{Arg, Parser};

use crate::args::{Configurable, Usage};

/// Flags shared by every command that control how much gets printed.
#[derive(Debug, Default)]
pub struct Config {
    pub quiet: bool,
    pub verbose: bool,
    pub no_table: bool,
}

impl Config {
    pub fn table(&self) -> bool {
        !self.no_table
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        _: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('q') | Arg::Long("quiet") => {
                self.quiet = true;
            }
            Arg::Long("verbose") => {
                self.verbose = true;
            }
            Arg::Long("no-table") => {
                self.no_table = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &[Usage] = &[
            Usage::new(
                "-q, --quiet",
                "Suppress some output.",
                r#"
Suppresses the main output of a command, leaving only its table of
information. For example, 'rrx find match -q' times a search without printing
any of the matches it found.
"#,
            ),
            Usage::new(
                "--verbose",
                "Add more output.",
                r#"
Expands output beyond the normal amount. With 'rrx validate', this prints the
offset of every error ahead of its message.
"#,
            ),
            Usage::new(
                "--no-table",
                "Omit any table of information from the output.",
                r#"
Most commands print a table of timings and properties before their main
output. Passing this flag suppresses that table.
"#,
            ),
        ];
        USAGES
    }
}
