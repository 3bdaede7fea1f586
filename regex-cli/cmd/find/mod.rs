use lexopt::{Arg, Parser};

use crate::args::{self, Configurable, Usage};

mod capture;
mod r#match;

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Executes a search.

Every pattern is searched for on its own, from the start of the haystack to
its end, and every non-overlapping match is reported. Output is prefixed with
the index of the pattern that produced it.

USAGE:
    rrx find <command>

COMMANDS:
    capture   Search for matches and the spans of their capturing groups.
    match     Search for full matches.
";
    let cmd = args::next_as_command(USAGE, p)?;
    match &*cmd {
        "capture" => capture::run(p),
        "match" => r#match::run(p),
        unk => anyhow::bail!("unrecognized command '{unk}'"),
    }
}

/// Checks every pattern up front, so that a typo is reported instead of
/// silently finding nothing.
fn validate_all(
    pats: &[String],
) -> anyhow::Result<Vec<regex_recursive::Validation>> {
    let mut validations = Vec::with_capacity(pats.len());
    for (i, pat) in pats.iter().enumerate() {
        let v = regex_recursive::validate(pat).map_err(|err| {
            anyhow::anyhow!("pattern {i} failed to validate: {err}")
        })?;
        log::debug!("pattern {i} has {} capture slots", v.captures_len());
        validations.push(v);
    }
    Ok(validations)
}

#[derive(Debug, Default)]
struct Config {
    count: bool,
    repeat: Option<u32>,
}

impl Config {
    fn repeat(&self) -> u32 {
        self.repeat.unwrap_or(1)
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('c') | Arg::Long("count") => {
                self.count = true;
            }
            Arg::Long("repeat") => {
                self.repeat = Some(args::parse(p, "--repeat")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &[Usage] = &[
            Usage::new(
                "-c, --count",
                "Show a count of all matches.",
                r#"
Prints a count of all matches instead of printing the matches themselves. For
the 'capture' command, this prints the number of times each group matched.
"#,
            ),
            Usage::new(
                "--repeat",
                "Repeat the search this many times.",
                r#"
Repeat the search this many times. By default, this is set to 1. This is useful
when you want the search time to dominate the runtime of the program, or if the
search is otherwise too short/fast to measure reliably.

Note that this will print the matches repeatedly by default as well. For this
reason, it's usually best to use this option in combination with -c/--count.
"#,
            ),
        ];
        USAGES
    }
}
