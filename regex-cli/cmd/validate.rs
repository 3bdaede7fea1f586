use std::io::{stdout, Write};

use lexopt::Parser;

use crate::{
    args,
    util::{self, Table},
};

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Checks that each pattern is valid.

For every valid pattern, this prints the number of capture slots a buffer for
it needs (including the slot for the whole match) and, when every match of the
pattern has the same length, that length. For every invalid pattern, this
prints why it was rejected and the byte offset at which the problem was found.

Exits with an error if any pattern is invalid.

USAGE:
    rrx validate [<pattern> ...]

TIP:
    use -h for short docs and --help for long docs

OPTIONS:
%options%
";

    let mut common = args::common::Config::default();
    let mut patterns = args::patterns::Config::positional();
    args::configure(p, USAGE, &mut [&mut common, &mut patterns])?;

    let pats = patterns.get_nonempty()?;
    let mut table = Table::empty();
    let (results, time) = util::timeit(|| {
        pats.iter().map(regex_recursive::validate).collect::<Vec<_>>()
    });
    table.add("validate time", time);
    table.add("patterns", pats.len());
    let invalid = results.iter().filter(|r| r.is_err()).count();
    table.add("invalid", invalid);

    let mut out = stdout();
    if common.table() {
        table.print(&mut out)?;
    }
    if !common.quiet {
        for (pid, result) in results.iter().enumerate() {
            match result {
                Ok(v) => {
                    write!(out, "{pid}: captures-len={}", v.captures_len())?;
                    match v.fixed_len() {
                        None => writeln!(out)?,
                        Some(len) => writeln!(out, " fixed-len={len}")?,
                    }
                }
                Err(err) if common.verbose => {
                    writeln!(
                        out,
                        "{pid}: error at offset {}: {}",
                        err.offset(),
                        err.message(),
                    )?;
                }
                Err(err) => writeln!(out, "{pid}: {err}")?,
            }
        }
    }
    anyhow::ensure!(
        invalid == 0,
        "{invalid} of {} patterns are invalid",
        pats.len(),
    );
    Ok(())
}
