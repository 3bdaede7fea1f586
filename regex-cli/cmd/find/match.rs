use std::io::{stdout, Write};

use {bstr::ByteSlice, lexopt::Parser, regex_recursive::Capture};

use crate::{
    args,
    util::{self, Table},
};

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Executes a search for full matches.

Each match is printed on its own line as its pattern index, its span and the
text it matched.

USAGE:
    rrx find match [-p <pattern> ...] <haystack-path>
    rrx find match [-p <pattern> ...] -y <haystack>

TIP:
    use -h for short docs and --help for long docs

OPTIONS:
%options%
";

    let mut common = args::common::Config::default();
    let mut patterns = args::patterns::Config::only_flags();
    let mut haystack = args::haystack::Config::default();
    let mut find = super::Config::default();
    args::configure(
        p,
        USAGE,
        &mut [&mut common, &mut patterns, &mut haystack, &mut find],
    )?;

    let pats = patterns.get_nonempty()?;
    let mut table = Table::empty();
    let (_, time) = util::timeitr(|| super::validate_all(&pats))?;
    table.add("validate time", time);
    table.add("patterns", pats.len());

    let mut out = stdout();
    haystack.with(|haystack| {
        let (matches, time) = util::timeit(|| {
            let mut matches: Vec<(usize, Capture)> = vec![];
            for _ in 0..find.repeat() {
                for (pid, pat) in pats.iter().enumerate() {
                    let it = regex_recursive::find_iter(pat, haystack);
                    matches.extend(it.map(|m| (pid, m)));
                }
            }
            matches
        });
        table.add("search time", time);
        table.add("total matches", matches.len());
        if common.table() {
            table.print(&mut out)?;
        }
        if common.quiet {
            return Ok(());
        }
        if find.count {
            let mut counts = vec![0u64; pats.len()];
            for &(pid, _) in matches.iter() {
                counts[pid] += 1;
            }
            for (pid, count) in counts.iter().enumerate() {
                writeln!(out, "{pid}:{count}")?;
            }
        } else {
            for &(pid, m) in matches.iter() {
                let string = m.as_bytes(haystack).escape_bytes();
                writeln!(out, "{pid}:{}..{}/{string}", m.start(), m.end())?;
            }
        }
        Ok(())
    })
}
