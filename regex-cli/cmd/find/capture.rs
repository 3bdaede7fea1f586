use std::io::{stdout, Write};

use {bstr::ByteSlice, lexopt::Parser, regex_recursive::Captures};

use crate::{
    args,
    util::{self, Table},
};

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Executes a search for capturing groups.

Each match, corresponding to possibly many matching capture groups, is printed
on its own line. It is prefixed with the index of the pattern that produced
it. Each group contains both the span matched and the actual text that
matched, or NONE if the group did not participate in the match.

USAGE:
    rrx find capture [-p <pattern> ...] <haystack-path>
    rrx find capture [-p <pattern> ...] -y <haystack>

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
    let (validations, time) = util::timeitr(|| super::validate_all(&pats))?;
    table.add("validate time", time);
    table.add("patterns", pats.len());
    table.add(
        "capture slots",
        validations.iter().map(|v| v.captures_len()).collect::<Vec<_>>(),
    );

    let mut out = stdout();
    haystack.with(|haystack| {
        let (matches, time) = util::timeit(|| {
            let mut matches: Vec<(usize, Captures)> = vec![];
            for _ in 0..find.repeat() {
                for (pid, pat) in pats.iter().enumerate() {
                    let it = regex_recursive::captures_iter(pat, haystack);
                    matches.extend(it.map(|caps| (pid, caps)));
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
            let mut counts: Vec<Vec<u64>> = validations
                .iter()
                .map(|v| vec![0; v.captures_len()])
                .collect();
            for (pid, caps) in matches.iter() {
                for (i, cap) in caps.iter().enumerate() {
                    if cap.is_some() {
                        counts[*pid][i] += 1;
                    }
                }
            }
            for (pid, group_counts) in counts.iter().enumerate() {
                write!(out, "{pid}:{{ ")?;
                for (i, count) in group_counts.iter().enumerate() {
                    if i > 0 {
                        write!(out, ", ")?;
                    }
                    write!(out, "{i}: {count}")?;
                }
                writeln!(out, " }}")?;
            }
            return Ok(());
        }
        for (pid, caps) in matches.iter() {
            write!(out, "{pid}:{{ ")?;
            for (i, cap) in caps.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                match cap {
                    None => write!(out, "{i}: NONE")?,
                    Some(c) => {
                        let (start, end) = (c.start(), c.end());
                        let string = c.as_bytes(haystack).escape_bytes();
                        write!(out, "{i}: {start}..{end}/{string}")?
                    }
                }
            }
            writeln!(out, " }}")?;
        }
        Ok(())
    })
}
