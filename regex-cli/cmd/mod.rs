mod find;
mod validate;

const USAGE: &'static str = "\
A tool for interacting with the regex-recursive crate on the command line.

USAGE:
    rrx <command> ...

COMMANDS:
    find      Search a haystack for one or more patterns.
    validate  Check patterns and report their capture slots.
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "find" => find::run(p),
        "validate" => validate::run(p),
        unk => anyhow::bail!("unrecognized command '{unk}'"),
    }
}
