use std::{
    fmt::{Debug, Display, Write},
    str::FromStr,
};

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
};

pub mod common;
pub mod haystack;
pub mod patterns;

/// A group of command line flags that configures one part of a command.
///
/// Each command collects the groups it needs and hands them to `configure`,
/// which offers every argument to each group in turn until one of them
/// accepts it.
pub trait Configurable: Debug {
    /// Consumes `arg` (and its value from `p`, if it takes one) and returns
    /// true when it belongs to this group. Returns false otherwise.
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    fn usage(&self) -> &[Usage];
}

/// Parses every remaining argument in `p` into one of `targets`.
///
/// `-h` and `--help` print the given usage, with `%options%` replaced by the
/// short or long documentation of every flag the targets accept.
pub fn configure(
    p: &mut Parser,
    usage: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    while let Some(arg) = p.next()? {
        if let Arg::Short('h') | Arg::Long("help") = arg {
            let mut usages: Vec<Usage> = targets
                .iter()
                .flat_map(|t| t.usage().iter().copied())
                .collect();
            usages.sort_by_key(|u| u.sort_key());
            let options = if arg == Arg::Short('h') {
                Usage::short(&usages)
            } else {
                Usage::long(&usages)
            };
            anyhow::bail!("{}", usage.replace("%options%", &options).trim());
        }
        // The long flag name borrows from 'p', so give it an owned home
        // before handing 'p' to the targets.
        let long_flag: Option<String> = match arg {
            Arg::Long(name) => Some(name.to_string()),
            _ => None,
        };
        let mut arg = match (long_flag.as_deref(), arg) {
            (Some(flag), _) => Arg::Long(flag),
            (None, Arg::Short(c)) => Arg::Short(c),
            (None, Arg::Value(value)) => Arg::Value(value),
            (None, Arg::Long(_)) => unreachable!(),
        };
        let mut recognized = false;
        for t in targets.iter_mut() {
            if t.configure(p, &mut arg)? {
                recognized = true;
                break;
            }
        }
        if !recognized {
            return Err(arg.unexpected().into());
        }
    }
    Ok(())
}

/// Parses the next argument as a command name. A missing command, or `-h`
/// and `--help`, print the given usage as an error.
pub fn next_as_command(usage: &str, p: &mut Parser) -> anyhow::Result<String> {
    let usage = usage.trim();
    let cmd = match p.next()? {
        None => anyhow::bail!("{usage}"),
        Some(Arg::Value(cmd)) => cmd.string()?,
        Some(Arg::Short('h') | Arg::Long("help")) => anyhow::bail!("{usage}"),
        Some(arg) => return Err(arg.unexpected().into()),
    };
    Ok(cmd)
}

/// Parses the next `p.value()` into `T`. Errors mention the given flag name.
pub fn parse<T>(p: &mut Parser, flag_name: &'static str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: Display + Debug + Send + Sync + 'static,
{
    let osv = p.value().context(flag_name)?;
    let strv = match osv.to_str() {
        Some(strv) => strv,
        None => {
            let err = lexopt::Error::NonUnicodeValue(osv.into());
            return Err(anyhow::Error::from(err).context(flag_name));
        }
    };
    strv.parse().map_err(|err| anyhow::Error::msg(err).context(flag_name))
}

/// The documentation of a single flag.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// How the flag is written, e.g., `-p, --pattern <pattern>`.
    pub format: &'static str,
    /// A description that fits on one line next to the format.
    pub short: &'static str,
    /// A description of any length. Paragraphs are separated by blank lines
    /// and are re-wrapped when printed.
    pub long: &'static str,
}

impl Usage {
    pub const fn new(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { format, short, long }
    }

    /// Flags are sorted by their long name, ignoring any short alias.
    fn sort_key(&self) -> &'static str {
        self.format.split_once(", ").map_or(self.format, |(_, long)| long)
    }

    /// Formats a two column table of each flag's format and its short
    /// description.
    pub fn short(usages: &[Usage]) -> String {
        const MIN_SPACE: usize = 2;

        let width = usages.iter().map(|u| u.format.len()).max().unwrap_or(0);
        let mut result = String::new();
        for usage in usages.iter() {
            let padding = " ".repeat(MIN_SPACE + width - usage.format.len());
            // Writing to a String never fails.
            let _ = writeln!(
                result,
                "    {}{}{}",
                usage.format, padding, usage.short
            );
        }
        result
    }

    /// Formats each flag's format followed by its long description, wrapped
    /// and indented to sit inside an OPTIONS section.
    pub fn long(usages: &[Usage]) -> String {
        let wrap_opts = textwrap::Options::new(79)
            .initial_indent("        ")
            .subsequent_indent("        ");
        let mut result = String::new();
        for (i, usage) in usages.iter().enumerate() {
            if i > 0 {
                result.push('\n');
            }
            result.push_str("    ");
            result.push_str(usage.format);
            result.push('\n');
            for (j, paragraph) in usage.long.trim().split("\n\n").enumerate()
            {
                if j > 0 {
                    result.push('\n');
                }
                let flattened = paragraph.replace('\n', " ");
                for line in textwrap::wrap(&flattened, &wrap_opts) {
                    result.push_str(&line);
                    result.push('\n');
                }
            }
        }
        result
    }
}
