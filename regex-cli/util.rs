use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

/// Time an arbitrary operation.
pub fn timeit<T>(run: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let t = run();
    (t, start.elapsed())
}

/// Like `timeit`, but for operations that can fail. The duration is packed
/// into the `Ok` variant.
pub fn timeitr<T, E>(
    run: impl FnOnce() -> Result<T, E>,
) -> Result<(T, Duration), E> {
    let (result, time) = timeit(run);
    Ok((result?, time))
}

/// An aligned table of labeled values, printed before the output of a
/// command.
///
/// Values are rendered with their `Debug` impl when they're added.
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<(String, String)>,
}

impl Table {
    pub fn empty() -> Table {
        Table::default()
    }

    pub fn add<D: std::fmt::Debug>(&mut self, label: &str, value: D) {
        self.rows.push((label.to_string(), format!("{:?}", value)));
    }

    pub fn print<W: io::Write>(&self, wtr: W) -> io::Result<()> {
        let mut wtr = tabwriter::TabWriter::new(wtr)
            .alignment(tabwriter::Alignment::Right);
        for (label, value) in self.rows.iter() {
            writeln!(wtr, "{label}:\t{value}")?;
        }
        wtr.flush()
    }
}
