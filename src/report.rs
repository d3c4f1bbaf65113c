use std::{fmt, time::Duration};

use crate::harness::RunReport;

/// Wraps a duration to print it as `M min. S sec. MS ms.`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed(pub Duration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0.as_millis();
        write!(
            f,
            "{} min. {} sec. {} ms.",
            ms / 60_000,
            (ms % 60_000) / 1000,
            ms % 1000
        )
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start searching ({})...", self.strategy.label())?;
        write!(
            f,
            "Found {} / {} entries. Time taken: {}",
            self.found,
            self.tried,
            Elapsed(self.total_elapsed())
        )?;

        if let Some(prep) = self.preparation {
            write!(f, "\n{} time: {}", prep.kind.label(), Elapsed(prep.elapsed))?;
            if prep.aborted {
                f.write_str(" - STOPPED, moved to linear search")?;
            }
            write!(f, "\nSearching time: {}", Elapsed(self.search_elapsed))?;
        }

        Ok(())
    }
}
