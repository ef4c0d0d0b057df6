//! Aggregate success of a pipeline run.

use std::fmt;

/// The step of the run an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Validation of a `repos` entry.
    Config,
    /// Creation of the download directory.
    Prepare,
    /// Removal of previously downloaded matches.
    Clear,
    /// Latest release retrieval.
    Fetch,
    /// Asset selection for one release.
    Match,
    /// Asset download.
    Download,
}

impl Phase {
    const ALL: [Phase; 6] = [
        Phase::Config,
        Phase::Prepare,
        Phase::Clear,
        Phase::Fetch,
        Phase::Match,
        Phase::Download,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Config => "config",
            Phase::Prepare => "prepare",
            Phase::Clear => "clear",
            Phase::Fetch => "fetch",
            Phase::Match => "match",
            Phase::Download => "download",
        };
        f.write_str(name)
    }
}

/// Collects the result of every unit of work of a run.
///
/// The run succeeds only if every recorded unit succeeded. Recording order
/// does not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    attempts: [usize; 6],
    failures: [usize; 6],
}

impl Outcome {
    /// Creates an empty, successful outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of one unit of work.
    pub fn record(&mut self, phase: Phase, success: bool) {
        self.attempts[phase.index()] += 1;
        if !success {
            self.failures[phase.index()] += 1;
        }
    }

    /// Record `count` failed units of work.
    pub fn record_failures(&mut self, phase: Phase, count: usize) {
        self.attempts[phase.index()] += count;
        self.failures[phase.index()] += count;
    }

    /// Number of units recorded for `phase`.
    pub fn attempts(&self, phase: Phase) -> usize {
        self.attempts[phase.index()]
    }

    /// Number of failed units recorded for `phase`.
    pub fn failures(&self, phase: Phase) -> usize {
        self.failures[phase.index()]
    }

    /// Total number of failed units.
    pub fn total_failures(&self) -> usize {
        self.failures.iter().sum()
    }

    /// `true` if no unit failed.
    pub fn is_success(&self) -> bool {
        self.total_failures() == 0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for phase in Phase::ALL {
            let attempts = self.attempts(phase);
            if attempts == 0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}: {}/{} ok", phase, attempts - self.failures(phase), attempts)?;
        }
        if first {
            f.write_str("nothing to do")?;
        }
        Ok(())
    }
}
