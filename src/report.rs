//! Per-iteration diagnostics handed to a [`Reporter`].
//!
//! The engine only builds structured records; rendering is up to the reporter.

use crate::purity::Purity;
use log::info;
use serde::Serialize;
use std::fmt;

/// State of a single centroid at the end of an iteration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentroidReport {
    pub name: String,
    pub coordinates: Vec<f64>,
    pub member_count: usize,
    /// Present only when purity reporting is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purity: Option<Purity>,
}

/// Snapshot of the run after one assignment and repositioning pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationReport {
    /// 1-based iteration number
    pub iteration: usize,
    /// Whether any centroid's membership differs from the previous iteration
    pub membership_changed: bool,
    /// Sum of the distances every centroid moved during repositioning
    pub shift: f64,
    pub centroids: Vec<CentroidReport>,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Memberships stopped changing
    Converged,
    /// `max_iters` was reached while memberships were still changing
    IterationLimitReached,
}

/// Summary passed to [`Reporter::on_finish`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub status: RunStatus,
    pub iterations: usize,
}

/// Consumer of per-iteration state
pub trait Reporter {
    fn on_iteration(&mut self, report: &IterationReport);

    fn on_finish(&mut self, _summary: &RunSummary) {}
}

/// Discards every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn on_iteration(&mut self, _report: &IterationReport) {}
}

/// Writes reports through the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn on_iteration(&mut self, report: &IterationReport) {
        info!("{}", report);
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        match summary.status {
            RunStatus::Converged => info!("converged after {} iterations", summary.iterations),
            RunStatus::IterationLimitReached => info!(
                "stopped at the iteration limit ({}) without converging",
                summary.iterations
            ),
        }
    }
}

/// Collects every report, mostly useful in tests
impl Reporter for Vec<IterationReport> {
    fn on_iteration(&mut self, report: &IterationReport) {
        self.push(report.clone());
    }
}

impl fmt::Display for CentroidReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", c)?;
        }
        write!(f, "] members={}", self.member_count)?;
        if let Some(purity) = &self.purity {
            write!(f, " purity=({})", purity)?;
        }
        Ok(())
    }
}

impl fmt::Display for IterationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iteration {}: shift = {:.6}, changed = {}",
            self.iteration, self.shift, self.membership_changed
        )?;
        for centroid in &self.centroids {
            write!(f, "\n  {}", centroid)?;
        }
        Ok(())
    }
}
