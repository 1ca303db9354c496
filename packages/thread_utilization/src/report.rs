//! Utilization reports.

use std::fmt;

use crate::UtilizationRecord;

const COLUMN_WIDTH: usize = 20;

/// Thread-safe snapshot of the utilization records of a
/// [`UtilizationTracker`](crate::UtilizationTracker).
///
/// The records are listed in the order their intervals were ended. A report is detached from
/// the tracker, so intervals ended after the report was created do not appear in it.
///
/// # Examples
///
/// ```
/// use thread_utilization::UtilizationTracker;
///
/// let tracker = UtilizationTracker::new();
///
/// // ... start and end intervals ...
///
/// let report = tracker.to_report();
/// for record in report.records() {
///     println!("{record}");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Report {
    records: Vec<UtilizationRecord>,
}

impl Report {
    pub(crate) fn new(records: Vec<UtilizationRecord>) -> Self {
        Self { records }
    }

    /// The records in the order their intervals were ended.
    pub fn records(&self) -> impl Iterator<Item = &UtilizationRecord> {
        self.records.iter()
    }

    /// The number of records in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no interval had been ended when the report was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prints the report to stdout.
    ///
    /// Prints nothing if the report is empty.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        if self.is_empty() {
            return;
        }

        println!("{self}");
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            return writeln!(f, "No thread utilization records captured.");
        }

        writeln!(f, "Thread utilization report:")?;
        writeln!(
            f,
            "{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
            "Name", "Core", "Thread", "Utilization"
        )?;

        for record in &self.records {
            let utilization = format!("{:.2}%", record.utilization_percent());
            writeln!(
                f,
                "{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
                record.name(),
                record.core_id(),
                record.thread_id(),
                utilization
            )?;
        }

        Ok(())
    }
}
