use log::info;

use super::models::Semester;

/// What happened to one sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted,
    Skipped,
}

/// Running tally of a sheet ingestion into one semester store.
///
/// Rows are reported by their sheet line (the header is line 1), so the log
/// points at the line a user has to fix.
pub struct IngestProgress {
    semester: Semester,
    total_rows: usize,
    inserted: usize,
    skipped: usize,
    last_line: Option<usize>,
}

impl IngestProgress {
    pub fn new(semester: Semester, total_rows: usize) -> Self {
        Self {
            semester,
            total_rows,
            inserted: 0,
            skipped: 0,
            last_line: None,
        }
    }

    pub fn record(&mut self, line: usize, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Inserted => self.inserted += 1,
            RowOutcome::Skipped => self.skipped += 1,
        }
        self.last_line = Some(line);

        if should_log(self.rows_read(), self.total_rows) {
            info!("{}", self.status_line());
        }
    }

    pub fn inserted(&self) -> usize {
        self.inserted
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn rows_read(&self) -> usize {
        self.inserted + self.skipped
    }

    fn status_line(&self) -> String {
        let line = self.last_line.map_or_else(|| "-".to_string(), |l| l.to_string());
        format!(
            "  → Semester {}: {}/{} rows read, at line {} ({} inserted, {} skipped)",
            self.semester,
            self.rows_read(),
            self.total_rows,
            line,
            self.inserted,
            self.skipped
        )
    }
}

fn should_log(rows_read: usize, total_rows: usize) -> bool {
    rows_read % 10 == 0 || rows_read == total_rows
}
