use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::database::{InsertOutcome, NewStudentRecord, SemesterStores};
use crate::domain::{IngestProgress, MarksRow, RowOutcome, Semester, SheetRow};
use crate::errors::MarksError;
use crate::grading::{normalize, WeightingScheme};

/// Columns every sheet must carry, in the order they are reported.
const REQUIRED_COLUMNS: [&str; 8] = [
    "usn",
    "name",
    "subject",
    "cie1",
    "cie2",
    "assignment1marks",
    "assignment2marks",
    "see",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestionReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Bulk-loads marks sheets into one semester store.
pub struct IngestionService {
    stores: SemesterStores,
    scheme: WeightingScheme,
}

impl IngestionService {
    pub fn new(stores: SemesterStores, scheme: WeightingScheme) -> Self {
        Self { stores, scheme }
    }

    pub fn ingest_file(
        &self,
        semester: Semester,
        path: &Path,
        fixed_subject: Option<&str>,
    ) -> Result<IngestionReport> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        info!("Reading marks sheet {}", path.display());
        self.run(semester, file, fixed_subject)
    }

    pub fn ingest_bytes(
        &self,
        semester: Semester,
        data: &[u8],
        fixed_subject: Option<&str>,
    ) -> Result<IngestionReport> {
        self.run(semester, data, fixed_subject)
    }

    /// Ingest a CSV sheet. A missing column fails the whole sheet before any
    /// row is read; a bad row only costs a skip.
    pub fn run<R: Read>(
        &self,
        semester: Semester,
        source: R,
        fixed_subject: Option<&str>,
    ) -> Result<IngestionReport> {
        info!("=== Starting ingestion into semester {} ({}) ===", semester, self.scheme);

        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

        let headers = canonical_headers(reader.headers().context("Failed to read CSV header")?);
        check_columns(&headers, fixed_subject.is_some())?;
        reader.set_headers(headers.clone());

        let rows: Vec<csv::Result<StringRecord>> = reader.records().collect();
        let mut progress = IngestProgress::new(semester, rows.len());

        for (idx, row) in rows.into_iter().enumerate() {
            let line = idx + 2;
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!("Row {}: unreadable record: {}", line, e);
                    progress.record(line, RowOutcome::Skipped);
                    continue;
                }
            };

            match self.ingest_row(semester, &headers, &row, fixed_subject)? {
                Ok(InsertOutcome::Inserted(record)) => {
                    debug!("Row {}: stored {} / {}", line, record.student_id, record.subject);
                    progress.record(line, RowOutcome::Inserted);
                }
                Ok(InsertOutcome::Skipped) => {
                    debug!("Row {}: duplicate student/subject, skipped", line);
                    progress.record(line, RowOutcome::Skipped);
                }
                Err(e) => {
                    warn!("Row {}: {}", line, e);
                    progress.record(line, RowOutcome::Skipped);
                }
            }
        }

        let report = IngestionReport {
            inserted: progress.inserted(),
            skipped: progress.skipped(),
        };
        info!(
            "=== Ingestion complete: {} inserted, {} skipped ===",
            report.inserted, report.skipped
        );
        Ok(report)
    }

    // Outer error: store failure. Inner error: the row itself is bad.
    fn ingest_row(
        &self,
        semester: Semester,
        headers: &StringRecord,
        row: &StringRecord,
        fixed_subject: Option<&str>,
    ) -> Result<Result<InsertOutcome, MarksError>> {
        let sheet: SheetRow = match row.deserialize(Some(headers)) {
            Ok(sheet) => sheet,
            Err(e) => return Ok(Err(MarksError::parse("row", &e.to_string()))),
        };

        let prepared = MarksRow::from_sheet(&sheet, fixed_subject).and_then(|row| {
            let scores = normalize(&row.marks, self.scheme)?;
            Ok(NewStudentRecord::new(row.identity, row.marks, scores))
        });

        match prepared {
            Ok(record) => self.stores.insert_if_absent(semester, &record).map(Ok),
            Err(e) => Ok(Err(e)),
        }
    }
}

fn canonical_headers(headers: &StringRecord) -> StringRecord {
    headers
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect()
}

fn check_columns(headers: &StringRecord, has_fixed_subject: bool) -> Result<(), MarksError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&column| !(has_fixed_subject && column == "subject"))
        .filter(|&&column| !headers.iter().any(|h| h == column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MarksError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageSettings;

    const HEADER: &str = "usn,name,subject,cie1,cie2,assignment1marks,assignment2marks,see\n";

    fn service(scheme: WeightingScheme) -> (tempfile::TempDir, IngestionService) {
        let dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            data_dir: dir.path().to_path_buf(),
            ..StorageSettings::default()
        };
        let stores = SemesterStores::open(&settings).unwrap();
        (dir, IngestionService::new(stores, scheme))
    }

    #[test]
    fn test_valid_rows_are_stored_and_bad_row_is_skipped() {
        let (_dir, service) = service(WeightingScheme::QuarterWeighted);
        let mut csv = String::from(HEADER);
        for i in 1..=5 {
            csv.push_str(&format!("1AB0{},Student {},Maths,40,45,48,50,80\n", i, i));
        }
        csv.push_str("1AB09,Broken,Maths,60,45,48,50,80\n");

        let report = service.ingest_bytes(Semester::Sem1, csv.as_bytes(), None).unwrap();

        assert_eq!(report, IngestionReport { inserted: 5, skipped: 1 });
        let stored = service.stores.get_all(Semester::Sem1).unwrap();
        assert_eq!(stored.len(), 5);
        assert_eq!(stored[0].final_percentage, 85.75);
    }

    #[test]
    fn test_missing_column_rejects_whole_sheet() {
        let (_dir, service) = service(WeightingScheme::QuarterWeighted);
        let csv = "usn,name,subject,cie1,cie2,assignment1marks,assignment2marks\n1AB01,Asha,Maths,40,45,48,50\n";

        let err = service.ingest_bytes(Semester::Sem1, csv.as_bytes(), None).unwrap_err();

        assert_eq!(
            err.downcast_ref::<MarksError>(),
            Some(&MarksError::MissingColumns(vec!["see".to_string()]))
        );
        assert!(service.stores.get_all(Semester::Sem1).unwrap().is_empty());
    }

    #[test]
    fn test_missing_columns_are_reported_in_canonical_order() {
        let (_dir, service) = service(WeightingScheme::QuarterWeighted);
        let csv = "see,name,usn\n";

        let err = service.ingest_bytes(Semester::Sem2, csv.as_bytes(), None).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing required columns: subject, cie1, cie2, assignment1marks, assignment2marks"
        );
    }

    #[test]
    fn test_capitalized_headers_map_to_canonical_names() {
        let (_dir, service) = service(WeightingScheme::QuarterWeighted);
        let csv = " USN , Name ,Subject,CIE1,CIE2,Assignment1Marks,Assignment2Marks,SEE\n1ab01,Asha,Maths,40,45,48,50,80\n";

        let report = service.ingest_bytes(Semester::Sem1, csv.as_bytes(), None).unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(service.stores.get_all(Semester::Sem1).unwrap()[0].student_id, "1AB01");
    }

    #[test]
    fn test_fixed_subject_does_not_need_subject_column() {
        let (_dir, service) = service(WeightingScheme::HalfWeighted);
        let csv = "usn,name,cie1,cie2,assignment1marks,assignment2marks,see\n1AB01,Asha,40,45,48,50,80\n";

        let report = service.ingest_bytes(Semester::Sem3, csv.as_bytes(), Some("Physics")).unwrap();

        assert_eq!(report.inserted, 1);
        let stored = service.stores.get_by_subject(Semester::Sem3, "Physics").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].final_percentage, 131.5);
    }

    #[test]
    fn test_blank_marks_count_as_zero_and_duplicates_are_skipped() {
        let (_dir, service) = service(WeightingScheme::QuarterWeighted);
        let csv = format!(
            "{}1AB01,Asha,Maths,,,,,\n1ab01,Asha,Maths,40,45,48,50,80\n,NoUsn,Maths,1,1,1,1,1\n",
            HEADER
        );

        let report = service.ingest_bytes(Semester::Sem1, csv.as_bytes(), None).unwrap();

        assert_eq!(report, IngestionReport { inserted: 1, skipped: 2 });
        let stored = service.stores.get_all(Semester::Sem1).unwrap();
        assert_eq!(stored[0].final_percentage, 0.0);
    }

    #[test]
    fn test_short_record_is_skipped() {
        let (_dir, service) = service(WeightingScheme::QuarterWeighted);
        let csv = format!("{}1AB01,Asha,Maths,40\n1AB02,Ravi,Maths,40,45,48,50,80\n", HEADER);

        let report = service.ingest_bytes(Semester::Sem1, csv.as_bytes(), None).unwrap();

        assert_eq!(report, IngestionReport { inserted: 1, skipped: 1 });
    }

    #[test]
    fn test_ingest_file_reads_from_disk() {
        let (dir, service) = service(WeightingScheme::QuarterWeighted);
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, format!("{}1AB01,Asha,Maths,40,45,48,50,80\n", HEADER)).unwrap();

        let report = service.ingest_file(Semester::Sem4, &path, None).unwrap();

        assert_eq!(report.inserted, 1);
    }
}
