use anyhow::{Context, Result};
use log::info;
use std::fs;

use super::connection::{create_pool, get_connection, DbConn, DbPool};
use super::models::{InsertOutcome, NewStudentRecord, StudentSubjectRecord};
use super::{records, setup};
use crate::config::StorageSettings;
use crate::domain::Semester;
use crate::errors::store_context;

/// The four per-semester stores.
///
/// This is the only place a `Semester` is mapped to a database file.
#[derive(Clone)]
pub struct SemesterStores {
    pools: [DbPool; 4],
}

impl SemesterStores {
    /// Open (creating if needed) every semester database under the data dir.
    pub fn open(settings: &StorageSettings) -> Result<Self> {
        fs::create_dir_all(&settings.data_dir).with_context(|| {
            format!("Failed to create data directory {}", settings.data_dir.display())
        })?;

        let pools = [
            Self::open_semester(settings, Semester::Sem1)?,
            Self::open_semester(settings, Semester::Sem2)?,
            Self::open_semester(settings, Semester::Sem3)?,
            Self::open_semester(settings, Semester::Sem4)?,
        ];

        info!("Opened semester stores in {}", settings.data_dir.display());
        Ok(Self { pools })
    }

    fn open_semester(settings: &StorageSettings, semester: Semester) -> Result<DbPool> {
        let pool = create_pool(settings.database_path(semester.number()))?;
        let mut conn = get_connection(&pool)?;
        setup::initialize_database(&mut conn)
            .with_context(|| store_context("initialize schema", semester))?;
        Ok(pool)
    }

    pub fn connection(&self, semester: Semester) -> Result<DbConn> {
        get_connection(&self.pools[semester.index()])
    }

    /// Records of one student (case-insensitive USN), ordered by subject.
    pub fn get(&self, semester: Semester, student_id: &str) -> Result<Vec<StudentSubjectRecord>> {
        let mut conn = self.connection(semester)?;
        records::list_by_student(&mut conn, student_id)
            .with_context(|| store_context("read student records", semester))
    }

    /// Every record of the semester in insertion order.
    pub fn get_all(&self, semester: Semester) -> Result<Vec<StudentSubjectRecord>> {
        let mut conn = self.connection(semester)?;
        records::list_all(&mut conn).with_context(|| store_context("list records", semester))
    }

    pub fn get_by_subject(&self, semester: Semester, subject: &str) -> Result<Vec<StudentSubjectRecord>> {
        let mut conn = self.connection(semester)?;
        records::list_by_subject(&mut conn, subject)
            .with_context(|| store_context("read subject records", semester))
    }

    pub fn insert_if_absent(&self, semester: Semester, record: &NewStudentRecord) -> Result<InsertOutcome> {
        let mut conn = self.connection(semester)?;
        records::insert_if_absent(&mut conn, record)
            .with_context(|| store_context("insert record", semester))
    }

    pub fn delete(&self, semester: Semester, record_id: i64) -> Result<bool> {
        let mut conn = self.connection(semester)?;
        records::delete_by_id(&mut conn, record_id)
            .with_context(|| store_context("delete record", semester))
    }
}
