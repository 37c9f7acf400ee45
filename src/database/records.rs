use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{InsertOutcome, NewStudentRecord, StudentSubjectRecord};
use crate::domain::normalize_usn;
use crate::grading::SubjectGrade;

const RECORD_COLUMNS: &str = "id, student_id, student_name, subject, internal1, internal2, internal_subtotal, assignment1, assignment2, assignment_subtotal, exam_score, exam_subtotal, final_percentage, grade, created_at";

/// Insert the record unless the (student, subject) pair is already stored.
///
/// Check-then-insert: a single writer per store is assumed.
pub fn insert_if_absent(conn: &mut DbConn, record: &NewStudentRecord) -> Result<InsertOutcome> {
    if exists(conn, &record.identity.student_id, &record.identity.subject)? {
        return Ok(InsertOutcome::Skipped);
    }

    insert_new_record(conn, record).map(InsertOutcome::Inserted)
}

fn exists(conn: &mut DbConn, student_id: &str, subject: &str) -> Result<bool> {
    let sql = "SELECT id FROM students WHERE UPPER(student_id) = ?1 AND subject = ?2 LIMIT 1";

    conn.query_row(sql, params![normalize_usn(student_id), subject], |row| row.get::<_, i64>(0))
        .optional()
        .context("Failed to check for existing record")
        .map(|id| id.is_some())
}

fn insert_new_record(conn: &mut DbConn, record: &NewStudentRecord) -> Result<StudentSubjectRecord> {
    let sql = format!(
        "INSERT INTO students (student_id, student_name, subject, internal1, internal2, internal_subtotal, assignment1, assignment2, assignment_subtotal, exam_score, exam_subtotal, final_percentage, grade) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13) RETURNING {}",
        RECORD_COLUMNS
    );

    let NewStudentRecord {
        identity,
        marks,
        scores,
    } = record;

    conn.query_row(
        &sql,
        params![
            identity.student_id,
            identity.student_name,
            identity.subject,
            marks.internal1,
            marks.internal2,
            scores.internal_subtotal,
            marks.assignment1,
            marks.assignment2,
            scores.assignment_subtotal,
            marks.exam_score,
            scores.exam_subtotal,
            scores.final_percentage,
            scores.grade.as_str(),
        ],
        parse_record_row,
    )
    .context("Failed to insert student record")
}

fn parse_record_row(row: &rusqlite::Row) -> rusqlite::Result<StudentSubjectRecord> {
    let grade: String = row.get(13)?;
    let grade = grade.parse::<SubjectGrade>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(13, rusqlite::types::Type::Text, e.into())
    })?;

    Ok(StudentSubjectRecord {
        id: row.get(0)?,
        student_id: row.get(1)?,
        student_name: row.get(2)?,
        subject: row.get(3)?,
        internal1: row.get(4)?,
        internal2: row.get(5)?,
        internal_subtotal: row.get(6)?,
        assignment1: row.get(7)?,
        assignment2: row.get(8)?,
        assignment_subtotal: row.get(9)?,
        exam_score: row.get(10)?,
        exam_subtotal: row.get(11)?,
        final_percentage: row.get(12)?,
        grade,
        created_at: row.get(14)?,
    })
}

/// All records of one student, ordered by subject.
pub fn list_by_student(conn: &mut DbConn, student_id: &str) -> Result<Vec<StudentSubjectRecord>> {
    let sql = format!(
        "SELECT {} FROM students WHERE UPPER(student_id) = ?1 ORDER BY subject ASC, id ASC",
        RECORD_COLUMNS
    );

    query_records(conn, &sql, params![normalize_usn(student_id)])
        .context("Failed to query records by student")
}

/// All records in insertion order.
pub fn list_all(conn: &mut DbConn) -> Result<Vec<StudentSubjectRecord>> {
    let sql = format!("SELECT {} FROM students ORDER BY id ASC", RECORD_COLUMNS);

    query_records(conn, &sql, params![]).context("Failed to list records")
}

pub fn list_by_subject(conn: &mut DbConn, subject: &str) -> Result<Vec<StudentSubjectRecord>> {
    let sql = format!(
        "SELECT {} FROM students WHERE subject = ?1 ORDER BY id ASC",
        RECORD_COLUMNS
    );

    query_records(conn, &sql, params![subject.trim()]).context("Failed to query records by subject")
}

fn query_records(
    conn: &mut DbConn,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<StudentSubjectRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, parse_record_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn delete_by_id(conn: &mut DbConn, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM students WHERE id = ?1", params![id])
        .context("Failed to delete record")?;

    Ok(deleted > 0)
}
