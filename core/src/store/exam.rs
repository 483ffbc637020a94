//! Generated exam persistence.

use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    error::ExamResult,
    exam::{ExamMode, ExamQuestionEntry, ExamView, GeneratedExam},
    question::TopicKind,
};

use super::ExamStore;

/// Write the exam row and all of its entries. Callers run this inside a
/// UnitOfWork so readers never see a partial exam.
pub(crate) fn insert_exam(conn: &Connection, exam: &GeneratedExam) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO generated_exam
         (exam_id, owner_id, mode, title, juz_start, juz_end, year,
          duration_minutes, total_questions, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            exam.exam_id,
            exam.owner_id,
            exam.mode.as_str(),
            exam.title,
            exam.juz_start,
            exam.juz_end,
            exam.year,
            exam.duration_minutes,
            exam.total_questions,
            exam.created_at,
        ],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO exam_question_entry (exam_id, question_id, position, juz, topic_kind)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for entry in &exam.entries {
        stmt.execute(params![
            exam.exam_id,
            entry.question_id,
            entry.order,
            entry.juz,
            entry.topic_kind.as_str(),
        ])?;
    }
    Ok(())
}

impl ExamStore {
    pub fn get_exam(&self, exam_id: &str) -> ExamResult<Option<GeneratedExam>> {
        let exam = self
            .conn
            .query_row(
                "SELECT exam_id, owner_id, mode, title, juz_start, juz_end, year,
                        duration_minutes, total_questions, created_at
                 FROM generated_exam WHERE exam_id = ?1",
                params![exam_id],
                |row| {
                    Ok(GeneratedExam {
                        exam_id:          row.get(0)?,
                        owner_id:         row.get(1)?,
                        mode:             ExamMode::from_db(&row.get::<_, String>(2)?),
                        title:            row.get(3)?,
                        juz_start:        row.get(4)?,
                        juz_end:          row.get(5)?,
                        year:             row.get(6)?,
                        duration_minutes: row.get(7)?,
                        total_questions:  row.get(8)?,
                        created_at:       row.get(9)?,
                        entries:          Vec::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut exam) = exam else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT question_id, position, juz, topic_kind
             FROM exam_question_entry WHERE exam_id = ?1
             ORDER BY position ASC",
        )?;
        exam.entries = stmt
            .query_map(params![exam_id], |row| {
                Ok(ExamQuestionEntry {
                    question_id: row.get(0)?,
                    order:       row.get(1)?,
                    juz:         row.get(2)?,
                    topic_kind:  TopicKind::from_db(row.get::<_, Option<String>>(3)?.as_deref()),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(exam))
    }

    /// The exam plus question text and options, for rendering.
    pub fn exam_view(&self, exam_id: &str) -> ExamResult<Option<ExamView>> {
        let Some(exam) = self.get_exam(exam_id)? else {
            return Ok(None);
        };
        let questions = self.exam_question_content(exam_id)?;
        Ok(Some(ExamView { exam, questions }))
    }

    // ── Test / summary helpers ────────────────────────────────────────

    pub fn exam_count(&self) -> ExamResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM generated_exam", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn exam_count_for_owner(&self, owner_id: &str) -> ExamResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM generated_exam WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn exam_entry_count(&self) -> ExamResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM exam_question_entry", [], |row| row.get(0))?;
        Ok(count)
    }
}
