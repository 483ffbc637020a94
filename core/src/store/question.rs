//! Question bank reads and the import path.

use rusqlite::{params, params_from_iter, types::Value, Connection};

use crate::{
    error::ExamResult,
    exam::QuestionContent,
    filter::{QueryPredicate, JUZ_EXPR, KIND_EXPR},
    question::{NewQuestion, PoolEntry, TopicKind},
    types::QuestionId,
};

use super::ExamStore;

fn with_kind(predicate: &QueryPredicate, kind: Option<TopicKind>) -> QueryPredicate {
    match kind {
        Some(k) => predicate
            .clone()
            .and(format!("{KIND_EXPR} = ?"), [Value::Text(k.as_str().to_string())]),
        None => predicate.clone(),
    }
}

pub(crate) fn count_candidates(
    conn:      &Connection,
    predicate: &QueryPredicate,
    kind:      Option<TopicKind>,
) -> rusqlite::Result<usize> {
    let predicate = with_kind(predicate, kind);
    let sql = format!("SELECT COUNT(*) FROM question {}", predicate.where_sql());
    let count: i64 = conn.query_row(&sql, params_from_iter(predicate.params()), |row| row.get(0))?;
    Ok(count as usize)
}

/// Pool projection ordered by `(juz, id)`.
pub(crate) fn load_candidates(
    conn:      &Connection,
    predicate: &QueryPredicate,
    kind:      Option<TopicKind>,
) -> rusqlite::Result<Vec<PoolEntry>> {
    let predicate = with_kind(predicate, kind);
    let sql = format!(
        "SELECT id, {JUZ_EXPR} AS j, {KIND_EXPR} AS k FROM question {}
         ORDER BY j ASC, id ASC",
        predicate.where_sql()
    );
    let mut stmt = conn.prepare(&sql)?;
    let entries = stmt
        .query_map(params_from_iter(predicate.params()), |row| {
            Ok(PoolEntry {
                id:         row.get(0)?,
                juz:        row.get::<_, i64>(1)? as u8,
                topic_kind: TopicKind::from_db(row.get::<_, Option<String>>(2)?.as_deref()),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

fn insert_question_with(conn: &Connection, q: &NewQuestion) -> ExamResult<QuestionId> {
    conn.execute(
        "INSERT INTO question
         (text, options, answer, juz, surah, topic_kind, year, difficulty, is_active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            q.text,
            serde_json::to_string(&q.options)?,
            q.answer,
            q.juz,
            q.surah,
            q.topic_kind.map(|k| k.as_str()),
            q.year,
            q.difficulty,
            q.is_active,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl ExamStore {
    pub fn insert_question(&self, question: &NewQuestion) -> ExamResult<QuestionId> {
        insert_question_with(&self.conn, question)
    }

    /// Import a batch all-or-nothing.
    pub fn insert_questions(&self, questions: &[NewQuestion]) -> ExamResult<Vec<QuestionId>> {
        let tx = self.conn.unchecked_transaction()?;
        let ids = questions
            .iter()
            .map(|q| insert_question_with(&tx, q))
            .collect::<ExamResult<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
    }

    /// Returns false if no such question exists.
    pub fn set_question_active(&self, id: QuestionId, active: bool) -> ExamResult<bool> {
        let changed = self.conn.execute(
            "UPDATE question SET is_active = ?1 WHERE id = ?2",
            params![active, id],
        )?;
        Ok(changed > 0)
    }

    /// Read the whole pool once. A single SELECT is a consistent snapshot.
    pub fn load_pool(&self, predicate: &QueryPredicate) -> ExamResult<Vec<PoolEntry>> {
        Ok(load_candidates(&self.conn, predicate, None)?)
    }

    /// Text and options of an exam's questions, in exam order.
    pub(crate) fn exam_question_content(&self, exam_id: &str) -> ExamResult<Vec<QuestionContent>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.position, q.id, q.text, q.options
             FROM exam_question_entry e
             JOIN question q ON q.id = e.question_id
             WHERE e.exam_id = ?1
             ORDER BY e.position ASC",
        )?;
        let rows = stmt
            .query_map(params![exam_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, QuestionId>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(order, question_id, text, options)| -> ExamResult<QuestionContent> {
                Ok(QuestionContent {
                    order: order as u32,
                    question_id,
                    text,
                    options: serde_json::from_str(&options)?,
                })
            })
            .collect()
    }
}
