//! Generated exams and their assembly from a sampler's selection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ExamError, ExamResult},
    question::{PoolEntry, TopicKind},
    scope::ExamScope,
    types::{ExamId, Juz, QuestionId, UserId, Year},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamMode {
    Simulator,
    Custom,
}

impl ExamMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simulator => "simulator",
            Self::Custom    => "custom",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "simulator" => Self::Simulator,
            _           => Self::Custom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestionEntry {
    pub question_id: QuestionId,
    /// 1-based position in the exam.
    pub order:       u32,
    pub juz:         Juz,
    pub topic_kind:  TopicKind,
}

/// A persisted exam. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedExam {
    pub exam_id:          ExamId,
    pub owner_id:         UserId,
    pub mode:             ExamMode,
    pub title:            String,
    pub juz_start:        Juz,
    pub juz_end:          Juz,
    pub year:             Option<Year>,
    pub duration_minutes: u32,
    /// Actual number of entries, not the requested size.
    pub total_questions:  u32,
    pub created_at:       String,
    pub entries:          Vec<ExamQuestionEntry>,
}

impl GeneratedExam {
    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.entries.iter().map(|e| e.question_id).collect()
    }

    pub fn count_kind(&self, kind: TopicKind) -> usize {
        self.entries.iter().filter(|e| e.topic_kind == kind).count()
    }
}

/// Everything about an exam except its questions.
#[derive(Debug, Clone)]
pub struct ExamHeader {
    pub owner_id:         UserId,
    pub mode:             ExamMode,
    pub title:            String,
    pub scope:            ExamScope,
    pub duration_minutes: u32,
}

/// Number the selection in order and attach the header.
pub fn assemble(header: ExamHeader, selection: Vec<PoolEntry>) -> ExamResult<GeneratedExam> {
    let entries: Vec<ExamQuestionEntry> = selection
        .into_iter()
        .enumerate()
        .map(|(i, e)| ExamQuestionEntry {
            question_id: e.id,
            order:       i as u32 + 1,
            juz:         e.juz,
            topic_kind:  e.topic_kind,
        })
        .collect();

    let exam = GeneratedExam {
        exam_id:          format!("exam-{}", uuid::Uuid::new_v4()),
        owner_id:         header.owner_id,
        mode:             header.mode,
        title:            header.title,
        juz_start:        header.scope.juz_start,
        juz_end:          header.scope.juz_end,
        year:             header.scope.year,
        duration_minutes: header.duration_minutes,
        total_questions:  entries.len() as u32,
        created_at:       chrono::Utc::now().to_rfc3339(),
        entries,
    };
    check_integrity(&exam)?;
    Ok(exam)
}

/// Orders are exactly `1..=n` and no question appears twice.
pub fn check_integrity(exam: &GeneratedExam) -> ExamResult<()> {
    let mut seen = HashSet::with_capacity(exam.entries.len());
    for (i, entry) in exam.entries.iter().enumerate() {
        if entry.order as usize != i + 1 {
            return Err(ExamError::Other(anyhow::anyhow!(
                "exam {} entry {i} has order {}",
                exam.exam_id,
                entry.order
            )));
        }
        if !seen.insert(entry.question_id) {
            return Err(ExamError::DuplicateQuestion { question_id: entry.question_id });
        }
    }
    Ok(())
}

/// Renderable content of one exam question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContent {
    pub order:       u32,
    pub question_id: QuestionId,
    pub text:        String,
    pub options:     Vec<String>,
}

/// An exam plus the question content needed to display it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamView {
    pub exam:      GeneratedExam,
    pub questions: Vec<QuestionContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> ExamHeader {
        ExamHeader {
            owner_id:         "u1".into(),
            mode:             ExamMode::Custom,
            title:            "t".into(),
            scope:            ExamScope { juz_start: 1, juz_end: 2, year: None },
            duration_minutes: 10,
        }
    }

    fn entry(id: QuestionId) -> PoolEntry {
        PoolEntry { id, juz: 1, topic_kind: TopicKind::Concepts }
    }

    #[test]
    fn assemble_numbers_from_one() {
        let exam = assemble(header(), vec![entry(7), entry(3), entry(9)]).unwrap();
        let orders: Vec<u32> = exam.entries.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(exam.question_ids(), vec![7, 3, 9]);
        assert_eq!(exam.total_questions, 3);
    }

    #[test]
    fn assemble_rejects_repeated_question() {
        let err = assemble(header(), vec![entry(1), entry(2), entry(1)]).unwrap_err();
        assert!(matches!(err, ExamError::DuplicateQuestion { question_id: 1 }));
    }

    #[test]
    fn empty_selection_is_a_valid_exam() {
        let exam = assemble(header(), Vec::new()).unwrap();
        assert_eq!(exam.total_questions, 0);
        assert!(exam.exam_id.starts_with("exam-"));
    }
}
