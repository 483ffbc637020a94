use thiserror::Error;

use crate::question::TopicKind;

#[derive(Error, Debug)]
pub enum ExamError {
    #[error("User '{user_id}' may not generate simulator exams")]
    Unauthorized { user_id: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Percentages must sum to 100 (memorization {memorization} + concepts {concepts})")]
    PercentageSumInvalid { memorization: u32, concepts: u32 },

    #[error("Insufficient {}questions: need {required}, available {available}", kind_label(.kind))]
    InsufficientInventory {
        kind:      Option<TopicKind>,
        required:  usize,
        available: usize,
    },

    #[error("Question {question_id} selected more than once")]
    DuplicateQuestion { question_id: i64 },

    /// Read failure while counting or loading the pool. Safe to retry.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Write failure while persisting the exam. The transaction is rolled back.
    #[error("Exam assembly failed: {0}")]
    Assembly(rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn kind_label(kind: &Option<TopicKind>) -> String {
    match kind {
        Some(k) => format!("{} ", k.as_str()),
        None    => String::new(),
    }
}

impl ExamError {
    /// Stable machine-readable code, one per abort path.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. }                              => "unauthorized",
            Self::InvalidRequest(_)                                => "invalid_request",
            Self::PercentageSumInvalid { .. }                      => "percentage_sum_invalid",
            Self::InsufficientInventory { kind: None, .. }         => "insufficient_inventory",
            Self::InsufficientInventory { kind: Some(_), .. }      => "insufficient_split_inventory",
            Self::DuplicateQuestion { .. }                         => "duplicate_question",
            Self::Database(_) | Self::Assembly(_)                  => "storage_failure",
            Self::Serialization(_)                                 => "serialization",
            Self::Other(_)                                         => "internal",
        }
    }

    /// Whether retrying the whole request can succeed. Validation errors are
    /// deterministic for a given store state; only pool reads are transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

pub type ExamResult<T> = Result<T, ExamError>;
