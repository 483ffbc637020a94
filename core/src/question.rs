//! Question bank records as seen by the composition engine.

use serde::{Deserialize, Serialize};

use crate::types::{Juz, QuestionId, Year};

/// Curriculum classification of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicKind {
    /// Rote recall of the text.
    Memorization,
    /// Comprehension and meaning.
    Concepts,
}

impl TopicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memorization => "MEMORIZATION",
            Self::Concepts     => "CONCEPTS",
        }
    }

    /// Read the stored column. Unclassified (or unknown) rows are concepts.
    pub fn from_db(value: Option<&str>) -> Self {
        match value {
            Some("MEMORIZATION") => Self::Memorization,
            _                    => Self::Concepts,
        }
    }
}

/// Minimal projection loaded into the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolEntry {
    pub id:         QuestionId,
    pub juz:        Juz,
    pub topic_kind: TopicKind,
}

/// A question as handed over by the import pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub juz: Option<Juz>,
    #[serde(default)]
    pub surah: Option<u16>,
    #[serde(default)]
    pub topic_kind: Option<TopicKind>,
    #[serde(default)]
    pub year: Option<Year>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewQuestion {
    /// Shorthand used by tests and fixtures.
    pub fn classified(juz: Juz, topic_kind: TopicKind, year: Option<Year>) -> Self {
        Self {
            text: format!("Question on juz {juz} ({})", topic_kind.as_str()),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            answer: Some("A".into()),
            juz: Some(juz),
            surah: None,
            topic_kind: Some(topic_kind),
            year,
            difficulty: None,
            is_active: true,
        }
    }
}
