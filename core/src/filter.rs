//! Candidate filter predicates.
//!
//! RULE: Predicate building is pure. The same scope and filters always
//! produce the same SQL and the same parameter list, and building one
//! never touches the database.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ExamError, ExamResult},
    scope::ExamScope,
    types::QuestionId,
};

/// Normalised juz column: unscoped rows count as juz 1.
pub const JUZ_EXPR: &str = "COALESCE(juz, 1)";
/// Normalised topic column: unclassified rows count as concepts.
pub const KIND_EXPR: &str = "COALESCE(topic_kind, 'CONCEPTS')";

/// Extra custom-mode filters. Empty sets impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFilters {
    #[serde(default)]
    pub difficulties: Vec<String>,
    #[serde(default)]
    pub surahs: Vec<u16>,
    #[serde(default)]
    pub exclude_question_ids: Vec<QuestionId>,
}

impl CustomFilters {
    /// Most values accepted across all filter sets. Each one becomes a
    /// bound SQL parameter.
    pub const MAX_VALUES: usize = 1000;

    pub fn value_count(&self) -> usize {
        self.difficulties.len() + self.surahs.len() + self.exclude_question_ids.len()
    }

    pub fn ensure_within_limit(&self) -> ExamResult<()> {
        let count = self.value_count();
        if count > Self::MAX_VALUES {
            return Err(ExamError::InvalidRequest(format!(
                "custom filters carry {count} values, at most {} are allowed",
                Self::MAX_VALUES
            )));
        }
        Ok(())
    }
}

/// Conjunction of SQL clauses with positional `?` parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPredicate {
    clauses: Vec<String>,
    params:  Vec<Value>,
}

impl QueryPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Self {
        self.clauses.push(clause.into());
        self.params.extend(params);
        self
    }

    /// `column IN (...)` (or `NOT IN`). No-op for an empty value list.
    pub fn and_in(self, column: &str, values: Vec<Value>, negate: bool) -> Self {
        if values.is_empty() {
            return self;
        }
        let marks = vec!["?"; values.len()].join(", ");
        let op = if negate { "NOT IN" } else { "IN" };
        self.and(format!("{column} {op} ({marks})"), values)
    }

    pub fn merge(mut self, other: QueryPredicate) -> Self {
        self.clauses.extend(other.clauses);
        self.params.extend(other.params);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// `WHERE a AND b`, or an empty string for no clauses.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Active questions inside the juz interval, optionally pinned to one year.
pub fn scope_predicate(scope: &ExamScope) -> QueryPredicate {
    let predicate = QueryPredicate::new().and("is_active = 1", []).and(
        format!("{JUZ_EXPR} BETWEEN ? AND ?"),
        [
            Value::Integer(scope.juz_start as i64),
            Value::Integer(scope.juz_end as i64),
        ],
    );
    match scope.year {
        Some(year) => predicate.and("year = ?", [Value::Integer(year as i64)]),
        None       => predicate,
    }
}

/// Translates caller-supplied custom filters into a predicate.
pub trait FilterBuilder: Send + Sync {
    fn build(&self, filters: &CustomFilters) -> QueryPredicate;
}

/// Maps each filter field onto its question column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnFilterBuilder;

impl FilterBuilder for ColumnFilterBuilder {
    fn build(&self, filters: &CustomFilters) -> QueryPredicate {
        let difficulties = filters
            .difficulties
            .iter()
            .map(|d| Value::Text(d.clone()))
            .collect();
        let surahs = filters
            .surahs
            .iter()
            .map(|s| Value::Integer(*s as i64))
            .collect();
        let excluded = filters
            .exclude_question_ids
            .iter()
            .map(|id| Value::Integer(*id))
            .collect();

        QueryPredicate::new()
            .and_in("difficulty", difficulties, false)
            .and_in("surah", surahs, false)
            .and_in("id", excluded, true)
    }
}
