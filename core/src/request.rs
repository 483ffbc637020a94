//! Incoming selection requests.
//!
//! A body carrying a non-null, non-blank `grade` is a simulator request;
//! anything else is a custom request. Numeric fields accept numbers or numeric
//! strings (form posts send both) and are floored.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{ExamError, ExamResult},
    filter::CustomFilters,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionRequest {
    Simulator(SimulatorRequest),
    Custom(CustomRequest),
}

impl SelectionRequest {
    pub fn from_json(body: Value) -> ExamResult<Self> {
        if !body.is_object() {
            return Err(ExamError::InvalidRequest(
                "request body must be a JSON object".into(),
            ));
        }
        let is_simulator = body.get("grade").is_some_and(grade_present);
        let parsed = if is_simulator {
            serde_json::from_value(body).map(Self::Simulator)
        } else {
            serde_json::from_value(body).map(Self::Custom)
        };
        let request = parsed.map_err(|e| ExamError::InvalidRequest(e.to_string()))?;
        if let Self::Custom(custom) = &request {
            custom.filters.ensure_within_limit()?;
        }
        Ok(request)
    }
}

/// Form posts send an empty string for an unset grade.
fn grade_present(grade: &Value) -> bool {
    match grade {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Preset-driven request: the grade (and optional range) fixes scope and size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorRequest {
    #[serde(deserialize_with = "lenient::integer")]
    pub grade: i64,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub year: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl SimulatorRequest {
    pub fn new(grade: i64) -> Self {
        Self { grade, range: None, year: None, title: None }
    }

    pub fn with_range(mut self, range: &str) -> Self {
        self.range = Some(range.to_string());
        self
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }
}

/// Free-form request sized and scoped by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub juz_start: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub juz_end: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub total_questions: i64,
    /// Defaults to one minute per question.
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub duration_minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_percent")]
    pub memorization_percent: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_percent")]
    pub concepts_percent: Option<u32>,
    #[serde(flatten)]
    pub filters: CustomFilters,
}

impl CustomRequest {
    pub fn new(title: &str, juz_start: i64, juz_end: i64, total_questions: i64) -> Self {
        Self {
            title: Some(title.to_string()),
            juz_start,
            juz_end,
            total_questions,
            duration_minutes: None,
            year: None,
            memorization_percent: None,
            concepts_percent: None,
            filters: CustomFilters::default(),
        }
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_split(mut self, memorization: u32, concepts: u32) -> Self {
        self.memorization_percent = Some(memorization);
        self.concepts_percent = Some(concepts);
        self
    }

    pub fn with_filters(mut self, filters: CustomFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Custom exams must be named by the requester.
    pub fn required_title(&self) -> ExamResult<&str> {
        match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(ExamError::InvalidRequest("custom exams require a title".into())),
        }
    }

    /// Both percentages, or None when the caller did not ask for a split.
    pub fn split(&self) -> Option<(u32, u32)> {
        match (self.memorization_percent, self.concepts_percent) {
            (Some(m), Some(c)) => Some((m, c)),
            (None, None)       => None,
            (m, c) => {
                log::warn!(
                    "Only one percentage supplied (memorization {m:?}, concepts {c:?}); drawing uniformly"
                );
                None
            }
        }
    }
}

mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};
    use serde_json::Value;

    fn as_number(value: &Value) -> Result<Option<f64>, String> {
        let n = match value {
            Value::Null => return Ok(None),
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => return Ok(None),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match n {
            Some(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(format!("expected a number, got {value}")),
        }
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(d)?;
        match as_number(&value).map_err(D::Error::custom)? {
            Some(n) => Ok(n.floor() as i64),
            None => Err(D::Error::custom("expected a number, got nothing")),
        }
    }

    pub fn opt_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(as_number(&value).map_err(D::Error::custom)?.map(|n| n.floor() as i64))
    }

    pub fn opt_percent<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        let value = Value::deserialize(d)?;
        match as_number(&value).map_err(D::Error::custom)? {
            None => Ok(None),
            Some(p) if p.fract() == 0.0 && (0.0..=100.0).contains(&p) => Ok(Some(p as u32)),
            Some(p) => Err(D::Error::custom(format!(
                "percentages must be whole numbers between 0 and 100, got {p}"
            ))),
        }
    }
}
