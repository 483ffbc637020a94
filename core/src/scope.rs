//! Scope resolution: turns a request into a canonical juz interval, an
//! optional exact year, and the exam's nominal size and duration.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{
    config::ScopeLimits,
    request::{CustomRequest, SimulatorRequest},
    types::{Juz, Year, JUZ_MAX, JUZ_MIN},
};

/// Canonical scope. Invariant: `JUZ_MIN <= juz_start <= juz_end <= JUZ_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExamScope {
    pub juz_start: Juz,
    pub juz_end:   Juz,
    pub year:      Option<Year>,
}

impl ExamScope {
    /// Clamp both ends into the juz bounds, then reorder.
    pub fn normalized(juz_start: i64, juz_end: i64, year: Option<Year>) -> Self {
        let start = clamp_juz(juz_start);
        let end = clamp_juz(juz_end);
        Self {
            juz_start: start.min(end),
            juz_end:   start.max(end),
            year,
        }
    }

    pub fn juz_range(&self) -> RangeInclusive<Juz> {
        self.juz_start..=self.juz_end
    }
}

fn clamp_juz(juz: i64) -> Juz {
    juz.clamp(JUZ_MIN as i64, JUZ_MAX as i64) as Juz
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedScope {
    pub scope:            ExamScope,
    pub total_questions:  u32,
    pub duration_minutes: u32,
}

/// One row of the grade lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradePreset {
    pub juz_start:        Juz,
    pub juz_end:          Juz,
    pub total_questions:  u32,
    pub duration_minutes: u32,
}

const fn preset(juz_start: Juz, juz_end: Juz, size: u32) -> GradePreset {
    GradePreset { juz_start, juz_end, total_questions: size, duration_minutes: size }
}

/// Fixed grade table. Unknown grades fall back to the full-text exam.
pub fn grade_preset(grade: i64, range: Option<&str>) -> GradePreset {
    let range = range.map(|r| r.trim().to_ascii_lowercase());
    match (grade, range.as_deref()) {
        (3, _)              => preset(1, 30, 150),
        (4, Some("10-30"))  => preset(11, 30, 100),
        (4, _)              => preset(1, 20, 100),
        (5, Some("second")) => preset(11, 20, 50),
        (5, Some("third"))  => preset(21, 30, 50),
        (5, _)              => preset(1, 10, 50),
        _                   => preset(1, 30, 150),
    }
}

/// Clamp into the configured year range. None means "all years".
pub fn clamp_year(year: Option<i64>, limits: &ScopeLimits) -> Option<Year> {
    year.map(|y| y.clamp(limits.year_min as i64, limits.year_max as i64) as Year)
}

pub fn resolve_simulator(req: &SimulatorRequest, limits: &ScopeLimits) -> ResolvedScope {
    let preset = grade_preset(req.grade, req.range.as_deref());
    ResolvedScope {
        scope: ExamScope {
            juz_start: preset.juz_start,
            juz_end:   preset.juz_end,
            year:      clamp_year(req.year, limits),
        },
        total_questions:  preset.total_questions,
        duration_minutes: preset.duration_minutes,
    }
}

pub fn resolve_custom(req: &CustomRequest, limits: &ScopeLimits) -> ResolvedScope {
    let total = clamp_u32(req.total_questions, limits.questions_min, limits.questions_max);
    let duration = clamp_u32(
        req.duration_minutes.unwrap_or(total as i64),
        limits.duration_min,
        limits.duration_max,
    );
    ResolvedScope {
        scope: ExamScope::normalized(req.juz_start, req.juz_end, clamp_year(req.year, limits)),
        total_questions:  total,
        duration_minutes: duration,
    }
}

fn clamp_u32(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(min as i64, max as i64) as u32
}

/// Default title for simulator exams.
pub fn simulator_title(grade: i64, year: Option<Year>) -> String {
    match year {
        Some(y) => format!("Grade {grade} simulator exam, year {y}"),
        None    => format!("Grade {grade} simulator exam, all years"),
    }
}
