//! Scope resolver tests.
//!
//! Tests cover: the grade lookup table, custom clamping and inversion,
//! year clamping, and quota selection by year band.

use examgen_core::{
    config::{ComposerConfig, JuzQuota, ScopeLimits},
    request::{CustomRequest, SimulatorRequest},
    scope::{self, grade_preset, ExamScope, GradePreset},
};

fn limits() -> ScopeLimits {
    ScopeLimits::default()
}

fn row(juz_start: u8, juz_end: u8, size: u32) -> GradePreset {
    GradePreset { juz_start, juz_end, total_questions: size, duration_minutes: size }
}

/// Every row of the grade table, including the fallbacks.
#[test]
fn grade_table_is_reproduced_exactly() {
    assert_eq!(grade_preset(3, None), row(1, 30, 150));
    assert_eq!(grade_preset(3, Some("third")), row(1, 30, 150));
    assert_eq!(grade_preset(4, Some("10-30")), row(11, 30, 100));
    assert_eq!(grade_preset(4, None), row(1, 20, 100));
    assert_eq!(grade_preset(4, Some("first")), row(1, 20, 100));
    assert_eq!(grade_preset(5, Some("second")), row(11, 20, 50));
    assert_eq!(grade_preset(5, Some("third")), row(21, 30, 50));
    assert_eq!(grade_preset(5, Some("first")), row(1, 10, 50));
    assert_eq!(grade_preset(5, None), row(1, 10, 50));
    assert_eq!(grade_preset(7, None), row(1, 30, 150));
    assert_eq!(grade_preset(0, Some("10-30")), row(1, 30, 150));
}

/// grade=4, range="10-30", year=1403 → juz 11–30, 100 questions, 100 minutes,
/// quota 2 memorization / 3 concepts.
#[test]
fn grade_four_upper_range_in_recent_year() {
    let req = SimulatorRequest::new(4).with_range("10-30").with_year(1403);
    let resolved = scope::resolve_simulator(&req, &limits());

    assert_eq!(resolved.scope, ExamScope { juz_start: 11, juz_end: 30, year: Some(1403) });
    assert_eq!(resolved.total_questions, 100);
    assert_eq!(resolved.duration_minutes, 100);

    let quota = ComposerConfig::default().quota.quota_for_year(resolved.scope.year);
    assert_eq!(quota, JuzQuota { memorization: 2, concepts: 3 });
}

#[test]
fn quota_follows_year_bands() {
    let quota = ComposerConfig::default().quota;

    assert_eq!(quota.quota_for_year(Some(1404)), JuzQuota { memorization: 2, concepts: 3 });
    assert_eq!(quota.quota_for_year(Some(1402)), JuzQuota { memorization: 2, concepts: 3 });
    assert_eq!(quota.quota_for_year(Some(1401)), JuzQuota { memorization: 1, concepts: 4 });
    assert_eq!(quota.quota_for_year(Some(1385)), JuzQuota { memorization: 1, concepts: 4 });
    assert_eq!(quota.quota_for_year(None), JuzQuota { memorization: 2, concepts: 3 });
}

/// juzStart=5, juzEnd=3 normalises to 3..5.
#[test]
fn inverted_custom_range_is_reordered() {
    let req = CustomRequest::new("inverted", 5, 3, 20);
    let resolved = scope::resolve_custom(&req, &limits());

    assert_eq!(resolved.scope.juz_start, 3);
    assert_eq!(resolved.scope.juz_end, 5);
}

#[test]
fn custom_bounds_are_clamped_independently() {
    let mut req = CustomRequest::new("wide", -4, 99, 1000);
    req.duration_minutes = Some(2);
    let resolved = scope::resolve_custom(&req, &limits());

    assert_eq!((resolved.scope.juz_start, resolved.scope.juz_end), (1, 30));
    assert_eq!(resolved.total_questions, 150);
    assert_eq!(resolved.duration_minutes, 5);

    let mut req = CustomRequest::new("both high", 40, 35, 1);
    req.duration_minutes = Some(500);
    let resolved = scope::resolve_custom(&req, &limits());

    assert_eq!((resolved.scope.juz_start, resolved.scope.juz_end), (30, 30));
    assert_eq!(resolved.total_questions, 5);
    assert_eq!(resolved.duration_minutes, 180);
}

#[test]
fn custom_duration_defaults_to_question_count() {
    let req = CustomRequest::new("default duration", 1, 2, 40);
    let resolved = scope::resolve_custom(&req, &limits());
    assert_eq!(resolved.duration_minutes, 40);
}

#[test]
fn year_is_clamped_and_absent_means_all_years() {
    let l = limits();
    assert_eq!(scope::clamp_year(Some(1300), &l), Some(1385));
    assert_eq!(scope::clamp_year(Some(1500), &l), Some(1404));
    assert_eq!(scope::clamp_year(Some(1399), &l), Some(1399));
    assert_eq!(scope::clamp_year(None, &l), None);

    let resolved = scope::resolve_custom(&CustomRequest::new("t", 1, 1, 5).with_year(1999), &l);
    assert_eq!(resolved.scope.year, Some(1404));
}

#[test]
fn simulator_title_mentions_grade_and_year() {
    assert_eq!(scope::simulator_title(4, Some(1403)), "Grade 4 simulator exam, year 1403");
    assert_eq!(scope::simulator_title(3, None), "Grade 3 simulator exam, all years");
}
