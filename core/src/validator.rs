//! Availability checks for custom exams.
//!
//! Every check here runs before anything is written, so a failure leaves
//! the store untouched.

use crate::{
    error::{ExamError, ExamResult},
    question::TopicKind,
};

/// Per-kind counts derived from a percentage split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTargets {
    pub memorization: usize,
    pub concepts:     usize,
}

impl KindTargets {
    pub fn for_kind(&self, kind: TopicKind) -> usize {
        match kind {
            TopicKind::Memorization => self.memorization,
            TopicKind::Concepts     => self.concepts,
        }
    }
}

/// The pool must hold at least the requested number of questions.
pub fn ensure_inventory(available: usize, required: usize) -> ExamResult<()> {
    if available < required {
        return Err(ExamError::InsufficientInventory { kind: None, required, available });
    }
    Ok(())
}

/// Exact integer check: 99 and 101 both fail.
pub fn validate_percentages(memorization: u32, concepts: u32) -> ExamResult<()> {
    if memorization + concepts != 100 {
        return Err(ExamError::PercentageSumInvalid { memorization, concepts });
    }
    Ok(())
}

/// Split `total` by the memorization percentage.
///
/// Rounds half up in integer arithmetic (`(total * p + 50) / 100`), which
/// is round-half-away-from-zero on this non-negative domain. Concepts take
/// the remainder so the two always add up to `total`.
pub fn split_counts(total: usize, memorization_percent: u32) -> KindTargets {
    let memorization = (total * memorization_percent as usize + 50) / 100;
    let memorization = memorization.min(total);
    KindTargets {
        memorization,
        concepts: total - memorization,
    }
}

pub fn ensure_kind_inventory(kind: TopicKind, available: usize, required: usize) -> ExamResult<()> {
    if available < required {
        return Err(ExamError::InsufficientInventory {
            kind: Some(kind),
            required,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_always_sums_to_total() {
        for total in 0..=150usize {
            for p in 0..=100u32 {
                let t = split_counts(total, p);
                assert_eq!(t.memorization + t.concepts, total, "total {total}, p {p}");
            }
        }
    }

    #[test]
    fn split_rounds_half_up() {
        // 5 * 50 / 100 = 2.5
        assert_eq!(split_counts(5, 50), KindTargets { memorization: 3, concepts: 2 });
        // 10 * 25 / 100 = 2.5
        assert_eq!(split_counts(10, 25), KindTargets { memorization: 3, concepts: 7 });
        // 7 * 33 / 100 = 2.31
        assert_eq!(split_counts(7, 33), KindTargets { memorization: 2, concepts: 5 });
    }

    #[test]
    fn split_extremes() {
        assert_eq!(split_counts(40, 100), KindTargets { memorization: 40, concepts: 0 });
        assert_eq!(split_counts(40, 0), KindTargets { memorization: 0, concepts: 40 });
    }

    #[test]
    fn percentages_must_be_exactly_100() {
        assert!(validate_percentages(60, 40).is_ok());
        assert!(validate_percentages(100, 0).is_ok());
        assert!(matches!(
            validate_percentages(60, 41),
            Err(ExamError::PercentageSumInvalid { memorization: 60, concepts: 41 })
        ));
        assert!(validate_percentages(50, 49).is_err());
    }

    #[test]
    fn inventory_checks_report_counts() {
        assert!(ensure_inventory(30, 30).is_ok());
        match ensure_inventory(30, 50) {
            Err(ExamError::InsufficientInventory { kind: None, required: 50, available: 30 }) => {}
            other => panic!("unexpected: {other:?}"),
        }
        match ensure_kind_inventory(TopicKind::Concepts, 1, 2) {
            Err(e) => assert_eq!(e.code(), "insufficient_split_inventory"),
            Ok(()) => panic!("expected shortfall"),
        }
    }
}
