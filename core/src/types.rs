//! Shared primitive types used across the composition engine.

/// Row id of a question in the bank.
pub type QuestionId = i64;

/// Stable identifier of a persisted exam (`exam-<uuid>`).
pub type ExamId = String;

/// Identifier of the requesting user, resolved upstream.
pub type UserId = String;

/// One of the 30 juz. Always within [`JUZ_MIN`, `JUZ_MAX`] once normalised.
pub type Juz = u8;

/// Exam-cycle year a question originated from.
pub type Year = i32;

pub const JUZ_MIN: Juz = 1;
pub const JUZ_MAX: Juz = 30;
