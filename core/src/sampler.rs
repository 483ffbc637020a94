//! Sampler trait and candidate sources.
//!
//! RULE: Every sampling strategy implements Sampler. A sampler only reads
//! candidates through a CandidateSource and only draws randomness from the
//! SamplerRng it is handed. It never writes.

use crate::{
    error::ExamResult,
    question::{PoolEntry, TopicKind},
    rng::SamplerRng,
};

/// Read access to the candidate pool of one request.
///
/// `kind = None` means every topic-kind. Loads return entries ordered by
/// `(juz, id)`.
pub trait CandidateSource {
    fn count(&self, kind: Option<TopicKind>) -> ExamResult<usize>;
    fn load(&self, kind: Option<TopicKind>) -> ExamResult<Vec<PoolEntry>>;
}

/// An already-loaded pool snapshot. Assumed to be in loader order.
impl CandidateSource for Vec<PoolEntry> {
    fn count(&self, kind: Option<TopicKind>) -> ExamResult<usize> {
        Ok(self.iter().filter(|e| matches_kind(e, kind)).count())
    }

    fn load(&self, kind: Option<TopicKind>) -> ExamResult<Vec<PoolEntry>> {
        Ok(self.iter().filter(|e| matches_kind(e, kind)).copied().collect())
    }
}

fn matches_kind(entry: &PoolEntry, kind: Option<TopicKind>) -> bool {
    kind.map_or(true, |k| entry.topic_kind == k)
}

/// The contract every sampling strategy fulfils.
pub trait Sampler {
    /// Stable name for logging.
    fn name(&self) -> &'static str;

    /// Choose the ordered question list for one exam.
    ///
    /// - `source`: the scope-matching pool
    /// - `rng`:    this request's deterministic RNG
    fn select(
        &self,
        source: &dyn CandidateSource,
        rng: &mut SamplerRng,
    ) -> ExamResult<Vec<PoolEntry>>;
}
