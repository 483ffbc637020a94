//! Percentage/uniform sampler (custom mode).
//!
//! Strict: delivers exactly the requested count or fails before anything
//! is written. With a percentage split each topic-kind sub-pool is shuffled
//! and cut independently, then the concatenation is shuffled again so kind
//! order does not leak into question order.
//!
//! Runs against a CandidateSource bound to one open unit of work, so the
//! counts it validates are the counts it loads.

use crate::{
    error::ExamResult,
    question::{PoolEntry, TopicKind},
    rng::SamplerRng,
    sampler::{CandidateSource, Sampler},
    validator,
};

pub struct PercentageSampler {
    total: usize,
    /// (memorization %, concepts %), both supplied by the caller.
    split: Option<(u32, u32)>,
}

impl PercentageSampler {
    pub fn uniform(total: usize) -> Self {
        Self { total, split: None }
    }

    pub fn new(total: usize, split: Option<(u32, u32)>) -> Self {
        Self { total, split }
    }

    fn draw(
        &self,
        source: &dyn CandidateSource,
        kind: Option<TopicKind>,
        count: usize,
        rng: &mut SamplerRng,
    ) -> ExamResult<Vec<PoolEntry>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut pool = source.load(kind)?;
        rng.shuffle(&mut pool);
        pool.truncate(count);
        Ok(pool)
    }
}

impl Sampler for PercentageSampler {
    fn name(&self) -> &'static str {
        match self.split {
            Some(_) => "percentage",
            None    => "uniform",
        }
    }

    fn select(
        &self,
        source: &dyn CandidateSource,
        rng: &mut SamplerRng,
    ) -> ExamResult<Vec<PoolEntry>> {
        let available = source.count(None)?;
        validator::ensure_inventory(available, self.total)?;

        let Some((memorization_pct, concepts_pct)) = self.split else {
            return self.draw(source, None, self.total, rng);
        };

        validator::validate_percentages(memorization_pct, concepts_pct)?;
        let targets = validator::split_counts(self.total, memorization_pct);

        for kind in [TopicKind::Memorization, TopicKind::Concepts] {
            let required = targets.for_kind(kind);
            if required > 0 {
                validator::ensure_kind_inventory(kind, source.count(Some(kind))?, required)?;
            }
        }

        let mut selected = self.draw(source, Some(TopicKind::Memorization), targets.memorization, rng)?;
        selected.extend(self.draw(source, Some(TopicKind::Concepts), targets.concepts, rng)?);
        rng.shuffle(&mut selected);
        Ok(selected)
    }
}
