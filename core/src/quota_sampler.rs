//! Structured quota sampler (simulator mode).
//!
//! Walks the juz interval in ascending order and takes, from each juz, the
//! first `memorization` memorization questions and the first `concepts`
//! concept questions in loader order. No shuffling: the same bank always
//! yields the same simulator exam.
//!
//! Shortfalls are tolerated. A juz with fewer questions than its quota
//! contributes what it has, and an empty juz contributes nothing, so the
//! exam may come out shorter than the nominal grade size.

use std::collections::BTreeMap;

use crate::{
    config::JuzQuota,
    error::ExamResult,
    question::{PoolEntry, TopicKind},
    rng::SamplerRng,
    sampler::{CandidateSource, Sampler},
    scope::ExamScope,
    types::Juz,
};

pub struct QuotaSampler {
    scope: ExamScope,
    quota: JuzQuota,
}

impl QuotaSampler {
    pub fn new(scope: ExamScope, quota: JuzQuota) -> Self {
        Self { scope, quota }
    }
}

impl Sampler for QuotaSampler {
    fn name(&self) -> &'static str {
        "quota"
    }

    fn select(
        &self,
        source: &dyn CandidateSource,
        _rng: &mut SamplerRng,
    ) -> ExamResult<Vec<PoolEntry>> {
        let mut buckets: BTreeMap<Juz, Vec<PoolEntry>> = BTreeMap::new();
        for entry in source.load(None)? {
            buckets.entry(entry.juz).or_default().push(entry);
        }

        let mut selected = Vec::new();
        for juz in self.scope.juz_range() {
            let Some(bucket) = buckets.get(&juz) else {
                log::debug!("juz {juz} has no candidates, skipping");
                continue;
            };
            let memorization = bucket
                .iter()
                .filter(|e| e.topic_kind == TopicKind::Memorization)
                .take(self.quota.memorization);
            let concepts = bucket
                .iter()
                .filter(|e| e.topic_kind == TopicKind::Concepts)
                .take(self.quota.concepts);

            let before = selected.len();
            selected.extend(memorization.chain(concepts).copied());
            let taken = selected.len() - before;
            if taken < self.quota.memorization + self.quota.concepts {
                log::debug!(
                    "juz {juz} under quota: took {taken} of {}",
                    self.quota.memorization + self.quota.concepts
                );
            }
        }
        Ok(selected)
    }
}
