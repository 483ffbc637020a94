//! The exam composition engine.
//!
//! PIPELINE (fixed):
//!   1. Scope resolver     request → canonical scope, size, duration
//!   2. Pool loader        scope (+ custom filters) → candidate predicate
//!   3. Sampler            quota (simulator) or percentage/uniform (custom)
//!   4. Validator          inside the custom sampler, before any write
//!   5. Assembler          numbered entries, written in one unit of work
//!
//! Simulator mode reads one pool snapshot and tolerates shortfalls.
//! Custom mode counts, validates and loads inside the same IMMEDIATE
//! transaction it later writes the exam in, and fails on any shortfall.

use std::collections::HashSet;

use crate::{
    config::ComposerConfig,
    error::{ExamError, ExamResult},
    exam::{self, ExamHeader, ExamMode, GeneratedExam},
    filter::{self, ColumnFilterBuilder, FilterBuilder},
    percentage_sampler::PercentageSampler,
    quota_sampler::QuotaSampler,
    request::{CustomRequest, SelectionRequest, SimulatorRequest},
    rng::SamplerRng,
    sampler::Sampler,
    scope,
    store::ExamStore,
};

/// Entitlement check consulted before simulator requests.
pub trait AuthorizationGate: Send + Sync {
    fn may_generate_simulator_exam(&self, user_id: &str) -> bool;
}

/// Every user may request simulator exams.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AuthorizationGate for AllowAll {
    fn may_generate_simulator_exam(&self, _user_id: &str) -> bool {
        true
    }
}

/// Only the listed users may request simulator exams.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    users: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
        }
    }
}

impl AuthorizationGate for AllowList {
    fn may_generate_simulator_exam(&self, user_id: &str) -> bool {
        self.users.contains(user_id)
    }
}

pub struct ExamEngine {
    store:   ExamStore,
    config:  ComposerConfig,
    gate:    Box<dyn AuthorizationGate>,
    filters: Box<dyn FilterBuilder>,
}

impl ExamEngine {
    pub fn new(store: ExamStore, config: ComposerConfig) -> Self {
        Self {
            store,
            config,
            gate:    Box::new(AllowAll),
            filters: Box::new(ColumnFilterBuilder),
        }
    }

    /// Migrated in-memory store, default config. Used in tests.
    pub fn build_test() -> ExamResult<Self> {
        let store = ExamStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(store, ComposerConfig::default()))
    }

    pub fn with_gate(mut self, gate: Box<dyn AuthorizationGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_filter_builder(mut self, filters: Box<dyn FilterBuilder>) -> Self {
        self.filters = filters;
        self
    }

    pub fn store(&self) -> &ExamStore {
        &self.store
    }

    /// Compose and persist one exam for `user_id`.
    pub fn compose(
        &self,
        user_id: &str,
        request: &SelectionRequest,
        rng: &mut SamplerRng,
    ) -> ExamResult<GeneratedExam> {
        let exam = match request {
            SelectionRequest::Simulator(req) => self.compose_simulator(user_id, req, rng)?,
            SelectionRequest::Custom(req)    => self.compose_custom(user_id, req, rng)?,
        };
        log::info!(
            "Composed {} exam {} for {user_id}: {} questions, juz {}-{}",
            exam.mode.as_str(),
            exam.exam_id,
            exam.total_questions,
            exam.juz_start,
            exam.juz_end,
        );
        Ok(exam)
    }

    fn compose_simulator(
        &self,
        user_id: &str,
        req: &SimulatorRequest,
        rng: &mut SamplerRng,
    ) -> ExamResult<GeneratedExam> {
        if !self.gate.may_generate_simulator_exam(user_id) {
            return Err(ExamError::Unauthorized { user_id: user_id.to_string() });
        }

        let resolved = scope::resolve_simulator(req, &self.config.limits);
        let quota = self.config.quota.quota_for_year(resolved.scope.year);
        log::debug!(
            "simulator grade {} → {:?}, quota {}/{} per juz",
            req.grade,
            resolved,
            quota.memorization,
            quota.concepts
        );

        let pool = self.store.load_pool(&filter::scope_predicate(&resolved.scope))?;
        log::debug!("simulator pool: {} candidates", pool.len());

        let sampler = QuotaSampler::new(resolved.scope, quota);
        let selection = sampler.select(&pool, rng)?;

        let title = req
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| scope::simulator_title(req.grade, resolved.scope.year));

        let exam = exam::assemble(
            ExamHeader {
                owner_id: user_id.to_string(),
                mode: ExamMode::Simulator,
                title,
                scope: resolved.scope,
                duration_minutes: resolved.duration_minutes,
            },
            selection,
        )?;

        let uow = self.store.begin()?;
        uow.insert_exam(&exam)?;
        uow.commit()?;
        Ok(exam)
    }

    fn compose_custom(
        &self,
        user_id: &str,
        req: &CustomRequest,
        rng: &mut SamplerRng,
    ) -> ExamResult<GeneratedExam> {
        let title = req.required_title()?.to_string();
        let resolved = scope::resolve_custom(req, &self.config.limits);
        let predicate =
            filter::scope_predicate(&resolved.scope).merge(self.filters.build(&req.filters));
        let sampler = PercentageSampler::new(resolved.total_questions as usize, req.split());
        log::debug!("custom {} sampler over {:?}", sampler.name(), resolved);

        let uow = self.store.begin()?;
        let selection = sampler.select(&uow.candidates(&predicate), rng)?;

        let exam = exam::assemble(
            ExamHeader {
                owner_id: user_id.to_string(),
                mode: ExamMode::Custom,
                title,
                scope: resolved.scope,
                duration_minutes: resolved.duration_minutes,
            },
            selection,
        )?;

        uow.insert_exam(&exam)?;
        uow.commit()?;
        Ok(exam)
    }
}
