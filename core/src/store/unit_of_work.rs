//! Explicit transaction boundary for one composition request.
//!
//! begin → count → validate → select → insert → commit, all on one
//! IMMEDIATE transaction: no other writer can deactivate candidates
//! between the count and the load. Dropping the unit of work without
//! committing rolls everything back.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    error::{ExamError, ExamResult},
    exam::GeneratedExam,
    filter::QueryPredicate,
    question::{PoolEntry, TopicKind},
    sampler::CandidateSource,
};

use super::{exam::insert_exam, question};

pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> UnitOfWork<'conn> {
    pub(super) fn begin(conn: &'conn Connection) -> ExamResult<Self> {
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        Ok(Self { tx })
    }

    /// The pool matching `predicate`, read inside this transaction.
    pub fn candidates<'a>(&'a self, predicate: &'a QueryPredicate) -> ScopedCandidates<'a> {
        ScopedCandidates {
            conn: &self.tx,
            predicate,
        }
    }

    pub fn insert_exam(&self, exam: &GeneratedExam) -> ExamResult<()> {
        insert_exam(&self.tx, exam).map_err(ExamError::Assembly)
    }

    pub fn commit(self) -> ExamResult<()> {
        self.tx.commit().map_err(ExamError::Assembly)
    }
}

/// CandidateSource over the live store, bound to one predicate.
pub struct ScopedCandidates<'a> {
    conn:      &'a Connection,
    predicate: &'a QueryPredicate,
}

impl CandidateSource for ScopedCandidates<'_> {
    fn count(&self, kind: Option<TopicKind>) -> ExamResult<usize> {
        Ok(question::count_candidates(self.conn, self.predicate, kind)?)
    }

    fn load(&self, kind: Option<TopicKind>) -> ExamResult<Vec<PoolEntry>> {
        Ok(question::load_candidates(self.conn, self.predicate, kind)?)
    }
}
