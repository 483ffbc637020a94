//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Samplers read through a CandidateSource and the engine writes through a
//! UnitOfWork; neither executes SQL directly.

use crate::error::ExamResult;
use rusqlite::Connection;

pub mod exam;
pub mod question;
pub mod unit_of_work;

pub use unit_of_work::{ScopedCandidates, UnitOfWork};

pub struct ExamStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl ExamStore {
    pub fn open(path: &str) -> ExamResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        // Concurrent writers wait for the IMMEDIATE lock instead of failing.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ExamResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Open a second connection to the same database, e.g. one per worker.
    /// For in-memory databases this returns a new, isolated database.
    pub fn reopen(&self) -> ExamResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ExamResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_question_bank.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_generated_exam.sql"))?;
        Ok(())
    }

    /// Start an IMMEDIATE transaction. Dropped without commit, it rolls back.
    pub fn begin(&self) -> ExamResult<UnitOfWork<'_>> {
        UnitOfWork::begin(&self.conn)
    }
}
