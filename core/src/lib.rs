//! Exam composition engine: turns grade presets or custom constraints into
//! ordered, persisted exams drawn from a question bank.

pub mod config;
pub mod engine;
pub mod error;
pub mod exam;
pub mod filter;
pub mod percentage_sampler;
pub mod question;
pub mod quota_sampler;
pub mod request;
pub mod rng;
pub mod sampler;
pub mod scope;
pub mod store;
pub mod types;
pub mod validator;
