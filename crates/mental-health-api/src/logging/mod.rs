//! Run tracing to an external sink with async queue mechanism

mod logger;
pub mod types;

pub use logger::RunTracer;
pub use types::{RunRecord, RunRecordBuilder, RunType};
