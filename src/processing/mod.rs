//! Run orchestration

pub mod orchestrator;

pub use orchestrator::IngestionOrchestrator;
