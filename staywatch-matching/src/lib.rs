pub mod los;
pub mod orchestrator;
pub mod property;
pub mod strategy;

pub use orchestrator::MatchingOrchestrator;
pub use property::PropertyMatchingStrategy;
pub use strategy::MatchingStrategy;
