pub mod orchestrator;

pub use orchestrator::{detect_concurrently, PrepOrchestrator, PrepReport};
