pub mod schema;

pub use schema::{BuildFacts, StepOutputs};
