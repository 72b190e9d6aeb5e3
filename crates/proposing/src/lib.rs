//! Block-intake transition logic: proposal validation, the proposing engine
//! orchestration, and the trait seams to the engine's collaborators.

pub mod context;
pub mod errors;
pub mod events;
pub mod propose;
pub mod validation;
