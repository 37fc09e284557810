pub mod display;
pub mod edit;
pub mod engine;
pub mod types;

pub use display::{PointCall, ScoreDisplay};
pub use edit::{EditError, ScoreEdit};
pub use engine::ScoreEngine;
pub use types::*;
