//! Value Objects - Immutable, identity-less domain primitives

mod age;
mod gender;
mod media_type;
mod progress_stage;
mod task_kind;

pub use age::{Age, InvalidAge};
pub use gender::Gender;
pub use media_type::MediaType;
pub use progress_stage::ProgressStage;
pub use task_kind::{BackendKind, ResponseLayout, TaskKind};
