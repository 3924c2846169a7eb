/// Thread domain model and operations
///
/// Wire types (triggers, serializable instructions, settings patches), the
/// typed account views, and the operation builders.
pub mod builders;
pub mod instruction;
pub mod settings;
pub mod state;
pub mod trigger;

pub use builders::*;
pub use instruction::*;
pub use settings::*;
pub use state::*;
pub use trigger::*;
