pub mod error;
pub mod events;
pub mod ids;
pub mod model;
pub mod queue;
pub mod snapshot;

pub use error::*;
pub use events::*;
pub use ids::*;
pub use model::*;
pub use queue::*;
pub use snapshot::*;
