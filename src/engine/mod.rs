pub mod hints;
pub mod matcher;
pub mod progress;
pub mod queue;

pub use progress::ProgressTally;
pub use queue::{RestoreError, ReviewQueue};
