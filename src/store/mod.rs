pub mod json_store;
pub mod schema;

pub use json_store::JsonStore;
pub use schema::SessionSnapshot;

use anyhow::Result;

/// Persistence gateway for session snapshots. The session treats storage
/// as fire-and-forget: load once at startup, save after state changes,
/// clear on progress reset. Implementations decide the physical encoding.
pub trait SnapshotStore {
    /// The last saved snapshot, or `None` when nothing usable is stored.
    /// A present-but-unreadable snapshot also reports `None`; callers
    /// validate the contents themselves before trusting them.
    fn load(&self) -> Option<SessionSnapshot>;

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
