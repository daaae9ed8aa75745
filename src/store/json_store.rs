use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::store::SnapshotStore;
use crate::store::schema::SessionSnapshot;

const SNAPSHOT_FILE: &str = "session.json";

/// File-backed snapshot storage under the platform data directory.
/// Writes go through a temp file and rename so a crash mid-save leaves
/// either the old snapshot or the new one, never a torn file.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kelime");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn snapshot_path(&self) -> PathBuf {
        self.base_dir.join(SNAPSHOT_FILE)
    }
}

impl SnapshotStore for JsonStore {
    /// Returns None if no snapshot exists yet, or if the file exists but
    /// cannot be parsed (schema mismatch / corruption).
    fn load(&self) -> Option<SessionSnapshot> {
        let path = self.snapshot_path();
        if !path.exists() {
            return None;
        }
        let content = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.snapshot_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(snapshot)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.snapshot_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
