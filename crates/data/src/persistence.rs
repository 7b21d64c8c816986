use crate::schema::SaveSlot;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SAVE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRun {
    pub version: u32,
    pub seed: u64,
    pub slot: SaveSlot,
}

pub fn default_save_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("PEGDECK_SAVE") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".pegdeck_save.json"))
}

pub fn save_slot_file(slot: &SaveSlot, seed: u64, path: &Path) -> anyhow::Result<()> {
    let payload = SavedRun {
        version: SAVE_SCHEMA_VERSION,
        seed,
        slot: slot.clone(),
    };
    let body = serde_json::to_string_pretty(&payload).context("serialize save")?;
    // Readers never see a partially written file.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body).with_context(|| format!("write {}", tmp.display()))?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("replace {}", path.display()));
    }
    Ok(())
}

pub fn load_slot_file(path: &Path) -> anyhow::Result<SavedRun> {
    let body = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let payload: SavedRun =
        serde_json::from_str(&body).with_context(|| format!("parse {}", path.display()))?;
    if payload.version != SAVE_SCHEMA_VERSION {
        bail!(
            "unsupported save version {} (expected {})",
            payload.version,
            SAVE_SCHEMA_VERSION
        );
    }
    Ok(payload)
}
