//! Container snapshots and golden-file helpers.
//!
//! Snapshots are serialized as canonical pretty JSON with object keys sorted.
//! Golden files are compared on disk; rerun with
//! `SLOTFORGE_UPDATE_SNAPSHOTS=1` to rewrite them.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use slotforge_container::Container;
use slotforge_core::{ItemId, SlotType};
use std::fs;
use std::path::Path;
use tracing::info;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "SLOTFORGE_UPDATE_SNAPSHOTS";

/// Contents of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSnapshot {
    /// Flattened slot index.
    pub index: usize,
    /// Slot category.
    pub slot_type: SlotType,
    /// Backing inventory name.
    pub inventory: String,
    /// Cell within the backing inventory.
    pub inner_index: usize,
    /// Item held, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemId>,
    /// Count held (0 when empty).
    pub count: u32,
}

/// Contents of every slot of a container, in flattened order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSnapshot {
    /// Per-slot contents.
    pub slots: Vec<SlotSnapshot>,
}

impl ContainerSnapshot {
    /// Capture the current contents of `container`.
    pub fn capture(container: &Container) -> Self {
        let slots = container
            .slots()
            .iter()
            .map(|slot| {
                let stack = container.stack(slot.index);
                SlotSnapshot {
                    index: slot.index,
                    slot_type: slot.slot_type,
                    inventory: slot.inventory.clone(),
                    inner_index: slot.inner_index,
                    item: stack.map(|stack| stack.item_id()),
                    count: stack.map_or(0, |stack| stack.count),
                }
            })
            .collect();
        Self { slots }
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.slots.iter().map(|slot| u64::from(slot.count)).sum()
    }

    /// Only the occupied slots.
    pub fn occupied(&self) -> impl Iterator<Item = &SlotSnapshot> {
        self.slots.iter().filter(|slot| slot.count > 0)
    }
}

/// Assert that `value` matches the JSON snapshot stored at `path`.
///
/// If `SLOTFORGE_UPDATE_SNAPSHOTS=1` is set, the snapshot file is
/// written/overwritten with the current value instead.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    compare_or_update(path.as_ref(), value, should_update_snapshots())
}

fn compare_or_update<T: Serialize>(path: &Path, value: &T, update: bool) -> Result<()> {
    let actual = canonical_json(value)?;

    if update {
        write_snapshot(path, &actual)?;
        info!(path = %path.display(), "updated snapshot");
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create/update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    if expected != actual {
        anyhow::bail!(
            "Snapshot mismatch at {} (run with {}=1 to update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        );
    }

    Ok(())
}

fn should_update_snapshots() -> bool {
    matches!(
        std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES")
    )
}

fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}

/// Serialize to pretty JSON with object keys sorted and a trailing newline.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let value = canonicalize_value(value);
    let mut s = serde_json::to_string_pretty(&value).context("Failed to format snapshot JSON")?;
    s.push('\n');
    Ok(s)
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut out = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                out.insert(k, canonicalize_value(v));
            }
            Value::Object(out)
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}
