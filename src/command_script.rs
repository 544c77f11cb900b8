use anyhow::Result;
use serde::Deserialize;
use slotforge_container::{ClickButton, ClickMode};
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct CommandScriptFile {
    steps: Vec<ScriptStep>,
}

/// One operation against the open container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Quick transfer out of a slot.
    Transfer { slot: usize },
    /// Direct click through the cursor handler.
    Click {
        slot: usize,
        #[serde(default = "default_button")]
        button: ClickButton,
        #[serde(default = "default_mode")]
        mode: ClickMode,
    },
    /// Ask the crafter to refresh craft-result slots.
    RefreshCraft,
}

fn default_button() -> ClickButton {
    ClickButton::Left
}

fn default_mode() -> ClickMode {
    ClickMode::Pickup
}

impl ScriptStep {
    pub fn label(&self) -> &'static str {
        match self {
            ScriptStep::Transfer { .. } => "transfer",
            ScriptStep::Click { .. } => "click",
            ScriptStep::RefreshCraft => "refresh_craft",
        }
    }

    pub fn slot(&self) -> Option<usize> {
        match self {
            ScriptStep::Transfer { slot } | ScriptStep::Click { slot, .. } => Some(*slot),
            ScriptStep::RefreshCraft => None,
        }
    }
}

/// Ordered list of steps loaded from JSON.
///
/// Scripts look like `{"steps": [{"op": "transfer", "slot": 36}]}`.
#[derive(Debug)]
pub struct CommandScript {
    steps: Vec<ScriptStep>,
}

impl CommandScript {
    /// Load a command script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Load a command script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: CommandScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }
        Ok(Self { steps: file.steps })
    }

    /// Reject steps that target slots the container does not have.
    pub fn validate(&self, slot_count: usize) -> Result<()> {
        for (position, step) in self.steps.iter().enumerate() {
            if let Some(slot) = step.slot() {
                if slot >= slot_count {
                    anyhow::bail!(
                        "step {position} ({}) targets slot {slot} but the container has {slot_count} slots",
                        step.label()
                    );
                }
            }
        }
        Ok(())
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }
}
