use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slotforge_container::{
    Container, ContainerLayout, Inventory, SimpleInventory, SlotPlacement, PLAYER_INVENTORY,
    PLAYER_INVENTORY_SIZE,
};
use slotforge_core::{ItemKind, ItemStack, DEFAULT_STACK_SIZE};
use std::{fs, path::Path};
use tracing::debug;

/// A container session described in TOML: inventories with their starting
/// contents and the slot layout binding them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Append the standard player inventory grid at this position.
    pub player_inventory: Option<PlayerInventoryConfig>,
    pub inventories: Vec<InventoryConfig>,
    pub slots: Vec<SlotPlacement>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PlayerInventoryConfig {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InventoryConfig {
    pub name: String,
    pub size: usize,
    #[serde(default = "default_stack_limit")]
    pub stack_limit: u32,
    #[serde(default)]
    pub stacks: Vec<StackConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StackConfig {
    pub index: usize,
    pub item: u16,
    pub count: u32,
    #[serde(default = "default_stack_limit")]
    pub max_stack_size: u32,
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub has_subtypes: bool,
}

fn default_stack_limit() -> u32 {
    DEFAULT_STACK_SIZE
}

impl StackConfig {
    fn to_stack(&self) -> ItemStack {
        let mut kind = ItemKind::new(self.item).with_max_stack_size(self.max_stack_size);
        if self.has_subtypes {
            kind = kind.with_subtypes();
        }
        ItemStack::new(kind, self.count).with_damage(self.damage)
    }
}

impl InventoryConfig {
    fn to_inventory(&self) -> SimpleInventory {
        SimpleInventory::new(self.size)
            .with_stack_limit(self.stack_limit)
            .with_stacks(self.stacks.iter().map(|stack| (stack.index, stack.to_stack())))
    }
}

impl SessionConfig {
    /// Load a session from a TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Layout declared by this session, machine slots first.
    pub fn layout(&self) -> ContainerLayout {
        let mut layout = ContainerLayout::new();
        for inventory in &self.inventories {
            layout.declare_inventory(inventory.name.clone(), inventory.size);
        }
        layout.slots.extend(self.slots.iter().cloned());
        if let Some(player) = self.player_inventory {
            layout.add_player_inventory(player.x, player.y);
        }
        layout
    }

    /// Build the container with every inventory filled from the config.
    pub fn build_container(&self) -> Result<Container> {
        let layout = self.layout();
        let mut inventories: Vec<(String, Box<dyn Inventory>)> = self
            .inventories
            .iter()
            .map(|inventory| {
                (
                    inventory.name.clone(),
                    Box::new(inventory.to_inventory()) as Box<dyn Inventory>,
                )
            })
            .collect();
        let has_player = inventories.iter().any(|(name, _)| name == PLAYER_INVENTORY);
        if self.player_inventory.is_some() && !has_player {
            inventories.push((
                PLAYER_INVENTORY.to_string(),
                Box::new(SimpleInventory::new(PLAYER_INVENTORY_SIZE)),
            ));
        }

        let container = Container::build(layout, inventories).context("invalid container layout")?;
        debug!(slots = container.slot_count(), "built container from session config");
        Ok(container)
    }
}
