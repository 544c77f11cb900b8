//! Flattened slot index ranges grouped by slot definition.
//!
//! Built once when a layout is finished and never modified afterwards.

use slotforge_core::{SlotDefinition, SlotType};
use std::collections::HashMap;
use std::ops::Range;

use crate::layout::SlotPlacement;

/// Sorted, disjoint half-open intervals of flattened slot indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRanges {
    ranges: Vec<Range<usize>>,
}

impl SlotRanges {
    /// Append an index. Indices arrive in ascending order, so a contiguous
    /// index extends the last interval.
    fn push(&mut self, index: usize) {
        match self.ranges.last_mut() {
            Some(last) if last.end == index => last.end += 1,
            _ => self.ranges.push(index..index + 1),
        }
    }

    /// Intervals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.ranges.iter().cloned()
    }

    /// Intervals as a slice.
    pub fn as_slice(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Whether the index falls inside any interval.
    pub fn contains(&self, index: usize) -> bool {
        self.ranges.iter().any(|range| range.contains(&index))
    }

    /// Total number of slots covered.
    pub fn slot_count(&self) -> usize {
        self.ranges.iter().map(|range| range.len()).sum()
    }

    /// True when no slot is covered.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Lookup from slot definitions and slot types to their index ranges.
#[derive(Debug, Clone, Default)]
pub struct SlotRangeTable {
    by_definition: HashMap<SlotDefinition, SlotRanges>,
    by_type: HashMap<SlotType, SlotRanges>,
    /// Definitions in the order their first slot was declared.
    order: Vec<SlotDefinition>,
    types: Vec<SlotType>,
}

impl SlotRangeTable {
    /// Group placements by category definition.
    pub fn from_placements(placements: &[SlotPlacement]) -> Self {
        let mut table = Self::default();
        for (index, placement) in placements.iter().enumerate() {
            let definition =
                SlotDefinition::category(placement.slot_type, placement.filter.as_ref());
            if !table.by_definition.contains_key(&definition) {
                table.order.push(definition.clone());
            }
            table.by_definition.entry(definition).or_default().push(index);
            table.by_type.entry(placement.slot_type).or_default().push(index);
            table.types.push(placement.slot_type);
        }
        table
    }

    /// Ranges for one exact definition.
    pub fn ranges_for(&self, definition: &SlotDefinition) -> Option<&SlotRanges> {
        self.by_definition.get(definition)
    }

    /// Ranges for every slot of a type; for specific-item slots this is the
    /// union over all filters.
    pub fn ranges_for_type(&self, slot_type: SlotType) -> Option<&SlotRanges> {
        self.by_type.get(&slot_type)
    }

    /// Definitions of one type with their ranges, in declaration order.
    pub fn definitions_of(
        &self,
        slot_type: SlotType,
    ) -> impl Iterator<Item = (&SlotDefinition, &SlotRanges)> + '_ {
        self.order
            .iter()
            .filter(move |definition| definition.slot_type == slot_type)
            .filter_map(move |definition| {
                self.by_definition
                    .get(definition)
                    .map(|ranges| (definition, ranges))
            })
    }

    /// Type of the slot at a flattened index.
    pub fn slot_type(&self, index: usize) -> Option<SlotType> {
        self.types.get(index).copied()
    }

    /// Whether the slot at `index` has the given type.
    pub fn is_type(&self, index: usize, slot_type: SlotType) -> bool {
        self.slot_type(index) == Some(slot_type)
    }

    /// Number of slots the table was built from.
    pub fn slot_count(&self) -> usize {
        self.types.len()
    }
}
