//! Inventory manager: slot/stack allocation.
//!
//! A stack never exceeds `MAX_STACK_SIZE`, never holds zero, and an item only
//! spills into a second slot once every earlier stack of it is full. Adds are
//! all-or-nothing: if the whole quantity does not fit, nothing changes.

pub mod trade;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySlot {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// 0-11 = hotbar, 12-35 = backpack
    pub slots: Vec<Option<InventorySlot>>,
    pub selected_slot: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(MAX_INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            slots: vec![None; slots],
            selected_slot: 0,
        }
    }

    /// Units of `item_id` that could still be added.
    pub fn space_for(&self, item_id: &str) -> u64 {
        self.slots
            .iter()
            .map(|slot| match slot {
                Some(s) if s.item_id == item_id => u64::from(MAX_STACK_SIZE - s.quantity.min(MAX_STACK_SIZE)),
                Some(_) => 0,
                None => u64::from(MAX_STACK_SIZE),
            })
            .sum()
    }

    /// Add `quantity` units. Returns false and leaves the inventory untouched
    /// when they don't all fit.
    pub fn add(&mut self, item_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return true;
        }
        if self.space_for(item_id) < u64::from(quantity) {
            return false;
        }

        let mut remaining = quantity;

        // Top up existing stacks first, in slot order.
        for s in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if s.item_id == item_id && s.quantity < MAX_STACK_SIZE {
                let add = remaining.min(MAX_STACK_SIZE - s.quantity);
                s.quantity += add;
                remaining -= add;
            }
        }

        // Then open new stacks in empty slots.
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let add = remaining.min(MAX_STACK_SIZE);
                *slot = Some(InventorySlot {
                    item_id: item_id.to_string(),
                    quantity: add,
                });
                remaining -= add;
            }
        }

        self.check_invariants();
        true
    }

    /// Remove `quantity` units, taking from the last stacks first so partial
    /// stacks stay at the end. Returns false and changes nothing when fewer
    /// than `quantity` are held.
    pub fn remove(&mut self, item_id: &str, quantity: u32) -> bool {
        if self.count(item_id) < quantity {
            return false;
        }
        let mut remaining = quantity;
        for slot in self.slots.iter_mut().rev() {
            if remaining == 0 {
                break;
            }
            if let Some(s) = slot {
                if s.item_id == item_id {
                    let take = remaining.min(s.quantity);
                    s.quantity -= take;
                    remaining -= take;
                    if s.quantity == 0 {
                        *slot = None;
                    }
                }
            }
        }
        self.check_invariants();
        true
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn has(&self, item_id: &str, quantity: u32) -> bool {
        self.count(item_id) >= quantity
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn selected_item(&self) -> Option<&InventorySlot> {
        self.slots.get(self.selected_slot).and_then(|s| s.as_ref())
    }

    pub fn select(&mut self, slot: usize) -> ActionResult {
        if slot >= self.slots.len() {
            return Err(ActionError::OutOfRange);
        }
        self.selected_slot = slot;
        Ok(())
    }

    /// First missing requirement, for error reporting.
    pub fn first_missing(&self, items: &[(ItemId, u32)]) -> Option<ActionError> {
        items.iter().find(|(id, qty)| !self.has(id, *qty)).map(|(id, qty)| {
            ActionError::InsufficientItems {
                item: id.clone(),
                needed: *qty,
                have: self.count(id),
            }
        })
    }

    fn check_invariants(&self) {
        let mut seen_partial: Vec<&str> = Vec::new();
        for s in self.slots.iter().flatten() {
            let ok = s.quantity >= 1 && s.quantity <= MAX_STACK_SIZE;
            debug_assert!(ok, "stack of {} has quantity {}", s.item_id, s.quantity);
            if !ok {
                error!("[Inventory] Stack of {} has invalid quantity {}", s.item_id, s.quantity);
            }
            if s.quantity < MAX_STACK_SIZE {
                if seen_partial.contains(&s.item_id.as_str()) {
                    error!("[Inventory] {} has more than one partial stack", s.item_id);
                }
                seen_partial.push(&s.item_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tops_up_before_new_slot() {
        let mut inv = Inventory::default();
        assert!(inv.add("wood", 990));
        assert!(inv.add("wood", 20));
        assert_eq!(inv.slots[0].as_ref().unwrap().quantity, MAX_STACK_SIZE);
        assert_eq!(inv.slots[1].as_ref().unwrap().quantity, 11);
        assert_eq!(inv.count("wood"), 1010);
    }

    #[test]
    fn test_no_stack_exceeds_max() {
        let mut inv = Inventory::default();
        inv.add("stone", 500);
        inv.add("coal", 3);
        inv.add("stone", 2500);
        for s in inv.slots.iter().flatten() {
            assert!(s.quantity <= MAX_STACK_SIZE);
            assert!(s.quantity >= 1);
        }
        assert_eq!(inv.count("stone"), 3000);
    }

    #[test]
    fn test_full_inventory_rejects_and_is_unchanged() {
        let mut inv = Inventory::default();
        for i in 0..MAX_INVENTORY_SLOTS {
            assert!(inv.add(&format!("item_{i}"), 5));
        }
        let before = inv.clone();
        assert!(!inv.add("parsnip", 1));
        assert_eq!(inv, before);
        assert_eq!(inv.len(), MAX_INVENTORY_SLOTS);
    }

    #[test]
    fn test_add_that_partially_fits_is_rejected_whole() {
        let mut inv = Inventory::with_capacity(2);
        inv.add("wood", MAX_STACK_SIZE);
        inv.add("stone", 10);
        assert!(!inv.add("stone", MAX_STACK_SIZE));
        assert_eq!(inv.count("stone"), 10);
        assert!(inv.add("stone", MAX_STACK_SIZE - 10));
    }

    #[test]
    fn test_remove_is_all_or_nothing() {
        let mut inv = Inventory::default();
        inv.add("coal", 3);
        assert!(!inv.remove("coal", 4));
        assert_eq!(inv.count("coal"), 3);
        assert!(inv.remove("coal", 3));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_remove_keeps_single_partial_stack() {
        let mut inv = Inventory::default();
        inv.add("wood", MAX_STACK_SIZE + 100);
        assert!(inv.remove("wood", 50));
        assert_eq!(inv.slots[0].as_ref().unwrap().quantity, MAX_STACK_SIZE);
        assert_eq!(inv.slots[1].as_ref().unwrap().quantity, 50);
    }

    #[test]
    fn test_first_missing_reports_shortfall() {
        let mut inv = Inventory::default();
        inv.add("copper_ore", 3);
        let need = vec![("copper_ore".to_string(), 5), ("coal".to_string(), 1)];
        assert_eq!(
            inv.first_missing(&need),
            Some(ActionError::InsufficientItems { item: "copper_ore".into(), needed: 5, have: 3 })
        );
    }
}
