//! Player domain: the three-slot power-up inventory.

use serde::{Deserialize, Serialize};

use crate::content::PowerupKind;

pub const INVENTORY_SLOTS: usize = 3;

/// Ordered slots; an empty slot is `None` and keeps its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: [Option<PowerupKind>; INVENTORY_SLOTS],
}

impl Inventory {
    /// Places `kind` in the first empty slot. Returns false when every slot is taken.
    pub fn insert(&mut self, kind: PowerupKind) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(kind);
                true
            }
            None => false,
        }
    }

    /// Empties `slot` and returns what it held. Out-of-range slots are a no-op.
    pub fn take(&mut self, slot: usize) -> Option<PowerupKind> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn slots(&self) -> [Option<PowerupKind>; INVENTORY_SLOTS] {
        self.slots
    }
}
