//! Session inventory.

use crate::world::ItemId;

/// One stack of a single item kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub item: ItemId,
    pub qty: u32,
}

/// Ordered list of item stacks.
///
/// Invariant: every stack has `qty > 0`. Removal prunes a stack the
/// moment its quantity reaches zero, so a zeroed entry is never
/// observable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.stacks.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn quantity(&self, item: &ItemId) -> u32 {
        self.stacks
            .iter()
            .find(|stack| stack.item == *item)
            .map_or(0, |stack| stack.qty)
    }

    /// Merges `qty` into an existing stack or appends a new one.
    /// Giving zero is a no-op.
    pub fn give(&mut self, item: ItemId, qty: u32) {
        if qty == 0 {
            return;
        }
        match self.stacks.iter_mut().find(|stack| stack.item == item) {
            Some(stack) => stack.qty = stack.qty.saturating_add(qty),
            None => self.stacks.push(ItemStack { item, qty }),
        }
    }

    /// Removes up to `qty`, pruning the stack when it hits zero.
    /// Returns the quantity actually removed.
    pub fn remove(&mut self, item: &ItemId, qty: u32) -> u32 {
        let Some(index) = self.stacks.iter().position(|stack| stack.item == *item) else {
            return 0;
        };
        let stack = &mut self.stacks[index];
        let removed = stack.qty.min(qty);
        stack.qty -= removed;
        if stack.qty == 0 {
            self.stacks.remove(index);
        }
        removed
    }

    /// Removes exactly one, or returns false if none is carried.
    pub fn consume_one(&mut self, item: &ItemId) -> bool {
        self.remove(item, 1) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion() -> ItemId {
        ItemId::new("potion")
    }

    #[test]
    fn give_merges_existing_stack() {
        let mut inventory = Inventory::new();
        inventory.give(potion(), 2);
        inventory.give(potion(), 3);
        assert_eq!(inventory.quantity(&potion()), 5);
        assert_eq!(inventory.iter().count(), 1);
    }

    #[test]
    fn zeroed_stack_is_pruned_immediately() {
        let mut inventory = Inventory::new();
        inventory.give(potion(), 2);
        assert_eq!(inventory.remove(&potion(), 2), 2);
        assert!(inventory.is_empty());
        assert_eq!(inventory.quantity(&potion()), 0);
    }

    #[test]
    fn remove_never_goes_negative() {
        let mut inventory = Inventory::new();
        inventory.give(potion(), 1);
        assert_eq!(inventory.remove(&potion(), 5), 1);
        assert!(inventory.is_empty());
        assert_eq!(inventory.remove(&potion(), 1), 0);
    }

    #[test]
    fn give_zero_leaves_no_stack() {
        let mut inventory = Inventory::new();
        inventory.give(potion(), 0);
        assert!(inventory.is_empty());
    }

    #[test]
    fn interleaved_sequence_upholds_invariant() {
        let mut inventory = Inventory::new();
        let ops: [(bool, u32); 8] = [
            (true, 3),
            (false, 1),
            (false, 1),
            (true, 2),
            (false, 4),
            (false, 1),
            (true, 1),
            (false, 1),
        ];
        for (is_give, qty) in ops {
            if is_give {
                inventory.give(potion(), qty);
            } else {
                inventory.remove(&potion(), qty);
            }
            for stack in inventory.iter() {
                assert!(stack.qty > 0);
            }
        }
        assert!(inventory.is_empty());
    }
}
