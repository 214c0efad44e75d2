//! World-state flag switches.

use std::collections::BTreeMap;

use crate::world::{FlagId, FlagInit};

/// Named boolean switches gating events, exits, and NPC visibility.
///
/// Unset flags read as `false`; writing is the only way a flag comes
/// into existence, so referencing an unknown flag is never an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagSet {
    values: BTreeMap<FlagId, bool>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_inits(inits: &[FlagInit]) -> Self {
        Self {
            values: inits
                .iter()
                .map(|init| (init.flag.clone(), init.value))
                .collect(),
        }
    }

    /// Reads a flag; unset flags are `false`.
    pub fn get(&self, flag: &FlagId) -> bool {
        self.values.get(flag).copied().unwrap_or(false)
    }

    /// Reads a flag without the unset-is-false default.
    pub fn raw(&self, flag: &FlagId) -> Option<bool> {
        self.values.get(flag).copied()
    }

    pub fn set(&mut self, flag: FlagId, value: bool) {
        self.values.insert(flag, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_reads_false() {
        let flags = FlagSet::new();
        assert!(!flags.get(&FlagId::new("missing")));
        assert_eq!(flags.raw(&FlagId::new("missing")), None);
    }

    #[test]
    fn set_then_get() {
        let mut flags = FlagSet::new();
        flags.set(FlagId::new("met_king"), true);
        assert!(flags.get(&FlagId::new("met_king")));
        flags.set(FlagId::new("met_king"), false);
        assert!(!flags.get(&FlagId::new("met_king")));
        assert_eq!(flags.raw(&FlagId::new("met_king")), Some(false));
    }
}
