//! Flag-based trigger conditions.

use crate::state::FlagSet;
use crate::world::FlagId;

/// Condition gating an event, exit, or NPC placement.
///
/// Satisfied iff the primary flag matches `equals` and, when a secondary
/// flag is present, it matches `equals2` as well. Unset flags read as
/// `false`: checking `equals: true` against an unset flag fails, while
/// `equals: false` matches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventCondition {
    pub flag: FlagId,
    pub equals: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flag2: Option<FlagId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equals2: Option<bool>,
}

impl EventCondition {
    pub fn expects(flag: FlagId, equals: bool) -> Self {
        Self {
            flag,
            equals,
            flag2: None,
            equals2: None,
        }
    }

    pub fn and(mut self, flag: FlagId, equals: bool) -> Self {
        self.flag2 = Some(flag);
        self.equals2 = Some(equals);
        self
    }

    pub fn is_satisfied(&self, flags: &FlagSet) -> bool {
        if flags.get(&self.flag) != self.equals {
            return false;
        }
        match &self.flag2 {
            Some(flag2) => flags.get(flag2) == self.equals2.unwrap_or(false),
            None => true,
        }
    }
}

/// Absence of a condition always satisfies (unconditional trigger).
pub fn condition_satisfied(condition: Option<&EventCondition>, flags: &FlagSet) -> bool {
    condition.is_none_or(|condition| condition.is_satisfied(flags))
}
