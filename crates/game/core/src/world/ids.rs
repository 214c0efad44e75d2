//! String-keyed identifiers for world-data lookups.
//!
//! World data is authored as a keyed content database; every cross
//! reference between records goes through one of these newtypes so a
//! dangling key surfaces as a typed [`ContentError`](super::ContentError)
//! instead of a silent miss.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

define_id! {
    /// Key of an actor template (hero, NPC, recruitable party member).
    ActorId
}

define_id! {
    /// Key of an item definition.
    ItemId
}

define_id! {
    /// Key of an equipment definition (weapon or armor).
    EquipmentId
}

define_id! {
    /// Key of a skill definition.
    SkillId
}

define_id! {
    /// Key of an enemy template.
    EnemyId
}

define_id! {
    /// Key of a map definition.
    MapId
}

define_id! {
    /// Key of a scripted battle definition.
    BattleId
}

define_id! {
    /// Key of a quest definition.
    QuestId
}

define_id! {
    /// Key of an ending definition.
    EndingId
}

define_id! {
    /// Name of a world-state flag.
    FlagId
}

define_id! {
    /// Key of a map-scripted event.
    EventId
}
