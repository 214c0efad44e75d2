use super::ids::{
    ActorId, BattleId, EndingId, EnemyId, EquipmentId, ItemId, MapId, QuestId, SkillId,
};

/// Errors raised when world data references a key that does not exist.
///
/// These indicate content authoring bugs, not runtime conditions: the
/// offending operation is aborted loudly rather than degraded into a
/// silent no-op. Mutations committed by earlier steps of the same
/// sequence stay committed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("unknown actor id `{0}`")]
    UnknownActor(ActorId),

    #[error("unknown item id `{0}`")]
    UnknownItem(ItemId),

    #[error("unknown equipment id `{0}`")]
    UnknownEquipment(EquipmentId),

    #[error("unknown skill id `{0}`")]
    UnknownSkill(SkillId),

    #[error("unknown enemy id `{0}`")]
    UnknownEnemy(EnemyId),

    #[error("unknown map id `{0}`")]
    UnknownMap(MapId),

    #[error("unknown battle id `{0}`")]
    UnknownBattle(BattleId),

    #[error("unknown quest id `{0}`")]
    UnknownQuest(QuestId),

    #[error("unknown ending id `{0}`")]
    UnknownEnding(EndingId),

    #[error("actor `{0}` has no combat spec and cannot join the party")]
    ActorNotPlayable(ActorId),

    #[error("battle `{0}` has an empty enemy roster")]
    EmptyBattleRoster(BattleId),
}
