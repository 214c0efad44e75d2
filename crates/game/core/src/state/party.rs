//! Party members and leveling.

use crate::config::GameConfig;
use crate::world::{
    ActorId, ActorTemplate, ContentError, EquipSlot, EquipmentSlots, GrowthTable, SkillId,
    WorldOracle,
};

/// A member gained a level; carried in reports for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub member: String,
    pub level: u32,
}

/// Mutable runtime copy of a recruited actor.
///
/// Created by value-copying the actor template at recruitment; never
/// shares state with the template. Invariants: `hp <= max_hp`,
/// `mp <= max_mp`; `hp == 0` signals defeat-eligibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartyMember {
    pub id: ActorId,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
    pub exp: u32,
    pub skills: Vec<SkillId>,
    pub equipment: EquipmentSlots,
    growth: GrowthTable,
}

impl PartyMember {
    /// Instantiates a member from a template carrying a combat spec.
    pub fn from_template(template: &ActorTemplate) -> Result<Self, ContentError> {
        let combat = template
            .combat
            .as_ref()
            .ok_or_else(|| ContentError::ActorNotPlayable(template.id.clone()))?;
        Ok(Self {
            id: template.id.clone(),
            name: template.name.clone(),
            level: 1,
            hp: combat.stats.max_hp,
            max_hp: combat.stats.max_hp,
            mp: combat.stats.max_mp,
            max_mp: combat.stats.max_mp,
            atk: combat.stats.atk,
            def: combat.stats.def,
            spd: combat.stats.spd,
            exp: 0,
            skills: combat.skills.clone(),
            equipment: combat.equipment.clone(),
            growth: combat.growth,
        })
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Base attack plus additive equipment modifiers, recomputed on
    /// demand so re-equipping is always consistent.
    pub fn effective_atk(&self, world: &dyn WorldOracle) -> u32 {
        self.atk + self.equipment_mod(world, |mods| mods.atk)
    }

    pub fn effective_def(&self, world: &dyn WorldOracle) -> u32 {
        self.def + self.equipment_mod(world, |mods| mods.def)
    }

    pub fn effective_max_mp(&self, world: &dyn WorldOracle) -> u32 {
        self.max_mp + self.equipment_mod(world, |mods| mods.max_mp)
    }

    fn equipment_mod(
        &self,
        world: &dyn WorldOracle,
        pick: impl Fn(&crate::world::StatMods) -> u32,
    ) -> u32 {
        [
            (EquipSlot::Weapon, self.equipment.weapon.as_ref()),
            (EquipSlot::Armor, self.equipment.armor.as_ref()),
        ]
        .into_iter()
        .filter_map(|(slot, id)| {
            let definition = world.equipment(id?)?;
            (definition.slot == slot).then(|| pick(&definition.mods))
        })
        .sum()
    }

    /// Heals hit points, capped at max. Returns the amount restored.
    pub fn heal_hp(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    /// Restores mana, capped at the effective max. Returns the amount
    /// restored.
    pub fn restore_mp(&mut self, amount: u32, world: &dyn WorldOracle) -> u32 {
        let cap = self.effective_max_mp(world);
        let restored = amount.min(cap.saturating_sub(self.mp));
        self.mp += restored;
        restored
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Accumulates experience, applying every level-up threshold crossed.
    ///
    /// Loops rather than branching once so a single large reward can
    /// grant several levels; each level applies the actor's growth
    /// deltas and fully restores hp/mp to the new maximums.
    pub fn grant_exp(&mut self, amount: u32, config: &GameConfig) -> Vec<LevelUp> {
        let mut gained = Vec::new();
        self.exp = self.exp.saturating_add(amount);
        while self.level < config.max_level {
            let needed = config.exp_to_next(self.level);
            if self.exp < needed {
                break;
            }
            self.exp -= needed;
            self.level += 1;
            self.max_hp += self.growth.max_hp;
            self.max_mp += self.growth.max_mp;
            self.atk += self.growth.atk;
            self.def += self.growth.def;
            self.spd += self.growth.spd;
            self.hp = self.max_hp;
            self.mp = self.max_mp;
            gained.push(LevelUp {
                member: self.name.clone(),
                level: self.level,
            });
        }
        gained
    }
}

/// The recruited party. Append-only: members never leave once joined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Party {
    members: Vec<PartyMember>,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, actor: &ActorId) -> bool {
        self.members.iter().any(|member| member.id == *actor)
    }

    /// Recruits from a template. Idempotent: returns false when the
    /// actor is already a member.
    pub fn recruit(&mut self, template: &ActorTemplate) -> Result<bool, ContentError> {
        if self.contains(&template.id) {
            return Ok(false);
        }
        self.members.push(PartyMember::from_template(template)?);
        Ok(true)
    }

    /// The lead member, who fronts battles.
    pub fn hero(&self) -> Option<&PartyMember> {
        self.members.first()
    }

    pub fn hero_mut(&mut self) -> Option<&mut PartyMember> {
        self.members.first_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartyMember> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PartyMember> {
        self.members.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::test_support::TestWorld;

    fn hero() -> PartyMember {
        let world = TestWorld::rescue_campaign();
        let template = world.require_actor(&ActorId::new("hero")).unwrap();
        PartyMember::from_template(template).unwrap()
    }

    #[test]
    fn level_never_decreases_and_restores_fully() {
        let config = GameConfig::default();
        let mut member = hero();
        member.hp = 1;
        member.mp = 0;
        let before = member.level;
        let ups = member.grant_exp(config.exp_to_next(member.level), &config);
        assert_eq!(ups.len(), 1);
        assert!(member.level > before);
        assert_eq!(member.hp, member.max_hp);
        assert_eq!(member.mp, member.max_mp);
    }

    #[test]
    fn one_large_grant_crosses_multiple_thresholds() {
        let config = GameConfig::default();
        let mut member = hero();
        // Enough for levels 1->2 and 2->3 in a single grant.
        let amount = config.exp_to_next(1) + config.exp_to_next(2);
        let ups = member.grant_exp(amount, &config);
        assert_eq!(ups.len(), 2);
        assert_eq!(member.level, 3);
        assert_eq!(member.exp, 0);
    }

    #[test]
    fn small_grant_does_not_level() {
        let config = GameConfig::default();
        let mut member = hero();
        let ups = member.grant_exp(1, &config);
        assert!(ups.is_empty());
        assert_eq!(member.level, 1);
        assert_eq!(member.exp, 1);
    }

    #[test]
    fn equipment_mods_are_additive_and_recomputed() {
        let world = TestWorld::rescue_campaign();
        let mut member = hero();
        let base_atk = member.atk;
        // wood_sword grants +2 atk in the campaign fixture.
        assert_eq!(member.effective_atk(&world), base_atk + 2);
        member.equipment.weapon = None;
        assert_eq!(member.effective_atk(&world), base_atk);
    }

    #[test]
    fn recruit_is_idempotent() {
        let world = TestWorld::rescue_campaign();
        let template = world.require_actor(&ActorId::new("hero")).unwrap();
        let mut party = Party::new();
        assert!(party.recruit(template).unwrap());
        assert!(!party.recruit(template).unwrap());
        assert_eq!(party.len(), 1);
    }

    #[test]
    fn non_playable_actor_is_refused() {
        let world = TestWorld::rescue_campaign();
        let template = world.require_actor(&ActorId::new("king")).unwrap();
        let mut party = Party::new();
        assert_eq!(
            party.recruit(template),
            Err(ContentError::ActorNotPlayable(ActorId::new("king")))
        );
    }

    #[test]
    fn heal_is_capped_at_max() {
        let mut member = hero();
        member.hp = member.max_hp - 5;
        assert_eq!(member.heal_hp(20), 5);
        assert_eq!(member.hp, member.max_hp);
    }
}
