/// Tunable combat and progression parameters.
///
/// All ratios are expressed in per-mille so the whole rules layer stays
/// in integer arithmetic. `attack_power_permille = 1000` means a plain
/// attack carries the attacker's full effective attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Power multiplier of a plain attack.
    pub attack_power_permille: u32,
    /// Fraction of the defender's defense a plain attack subtracts.
    pub attack_defense_factor_permille: u32,
    /// Power multiplier of an enemy power attack.
    pub power_attack_power_permille: u32,
    /// Defense fraction applied to an enemy power attack.
    pub power_attack_defense_factor_permille: u32,
    /// Lower bound of the damage variance roll, inclusive.
    pub variance_min_permille: u32,
    /// Upper bound of the damage variance roll, inclusive.
    pub variance_max_permille: u32,
    /// Experience needed to leave level `n` is `n * level_exp_step`.
    pub level_exp_step: u32,
    /// Levels are capped here; surplus experience accumulates unused.
    pub max_level: u32,
    /// Upper bound on consecutive auto-event activations per check,
    /// guarding against self-retriggering event loops in content.
    pub auto_chain_limit: u32,
}

impl GameConfig {
    pub const DEFAULT_ATTACK_POWER_PERMILLE: u32 = 1000;
    pub const DEFAULT_ATTACK_DEFENSE_FACTOR_PERMILLE: u32 = 500;
    pub const DEFAULT_POWER_ATTACK_POWER_PERMILLE: u32 = 1500;
    pub const DEFAULT_POWER_ATTACK_DEFENSE_FACTOR_PERMILLE: u32 = 300;
    pub const DEFAULT_VARIANCE_MIN_PERMILLE: u32 = 900;
    pub const DEFAULT_VARIANCE_MAX_PERMILLE: u32 = 1100;
    pub const DEFAULT_LEVEL_EXP_STEP: u32 = 20;
    pub const DEFAULT_MAX_LEVEL: u32 = 99;
    pub const DEFAULT_AUTO_CHAIN_LIMIT: u32 = 8;

    pub fn new() -> Self {
        Self {
            attack_power_permille: Self::DEFAULT_ATTACK_POWER_PERMILLE,
            attack_defense_factor_permille: Self::DEFAULT_ATTACK_DEFENSE_FACTOR_PERMILLE,
            power_attack_power_permille: Self::DEFAULT_POWER_ATTACK_POWER_PERMILLE,
            power_attack_defense_factor_permille:
                Self::DEFAULT_POWER_ATTACK_DEFENSE_FACTOR_PERMILLE,
            variance_min_permille: Self::DEFAULT_VARIANCE_MIN_PERMILLE,
            variance_max_permille: Self::DEFAULT_VARIANCE_MAX_PERMILLE,
            level_exp_step: Self::DEFAULT_LEVEL_EXP_STEP,
            max_level: Self::DEFAULT_MAX_LEVEL,
            auto_chain_limit: Self::DEFAULT_AUTO_CHAIN_LIMIT,
        }
    }

    /// Experience required to advance from `level` to `level + 1`.
    pub fn exp_to_next(&self, level: u32) -> u32 {
        level.saturating_mul(self.level_exp_step)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
