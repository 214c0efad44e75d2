//! Damage arithmetic.
//!
//! All multipliers are integer per-mille values so the whole pipeline is
//! deterministic: `(atk * power - def * factor) * variance / 10^6`, with
//! a floor of 1 so a landed hit always does something.

/// Computes physical damage.
///
/// `power_permille` scales the attacker's effective attack,
/// `defense_factor_permille` scales the defender's effective defense,
/// and `variance_permille` is the per-hit roll (for example 900..=1100).
/// A defending target takes half, applied before the floor.
pub fn physical_damage(
    atk: u32,
    def: u32,
    power_permille: u32,
    defense_factor_permille: u32,
    variance_permille: u32,
    defending: bool,
) -> u32 {
    let offense = u64::from(atk) * u64::from(power_permille);
    let mitigation = u64::from(def) * u64::from(defense_factor_permille);
    let base = offense.saturating_sub(mitigation);
    let mut damage = base * u64::from(variance_permille) / 1_000_000;
    if defending {
        damage /= 2;
    }
    damage.max(1) as u32
}
