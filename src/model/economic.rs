use super::building::BuildingDamage;

const COLLAPSED_YEN: f64 = 20_000_000.0;
const SEVERE_YEN: f64 = 10_000_000.0;
const MODERATE_YEN: f64 = 2_000_000.0;
/// 1 億円
pub const OKU_YEN: f64 = 100_000_000.0;

/// Direct building loss in units of 100 million yen.
pub fn economic_loss_oku_yen(damage: &BuildingDamage) -> f64 {
    (damage.collapsed as f64 * COLLAPSED_YEN
        + damage.severe as f64 * SEVERE_YEN
        + damage.moderate as f64 * MODERATE_YEN)
        / OKU_YEN
}
