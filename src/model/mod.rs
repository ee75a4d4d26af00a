//! Empirical damage formulas, applied per region.

mod building;
mod casualty;
mod economic;
mod infrastructure;
mod intensity;
mod tiers;
mod tsunami;

pub use building::{estimate_building_damage, BuildingDamage, DamageRates, DamageTier, DAMAGE_TIERS};
pub use casualty::{estimate_casualties, Casualties};
pub use economic::{economic_loss_oku_yen, OKU_YEN};
pub use infrastructure::{estimate_outage, UtilityOutage, OUTAGE_TIERS};
pub use intensity::{intensity_at, seismic_intensity, MAX_INTENSITY};
pub use tiers::{Bound, ThresholdTable};
pub use tsunami::{estimate_tsunami, tsunami_at, TsunamiImpact, BASE_HEIGHT_M, INUNDATION_FRACTION};
