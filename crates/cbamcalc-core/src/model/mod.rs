//! Canonical data model.
//!
//! Activity records, emission blocks and products as the calculation core
//! consumes them. Field-name normalization happens once, at deserialization:
//! serde aliases absorb the camelCase spellings older exports used, so the
//! core never branches on spelling. Quantity-like fields are coerced to
//! non-negative finite numbers at the same boundary.

mod activity;
mod gas;
mod period;
mod product;

pub use activity::{
    ActivityData, AnodeEntry, BlockParameter, ElectricityEntry, EmissionBlock, FuelEntry,
    PfcEntry,
};
pub use gas::Gas;
pub use period::Period;
pub use product::{Precursor, PrecursorSource, Product};

use serde::{Deserialize, Deserializer};

/// Coerce a quantity to a usable number: NaN, infinities and negatives all
/// become 0 so aggregation stays well-defined.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// serde hook applying [`non_negative`] during deserialization.
pub(crate) fn de_non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_negative(f64::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::non_negative;

    #[test]
    fn test_non_negative_coercion() {
        assert_eq!(non_negative(3.5), 3.5);
        assert_eq!(non_negative(0.0), 0.0);
        assert_eq!(non_negative(-1.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
    }
}
