//! # Strain Compatibility
//!
//! Conversions between the three equivalent descriptions of a plane-sections
//! strain state:
//!
//! - `c`: neutral axis depth from the extreme compression fiber, `0..=∞`
//! - `Z`: strain at the extreme tension layer divided by the yield strain
//! - the strain at any layer
//!
//! ```text
//!   ecu
//!   ├────┐            strain(x) = ecu · (c - x) / c
//!   │    │  c
//!   │   ─┼─ NA        Z = strain(d) / ey = (c - d)/c · ecu/ey
//!   │    │
//!   └──┐ │  d         c = d / (1 - Z·ey/ecu)
//!    εt
//! ```
//!
//! c = 0 (pure tension) and c = ∞ (pure compression) are limiting states,
//! handled explicitly so no NaN or infinity leaks into force sums.
//! `f64::INFINITY` is the pure-compression marker throughout the crate.

use crate::materials::{ConcreteMaterial, RebarMaterial};
use crate::section::SectionGeometry;

/// Neutral axis depth for pure compression
pub const C_PURE_COMPRESSION: f64 = f64::INFINITY;

/// Neutral axis depth for pure tension
pub const C_PURE_TENSION: f64 = 0.0;

/// Strain at a layer for neutral axis depth `c` (compression positive).
///
/// Pure tension stretches every layer to `-eu`; pure compression shortens
/// every layer to `ecu`.
pub fn strain_at_layer(layer_distance: f64, c: f64, ecu: f64, eu: f64) -> f64 {
    if c <= 0.0 {
        -eu
    } else if c.is_infinite() {
        ecu
    } else {
        (c - layer_distance) * ecu / c
    }
}

/// Z at pure compression (c = ∞)
pub fn z_max(ecu: f64, ey: f64) -> f64 {
    ecu / ey
}

/// Z at pure tension (c = 0)
pub fn z_min(eu: f64, ey: f64) -> f64 {
    -eu / ey
}

/// Neutral axis depth for a strain ratio Z at depth `d`.
///
/// Returns [`C_PURE_COMPRESSION`] when `Z·ey == ecu`; never negative.
pub fn c_from_z(z: f64, d: f64, ecu: f64, ey: f64) -> f64 {
    // z / Z_max is exactly 1 at Z_max and never above 1 below it.
    let denominator = 1.0 - z / z_max(ecu, ey);
    if denominator == 0.0 {
        C_PURE_COMPRESSION
    } else {
        (d / denominator).max(0.0)
    }
}

/// Strain ratio Z for neutral axis depth `c`.
///
/// Z_min at c = 0, Z_max at c = ∞.
pub fn z_from_c(c: f64, d: f64, ecu: f64, ey: f64, eu: f64) -> f64 {
    if c <= 0.0 {
        z_min(eu, ey)
    } else if c.is_infinite() {
        z_max(ecu, ey)
    } else {
        (c - d) / c * z_max(ecu, ey)
    }
}

/// Neutral axis depth at which the layer at `layer_distance` has `layer_strain`.
pub fn c_from_strain(layer_strain: f64, layer_distance: f64, ecu: f64) -> f64 {
    if layer_strain == ecu {
        C_PURE_COMPRESSION
    } else {
        (layer_distance / (1.0 - layer_strain / ecu)).max(0.0)
    }
}

/// Z for a strain at the extreme tension layer
pub fn z_from_strain(strain: f64, ey: f64) -> f64 {
    strain / ey
}

/// Strain at the extreme tension layer for a given Z
pub fn strain_from_z(z: f64, ey: f64) -> f64 {
    z * ey
}

/// Strain compatibility bound to one section and material pair.
///
/// Bundles `d`, εcu, εy and εu so callers convert between `c`, `Z` and
/// strain without threading four scalars through every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrainModel {
    /// Depth to the extreme tension layer (in)
    pub d: f64,
    /// Concrete crushing strain
    pub ecu: f64,
    /// Steel yield strain
    pub ey: f64,
    /// Steel ultimate strain magnitude
    pub eu: f64,
}

impl StrainModel {
    /// Strain model for a section and its materials
    pub fn new(section: &SectionGeometry, concrete: &ConcreteMaterial, rebar: &RebarMaterial) -> Self {
        StrainModel {
            d: section.d(),
            ecu: concrete.ecu(),
            ey: rebar.ey(),
            eu: rebar.eu(),
        }
    }

    /// Z at pure compression
    pub fn z_max(&self) -> f64 {
        z_max(self.ecu, self.ey)
    }

    /// Z at pure tension
    pub fn z_min(&self) -> f64 {
        z_min(self.eu, self.ey)
    }

    /// Neutral axis depth for Z
    pub fn c_from_z(&self, z: f64) -> f64 {
        c_from_z(z, self.d, self.ecu, self.ey)
    }

    /// Z for a neutral axis depth
    pub fn z_from_c(&self, c: f64) -> f64 {
        z_from_c(c, self.d, self.ecu, self.ey, self.eu)
    }

    /// Z for a strain at the extreme tension layer
    pub fn z_from_strain(&self, strain: f64) -> f64 {
        z_from_strain(strain, self.ey)
    }

    /// Strain at any layer for neutral axis depth `c`
    pub fn strain_at(&self, layer_distance: f64, c: f64) -> f64 {
        strain_at_layer(layer_distance, c, self.ecu, self.eu)
    }

    /// Strain at the extreme tension layer εt for neutral axis depth `c`,
    /// held at -εu below c(Z_min)
    pub fn extreme_tension_strain(&self, c: f64) -> f64 {
        self.strain_at(self.d, c).max(-self.eu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ECU: f64 = 0.003;
    const EY: f64 = 60_000.0 / 29_000_000.0;
    const EU: f64 = 0.12;

    #[test]
    fn test_strain_at_layer() {
        // c = 5, layer at 14: (5 - 14) * 0.003 / 5 = -0.0054
        assert_relative_eq!(strain_at_layer(14.0, 5.0, ECU, EU), -0.0054, epsilon = 1e-15);
        // Layer on the neutral axis
        assert_eq!(strain_at_layer(5.0, 5.0, ECU, EU), 0.0);
        // Extreme compression fiber
        assert_relative_eq!(strain_at_layer(0.0, 5.0, ECU, EU), ECU, epsilon = 1e-15);
    }

    #[test]
    fn test_strain_limits() {
        assert_eq!(strain_at_layer(14.0, C_PURE_TENSION, ECU, EU), -EU);
        assert_eq!(strain_at_layer(14.0, C_PURE_COMPRESSION, ECU, EU), ECU);
        assert!(!strain_at_layer(0.0, C_PURE_COMPRESSION, ECU, EU).is_nan());
    }

    #[test]
    fn test_z_bounds() {
        assert_relative_eq!(z_max(ECU, EY), 1.45, epsilon = 1e-12);
        assert_relative_eq!(z_min(EU, EY), -58.0, epsilon = 1e-12);
        assert_eq!(z_from_c(C_PURE_TENSION, 14.0, ECU, EY, EU), z_min(EU, EY));
        assert_eq!(z_from_c(C_PURE_COMPRESSION, 14.0, ECU, EY, EU), z_max(ECU, EY));
    }

    #[test]
    fn test_c_from_z_special_values() {
        // Z = 0 puts the neutral axis at d
        assert_relative_eq!(c_from_z(0.0, 14.0, ECU, EY), 14.0, epsilon = 1e-12);
        // Balanced: c = d * ecu / (ecu + ey)
        assert_relative_eq!(c_from_z(-1.0, 14.0, ECU, EY), 14.0 * ECU / (ECU + EY), epsilon = 1e-12);
        // Denominator zero is pure compression
        let z_at_ecu = ECU / EY;
        assert!(c_from_z(z_at_ecu, 14.0, ECU, EY).is_infinite());
        // Beyond Z_max clamps to zero rather than going negative
        assert_eq!(c_from_z(2.0 * z_at_ecu, 14.0, ECU, EY), 0.0);
    }

    #[test]
    fn test_round_trip() {
        for &c in &[1e-4, 0.01, 0.5, 2.0, 7.3, 14.0, 20.0, 350.0, 9_999.0] {
            let z = z_from_c(c, 14.0, ECU, EY, EU);
            assert_relative_eq!(c_from_z(z, 14.0, ECU, EY), c, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_c_from_strain() {
        // Tension-control limit at d = 14: c = 14 / (1 + 0.005/0.003) = 5.25
        assert_relative_eq!(c_from_strain(-0.005, 14.0, ECU), 5.25, epsilon = 1e-12);
        assert!(c_from_strain(ECU, 14.0, ECU).is_infinite());
    }

    #[test]
    fn test_strain_z_conversions() {
        assert_relative_eq!(z_from_strain(-EY, EY), -1.0, epsilon = 1e-15);
        assert_relative_eq!(strain_from_z(-1.0, EY), -EY, epsilon = 1e-15);
    }

    #[test]
    fn test_strain_model() {
        let model = StrainModel { d: 14.0, ecu: ECU, ey: EY, eu: EU };
        let c = model.c_from_z(-1.0);
        assert_relative_eq!(model.extreme_tension_strain(c), -EY, epsilon = 1e-15);
        assert_relative_eq!(model.z_from_c(c), -1.0, epsilon = 1e-12);
        assert_relative_eq!(model.z_from_strain(-0.005), -0.005 / EY, epsilon = 1e-12);
        assert_eq!(model.z_min(), z_min(EU, EY));
        assert_eq!(model.extreme_tension_strain(0.01), -EU);
    }
}
