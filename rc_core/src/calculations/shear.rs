//! # One-Way Shear
//!
//! Nominal and design one-way shear strength of nonprestressed members per
//! ACI 318 §22.5, with or without axial force.
//!
//! ## Formulas
//!
//! - Vc = 2λ√f'c·bw·d (Eq. 22.5.5.1)
//! - Vc = 2(1 + Nu / (k·Ag))λ√f'c·bw·d ≥ 0, k = 2000 for compression or
//!   minor tension, 500 for significant tension (Eq. 22.5.6.1, 22.5.7.1)
//! - Vs = Av·fyt·d / s (Eq. 22.5.10.5.3)
//! - φVn = φ(Vc + Vs), φ = 0.75, or 0.60 for the seismic case of §21.2.4.1
//!
//! ## Example
//!
//! ```rust
//! use rc_core::calculations::shear::{calculate, ShearInput, StirrupInput};
//! use rc_core::materials::ConcreteMaterial;
//!
//! let input = ShearInput {
//!     label: "B-1".to_string(),
//!     concrete: ConcreteMaterial::new(4000.0).unwrap(),
//!     width_in: 12.0,
//!     depth_in: 24.0,
//!     effective_depth_in: 21.5,
//!     factored_shear_lb: 40_000.0,
//!     axial_load_lb: 0.0,
//!     significant_tension: false,
//!     stirrups: Some(StirrupInput { area_in2: 0.22, spacing_in: 10.0, fyt_psi: 60_000.0 }),
//!     seismic: false,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::rebar::DEFAULT_FY_PSI;
use crate::materials::ConcreteMaterial;

/// φ for shear
pub const PHI_SHEAR: f64 = 0.75;

/// φ for shear in the seismic case of ACI 318 §21.2.4.1
pub const PHI_SHEAR_SEISMIC: f64 = 0.60;

/// Axial force denominator for compression or minor tension
const AXIAL_FACTOR_DEFAULT: f64 = 2000.0;

/// Axial force denominator for significant tension
const AXIAL_FACTOR_SIGNIFICANT_TENSION: f64 = 500.0;

/// Shear φ for the loading case
pub fn phi_shear(seismic: bool) -> f64 {
    if seismic {
        PHI_SHEAR_SEISMIC
    } else {
        PHI_SHEAR
    }
}

/// Concrete shear strength without axial force, Vc (lb)
pub fn vc(concrete: &ConcreteMaterial, bw_in: f64, d_in: f64) -> f64 {
    2.0 * concrete.lambda() * concrete.fc_psi().sqrt() * bw_in * d_in
}

/// Concrete shear strength with axial force, Vc (lb).
///
/// `nu_lb` is compression positive. Never negative.
pub fn vc_with_axial(
    concrete: &ConcreteMaterial,
    bw_in: f64,
    d_in: f64,
    nu_lb: f64,
    ag_in2: f64,
    significant_tension: bool,
) -> f64 {
    let k = if significant_tension {
        AXIAL_FACTOR_SIGNIFICANT_TENSION
    } else {
        AXIAL_FACTOR_DEFAULT
    };
    ((1.0 + nu_lb / (k * ag_in2)) * vc(concrete, bw_in, d_in)).max(0.0)
}

/// Transverse steel shear strength, Vs (lb)
pub fn vs(av_in2: f64, fyt_psi: f64, d_in: f64, spacing_in: f64) -> f64 {
    av_in2 * fyt_psi * d_in / spacing_in
}

/// Transverse steel required, Av/s (in²/in). Negative when φVc alone suffices.
pub fn av_over_s(vu_lb: f64, vc_lb: f64, d_in: f64, fyt_psi: f64, seismic: bool) -> f64 {
    let phi = phi_shear(seismic);
    (vu_lb - phi * vc_lb) / (phi * fyt_psi * d_in)
}

/// Design one-way shear strength φVn (lb)
pub fn phi_vn(vc_lb: f64, vs_lb: f64, seismic: bool) -> f64 {
    phi_shear(seismic) * (vc_lb + vs_lb)
}

/// Shear reinforcement at one spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StirrupInput {
    /// Total leg area Av (in²)
    pub area_in2: f64,
    /// Spacing s (in)
    pub spacing_in: f64,
    /// Yield strength fyt (psi)
    pub fyt_psi: f64,
}

/// Input for a one-way shear check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "concrete": { "fc_psi": 4000.0 },
///   "width_in": 12.0,
///   "depth_in": 24.0,
///   "effective_depth_in": 21.5,
///   "factored_shear_lb": 40000.0,
///   "stirrups": { "area_in2": 0.22, "spacing_in": 10.0, "fyt_psi": 60000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearInput {
    /// User label
    pub label: String,

    /// Concrete material (f'c and λ)
    pub concrete: ConcreteMaterial,

    /// Web width bw (in)
    pub width_in: f64,

    /// Total member depth h (in); Ag = bw·h
    pub depth_in: f64,

    /// Effective depth d (in)
    pub effective_depth_in: f64,

    /// Factored shear demand Vu (lb)
    pub factored_shear_lb: f64,

    /// Factored axial force Nu (lb), compression positive
    #[serde(default)]
    pub axial_load_lb: f64,

    /// Treat axial tension as significant (k = 500)
    #[serde(default)]
    pub significant_tension: bool,

    /// Provided shear reinforcement, if any
    #[serde(default)]
    pub stirrups: Option<StirrupInput>,

    /// Seismic shear case (φ = 0.60)
    #[serde(default)]
    pub seismic: bool,
}

impl ShearInput {
    /// Validate input parameters
    pub fn validate(&self) -> CalcResult<()> {
        if self.width_in <= 0.0 {
            return Err(CalcError::invalid_input(
                "width_in",
                self.width_in.to_string(),
                "Width must be positive",
            ));
        }
        if self.depth_in <= 0.0 {
            return Err(CalcError::invalid_input(
                "depth_in",
                self.depth_in.to_string(),
                "Depth must be positive",
            ));
        }
        if self.effective_depth_in <= 0.0 || self.effective_depth_in > self.depth_in {
            return Err(CalcError::invalid_input(
                "effective_depth_in",
                self.effective_depth_in.to_string(),
                "Effective depth must be positive and no greater than the member depth",
            ));
        }
        if self.factored_shear_lb < 0.0 {
            return Err(CalcError::invalid_input(
                "factored_shear_lb",
                self.factored_shear_lb.to_string(),
                "Shear demand cannot be negative",
            ));
        }
        if let Some(stirrups) = &self.stirrups {
            if stirrups.area_in2 <= 0.0 {
                return Err(CalcError::invalid_input(
                    "stirrups.area_in2",
                    stirrups.area_in2.to_string(),
                    "Stirrup area must be positive",
                ));
            }
            if stirrups.spacing_in <= 0.0 {
                return Err(CalcError::invalid_input(
                    "stirrups.spacing_in",
                    stirrups.spacing_in.to_string(),
                    "Stirrup spacing must be positive",
                ));
            }
            if stirrups.fyt_psi <= 0.0 {
                return Err(CalcError::invalid_input(
                    "stirrups.fyt_psi",
                    stirrups.fyt_psi.to_string(),
                    "Stirrup yield strength must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Gross area Ag = bw·h (in²)
    pub fn gross_area_in2(&self) -> f64 {
        self.width_in * self.depth_in
    }
}

/// Results of a one-way shear check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearResult {
    /// Concrete contribution Vc (lb)
    pub vc_lb: f64,

    /// Stirrup contribution Vs (lb); zero without stirrups
    pub vs_lb: f64,

    /// φ used
    pub phi: f64,

    /// Design strength φVn (lb)
    pub phi_vn_lb: f64,

    /// Required Av/s (in²/in) using the stirrup fyt, or 60 ksi without
    /// stirrups; zero when φVc alone suffices
    pub required_av_over_s: f64,

    /// Vu / φVn
    pub unity: f64,
}

impl ShearResult {
    /// Check if the member passes
    pub fn passes(&self) -> bool {
        self.unity <= 1.0
    }
}

/// Check one-way shear.
pub fn calculate(input: &ShearInput) -> CalcResult<ShearResult> {
    input.validate()?;

    let d = input.effective_depth_in;
    let vc_lb = if input.axial_load_lb == 0.0 {
        vc(&input.concrete, input.width_in, d)
    } else {
        vc_with_axial(
            &input.concrete,
            input.width_in,
            d,
            input.axial_load_lb,
            input.gross_area_in2(),
            input.significant_tension,
        )
    };

    let (vs_lb, fyt) = match &input.stirrups {
        Some(stirrups) => (vs(stirrups.area_in2, stirrups.fyt_psi, d, stirrups.spacing_in), stirrups.fyt_psi),
        None => (0.0, DEFAULT_FY_PSI),
    };

    let phi_vn_lb = phi_vn(vc_lb, vs_lb, input.seismic);
    let unity = if phi_vn_lb > 0.0 {
        input.factored_shear_lb / phi_vn_lb
    } else if input.factored_shear_lb == 0.0 {
        0.0
    } else {
        f64::INFINITY
    };

    Ok(ShearResult {
        vc_lb,
        vs_lb,
        phi: phi_shear(input.seismic),
        phi_vn_lb,
        required_av_over_s: av_over_s(input.factored_shear_lb, vc_lb, d, fyt, input.seismic).max(0.0),
        unity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_beam() -> ShearInput {
        ShearInput {
            label: "Test Beam".to_string(),
            concrete: ConcreteMaterial::new(4000.0).unwrap(),
            width_in: 12.0,
            depth_in: 24.0,
            effective_depth_in: 21.5,
            factored_shear_lb: 40_000.0,
            axial_load_lb: 0.0,
            significant_tension: false,
            stirrups: Some(StirrupInput {
                area_in2: 0.22,
                spacing_in: 10.0,
                fyt_psi: 60_000.0,
            }),
            seismic: false,
        }
    }

    #[test]
    fn test_vc() {
        let concrete = ConcreteMaterial::new(4000.0).unwrap();
        // 2 * sqrt(4000) * 12 * 21.5 = 32,631 lb
        assert_relative_eq!(vc(&concrete, 12.0, 21.5), 2.0 * 4000f64.sqrt() * 258.0, epsilon = 1e-9);

        let lightweight = ConcreteMaterial::lightweight(4000.0, 0.75).unwrap();
        assert_relative_eq!(
            vc(&lightweight, 12.0, 21.5),
            0.75 * vc(&concrete, 12.0, 21.5),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_vc_with_axial() {
        let concrete = ConcreteMaterial::new(4000.0).unwrap();
        let base = vc(&concrete, 12.0, 21.5);
        let ag = 288.0;

        // Compression raises Vc
        let compression = vc_with_axial(&concrete, 12.0, 21.5, 288_000.0, ag, false);
        assert_relative_eq!(compression, 1.5 * base, max_relative = 1e-12);

        // Significant tension uses k = 500
        let tension = vc_with_axial(&concrete, 12.0, 21.5, -72_000.0, ag, true);
        assert_relative_eq!(tension, 0.5 * base, max_relative = 1e-12);

        // Large tension floors at zero
        assert_eq!(vc_with_axial(&concrete, 12.0, 21.5, -500_000.0, ag, true), 0.0);
    }

    #[test]
    fn test_vs_and_phi_vn() {
        // 0.22 * 60000 * 21.5 / 10 = 28,380 lb
        assert_relative_eq!(vs(0.22, 60_000.0, 21.5, 10.0), 28_380.0, epsilon = 1e-9);
        assert_relative_eq!(phi_vn(10_000.0, 2_000.0, false), 9_000.0, epsilon = 1e-9);
        assert_relative_eq!(phi_vn(10_000.0, 2_000.0, true), 7_200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_av_over_s() {
        // (30000 - 0.75 * 20000) / (0.75 * 60000 * 20) = 15000 / 900000
        assert_relative_eq!(av_over_s(30_000.0, 20_000.0, 20.0, 60_000.0, false), 1.0 / 60.0, epsilon = 1e-12);
        assert!(av_over_s(10_000.0, 20_000.0, 20.0, 60_000.0, false) < 0.0);
    }

    #[test]
    fn test_calculate() {
        let result = calculate(&test_beam()).unwrap();
        assert_relative_eq!(result.vs_lb, 28_380.0, epsilon = 1e-9);
        assert_eq!(result.phi, 0.75);
        assert_relative_eq!(result.phi_vn_lb, 0.75 * (result.vc_lb + result.vs_lb), max_relative = 1e-12);
        assert!(result.passes());
        assert!(result.required_av_over_s > 0.0);
    }

    #[test]
    fn test_calculate_without_stirrups() {
        let mut input = test_beam();
        input.stirrups = None;
        input.factored_shear_lb = 10_000.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.vs_lb, 0.0);
        assert_eq!(result.required_av_over_s, 0.0);
        assert!(result.passes());
    }

    #[test]
    fn test_invalid_input() {
        let mut input = test_beam();
        input.effective_depth_in = 30.0;
        assert!(calculate(&input).is_err());

        let mut input = test_beam();
        input.stirrups = Some(StirrupInput {
            area_in2: 0.22,
            spacing_in: 0.0,
            fyt_psi: 60_000.0,
        });
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{
            "label": "B-2",
            "concrete": { "fc_psi": 4000.0 },
            "width_in": 12.0,
            "depth_in": 24.0,
            "effective_depth_in": 21.5,
            "factored_shear_lb": 20000.0
        }"#;
        let input: ShearInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.axial_load_lb, 0.0);
        assert!(input.stirrups.is_none());
        assert!(!input.seismic);
        assert!(calculate(&input).is_ok());
    }
}
