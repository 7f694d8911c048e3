//! # Section Force Integration
//!
//! Net axial force and moment for a given neutral axis depth, combining the
//! ACI 318 equivalent rectangular stress block (§22.2.2.4) with
//! elastic-perfectly-plastic steel layers.
//!
//! ## Conventions
//!
//! - Compression is positive for strain, stress and force.
//! - Moments are taken about section mid-depth; positive moment compresses
//!   the face the layer distances are measured from.
//! - The stress block depth `a = β1·c` is capped at the section depth, and
//!   the same capped value is used for the concrete force and its lever arm.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::calculations::forces::{pm_point, pure_tension_capacity};
//! use rc_core::calculations::strain::C_PURE_TENSION;
//! use rc_core::materials::{BarSize, ConcreteMaterial, RebarMaterial};
//! use rc_core::section::SectionGeometry;
//!
//! let section = SectionGeometry::with_equal_layers(16.0, 16.0, 1.5, 4, BarSize::No8, 2).unwrap();
//! let concrete = ConcreteMaterial::new(4000.0).unwrap();
//! let rebar = RebarMaterial::new(60_000.0).unwrap();
//!
//! let tension = pm_point(C_PURE_TENSION, &section, &concrete, &rebar);
//! let pnt = pure_tension_capacity(&section, &rebar);
//! assert!((tension.axial_lb - pnt).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use super::phi::Confinement;
use super::strain::strain_at_layer;
use crate::materials::concrete::STRESS_BLOCK_FACTOR;
use crate::materials::{ConcreteMaterial, RebarMaterial};
use crate::section::{ReinforcementLayer, SectionGeometry};

/// Axial force, moment and extreme tension strain from one neutral axis depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionForces {
    /// Net axial force P (lb), compression positive
    pub axial_lb: f64,
    /// Net moment about mid-depth M (in-lb)
    pub moment_inlb: f64,
    /// Strain at the extreme tension layer εt
    pub extreme_tension_strain: f64,
}

/// Bilinear steel stress (psi) for a strain.
///
/// Linear up to ±εy, then flat at ±fy. No strain hardening.
pub fn layer_stress(strain: f64, rebar: &RebarMaterial) -> f64 {
    if strain.abs() < rebar.ey() {
        strain * rebar.es_psi()
    } else {
        rebar.fy_psi().copysign(strain)
    }
}

/// Stress block depth a = β1·c, capped at the section depth (in).
pub fn compression_block_depth(c: f64, section: &SectionGeometry, concrete: &ConcreteMaterial) -> f64 {
    (c * concrete.beta1()).min(section.depth_in())
}

/// Net force (lb) of one steel layer.
///
/// Bars on the compression side that sit inside the stress block displace
/// concrete already counted at 0.85f'c, so that stress is deducted from the
/// bar. Bars below the block, or on the tension side, carry steel stress only.
pub fn layer_force(
    layer: &ReinforcementLayer,
    c: f64,
    section: &SectionGeometry,
    concrete: &ConcreteMaterial,
    rebar: &RebarMaterial,
) -> f64 {
    let strain = strain_at_layer(layer.distance_in, c, concrete.ecu(), rebar.eu());
    let stress = layer_stress(strain, rebar);
    let block_depth = compression_block_depth(c, section, concrete);

    if layer.distance_in < c && layer.distance_in <= block_depth {
        (stress - concrete.block_stress_psi()) * layer.area_in2
    } else {
        stress * layer.area_in2
    }
}

/// Stress block resultant 0.85f'c·b·a (lb)
pub fn concrete_force(c: f64, section: &SectionGeometry, concrete: &ConcreteMaterial) -> f64 {
    STRESS_BLOCK_FACTOR * concrete.fc_psi() * section.width_in() * compression_block_depth(c, section, concrete)
}

/// Net axial force P (lb) for neutral axis depth `c`
pub fn sum_forces(c: f64, section: &SectionGeometry, concrete: &ConcreteMaterial, rebar: &RebarMaterial) -> f64 {
    let steel: f64 = section
        .layers()
        .iter()
        .map(|layer| layer_force(layer, c, section, concrete, rebar))
        .sum();
    steel + concrete_force(c, section, concrete)
}

/// Net moment about mid-depth M (in-lb) for neutral axis depth `c`
pub fn sum_moments(c: f64, section: &SectionGeometry, concrete: &ConcreteMaterial, rebar: &RebarMaterial) -> f64 {
    let h = section.depth_in();
    let steel: f64 = section
        .layers()
        .iter()
        .map(|layer| layer_force(layer, c, section, concrete, rebar) * (h / 2.0 - layer.distance_in))
        .sum();

    let block_depth = compression_block_depth(c, section, concrete);
    let concrete_moment = concrete_force(c, section, concrete) * (h - block_depth) / 2.0;

    steel + concrete_moment
}

/// P, M and εt from a single neutral axis depth.
///
/// For neutral axes shallower than c(Z_min) the plane-sections strain at d
/// runs past the steel's ultimate strain (about -4.2 at c = 0.01 in on a
/// 14 in deep layer). The reported εt is held at -εu there, matching c = 0;
/// the forces are unaffected since the steel is already at fy.
pub fn pm_point(c: f64, section: &SectionGeometry, concrete: &ConcreteMaterial, rebar: &RebarMaterial) -> SectionForces {
    SectionForces {
        axial_lb: sum_forces(c, section, concrete, rebar),
        moment_inlb: sum_moments(c, section, concrete, rebar),
        extreme_tension_strain: strain_at_layer(section.d(), c, concrete.ecu(), rebar.eu()).max(-rebar.eu()),
    }
}

/// Nominal axial strength at zero eccentricity, Po (lb), ACI 318 Eq. (22.4.2.2)
pub fn pure_compression_capacity(section: &SectionGeometry, concrete: &ConcreteMaterial, rebar: &RebarMaterial) -> f64 {
    let ast = section.total_steel_area_in2();
    concrete.block_stress_psi() * (section.gross_area_in2() - ast) + rebar.fy_psi() * ast
}

/// Nominal axial tensile strength, Pnt = -Ast·fy (lb)
pub fn pure_tension_capacity(section: &SectionGeometry, rebar: &RebarMaterial) -> f64 {
    -section.total_steel_area_in2() * rebar.fy_psi()
}

/// Maximum nominal axial strength Pn,max (lb), ACI 318 Table 22.4.2.1.
///
/// 0.80·Po for tied members; 0.85·Po for spiral or Ch. 10 composite members.
pub fn max_axial_capacity(po_lb: f64, confinement: Confinement, composite: bool) -> f64 {
    let coefficient = if confinement == Confinement::Spiral || composite {
        0.85
    } else {
        0.80
    };
    coefficient * po_lb
}
