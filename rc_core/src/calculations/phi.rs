//! # Strength Reduction Factors
//!
//! φ for axial force, moment, or combined axial force and moment per
//! ACI 318 Table 21.2.2, interpolated on the net tensile strain εt between
//! the compression-controlled limit (εt = -εy) and the tension-controlled
//! limit (εt = -0.005).
//!
//! ```text
//!  φ
//! 0.90 ┤                 ┌──────── tension-controlled
//!      │               ╱
//! 0.65 ┤──────────────┘            compression-controlled (tied)
//!      └──────────────┬──┬────────── -εt
//!                    εy  0.005
//! ```

use serde::{Deserialize, Serialize};

/// Net tensile strain at the tension-controlled limit (compression positive)
pub const TENSION_CONTROLLED_STRAIN: f64 = -0.005;

/// φ for tension-controlled sections
pub const PHI_TENSION_CONTROLLED: f64 = 0.90;

/// Transverse reinforcement type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Confinement {
    /// Ties or other transverse reinforcement
    #[default]
    Tied,
    /// Spirals conforming to ACI 318 §25.7.3
    Spiral,
}

impl Confinement {
    /// All confinement types for UI selection
    pub const ALL: [Confinement; 2] = [Confinement::Tied, Confinement::Spiral];

    /// φ for compression-controlled sections
    pub fn phi_compression_controlled(&self) -> f64 {
        match self {
            Confinement::Tied => 0.65,
            Confinement::Spiral => 0.75,
        }
    }

    /// Rise of φ across the transition zone
    pub fn transition_slope(&self) -> f64 {
        PHI_TENSION_CONTROLLED - self.phi_compression_controlled()
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Confinement::Tied => "Tied",
            Confinement::Spiral => "Spiral",
        }
    }
}

impl std::fmt::Display for Confinement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Strain regime of a section at nominal strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrainClassification {
    /// εt at or above -εy
    CompressionControlled,
    /// εt between -εy and -0.005
    Transition,
    /// εt at or below -0.005
    TensionControlled,
}

/// Classify εt (compression positive) against -εy and -0.005.
pub fn classify(strain_at_extreme_tension: f64, ey: f64) -> StrainClassification {
    if strain_at_extreme_tension >= -ey {
        StrainClassification::CompressionControlled
    } else if strain_at_extreme_tension <= TENSION_CONTROLLED_STRAIN {
        StrainClassification::TensionControlled
    } else {
        StrainClassification::Transition
    }
}

/// φ for combined axial force and moment.
///
/// Exactly the compression-controlled value for εt ≥ -εy and exactly 0.90
/// for εt ≤ -0.005; linear in between.
pub fn strength_reduction_factor(strain_at_extreme_tension: f64, ey: f64, confinement: Confinement) -> f64 {
    let phi_c = confinement.phi_compression_controlled();
    match classify(strain_at_extreme_tension, ey) {
        StrainClassification::CompressionControlled => phi_c,
        StrainClassification::TensionControlled => PHI_TENSION_CONTROLLED,
        StrainClassification::Transition => {
            let ratio = (strain_at_extreme_tension + ey) / (TENSION_CONTROLLED_STRAIN + ey);
            (phi_c + confinement.transition_slope() * ratio).clamp(phi_c, PHI_TENSION_CONTROLLED)
        }
    }
}
