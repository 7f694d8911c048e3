//! # Calculations
//!
//! Strength calculations for reinforced concrete sections. User-facing
//! calculations follow the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Interaction diagram pipeline
//!
//! ```text
//! strain ──▶ forces ──▶ root_finder ──▶ sampler ──▶ pm_diagram
//!                                                      ▲
//!                                          phi ────────┘
//! ```
//!
//! - [`strain`] - c / Z / strain conversions
//! - [`forces`] - stress block and steel layer force integration
//! - [`root_finder`] - bisection for Z at a target axial force
//! - [`phi`] - strength reduction factors
//! - [`sampler`] - strain states along the curve
//! - [`pm_diagram`] - nominal and design P-M curves
//!
//! ## Other checks
//!
//! - [`shear`] - one-way shear (ACI 318 §22.5)

pub mod forces;
pub mod phi;
pub mod pm_diagram;
pub mod root_finder;
pub mod sampler;
pub mod shear;
pub mod strain;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use phi::Confinement;
pub use pm_diagram::{FullPmCurve, PmCurve, PmDiagramInput, PmDiagramResult, PmOptions, PmPoint};
pub use root_finder::BisectionSettings;
pub use shear::{ShearInput, ShearResult};

/// Enum wrapper for all calculation types.
///
/// Lets a batch of heterogeneous calculations live in one collection and
/// serialize with a `"type"` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Axial force-moment interaction diagram
    PmDiagram(PmDiagramInput),
    /// One-way shear check
    Shear(ShearInput),
}

/// Result counterpart of [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    PmDiagram(PmDiagramResult),
    Shear(ShearResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::PmDiagram(p) => &p.label,
            CalculationItem::Shear(s) => &s.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::PmDiagram(_) => "PmDiagram",
            CalculationItem::Shear(_) => "Shear",
        }
    }

    /// Run the wrapped calculation
    pub fn calculate(&self) -> crate::errors::CalcResult<CalculationOutput> {
        match self {
            CalculationItem::PmDiagram(input) => pm_diagram::calculate(input).map(CalculationOutput::PmDiagram),
            CalculationItem::Shear(input) => shear::calculate(input).map(CalculationOutput::Shear),
        }
    }
}
