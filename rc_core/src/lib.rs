//! # rc_core - Reinforced Concrete Section Strength Engine
//!
//! `rc_core` computes axial force-moment (P-M) interaction diagrams for
//! rectangular reinforced concrete sections per ACI 318 strength design,
//! plus supporting one-way shear checks. All inputs and outputs are
//! JSON-serializable so any presentation layer can drive it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All public inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Validated Values**: Materials and sections cannot be built in an invalid state
//!
//! ## Quick Start
//!
//! ```rust
//! use rc_core::calculations::pm_diagram::{generate_pm_curve, PmOptions};
//! use rc_core::materials::{BarSize, ConcreteMaterial, RebarMaterial};
//! use rc_core::section::SectionGeometry;
//!
//! let section = SectionGeometry::with_equal_layers(16.0, 16.0, 1.5, 8, BarSize::No8, 2).unwrap();
//! let concrete = ConcreteMaterial::new(4000.0).unwrap();
//! let rebar = RebarMaterial::new(60_000.0).unwrap();
//!
//! let curve = generate_pm_curve(&section, &concrete, &rebar, &PmOptions::default()).unwrap();
//! for point in &curve.design_points {
//!     println!("{:.1} kip, {:.1} kip-ft", point.axial_kips().0, point.moment_kip_ft().0);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Strain compatibility, force integration, P-M diagrams, shear
//! - [`materials`] - Concrete, reinforcing steel and bar sizes
//! - [`section`] - Rectangular section geometry and steel layers
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//!
//! ## Logging
//!
//! Diagram generation reports progress through the [`log`] facade. No
//! logger is installed here; binaries choose one.

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use section::{ReinforcementLayer, SectionGeometry};
