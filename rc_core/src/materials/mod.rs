//! # Materials
//!
//! Material value objects for reinforced concrete strength design.
//!
//! - **Concrete**: f'c, λ, εcu and the derived β1, Ec, fr (ACI 318 Ch. 19, 22)
//! - **Rebar**: fy, Es and the derived εy, εu, tagged plain or reinforcing
//! - **Bar sizes**: the standard #3 to #18 designation table
//!
//! All materials are immutable once constructed and cheap to copy, so the
//! same values can be shared across any number of section calculations.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::{BarSize, ConcreteMaterial, RebarGrade, RebarMaterial};
//!
//! let concrete = ConcreteMaterial::new(5000.0).unwrap();
//! let rebar = RebarMaterial::from_grade(RebarGrade::Grade60);
//!
//! assert!((concrete.beta1() - 0.80).abs() < 1e-12);
//! assert_eq!(BarSize::No8.area_in2(), 0.79);
//! println!("{} / {}", concrete.display_name(), rebar.display_name());
//! ```

pub mod bar_sizes;
pub mod concrete;
pub mod rebar;

pub use bar_sizes::{BarProperties, BarSize};
pub use concrete::ConcreteMaterial;
pub use rebar::{RebarGrade, RebarMaterial, SteelKind};
