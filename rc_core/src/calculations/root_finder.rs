//! # Axial Force Root Finder
//!
//! Finds the strain state at which the section's net axial force equals a
//! target: by bisection on Z over `[Z_min, Z_max]`, or on the neutral axis
//! depth when the target lies between pure tension and `P(Z_min)`.
//!
//! The search is bounded by an iteration cap. Hitting the cap is not an
//! error: the last midpoint is returned with `converged = false`, trading a
//! little precision for a guaranteed finish. Callers decide whether that is
//! acceptable and whether to report it.

use serde::{Deserialize, Serialize};

use super::forces::sum_forces;
use super::strain::{StrainModel, C_PURE_TENSION};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteMaterial, RebarMaterial};
use crate::section::SectionGeometry;

/// Bisection stopping criteria.
///
/// ## JSON Example
///
/// ```json
/// { "tolerance": 1e-12, "max_iterations": 50 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BisectionSettings {
    /// Stop when half the bracket width in Z is at or below this value
    pub tolerance: f64,
    /// Hard cap on iterations
    pub max_iterations: u32,
}

impl Default for BisectionSettings {
    fn default() -> Self {
        BisectionSettings {
            tolerance: 1e-12,
            max_iterations: 50,
        }
    }
}

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    /// Strain ratio Z at the target force, clamped to Z_min
    pub z: f64,
    /// Neutral axis depth at the target force (may be infinite at Z_max)
    pub c: f64,
    /// Bisection iterations performed
    pub iterations: u32,
    /// False when the iteration cap stopped the search first
    pub converged: bool,
}

/// Find the strain state at which `sum_forces` equals `target_p_lb`.
///
/// Targets in `[P(Z_min), P(Z_max)]` are found by bisection on Z. Below
/// Z_min every neutral axis depth in `[0, c(Z_min)]` shares Z_min, so
/// targets in `[P(c = 0), P(Z_min))` are found by bisection on c instead,
/// with the tolerance taken relative to `c(Z_min)`. Those roots report
/// `z = Z_min`.
///
/// # Preconditions
///
/// `target_p_lb` must lie within `[P(c = 0), P(Z_max)]`, i.e. between pure
/// tension and pure compression. Targets outside return
/// [`CalcError::UnbracketedRoot`]; a target exactly on a bound returns that
/// bound.
pub fn z_at_force(
    target_p_lb: f64,
    section: &SectionGeometry,
    concrete: &ConcreteMaterial,
    rebar: &RebarMaterial,
    settings: &BisectionSettings,
) -> CalcResult<RootResult> {
    let strain = StrainModel::new(section, concrete, rebar);
    let residual_z = |z: f64| sum_forces(strain.c_from_z(z), section, concrete, rebar) - target_p_lb;
    let residual_c = |c: f64| sum_forces(c, section, concrete, rebar) - target_p_lb;

    let z_min = strain.z_min();
    let z_max = strain.z_max();
    let c_at_z_min = strain.c_from_z(z_min);
    let p_tension = residual_c(C_PURE_TENSION);
    let p_z_min = residual_z(z_min);
    let p_upper = residual_z(z_max);

    if !target_p_lb.is_finite() || p_tension > 0.0 || p_upper < 0.0 {
        return Err(CalcError::unbracketed_root(
            target_p_lb,
            p_tension + target_p_lb,
            p_upper + target_p_lb,
        ));
    }
    if p_upper == 0.0 {
        return Ok(RootResult {
            z: z_max,
            c: strain.c_from_z(z_max),
            iterations: 0,
            converged: true,
        });
    }

    if p_z_min > 0.0 {
        let root = bisect(
            C_PURE_TENSION,
            c_at_z_min,
            p_tension,
            residual_c,
            settings.tolerance * c_at_z_min.max(1.0),
            settings.max_iterations,
        );
        return Ok(RootResult {
            z: z_min,
            c: root.x,
            iterations: root.iterations,
            converged: root.converged,
        });
    }

    let root = bisect(z_min, z_max, p_z_min, residual_z, settings.tolerance, settings.max_iterations);
    Ok(RootResult {
        z: root.x,
        c: strain.c_from_z(root.x),
        iterations: root.iterations,
        converged: root.converged,
    })
}

/// Z at pure bending (P = 0)
pub fn z_at_pure_moment(
    section: &SectionGeometry,
    concrete: &ConcreteMaterial,
    rebar: &RebarMaterial,
    settings: &BisectionSettings,
) -> CalcResult<RootResult> {
    z_at_force(0.0, section, concrete, rebar, settings)
}

struct Bisection {
    x: f64,
    iterations: u32,
    converged: bool,
}

/// Bisect `[lower, upper]` for a sign change of `residual`.
///
/// `residual_lower` is the residual at `lower`; the caller guarantees the
/// residual at `upper` is positive.
fn bisect(
    mut lower: f64,
    mut upper: f64,
    residual_lower: f64,
    residual: impl Fn(f64) -> f64,
    tolerance: f64,
    max_iterations: u32,
) -> Bisection {
    if residual_lower == 0.0 {
        return Bisection {
            x: lower,
            iterations: 0,
            converged: true,
        };
    }

    let mut sign_lower = residual_lower.signum();
    let mut mid = (lower + upper) / 2.0;
    let mut iterations = 0;

    while iterations < max_iterations {
        mid = (lower + upper) / 2.0;
        let r_mid = residual(mid);
        iterations += 1;

        if r_mid == 0.0 {
            return Bisection {
                x: mid,
                iterations,
                converged: true,
            };
        }
        if r_mid.signum() == sign_lower {
            lower = mid;
            sign_lower = r_mid.signum();
        } else {
            upper = mid;
        }

        if (upper - lower) / 2.0 <= tolerance {
            return Bisection {
                x: mid,
                iterations,
                converged: true,
            };
        }
    }

    Bisection {
        x: mid,
        iterations,
        converged: false,
    }
}
