//! # Axial Force-Moment Interaction Diagram
//!
//! Nominal and design P-M interaction curves for a rectangular reinforced
//! concrete section per ACI 318 Ch. 22.
//!
//! ## Method
//!
//! 1. The curve sampler picks strain states from pure compression to pure
//!    tension (see [`super::sampler`]).
//! 2. Each state is integrated into a nominal point (Pn, Mn).
//! 3. Design points cap Pn at Pn,max and scale both values by φ from the
//!    extreme tension strain (ACI 318 Table 21.2.2).
//!
//! The positive half compresses the face that layer distances are measured
//! from. The negative half is the same computation on the reversed section
//! with moments negated; symmetric sections are simply mirrored.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::calculations::pm_diagram::{calculate, PmDiagramInput, PmOptions};
//! use rc_core::materials::{BarSize, ConcreteMaterial, RebarMaterial};
//! use rc_core::section::SectionGeometry;
//!
//! let input = PmDiagramInput {
//!     label: "C-1".to_string(),
//!     section: SectionGeometry::with_equal_layers(16.0, 16.0, 1.5, 4, BarSize::No8, 2).unwrap(),
//!     concrete: ConcreteMaterial::new(4000.0).unwrap(),
//!     rebar: RebarMaterial::new(60_000.0).unwrap(),
//!     options: PmOptions::default(),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.balanced_moment_inlb > result.pure_bending_moment_inlb);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::forces::{max_axial_capacity, pm_point, pure_compression_capacity, pure_tension_capacity};
use super::phi::{strength_reduction_factor, Confinement};
use super::root_finder::BisectionSettings;
use super::sampler::CurveSampler;
use super::strain::{StrainModel, C_PURE_TENSION};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteMaterial, RebarMaterial};
use crate::section::SectionGeometry;
use crate::units::{InLb, KipFt, Kips, Pounds};

/// Smallest sampling density that still resolves every region
pub const MIN_POINTS: usize = 5;

/// Upper bound on sampling density
pub const MAX_POINTS: usize = 1000;

const CALCULATION_TYPE: &str = "P-M diagram";

// ============================================================================
// Options
// ============================================================================

/// Settings for generating an interaction diagram.
///
/// Every field is optional in JSON.
///
/// ## JSON Example
///
/// ```json
/// {
///   "points": 10,
///   "confinement": "Spiral",
///   "composite": false,
///   "cap_compression": true,
///   "solver": { "tolerance": 1e-12, "max_iterations": 50 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmOptions {
    /// Sampling density; larger values add points in every region
    pub points: usize,

    /// Transverse reinforcement type (sets φ and the Pn,max coefficient)
    pub confinement: Confinement,

    /// ACI 318 Ch. 10 composite member (Pn,max = 0.85·Po)
    pub composite: bool,

    /// Cap design axial strength at Pn,max
    pub cap_compression: bool,

    /// Root finder stopping criteria
    pub solver: BisectionSettings,
}

impl Default for PmOptions {
    fn default() -> Self {
        PmOptions {
            points: 10,
            confinement: Confinement::Tied,
            composite: false,
            cap_compression: true,
            solver: BisectionSettings::default(),
        }
    }
}

impl PmOptions {
    /// Validate option ranges
    pub fn validate(&self) -> CalcResult<()> {
        if self.points < MIN_POINTS || self.points > MAX_POINTS {
            return Err(CalcError::invalid_input(
                "points",
                self.points.to_string(),
                format!("Point count must be between {} and {}", MIN_POINTS, MAX_POINTS),
            ));
        }
        if !self.solver.tolerance.is_finite() || self.solver.tolerance <= 0.0 {
            return Err(CalcError::invalid_input(
                "solver.tolerance",
                self.solver.tolerance.to_string(),
                "Tolerance must be a positive number",
            ));
        }
        if self.solver.max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "solver.max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Curve Types
// ============================================================================

/// One point on an interaction curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmPoint {
    /// Axial force (lb), compression positive
    pub axial_lb: f64,
    /// Moment about mid-depth (in-lb)
    pub moment_inlb: f64,
    /// Strain ratio Z = εt / εy
    pub z: f64,
    /// Strain at the extreme tension layer εt
    pub strain_at_extreme_tension: f64,
    /// φ applied to this point; `None` on nominal points
    pub phi: Option<f64>,
}

impl PmPoint {
    /// Axial force in kips
    pub fn axial_kips(&self) -> Kips {
        Pounds(self.axial_lb).into()
    }

    /// Moment in kip-ft
    pub fn moment_kip_ft(&self) -> KipFt {
        InLb(self.moment_inlb).into()
    }

    fn mirrored(&self) -> Self {
        PmPoint {
            moment_inlb: -self.moment_inlb,
            ..*self
        }
    }
}

/// Named points and capacities of one half diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPoints {
    /// Nominal axial strength at zero eccentricity Po (lb)
    pub po_lb: f64,
    /// Maximum nominal axial strength Pn,max (lb)
    pub pn_max_lb: f64,
    /// Nominal axial tensile strength Pnt (lb)
    pub pnt_lb: f64,
    /// Zero strain at the extreme tension layer (Z = 0)
    pub zero_strain: PmPoint,
    /// Balanced failure (Z = -1)
    pub balanced: PmPoint,
    /// Tension-controlled limit (εt = -0.005)
    pub tension_control: PmPoint,
    /// Pure bending (P = 0)
    pub pure_bending: PmPoint,
    /// Pure tension (c = 0)
    pub pure_tension: PmPoint,
}

/// One half of an interaction diagram, ordered from pure compression to
/// pure tension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmCurve {
    pub nominal_points: Vec<PmPoint>,
    pub design_points: Vec<PmPoint>,
    pub key_points: KeyPoints,
    /// False when any root search stopped at its iteration cap
    pub converged: bool,
}

impl PmCurve {
    fn mirrored(&self) -> Self {
        let mirror = |points: &[PmPoint]| -> Vec<PmPoint> { points.iter().map(PmPoint::mirrored).collect() };
        let key = &self.key_points;
        PmCurve {
            nominal_points: mirror(&self.nominal_points),
            design_points: mirror(&self.design_points),
            key_points: KeyPoints {
                zero_strain: key.zero_strain.mirrored(),
                balanced: key.balanced.mirrored(),
                tension_control: key.tension_control.mirrored(),
                pure_bending: key.pure_bending.mirrored(),
                pure_tension: key.pure_tension.mirrored(),
                ..*key
            },
            converged: self.converged,
        }
    }
}

/// Both halves of an interaction diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullPmCurve {
    /// Compression on the face layer distances are measured from
    pub positive: PmCurve,
    /// Compression on the opposite face; moments are negative
    pub negative: PmCurve,
}

impl FullPmCurve {
    /// Nominal points as a closed loop: positive half from compression to
    /// tension, then negative half back to compression.
    pub fn nominal_outline(&self) -> Vec<PmPoint> {
        outline(&self.positive.nominal_points, &self.negative.nominal_points)
    }

    /// Design points as a closed loop, ordered like [`Self::nominal_outline`]
    pub fn design_outline(&self) -> Vec<PmPoint> {
        outline(&self.positive.design_points, &self.negative.design_points)
    }

    /// True when both halves converged
    pub fn converged(&self) -> bool {
        self.positive.converged && self.negative.converged
    }
}

fn outline(positive: &[PmPoint], negative: &[PmPoint]) -> Vec<PmPoint> {
    positive.iter().chain(negative.iter().rev()).copied().collect()
}

// ============================================================================
// Generation
// ============================================================================

/// Generate the positive half of the interaction diagram.
pub fn generate_pm_curve(
    section: &SectionGeometry,
    concrete: &ConcreteMaterial,
    rebar: &RebarMaterial,
    options: &PmOptions,
) -> CalcResult<PmCurve> {
    options.validate()?;

    let po = pure_compression_capacity(section, concrete, rebar);
    let pn_max = max_axial_capacity(po, options.confinement, options.composite);
    let pnt = pure_tension_capacity(section, rebar);
    if !po.is_finite() || !pnt.is_finite() {
        return Err(CalcError::calculation_failed(
            CALCULATION_TYPE,
            format!("axial capacities overflow (Po = {}, Pnt = {})", po, pnt),
        ));
    }

    let set = CurveSampler::new(section, concrete, rebar, options.solver).sample(options.points, pn_max)?;
    let strain = StrainModel::new(section, concrete, rebar);

    let nominal_at = |c: f64, z: f64| -> PmPoint {
        let forces = pm_point(c, section, concrete, rebar);
        PmPoint {
            axial_lb: forces.axial_lb,
            moment_inlb: forces.moment_inlb,
            z,
            strain_at_extreme_tension: forces.extreme_tension_strain,
            phi: None,
        }
    };

    let nominal_points: Vec<PmPoint> = set.samples.iter().map(|s| nominal_at(s.c, s.z)).collect();
    if let Some(bad) = nominal_points
        .iter()
        .find(|p| !p.axial_lb.is_finite() || !p.moment_inlb.is_finite())
    {
        return Err(CalcError::calculation_failed(
            CALCULATION_TYPE,
            format!("non-finite point at Z = {}: P = {}, M = {}", bad.z, bad.axial_lb, bad.moment_inlb),
        ));
    }
    let design_points: Vec<PmPoint> = nominal_points
        .iter()
        .map(|point| design_point(point, pn_max, rebar.ey(), options))
        .collect();

    let key_points = KeyPoints {
        po_lb: po,
        pn_max_lb: pn_max,
        pnt_lb: pnt,
        zero_strain: nominal_at(strain.c_from_z(0.0), 0.0),
        balanced: nominal_at(strain.c_from_z(-1.0), -1.0),
        tension_control: nominal_at(strain.c_from_z(set.z_tension_control), set.z_tension_control),
        pure_bending: nominal_at(set.pure_moment.c, set.pure_moment.z),
        pure_tension: nominal_at(C_PURE_TENSION, strain.z_min()),
    };

    let converged = set.unconverged_roots == 0;
    if !converged {
        warn!(
            "{} root searches hit the iteration cap; curve points near them are approximate",
            set.unconverged_roots
        );
    }
    debug!(
        "P-M half curve: {} points, Po = {:.0} lb, Pn,max = {:.0} lb, Pnt = {:.0} lb",
        nominal_points.len(),
        po,
        pn_max,
        pnt
    );

    Ok(PmCurve {
        nominal_points,
        design_points,
        key_points,
        converged,
    })
}

/// Generate both halves of the interaction diagram.
pub fn generate_full_pm_curve(
    section: &SectionGeometry,
    concrete: &ConcreteMaterial,
    rebar: &RebarMaterial,
    options: &PmOptions,
) -> CalcResult<FullPmCurve> {
    let positive = generate_pm_curve(section, concrete, rebar, options)?;
    let negative = if section.is_symmetric() {
        debug!("section is symmetric; mirroring the positive half");
        positive.mirrored()
    } else {
        generate_pm_curve(&section.reversed()?, concrete, rebar, options)?.mirrored()
    };
    Ok(FullPmCurve { positive, negative })
}

/// Cap at Pn,max if requested, then scale by φ.
fn design_point(nominal: &PmPoint, pn_max: f64, ey: f64, options: &PmOptions) -> PmPoint {
    let phi = strength_reduction_factor(nominal.strain_at_extreme_tension, ey, options.confinement);
    let axial = if options.cap_compression {
        nominal.axial_lb.min(pn_max)
    } else {
        nominal.axial_lb
    };
    PmPoint {
        axial_lb: axial * phi,
        moment_inlb: nominal.moment_inlb * phi,
        phi: Some(phi),
        ..*nominal
    }
}

// ============================================================================
// Input / Result
// ============================================================================

/// Input for an interaction diagram calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "section": {
///     "width_in": 16.0,
///     "depth_in": 16.0,
///     "layers": [
///       { "distance_in": 2.5, "area_in2": 3.16 },
///       { "distance_in": 13.5, "area_in2": 3.16 }
///     ]
///   },
///   "concrete": { "fc_psi": 4000.0 },
///   "rebar": { "fy_psi": 60000.0 },
///   "options": { "points": 12, "confinement": "Tied" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmDiagramInput {
    /// User label (e.g., "C-1", "Shear wall pier")
    pub label: String,

    /// Cross-section and reinforcement layers
    pub section: SectionGeometry,

    /// Concrete material
    pub concrete: ConcreteMaterial,

    /// Longitudinal steel material
    pub rebar: RebarMaterial,

    /// Diagram settings
    #[serde(default)]
    pub options: PmOptions,
}

impl PmDiagramInput {
    /// Validate input parameters.
    ///
    /// Geometry and materials are validated on construction; only the
    /// options remain.
    pub fn validate(&self) -> CalcResult<()> {
        self.options.validate()
    }
}

/// Interaction diagram with summary capacities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmDiagramResult {
    /// Echo of the input label
    pub label: String,

    /// Both halves of the diagram
    pub curve: FullPmCurve,

    /// Total longitudinal steel area Ast (in²)
    pub total_steel_area_in2: f64,

    /// Longitudinal reinforcement ratio ρg
    pub reinforcement_ratio: f64,

    /// Stress block factor β1
    pub beta1: f64,

    /// Nominal axial strength at zero eccentricity Po (lb)
    pub po_lb: f64,

    /// Maximum nominal axial strength Pn,max (lb)
    pub pn_max_lb: f64,

    /// Maximum design axial strength φPn,max (lb)
    pub phi_pn_max_lb: f64,

    /// Nominal axial tensile strength Pnt (lb)
    pub pnt_lb: f64,

    /// Design axial tensile strength φPnt (lb)
    pub phi_pnt_lb: f64,

    /// Nominal moment at balanced failure, positive half (in-lb)
    pub balanced_moment_inlb: f64,

    /// Nominal moment at P = 0, positive half (in-lb)
    pub pure_bending_moment_inlb: f64,

    /// False when any root search stopped at its iteration cap
    pub converged: bool,
}

impl PmDiagramResult {
    /// Maximum design axial strength in kips
    pub fn phi_pn_max_kips(&self) -> Kips {
        Pounds(self.phi_pn_max_lb).into()
    }

    /// Nominal pure bending strength in kip-ft
    pub fn pure_bending_moment_kip_ft(&self) -> KipFt {
        InLb(self.pure_bending_moment_inlb).into()
    }
}

/// Calculate the full interaction diagram.
pub fn calculate(input: &PmDiagramInput) -> CalcResult<PmDiagramResult> {
    input.validate()?;
    debug!("calculating P-M diagram for '{}'", input.label);

    let curve = generate_full_pm_curve(&input.section, &input.concrete, &input.rebar, &input.options)?;
    let key = curve.positive.key_points;
    let phi_c = input.options.confinement.phi_compression_controlled();
    let phi_pure_tension = strength_reduction_factor(
        key.pure_tension.strain_at_extreme_tension,
        input.rebar.ey(),
        input.options.confinement,
    );

    Ok(PmDiagramResult {
        label: input.label.clone(),
        total_steel_area_in2: input.section.total_steel_area_in2(),
        reinforcement_ratio: input.section.reinforcement_ratio(),
        beta1: input.concrete.beta1(),
        po_lb: key.po_lb,
        pn_max_lb: key.pn_max_lb,
        phi_pn_max_lb: phi_c * key.pn_max_lb,
        pnt_lb: key.pnt_lb,
        phi_pnt_lb: phi_pure_tension * key.pnt_lb,
        balanced_moment_inlb: key.balanced.moment_inlb,
        pure_bending_moment_inlb: key.pure_bending.moment_inlb,
        converged: curve.converged(),
        curve,
    })
}
