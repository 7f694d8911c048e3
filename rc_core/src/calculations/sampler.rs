//! # Curve Sampler
//!
//! Chooses the strain states at which one half of the interaction diagram
//! is evaluated. Samples are denser where the curve bends:
//!
//! ```text
//!  region                      sampled by
//!  Po .. Pn,max                five equal force steps (root finder)
//!  Pn,max .. P(Z = 0)          `points - 4` force targets (root finder)
//!  Z = 0 .. balanced           cardinal Z = -0.125 .. -1
//!  εt = -0.003 .. -0.005       three strain limits
//!  tension control .. M only   `points / 2` Z values
//!  M only .. pure tension      `points - 1` neutral axis depths
//! ```
//!
//! The result is ordered from pure compression to pure tension with P
//! non-increasing. P(c) drops by 0.85f'c·As each time the stress block
//! reaches a layer, so a dense sample can rise in P just past such a step;
//! those samples are dropped. Landmark states (the cardinal values, Pn,max,
//! pure bending and the two ends) are never dropped.

use log::{debug, warn};

use super::forces::{pure_compression_capacity, sum_forces};
use super::phi::TENSION_CONTROLLED_STRAIN;
use super::root_finder::{z_at_force, z_at_pure_moment, BisectionSettings, RootResult};
use super::strain::{StrainModel, C_PURE_COMPRESSION, C_PURE_TENSION};
use crate::errors::CalcResult;
use crate::materials::{ConcreteMaterial, RebarMaterial};
use crate::section::SectionGeometry;

/// Z values between zero strain and balanced failure
pub const CARDINAL_Z_VALUES: [f64; 8] = [-0.125, -0.25, -0.375, -0.5, -0.625, -0.75, -0.875, -1.0];

/// Extreme tension strains always sampled (compression positive)
pub const CARDINAL_STRAINS: [f64; 3] = [-0.003, -0.004, TENSION_CONTROLLED_STRAIN];

/// Force steps between Po and Pn,max
const COMPRESSION_CAP_STEPS: usize = 5;

/// One strain state on the diagram.
///
/// `c` is authoritative. `z` is clamped to `Z_min`, so very shallow neutral
/// axes share `Z_min` but keep their own `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZSample {
    pub z: f64,
    pub c: f64,
    /// Always kept on the curve
    pub landmark: bool,
}

/// Ordered samples plus the landmarks found along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    /// Pure compression first, pure tension last
    pub samples: Vec<ZSample>,
    /// Root at P = 0
    pub pure_moment: RootResult,
    /// Z at εt = -0.005
    pub z_tension_control: f64,
    /// Root searches that stopped at the iteration cap
    pub unconverged_roots: usize,
    /// Samples dropped because P rose past a stress block step
    pub dropped_rises: usize,
}

/// Builds the sample list for one section orientation.
pub struct CurveSampler<'a> {
    section: &'a SectionGeometry,
    concrete: &'a ConcreteMaterial,
    rebar: &'a RebarMaterial,
    settings: BisectionSettings,
    strain: StrainModel,
    unconverged_roots: usize,
}

impl<'a> CurveSampler<'a> {
    pub fn new(
        section: &'a SectionGeometry,
        concrete: &'a ConcreteMaterial,
        rebar: &'a RebarMaterial,
        settings: BisectionSettings,
    ) -> Self {
        CurveSampler {
            section,
            concrete,
            rebar,
            settings,
            strain: StrainModel::new(section, concrete, rebar),
            unconverged_roots: 0,
        }
    }

    /// Sample the half diagram with `points` as the density parameter.
    ///
    /// `pn_max_lb` is the axial cap; the compression region is refined
    /// around it.
    pub fn sample(mut self, points: usize, pn_max_lb: f64) -> CalcResult<SampleSet> {
        let mut samples = Vec::new();

        samples.push(self.sample_at_c(C_PURE_COMPRESSION).pinned());
        for (k, target) in self.compression_targets(points, pn_max_lb).into_iter().enumerate() {
            let root = self.root_at_force(target)?;
            samples.push(ZSample {
                z: root.z,
                c: root.c,
                // First target after the cap steps is Pn,max itself
                landmark: k == COMPRESSION_CAP_STEPS - 1,
            });
        }

        samples.push(self.sample_at_z(0.0).pinned());
        for z in CARDINAL_Z_VALUES {
            samples.push(self.sample_at_z(z).pinned());
        }
        for strain in CARDINAL_STRAINS {
            samples.push(self.sample_at_z(self.strain.z_from_strain(strain)).pinned());
        }

        let pure_moment = z_at_pure_moment(self.section, self.concrete, self.rebar, &self.settings)?;
        self.note_convergence(&pure_moment, 0.0);
        let z_tension_control = self.strain.z_from_strain(TENSION_CONTROLLED_STRAIN);

        let flexure_count = (points / 2).max(1);
        let step = (z_tension_control - pure_moment.z) / flexure_count as f64;
        for k in 1..flexure_count {
            samples.push(self.sample_at_z(z_tension_control - step * k as f64));
        }
        samples.push(ZSample {
            z: pure_moment.z,
            c: pure_moment.c,
            landmark: true,
        });

        samples.push(self.sample_at_c(C_PURE_TENSION).pinned());
        for c in linspace(C_PURE_TENSION, pure_moment.c, points.saturating_sub(1)) {
            samples.push(self.sample_at_c(c));
        }

        let generated = samples.len();
        sort_and_dedup(&mut samples);
        let (samples, dropped_rises) = self.drop_rises(samples);
        debug!(
            "sampled {} strain states ({} generated, {} dropped at stress block steps), Z at M only = {:.4}, Z at tension control = {:.4}",
            samples.len(),
            generated,
            dropped_rises,
            pure_moment.z,
            z_tension_control
        );

        Ok(SampleSet {
            samples,
            pure_moment,
            z_tension_control,
            unconverged_roots: self.unconverged_roots,
            dropped_rises,
        })
    }

    /// Force targets from Po down to P(Z = 0); Po itself is excluded.
    fn compression_targets(&self, points: usize, pn_max_lb: f64) -> Vec<f64> {
        let po = pure_compression_capacity(self.section, self.concrete, self.rebar);
        let p_zero_strain = sum_forces(self.strain.c_from_z(0.0), self.section, self.concrete, self.rebar);
        let step = (po - pn_max_lb) / COMPRESSION_CAP_STEPS as f64;

        let mut targets: Vec<f64> = (1..COMPRESSION_CAP_STEPS).map(|k| po - step * k as f64).collect();
        targets.extend(linspace(pn_max_lb, p_zero_strain, points.saturating_sub(4)));
        targets
    }

    fn root_at_force(&mut self, target: f64) -> CalcResult<RootResult> {
        let root = z_at_force(target, self.section, self.concrete, self.rebar, &self.settings)?;
        self.note_convergence(&root, target);
        Ok(root)
    }

    fn note_convergence(&mut self, root: &RootResult, target: f64) {
        if !root.converged {
            self.unconverged_roots += 1;
            warn!(
                "root search for P = {:.1} lb stopped after {} iterations at Z = {:.6}",
                target, root.iterations, root.z
            );
        }
    }

    /// Keep P non-increasing along the sorted samples.
    ///
    /// A sample above the last kept P is dropped, unless it is a landmark;
    /// then the ordinary samples it rises above are dropped instead.
    fn drop_rises(&self, samples: Vec<ZSample>) -> (Vec<ZSample>, usize) {
        let mut kept: Vec<(ZSample, f64)> = Vec::with_capacity(samples.len());
        let mut dropped = 0;

        for sample in samples {
            let p = sum_forces(sample.c, self.section, self.concrete, self.rebar);
            if kept.last().is_some_and(|&(_, last_p)| p > last_p) {
                if !sample.landmark {
                    dropped += 1;
                    continue;
                }
                while kept.last().is_some_and(|&(last, last_p)| !last.landmark && last_p < p) {
                    kept.pop();
                    dropped += 1;
                }
                if let Some(&(last, last_p)) = kept.last() {
                    if last_p < p {
                        warn!(
                            "landmarks at Z = {:.4} and Z = {:.4} straddle a stress block step; P rises by {:.1} lb",
                            last.z,
                            sample.z,
                            p - last_p
                        );
                    }
                }
            }
            kept.push((sample, p));
        }

        (kept.into_iter().map(|(sample, _)| sample).collect(), dropped)
    }

    fn sample_at_z(&self, z: f64) -> ZSample {
        ZSample {
            z,
            c: self.strain.c_from_z(z),
            landmark: false,
        }
    }

    fn sample_at_c(&self, c: f64) -> ZSample {
        ZSample {
            z: self.strain.z_from_c(c).max(self.strain.z_min()),
            c,
            landmark: false,
        }
    }
}

impl ZSample {
    fn pinned(self) -> Self {
        ZSample { landmark: true, ..self }
    }
}

/// Order from pure compression to pure tension and drop repeats.
fn sort_and_dedup(samples: &mut Vec<ZSample>) {
    samples.sort_by(|a, b| b.z.total_cmp(&a.z).then(b.c.total_cmp(&a.c)));
    samples.dedup_by(|next, kept| {
        let repeat =
            next.c == kept.c || (kept.c.is_finite() && (next.c - kept.c).abs() <= 1e-9 * kept.c.max(1.0));
        if repeat {
            kept.landmark |= next.landmark;
        }
        repeat
    });
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        }
    }
}
