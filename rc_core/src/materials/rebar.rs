//! Reinforcing Steel Material
//!
//! A single flat steel value type. Plain steel and deformed reinforcing bars
//! share the same elastic-perfectly-plastic model and differ only by a
//! [`SteelKind`] tag; bar dimensions live in [`super::bar_sizes`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Modulus of elasticity for nonprestressed bars (psi), ACI 318 §20.2.2.2
pub const DEFAULT_ES_PSI: f64 = 29_000_000.0;

/// Default yield strength (psi), Grade 60 bar
pub const DEFAULT_FY_PSI: f64 = 60_000.0;

/// Capability tag for steel materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteelKind {
    /// Plain steel (no standard bar designations)
    PlainSteel,
    /// Deformed reinforcing bar (ASTM A615), sized from the bar table
    #[default]
    Reinforcing,
}

impl SteelKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SteelKind::PlainSteel => "Plain Steel",
            SteelKind::Reinforcing => "Reinforcing Bar",
        }
    }
}

/// Standard ASTM A615 bar grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RebarGrade {
    /// Grade 40 (fy = 40 ksi)
    #[serde(rename = "Gr40")]
    Grade40,
    /// Grade 60 (fy = 60 ksi)
    #[serde(rename = "Gr60")]
    Grade60,
    /// Grade 75 (fy = 75 ksi)
    #[serde(rename = "Gr75")]
    Grade75,
    /// Grade 80 (fy = 80 ksi)
    #[serde(rename = "Gr80")]
    Grade80,
}

impl RebarGrade {
    /// All grades for UI selection
    pub const ALL: [RebarGrade; 4] = [
        RebarGrade::Grade40,
        RebarGrade::Grade60,
        RebarGrade::Grade75,
        RebarGrade::Grade80,
    ];

    /// Specified yield strength (psi)
    pub fn fy_psi(&self) -> f64 {
        match self {
            RebarGrade::Grade40 => 40_000.0,
            RebarGrade::Grade60 => 60_000.0,
            RebarGrade::Grade75 => 75_000.0,
            RebarGrade::Grade80 => 80_000.0,
        }
    }
}

impl std::fmt::Display for RebarGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Grade {:.0}", self.fy_psi() / 1000.0)
    }
}

/// Steel material for strength design.
///
/// `ey` and `eu` are derived at construction. `eu` is stored as a positive
/// magnitude; the strain model applies the tension sign.
///
/// ## JSON Example
///
/// ```json
/// { "fy_psi": 60000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RebarSpec")]
pub struct RebarMaterial {
    kind: SteelKind,
    fy_psi: f64,
    es_psi: f64,
    ey: f64,
    eu: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RebarSpec {
    #[serde(default)]
    kind: SteelKind,
    fy_psi: f64,
    #[serde(default = "default_es")]
    es_psi: f64,
    #[serde(default)]
    eu: Option<f64>,
}

fn default_es() -> f64 {
    DEFAULT_ES_PSI
}

impl TryFrom<RebarSpec> for RebarMaterial {
    type Error = CalcError;

    fn try_from(spec: RebarSpec) -> CalcResult<Self> {
        let steel = RebarMaterial::build(spec.kind, spec.fy_psi, spec.es_psi)?;
        match spec.eu {
            Some(eu) => steel.with_ultimate_strain(eu),
            None => Ok(steel),
        }
    }
}

impl RebarMaterial {
    /// Reinforcing bar with Es = 29,000 ksi.
    ///
    /// ```rust
    /// use rc_core::materials::RebarMaterial;
    ///
    /// let rebar = RebarMaterial::new(60_000.0).unwrap();
    /// assert!((rebar.ey() - 0.002069).abs() < 1e-6);
    /// assert_eq!(rebar.eu(), 0.12);
    /// ```
    pub fn new(fy_psi: f64) -> CalcResult<Self> {
        Self::build(SteelKind::Reinforcing, fy_psi, DEFAULT_ES_PSI)
    }

    /// Reinforcing bar of a standard grade.
    pub fn from_grade(grade: RebarGrade) -> Self {
        let fy = grade.fy_psi();
        RebarMaterial {
            kind: SteelKind::Reinforcing,
            fy_psi: fy,
            es_psi: DEFAULT_ES_PSI,
            ey: fy / DEFAULT_ES_PSI,
            eu: ultimate_strain(fy),
        }
    }

    /// Plain steel (e.g., embedded plates or shapes treated as a layer).
    pub fn plain_steel(fy_psi: f64, es_psi: f64) -> CalcResult<Self> {
        Self::build(SteelKind::PlainSteel, fy_psi, es_psi)
    }

    fn build(kind: SteelKind, fy_psi: f64, es_psi: f64) -> CalcResult<Self> {
        if !fy_psi.is_finite() || fy_psi <= 0.0 {
            return Err(CalcError::invalid_input(
                "fy_psi",
                fy_psi.to_string(),
                "Yield strength must be positive",
            ));
        }
        if !es_psi.is_finite() || es_psi <= 0.0 {
            return Err(CalcError::invalid_input(
                "es_psi",
                es_psi.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        Ok(RebarMaterial {
            kind,
            fy_psi,
            es_psi,
            ey: fy_psi / es_psi,
            eu: ultimate_strain(fy_psi),
        })
    }

    /// Copy of this material with an overridden ultimate strain magnitude.
    ///
    /// Historic bars may warrant values well below the A615 defaults.
    pub fn with_ultimate_strain(self, eu: f64) -> CalcResult<Self> {
        if !eu.is_finite() || eu <= self.ey {
            return Err(CalcError::invalid_input(
                "eu",
                eu.to_string(),
                "Ultimate strain must be a positive magnitude larger than the yield strain",
            ));
        }
        Ok(RebarMaterial { eu, ..self })
    }

    /// Capability tag
    pub fn kind(&self) -> SteelKind {
        self.kind
    }

    /// Specified yield strength fy (psi)
    pub fn fy_psi(&self) -> f64 {
        self.fy_psi
    }

    /// Elastic modulus Es (psi)
    pub fn es_psi(&self) -> f64 {
        self.es_psi
    }

    /// Yield strain εy = fy/Es
    pub fn ey(&self) -> f64 {
        self.ey
    }

    /// Ultimate tensile strain magnitude εu
    pub fn eu(&self) -> f64 {
        self.eu
    }

    /// Get display name (e.g., "Reinforcing Bar, fy = 60 ksi")
    pub fn display_name(&self) -> String {
        format!("{}, fy = {:.0} ksi", self.kind.display_name(), self.fy_psi / 1000.0)
    }
}

impl Default for RebarMaterial {
    fn default() -> Self {
        RebarMaterial::from_grade(RebarGrade::Grade60)
    }
}

/// Ultimate strain magnitude for ASTM A615 material by yield strength band.
pub fn ultimate_strain(fy_psi: f64) -> f64 {
    if fy_psi <= 40_000.0 {
        0.155
    } else if fy_psi <= 60_000.0 {
        0.12
    } else if fy_psi <= 75_000.0 {
        0.07
    } else {
        0.05
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ultimate_strain_bands() {
        assert_eq!(ultimate_strain(36_000.0), 0.155);
        assert_eq!(ultimate_strain(40_000.0), 0.155);
        assert_eq!(ultimate_strain(60_000.0), 0.12);
        assert_eq!(ultimate_strain(75_000.0), 0.07);
        assert_eq!(ultimate_strain(80_000.0), 0.05);
    }

    #[test]
    fn test_grade_60() {
        let rebar = RebarMaterial::from_grade(RebarGrade::Grade60);
        assert_eq!(rebar.fy_psi(), 60_000.0);
        assert_relative_eq!(rebar.ey(), 60_000.0 / 29_000_000.0, epsilon = 1e-15);
        assert_eq!(rebar.kind(), SteelKind::Reinforcing);
        assert_eq!(rebar, RebarMaterial::new(60_000.0).unwrap());
        assert_eq!(rebar, RebarMaterial::default());
    }

    #[test]
    fn test_plain_steel() {
        let plate = RebarMaterial::plain_steel(36_000.0, 29_000_000.0).unwrap();
        assert_eq!(plate.kind(), SteelKind::PlainSteel);
        assert!(plate.display_name().starts_with("Plain Steel"));
    }

    #[test]
    fn test_ultimate_strain_override() {
        let rebar = RebarMaterial::default().with_ultimate_strain(0.02).unwrap();
        assert_eq!(rebar.eu(), 0.02);
        assert!(RebarMaterial::default().with_ultimate_strain(0.001).is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(RebarMaterial::new(0.0).is_err());
        assert!(RebarMaterial::plain_steel(36_000.0, -1.0).is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let rebar: RebarMaterial = serde_json::from_str(r#"{ "fy_psi": 75000.0 }"#).unwrap();
        assert_eq!(rebar.es_psi(), DEFAULT_ES_PSI);
        assert_eq!(rebar.eu(), 0.07);
        assert_eq!(rebar.kind(), SteelKind::Reinforcing);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let rebar = RebarMaterial::new(60_000.0).unwrap().with_ultimate_strain(0.05).unwrap();
        let json = serde_json::to_string(&rebar).unwrap();
        let roundtrip: RebarMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(rebar, roundtrip);
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(RebarGrade::Grade75.to_string(), "Grade 75");
        let json = serde_json::to_string(&RebarGrade::Grade60).unwrap();
        assert_eq!(json, "\"Gr60\"");
    }
}
