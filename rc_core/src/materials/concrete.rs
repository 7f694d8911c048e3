//! Concrete Material (ACI 318)
//!
//! Immutable concrete properties. Everything derived from f'c (beta1, Ec, fr)
//! is computed once in the constructor and stored.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default limiting concrete compression strain (ACI 318 §22.2.2.1)
pub const DEFAULT_ECU: f64 = 0.003;

/// Equivalent rectangular stress block intensity factor (ACI 318 §22.2.2.4.1)
pub const STRESS_BLOCK_FACTOR: f64 = 0.85;

/// Concrete material for strength design.
///
/// ## JSON Example
///
/// Only `fc_psi` is required; `lambda` and `ecu` default to 1.0 and 0.003.
/// Derived fields are recomputed on deserialization, so stale values in the
/// input are ignored.
///
/// ```json
/// { "fc_psi": 5000.0, "lambda": 0.75 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConcreteSpec")]
pub struct ConcreteMaterial {
    fc_psi: f64,
    lambda: f64,
    ecu: f64,
    beta1: f64,
    ec_psi: f64,
    fr_psi: f64,
}

/// Raw user-facing description of a concrete mix.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ConcreteSpec {
    fc_psi: f64,
    #[serde(default = "default_lambda")]
    lambda: f64,
    #[serde(default = "default_ecu")]
    ecu: f64,
}

fn default_lambda() -> f64 {
    1.0
}

fn default_ecu() -> f64 {
    DEFAULT_ECU
}

impl TryFrom<ConcreteSpec> for ConcreteMaterial {
    type Error = CalcError;

    fn try_from(spec: ConcreteSpec) -> CalcResult<Self> {
        ConcreteMaterial::with_properties(spec.fc_psi, spec.lambda, spec.ecu)
    }
}

impl ConcreteMaterial {
    /// Normal-weight concrete with the default crushing strain.
    ///
    /// ```rust
    /// use rc_core::materials::ConcreteMaterial;
    ///
    /// let concrete = ConcreteMaterial::new(4000.0).unwrap();
    /// assert_eq!(concrete.beta1(), 0.85);
    /// ```
    pub fn new(fc_psi: f64) -> CalcResult<Self> {
        Self::with_properties(fc_psi, 1.0, DEFAULT_ECU)
    }

    /// Lightweight concrete with modification factor λ (ACI 318 Table 19.2.4.2).
    pub fn lightweight(fc_psi: f64, lambda: f64) -> CalcResult<Self> {
        Self::with_properties(fc_psi, lambda, DEFAULT_ECU)
    }

    /// Fully specified concrete.
    pub fn with_properties(fc_psi: f64, lambda: f64, ecu: f64) -> CalcResult<Self> {
        if !fc_psi.is_finite() || fc_psi <= 0.0 {
            return Err(CalcError::invalid_input(
                "fc_psi",
                fc_psi.to_string(),
                "Concrete compressive strength must be positive",
            ));
        }
        if !(lambda > 0.0 && lambda <= 1.0) {
            return Err(CalcError::invalid_input(
                "lambda",
                lambda.to_string(),
                "Lightweight factor must be in (0, 1]",
            ));
        }
        if !ecu.is_finite() || ecu <= 0.0 {
            return Err(CalcError::invalid_input(
                "ecu",
                ecu.to_string(),
                "Crushing strain must be a positive magnitude",
            ));
        }

        Ok(ConcreteMaterial {
            fc_psi,
            lambda,
            ecu,
            beta1: beta1(fc_psi),
            ec_psi: 57_000.0 * fc_psi.sqrt(),
            fr_psi: 7.5 * lambda * fc_psi.sqrt(),
        })
    }

    /// Specified compressive strength f'c (psi)
    pub fn fc_psi(&self) -> f64 {
        self.fc_psi
    }

    /// Lightweight concrete modification factor λ
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Limiting compression strain εcu (positive magnitude)
    pub fn ecu(&self) -> f64 {
        self.ecu
    }

    /// Stress block depth factor β1
    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    /// Elastic modulus Ec = 57000√f'c (psi), ACI 318 Eq. (19.2.2.1.b)
    pub fn ec_psi(&self) -> f64 {
        self.ec_psi
    }

    /// Modulus of rupture fr = 7.5λ√f'c (psi), ACI 318 Eq. (19.2.3.1)
    pub fn fr_psi(&self) -> f64 {
        self.fr_psi
    }

    /// Elastic modulus from unit weight, ACI 318 Eq. (19.2.2.1.a).
    ///
    /// `wc_pcf` must be between 90 and 160 pcf.
    pub fn ec_from_unit_weight(&self, wc_pcf: f64) -> CalcResult<f64> {
        if !(90.0..=160.0).contains(&wc_pcf) {
            return Err(CalcError::invalid_input(
                "wc_pcf",
                wc_pcf.to_string(),
                "Unit weight must be between 90 and 160 pcf",
            ));
        }
        Ok(wc_pcf.powf(1.5) * 33.0 * self.fc_psi.sqrt())
    }

    /// Stress block intensity 0.85f'c (psi)
    pub fn block_stress_psi(&self) -> f64 {
        STRESS_BLOCK_FACTOR * self.fc_psi
    }

    /// Get display name (e.g., "f'c = 4000 psi")
    pub fn display_name(&self) -> String {
        if self.lambda < 1.0 {
            format!("f'c = {:.0} psi (λ = {:.2})", self.fc_psi, self.lambda)
        } else {
            format!("f'c = {:.0} psi", self.fc_psi)
        }
    }
}

/// β1 per ACI 318 Table 22.2.2.4.3.
pub fn beta1(fc_psi: f64) -> f64 {
    if fc_psi <= 4000.0 {
        0.85
    } else if fc_psi >= 8000.0 {
        0.65
    } else {
        0.85 - 0.05 * (fc_psi - 4000.0) / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_beta1_branches() {
        assert_eq!(beta1(3000.0), 0.85);
        assert_eq!(beta1(4000.0), 0.85);
        assert_relative_eq!(beta1(5000.0), 0.80, epsilon = 1e-12);
        assert_relative_eq!(beta1(6000.0), 0.75, epsilon = 1e-12);
        assert_eq!(beta1(8000.0), 0.65);
        assert_eq!(beta1(12000.0), 0.65);
    }

    #[test]
    fn test_derived_properties() {
        let concrete = ConcreteMaterial::new(4000.0).unwrap();
        // Ec = 57000 * sqrt(4000) = 3,604,997 psi
        assert_relative_eq!(concrete.ec_psi(), 3_604_996.5, epsilon = 1.0);
        // fr = 7.5 * sqrt(4000) = 474.3 psi
        assert_relative_eq!(concrete.fr_psi(), 474.34, epsilon = 0.01);
        assert_eq!(concrete.ecu(), 0.003);
        assert_eq!(concrete.block_stress_psi(), 3400.0);
    }

    #[test]
    fn test_lightweight_rupture_modulus() {
        let lw = ConcreteMaterial::lightweight(4000.0, 0.75).unwrap();
        let nw = ConcreteMaterial::new(4000.0).unwrap();
        assert_relative_eq!(lw.fr_psi(), 0.75 * nw.fr_psi(), epsilon = 1e-9);
        assert!(lw.display_name().contains("λ"));
    }

    #[test]
    fn test_ec_from_unit_weight() {
        let concrete = ConcreteMaterial::new(4000.0).unwrap();
        // The two Ec forms agree near wc = 144 pcf
        let ec = concrete.ec_from_unit_weight(143.96).unwrap();
        assert_relative_eq!(ec, concrete.ec_psi(), max_relative = 1e-3);
        assert!(concrete.ec_from_unit_weight(200.0).is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(ConcreteMaterial::new(0.0).is_err());
        assert!(ConcreteMaterial::new(f64::NAN).is_err());
        assert!(ConcreteMaterial::lightweight(4000.0, 1.2).is_err());
        assert!(ConcreteMaterial::lightweight(4000.0, 0.0).is_err());
        assert!(ConcreteMaterial::with_properties(4000.0, 1.0, -0.003).is_err());
    }

    #[test]
    fn test_deserialize_recomputes_derived_fields() {
        let json = r#"{ "fc_psi": 6000.0, "beta1": 0.99 }"#;
        let concrete: ConcreteMaterial = serde_json::from_str(json).unwrap();
        assert_relative_eq!(concrete.beta1(), 0.75, epsilon = 1e-12);
        assert_eq!(concrete.lambda(), 1.0);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let json = r#"{ "fc_psi": -1.0 }"#;
        assert!(serde_json::from_str::<ConcreteMaterial>(json).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let concrete = ConcreteMaterial::lightweight(5000.0, 0.85).unwrap();
        let json = serde_json::to_string(&concrete).unwrap();
        let roundtrip: ConcreteMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(concrete, roundtrip);
    }
}
