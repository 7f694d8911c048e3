//! # Unit Types
//!
//! Newtype wrappers for the handful of units the strength engine reports in.
//! The calculations themselves run on raw `f64` values in psi, inches,
//! pounds and inch-pounds; these wrappers exist so reporting code cannot mix
//! up pounds and kips or inch-pounds and kip-feet.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::units::{InLb, KipFt, Kips, Pounds};
//!
//! let p: Kips = Pounds(250_000.0).into();
//! assert_eq!(p.0, 250.0);
//!
//! let m: KipFt = InLb(1_200_000.0).into();
//! assert_eq!(m.0, 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Force in kips (1 kip = 1000 pounds)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kips(pub f64);

impl From<Pounds> for Kips {
    fn from(lb: Pounds) -> Self {
        Kips(lb.0 / 1000.0)
    }
}

impl From<Kips> for Pounds {
    fn from(k: Kips) -> Self {
        Pounds(k.0 * 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in inch-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InLb(pub f64);

/// Moment in kip-feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KipFt(pub f64);

impl From<InLb> for KipFt {
    fn from(inlb: InLb) -> Self {
        KipFt(inlb.0 / 12_000.0)
    }
}

impl From<KipFt> for InLb {
    fn from(kipft: KipFt) -> Self {
        InLb(kipft.0 * 12_000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Pounds);
impl_arithmetic!(Kips);
impl_arithmetic!(InLb);
impl_arithmetic!(KipFt);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds_to_kips() {
        let k: Kips = Pounds(1500.0).into();
        assert_eq!(k.0, 1.5);
        let lb: Pounds = k.into();
        assert_eq!(lb.0, 1500.0);
    }

    #[test]
    fn test_moment_conversions() {
        let kip_ft: KipFt = InLb(24_000.0).into();
        assert_eq!(kip_ft.0, 2.0);

        let in_lb: InLb = kip_ft.into();
        assert_eq!(in_lb.0, 24_000.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Kips(10.0);
        let b = Kips(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 0.65).0, 6.5);
        assert_eq!((-a).value(), -10.0);
    }

    #[test]
    fn test_serialization() {
        let p = Kips(512.5);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "512.5");

        let roundtrip: Kips = serde_json::from_str(&json).unwrap();
        assert_eq!(p, roundtrip);
    }
}
