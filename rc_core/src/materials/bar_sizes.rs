//! Standard Reinforcing Bar Sizes (ACI 318 Appendix A / ASTM A615)
//!
//! Nominal diameter, area and unit weight for inch-pound bar designations.
//! The table is built once on first access and never mutated.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Standard bar designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BarSize {
    #[serde(rename = "#3")]
    No3,
    #[serde(rename = "#4")]
    No4,
    #[serde(rename = "#5")]
    No5,
    #[serde(rename = "#6")]
    No6,
    #[serde(rename = "#7")]
    No7,
    #[serde(rename = "#8")]
    No8,
    #[serde(rename = "#9")]
    No9,
    #[serde(rename = "#10")]
    No10,
    #[serde(rename = "#11")]
    No11,
    #[serde(rename = "#14")]
    No14,
    #[serde(rename = "#18")]
    No18,
}

/// Nominal properties of a single bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarProperties {
    /// Designation number (e.g., 8 for #8)
    pub number: u8,
    /// Nominal diameter (in)
    pub diameter_in: f64,
    /// Nominal cross-sectional area (in²)
    pub area_in2: f64,
    /// Nominal weight (lb/ft)
    pub weight_plf: f64,
}

//                      number, diameter, area, weight
const BAR_DATA: [(BarSize, u8, f64, f64, f64); 11] = [
    (BarSize::No3, 3, 0.375, 0.11, 0.376),
    (BarSize::No4, 4, 0.500, 0.20, 0.668),
    (BarSize::No5, 5, 0.625, 0.31, 1.043),
    (BarSize::No6, 6, 0.750, 0.44, 1.503),
    (BarSize::No7, 7, 0.875, 0.60, 2.044),
    (BarSize::No8, 8, 1.000, 0.79, 2.670),
    (BarSize::No9, 9, 1.128, 1.00, 3.400),
    (BarSize::No10, 10, 1.270, 1.27, 4.303),
    (BarSize::No11, 11, 1.410, 1.56, 5.313),
    (BarSize::No14, 14, 1.693, 2.25, 7.650),
    (BarSize::No18, 18, 2.257, 4.00, 13.600),
];

static BAR_TABLE: Lazy<HashMap<BarSize, BarProperties>> = Lazy::new(|| {
    BAR_DATA
        .iter()
        .map(|&(size, number, diameter_in, area_in2, weight_plf)| {
            (
                size,
                BarProperties {
                    number,
                    diameter_in,
                    area_in2,
                    weight_plf,
                },
            )
        })
        .collect()
});

impl BarSize {
    /// All standard sizes, smallest first
    pub const ALL: [BarSize; 11] = [
        BarSize::No3,
        BarSize::No4,
        BarSize::No5,
        BarSize::No6,
        BarSize::No7,
        BarSize::No8,
        BarSize::No9,
        BarSize::No10,
        BarSize::No11,
        BarSize::No14,
        BarSize::No18,
    ];

    /// Look up a size by its designation number (3, 4, ... 18).
    pub fn from_number(number: u8) -> CalcResult<Self> {
        BarSize::ALL
            .iter()
            .copied()
            .find(|size| size.properties().number == number)
            .ok_or_else(|| CalcError::material_not_found(format!("#{} bar", number)))
    }

    /// Parse "#8", "8", "No. 8" or "No8".
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let digits = s
            .to_uppercase()
            .replace(['#', '.', ' '], "")
            .trim_start_matches("NO")
            .to_string();
        digits
            .parse::<u8>()
            .map_err(|_| CalcError::material_not_found(s))
            .and_then(BarSize::from_number)
    }

    /// Nominal properties from the shared table.
    pub fn properties(&self) -> &'static BarProperties {
        // Every variant is inserted when the table is built.
        &BAR_TABLE[self]
    }

    /// Nominal diameter (in)
    pub fn diameter_in(&self) -> f64 {
        self.properties().diameter_in
    }

    /// Nominal area (in²)
    pub fn area_in2(&self) -> f64 {
        self.properties().area_in2
    }

    /// Nominal weight (lb/ft)
    pub fn weight_plf(&self) -> f64 {
        self.properties().weight_plf
    }

    /// Total area of `count` bars (in²)
    pub fn area_of(&self, count: u32) -> f64 {
        self.area_in2() * f64::from(count)
    }
}

impl std::fmt::Display for BarSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.properties().number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_complete() {
        for size in BarSize::ALL {
            let props = size.properties();
            assert!(props.area_in2 > 0.0);
            assert!(props.diameter_in > 0.0);
        }
        assert_eq!(BAR_TABLE.len(), BarSize::ALL.len());
    }

    #[test]
    fn test_no8_bar() {
        let bar = BarSize::No8;
        assert_eq!(bar.diameter_in(), 1.0);
        assert_eq!(bar.area_in2(), 0.79);
        assert_eq!(bar.weight_plf(), 2.67);
        assert!((bar.area_of(4) - 3.16).abs() < 1e-12);
    }

    #[test]
    fn test_from_number() {
        assert_eq!(BarSize::from_number(11).unwrap(), BarSize::No11);
        assert_eq!(BarSize::from_number(18).unwrap(), BarSize::No18);
        let err = BarSize::from_number(12).unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(BarSize::from_str_flexible("#5").unwrap(), BarSize::No5);
        assert_eq!(BarSize::from_str_flexible("No. 9").unwrap(), BarSize::No9);
        assert_eq!(BarSize::from_str_flexible("14").unwrap(), BarSize::No14);
        assert!(BarSize::from_str_flexible("W14X90").is_err());
    }

    #[test]
    fn test_display_and_serialization() {
        assert_eq!(BarSize::No10.to_string(), "#10");
        let json = serde_json::to_string(&BarSize::No4).unwrap();
        assert_eq!(json, "\"#4\"");
        let roundtrip: BarSize = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, BarSize::No4);
    }
}
