//! # Section Geometry
//!
//! Rectangular concrete section with ordered layers of longitudinal steel.
//!
//! Layer distances are measured from the extreme compression fiber. Layers
//! are kept sorted by increasing distance, so the last layer is always the
//! extreme tension layer (`d`) and the first the extreme compression layer
//! (`d'`).
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::BarSize;
//! use rc_core::section::SectionGeometry;
//!
//! // 16" square column, 1.5" clear cover, 4 layers of 2-#8
//! let section = SectionGeometry::with_equal_layers(16.0, 16.0, 1.5, 4, BarSize::No8, 2).unwrap();
//!
//! assert_eq!(section.layers().len(), 4);
//! assert_eq!(section.d(), 14.0);
//! assert_eq!(section.d_prime(), 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::BarSize;

/// A single layer of longitudinal steel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementLayer {
    /// Depth from the extreme compression fiber (in)
    pub distance_in: f64,
    /// Total steel area in the layer (in²)
    pub area_in2: f64,
}

impl ReinforcementLayer {
    /// Create a layer from a distance and a total area.
    pub fn new(distance_in: f64, area_in2: f64) -> Self {
        ReinforcementLayer { distance_in, area_in2 }
    }

    /// Create a layer of `count` bars of one size.
    pub fn from_bars(distance_in: f64, size: BarSize, count: u32) -> Self {
        ReinforcementLayer {
            distance_in,
            area_in2: size.area_of(count),
        }
    }
}

/// Layer described by bar size and count instead of area.
///
/// ## JSON Example
///
/// ```json
/// { "distance_in": 2.5, "size": "#8", "count": 4 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayer {
    /// Depth from the extreme compression fiber (in)
    pub distance_in: f64,
    /// Bar designation
    pub size: BarSize,
    /// Number of bars in the layer
    pub count: u32,
}

impl From<BarLayer> for ReinforcementLayer {
    fn from(layer: BarLayer) -> Self {
        ReinforcementLayer::from_bars(layer.distance_in, layer.size, layer.count)
    }
}

/// Rectangular reinforced concrete section.
///
/// Built only through validating constructors and never mutated afterwards.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_in": 12.0,
///   "depth_in": 24.0,
///   "layers": [
///     { "distance_in": 2.5, "area_in2": 1.58 },
///     { "distance_in": 21.5, "area_in2": 1.58 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionSpec")]
pub struct SectionGeometry {
    width_in: f64,
    depth_in: f64,
    layers: Vec<ReinforcementLayer>,
}

#[derive(Debug, Clone, Deserialize)]
struct SectionSpec {
    width_in: f64,
    depth_in: f64,
    layers: Vec<ReinforcementLayer>,
}

impl TryFrom<SectionSpec> for SectionGeometry {
    type Error = CalcError;

    fn try_from(spec: SectionSpec) -> CalcResult<Self> {
        SectionGeometry::new(spec.width_in, spec.depth_in, spec.layers)
    }
}

impl SectionGeometry {
    /// Validate and build a section. Layers may be given in any order.
    pub fn new(width_in: f64, depth_in: f64, mut layers: Vec<ReinforcementLayer>) -> CalcResult<Self> {
        if !width_in.is_finite() || width_in <= 0.0 {
            return Err(CalcError::invalid_geometry(format!(
                "Section width must be positive, got {}",
                width_in
            )));
        }
        if !depth_in.is_finite() || depth_in <= 0.0 {
            return Err(CalcError::invalid_geometry(format!(
                "Section depth must be positive, got {}",
                depth_in
            )));
        }
        if layers.is_empty() {
            return Err(CalcError::invalid_geometry(
                "Section has no reinforcement layers",
            ));
        }
        for (i, layer) in layers.iter().enumerate() {
            if !(0.0..=depth_in).contains(&layer.distance_in) {
                return Err(CalcError::invalid_geometry(format!(
                    "Layer {} at {} in lies outside the section depth [0, {}]",
                    i, layer.distance_in, depth_in
                )));
            }
            if !layer.area_in2.is_finite() || layer.area_in2 <= 0.0 {
                return Err(CalcError::invalid_geometry(format!(
                    "Layer {} has non-positive steel area {}",
                    i, layer.area_in2
                )));
            }
        }

        layers.sort_by(|a, b| a.distance_in.total_cmp(&b.distance_in));

        // Strain compatibility is measured from d; all steel on the
        // compression face leaves no tension layer to measure from.
        if layers.last().map_or(true, |layer| layer.distance_in <= 0.0) {
            return Err(CalcError::invalid_geometry(
                "Extreme tension layer must lie below the compression face (d > 0)",
            ));
        }

        Ok(SectionGeometry {
            width_in,
            depth_in,
            layers,
        })
    }

    /// Build a section from bar sizes and counts.
    pub fn from_bar_layers(width_in: f64, depth_in: f64, layers: &[BarLayer]) -> CalcResult<Self> {
        for layer in layers {
            if layer.count == 0 {
                return Err(CalcError::invalid_geometry(format!(
                    "Layer at {} in has zero bars",
                    layer.distance_in
                )));
            }
        }
        Self::new(
            width_in,
            depth_in,
            layers.iter().copied().map(ReinforcementLayer::from).collect(),
        )
    }

    /// Section with `layer_count` equally spaced layers of identical bars.
    ///
    /// The outer layers sit at clear cover plus half a bar diameter from each
    /// face.
    pub fn with_equal_layers(
        width_in: f64,
        depth_in: f64,
        clear_cover_in: f64,
        layer_count: usize,
        size: BarSize,
        bars_per_layer: u32,
    ) -> CalcResult<Self> {
        if bars_per_layer == 0 {
            return Err(CalcError::invalid_geometry("Layers must contain at least one bar"));
        }
        let distances = equal_layer_distances(layer_count, size.diameter_in(), clear_cover_in, depth_in)?;
        Self::new(
            width_in,
            depth_in,
            distances
                .into_iter()
                .map(|distance| ReinforcementLayer::from_bars(distance, size, bars_per_layer))
                .collect(),
        )
    }

    /// Section width b (in)
    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    /// Total section depth h (in)
    pub fn depth_in(&self) -> f64 {
        self.depth_in
    }

    /// Layers sorted by increasing distance
    pub fn layers(&self) -> &[ReinforcementLayer] {
        &self.layers
    }

    /// Depth to the extreme tension layer, d (in)
    pub fn d(&self) -> f64 {
        // Non-empty and sorted by construction.
        self.layers.last().map_or(self.depth_in, |layer| layer.distance_in)
    }

    /// Depth to the extreme compression layer, d' (in)
    pub fn d_prime(&self) -> f64 {
        self.layers.first().map_or(0.0, |layer| layer.distance_in)
    }

    /// Gross area Ag = bh (in²)
    pub fn gross_area_in2(&self) -> f64 {
        self.width_in * self.depth_in
    }

    /// Total longitudinal steel area Ast (in²)
    pub fn total_steel_area_in2(&self) -> f64 {
        self.layers.iter().map(|layer| layer.area_in2).sum()
    }

    /// Longitudinal reinforcement ratio ρg = Ast / Ag
    pub fn reinforcement_ratio(&self) -> f64 {
        self.total_steel_area_in2() / self.gross_area_in2()
    }

    /// Gross moment of inertia about the bending axis, bh³/12 (in⁴)
    pub fn moment_of_inertia_in4(&self) -> f64 {
        self.width_in * self.depth_in.powi(3) / 12.0
    }

    /// Gross radius of gyration about the bending axis (in)
    pub fn radius_of_gyration_in(&self) -> f64 {
        (self.moment_of_inertia_in4() / self.gross_area_in2()).sqrt()
    }

    /// The same section viewed from the opposite face.
    ///
    /// Used for the negative-moment half of the interaction diagram. Fails
    /// when all the steel sits on the far face, since the reversed view
    /// would have d = 0.
    pub fn reversed(&self) -> CalcResult<Self> {
        let layers = self
            .layers
            .iter()
            .map(|layer| ReinforcementLayer::new(self.depth_in - layer.distance_in, layer.area_in2))
            .collect();
        Self::new(self.width_in, self.depth_in, layers)
    }

    /// True when the steel arrangement is mirror-symmetric about mid-depth.
    pub fn is_symmetric(&self) -> bool {
        const TOL: f64 = 1e-9;
        self.layers.iter().zip(self.layers.iter().rev()).all(|(a, b)| {
            (a.distance_in - (self.depth_in - b.distance_in)).abs() <= TOL * self.depth_in
                && (a.area_in2 - b.area_in2).abs() <= TOL * a.area_in2.max(b.area_in2)
        })
    }
}

/// Distances of `layer_count` equally spaced layers between the two faces.
///
/// The first and last layers are at `clear_cover + bar_diameter / 2` from
/// the compression and tension faces.
pub fn equal_layer_distances(
    layer_count: usize,
    bar_diameter_in: f64,
    clear_cover_in: f64,
    depth_in: f64,
) -> CalcResult<Vec<f64>> {
    if layer_count == 0 {
        return Err(CalcError::invalid_geometry("Layer count must be at least 1"));
    }
    let first = clear_cover_in + bar_diameter_in / 2.0;
    let last = depth_in - clear_cover_in - bar_diameter_in / 2.0;
    if first > last {
        return Err(CalcError::invalid_geometry(format!(
            "Cover of {} in leaves no room for bars in a {} in deep section",
            clear_cover_in, depth_in
        )));
    }
    if layer_count == 1 {
        return Ok(vec![first]);
    }
    let step = (last - first) / (layer_count - 1) as f64;
    let mut distances: Vec<f64> = (0..layer_count).map(|i| first + step * i as f64).collect();
    distances[layer_count - 1] = last;
    Ok(distances)
}
