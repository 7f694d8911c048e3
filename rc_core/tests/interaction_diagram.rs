//! End-to-end checks of the interaction diagram on a square tied column.

use approx::assert_relative_eq;

use rc_core::calculations::forces::{pm_point, pure_compression_capacity};
use rc_core::calculations::phi::{strength_reduction_factor, Confinement};
use rc_core::calculations::pm_diagram::{calculate, generate_full_pm_curve, generate_pm_curve, PmDiagramInput, PmOptions};
use rc_core::calculations::strain::{StrainModel, C_PURE_COMPRESSION, C_PURE_TENSION};
use rc_core::materials::{BarSize, ConcreteMaterial, RebarMaterial};
use rc_core::section::{ReinforcementLayer, SectionGeometry};

/// 16 x 16 in column, eight layers of 2-#8 bars, f'c = 4000 psi, Grade 60
fn square_column() -> (SectionGeometry, ConcreteMaterial, RebarMaterial) {
    (
        SectionGeometry::with_equal_layers(16.0, 16.0, 1.5, 8, BarSize::No8, 2).unwrap(),
        ConcreteMaterial::new(4000.0).unwrap(),
        RebarMaterial::new(60_000.0).unwrap(),
    )
}

#[test]
fn neutral_axis_round_trips_through_z() {
    let (section, concrete, rebar) = square_column();
    let strain = StrainModel::new(&section, &concrete, &rebar);

    let mut c = 1e-3;
    while c < 10_000.0 {
        let back = strain.c_from_z(strain.z_from_c(c));
        assert_relative_eq!(back, c, max_relative = 1e-9);
        c *= 1.37;
    }
}

#[test]
fn pure_compression_matches_po() {
    let (section, concrete, rebar) = square_column();
    let point = pm_point(C_PURE_COMPRESSION, &section, &concrete, &rebar);
    let po = 0.85 * 4000.0 * (256.0 - section.total_steel_area_in2()) + 60_000.0 * section.total_steel_area_in2();

    assert_relative_eq!(point.axial_lb, po, max_relative = 1e-6);
    assert_relative_eq!(pure_compression_capacity(&section, &concrete, &rebar), po, max_relative = 1e-12);
    assert!(point.moment_inlb.abs() < 1e-6 * po);
}

#[test]
fn pure_tension_matches_pnt() {
    let (section, concrete, rebar) = square_column();
    let point = pm_point(C_PURE_TENSION, &section, &concrete, &rebar);
    let pnt = -section.total_steel_area_in2() * 60_000.0;

    assert_relative_eq!(point.axial_lb, pnt, max_relative = 1e-6);
    assert!(point.moment_inlb.abs() < 1e-6 * pnt.abs());
}

#[test]
fn axial_force_does_not_increase_along_the_curve() {
    let (square, concrete, rebar) = square_column();
    let asymmetric = SectionGeometry::new(
        12.0,
        24.0,
        vec![ReinforcementLayer::new(2.5, 0.62), ReinforcementLayer::new(21.5, 3.16)],
    )
    .unwrap();

    for section in [square, asymmetric.clone(), asymmetric.reversed().unwrap()] {
        for points in [5, 10, 25, 1000] {
            let options = PmOptions {
                points,
                ..PmOptions::default()
            };
            let curve = generate_pm_curve(&section, &concrete, &rebar, &options).unwrap();

            for pair in curve.nominal_points.windows(2) {
                assert!(pair[0].z >= pair[1].z);
                assert!(pair[0].axial_lb >= pair[1].axial_lb, "{} then {}", pair[0].axial_lb, pair[1].axial_lb);
            }
        }
    }
}

#[test]
fn phi_stays_within_limits() {
    let (section, concrete, rebar) = square_column();
    for confinement in Confinement::ALL {
        let options = PmOptions {
            confinement,
            ..PmOptions::default()
        };
        let curve = generate_pm_curve(&section, &concrete, &rebar, &options).unwrap();
        let phi_c = confinement.phi_compression_controlled();

        for point in &curve.design_points {
            let phi = point.phi.unwrap();
            assert!(phi >= phi_c && phi <= 0.90);
            if point.strain_at_extreme_tension <= -0.005 {
                assert_eq!(phi, 0.90);
            }
            if point.strain_at_extreme_tension >= -rebar.ey() {
                assert_eq!(phi, phi_c);
            }
        }
    }

    assert_eq!(strength_reduction_factor(-0.005, rebar.ey(), Confinement::Tied), 0.90);
}

#[test]
fn square_column_scenario() {
    let (section, concrete, rebar) = square_column();
    assert_eq!(concrete.beta1(), 0.85);
    assert_relative_eq!(section.total_steel_area_in2(), 12.64, epsilon = 1e-9);
    assert!(section.is_symmetric());

    let input = PmDiagramInput {
        label: "C-1".to_string(),
        section,
        concrete,
        rebar,
        options: PmOptions::default(),
    };
    let result = calculate(&input).unwrap();

    let po = 0.85 * 4000.0 * (256.0 - 12.64) + 60_000.0 * 12.64;
    assert_relative_eq!(result.po_lb, po, max_relative = 1e-9);
    assert_relative_eq!(result.pn_max_lb, 0.80 * po, max_relative = 1e-9);
    assert_relative_eq!(result.phi_pn_max_lb, 0.65 * 0.80 * po, max_relative = 1e-9);
    assert!(result.balanced_moment_inlb > result.pure_bending_moment_inlb);
    assert!(result.pure_bending_moment_inlb > 0.0);
    assert!(result.converged);

    // Balanced point sits exactly at Z = -1
    let balanced = result.curve.positive.key_points.balanced;
    assert_eq!(balanced.z, -1.0);
    assert_relative_eq!(balanced.strain_at_extreme_tension, -input.rebar.ey(), max_relative = 1e-9);

    // Pure bending carries no axial force
    let pure_bending = result.curve.positive.key_points.pure_bending;
    assert!(pure_bending.axial_lb.abs() < 1.0);
}

#[test]
fn full_curve_is_closed_and_mirrored() {
    let (section, concrete, rebar) = square_column();
    let full = generate_full_pm_curve(&section, &concrete, &rebar, &PmOptions::default()).unwrap();
    let outline = full.design_outline();

    let first = outline.first().unwrap();
    let last = outline.last().unwrap();
    assert_eq!(first.axial_lb, last.axial_lb);
    assert_eq!(first.moment_inlb.abs(), last.moment_inlb.abs());

    assert!(full.positive.design_points.iter().all(|p| p.moment_inlb >= -1e-6));
    assert!(full.negative.design_points.iter().all(|p| p.moment_inlb <= 1e-6));
}

#[test]
fn result_serializes_without_infinities() {
    let (section, concrete, rebar) = square_column();
    let input = PmDiagramInput {
        label: "C-2".to_string(),
        section,
        concrete,
        rebar,
        options: PmOptions::default(),
    };
    let result = calculate(&input).unwrap();
    for point in result.curve.nominal_outline().iter().chain(result.curve.design_outline().iter()) {
        assert!(point.axial_lb.is_finite());
        assert!(point.moment_inlb.is_finite());
        assert!(point.z.is_finite());
    }

    let json = serde_json::to_string(&result).unwrap();
    let back: rc_core::calculations::PmDiagramResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.curve.positive.nominal_points.len(), result.curve.positive.nominal_points.len());
}
