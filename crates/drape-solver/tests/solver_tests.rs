//! Integration tests for drape-solver.

use drape_contact::{CollisionObject, Plane, Sphere};
use drape_solver::integrator::{accumulate_forces, particle_mass, substep_duration, verlet_step};
use drape_solver::strain_limit::limit_strain;
use drape_solver::{Cloth, ClothDesc, ClothParameters, Orientation, Spring, SpringType};
use drape_types::constants::{GRAVITY, MAX_STRAIN, VERTICAL_JITTER};
use drape_types::{DrapeError, ParticleId, PointMass, Vec3};

fn desc(nw: usize, nh: usize, width: f32, height: f32) -> ClothDesc {
    ClothDesc {
        width,
        height,
        num_width_points: nw,
        num_height_points: nh,
        thickness: 0.001,
        orientation: Orientation::Horizontal,
        pinned: Vec::new(),
    }
}

fn gravity() -> [Vec3; 1] {
    [Vec3::new(0.0, -GRAVITY, 0.0)]
}

fn no_springs() -> ClothParameters {
    ClothParameters::with_constraints(false, false, false)
}

// ─── Construction Tests ───────────────────────────────────────

#[test]
fn horizontal_layout() {
    let cloth = Cloth::with_seed(desc(3, 2, 2.0, 1.0), 0).unwrap();
    assert_eq!(cloth.point_masses().len(), 6);

    let p = cloth.point_mass(2, 1);
    assert!((p.position - Vec3::new(2.0, 1.0, 1.0)).length() < 1e-6);
    assert_eq!(cloth.point_index(2, 1), ParticleId(5));

    for pm in cloth.point_masses() {
        assert_eq!(pm.position, pm.start_position);
        assert_eq!(pm.position, pm.last_position);
        assert_eq!(pm.forces, Vec3::ZERO);
    }
}

#[test]
fn vertical_layout_jitter_range() {
    let mut d = desc(6, 5, 1.0, 1.0);
    d.orientation = Orientation::Vertical;
    let cloth = Cloth::with_seed(d, 42).unwrap();

    for row in 0..5 {
        for col in 0..6 {
            let p = cloth.point_mass(col, row).position;
            assert!((p.x - col as f32 * 0.2).abs() < 1e-6);
            assert!((p.y - row as f32 * 0.25).abs() < 1e-6);
            assert!(p.z >= -VERTICAL_JITTER && p.z < 0.0, "z = {}", p.z);
        }
    }
}

#[test]
fn vertical_layout_is_seeded() {
    let mut d = desc(5, 5, 1.0, 1.0);
    d.orientation = Orientation::Vertical;

    let a = Cloth::with_seed(d.clone(), 7).unwrap();
    let b = Cloth::with_seed(d.clone(), 7).unwrap();
    let c = Cloth::with_seed(d, 8).unwrap();

    assert_eq!(a.positions(), b.positions());
    assert_ne!(a.positions(), c.positions());
}

#[test]
fn pinned_flags_follow_grid_coordinates() {
    let mut d = desc(4, 4, 1.0, 1.0);
    d.pinned = vec![[0, 3], [3, 3]];
    let cloth = Cloth::with_seed(d, 0).unwrap();

    let pinned: Vec<usize> = cloth
        .point_masses()
        .iter()
        .enumerate()
        .filter(|(_, pm)| pm.pinned)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(pinned, vec![12, 15]);
    assert_eq!(cloth.pinned(), &[[0, 3], [3, 3]]);
}

#[test]
fn single_point_dimension_has_zero_step() {
    let cloth = Cloth::with_seed(desc(4, 1, 3.0, 1.0), 0).unwrap();
    for (i, pm) in cloth.point_masses().iter().enumerate() {
        assert!((pm.position - Vec3::new(i as f32, 1.0, 0.0)).length() < 1e-6);
    }
}

#[test]
fn invalid_grids_are_rejected() {
    let cases = [
        desc(0, 3, 1.0, 1.0),
        desc(3, 0, 1.0, 1.0),
        desc(3, 3, 0.0, 1.0),
        desc(3, 3, 1.0, f32::NAN),
        ClothDesc {
            thickness: -0.1,
            ..desc(3, 3, 1.0, 1.0)
        },
        ClothDesc {
            pinned: vec![[3, 0]],
            ..desc(3, 3, 1.0, 1.0)
        },
        // Point ids fit in u32 but the mesh half-edge ids do not.
        desc(40_000, 40_000, 1.0, 1.0),
    ];
    for d in cases {
        let err = Cloth::with_seed(d.clone(), 0).unwrap_err();
        assert!(matches!(err, DrapeError::InvalidGrid(_)), "{d:?} gave {err}");
    }
}

#[test]
fn mesh_matches_grid() {
    let cloth = Cloth::with_seed(desc(5, 4, 1.0, 1.0), 0).unwrap();
    assert_eq!(cloth.mesh().vertex_count(), 20);
    assert_eq!(cloth.mesh().triangle_count(), 2 * 4 * 3);
    cloth.mesh().validate().unwrap();

    let normals = cloth.vertex_normals();
    assert_eq!(normals.len(), 20);
    assert!(normals.iter().all(|n| (n.length() - 1.0).abs() < 1e-5));
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn spring_counts_match_grid_formulas() {
    for (m, n) in [(2, 2), (3, 2), (4, 3), (5, 5), (2, 7), (8, 3)] {
        let cloth = Cloth::with_seed(desc(m, n, 1.0, 1.0), 0).unwrap();
        assert_eq!(
            cloth.spring_count(SpringType::Structural),
            m * (n - 1) + n * (m - 1),
            "structural {m}x{n}"
        );
        assert_eq!(
            cloth.spring_count(SpringType::Shearing),
            2 * (m - 1) * (n - 1),
            "shearing {m}x{n}"
        );
        assert_eq!(
            cloth.spring_count(SpringType::Bending),
            m * (n - 2) + n * (m - 2),
            "bending {m}x{n}"
        );
    }
}

#[test]
fn degenerate_strip_omits_missing_classes() {
    let strip = Cloth::with_seed(desc(1, 6, 1.0, 1.0), 0).unwrap();
    assert_eq!(strip.spring_count(SpringType::Structural), 5);
    assert_eq!(strip.spring_count(SpringType::Shearing), 0);
    assert_eq!(strip.spring_count(SpringType::Bending), 4);

    let single = Cloth::with_seed(desc(1, 1, 1.0, 1.0), 0).unwrap();
    assert!(single.springs().is_empty());
}

#[test]
fn spring_emission_order() {
    // The point at (1, 1) of a 3×3 grid links left, above, upper-left, upper-right.
    let cloth = Cloth::with_seed(desc(3, 3, 1.0, 1.0), 0).unwrap();
    let current = cloth.point_index(1, 1);
    let from_current: Vec<(ParticleId, SpringType)> = cloth
        .springs()
        .iter()
        .filter(|s| s.pm_a == current)
        .map(|s| (s.pm_b, s.spring_type))
        .collect();

    assert_eq!(
        from_current,
        vec![
            (cloth.point_index(0, 1), SpringType::Structural),
            (cloth.point_index(1, 0), SpringType::Structural),
            (cloth.point_index(0, 0), SpringType::Shearing),
            (cloth.point_index(2, 0), SpringType::Shearing),
        ]
    );
}

#[test]
fn rest_lengths_are_construction_distances() {
    let cloth = Cloth::with_seed(desc(4, 4, 3.0, 3.0), 0).unwrap();
    for spring in cloth.springs() {
        assert_ne!(spring.pm_a, spring.pm_b);
        let expected = match spring.spring_type {
            SpringType::Structural => 1.0,
            SpringType::Shearing => 2.0f32.sqrt(),
            SpringType::Bending => 2.0,
        };
        assert!((spring.rest_length - expected).abs() < 1e-5);
    }
}

// ─── Force & Integration Tests ────────────────────────────────

#[test]
fn mass_and_substep_duration() {
    assert!((particle_mass(2.0, 1.0, 15.0, 4, 5) - 1.5).abs() < 1e-6);
    assert!((substep_duration(90.0, 30) - 1.0 / 2700.0).abs() < 1e-9);
}

#[test]
fn bending_force_is_scaled() {
    let mut points = vec![
        PointMass::new(Vec3::ZERO, false),
        PointMass::new(Vec3::new(2.0, 0.0, 0.0), false),
    ];
    let bending = Spring::new(ParticleId(1), ParticleId(0), &points, SpringType::Bending);
    let structural = Spring::new(ParticleId(1), ParticleId(0), &points, SpringType::Structural);
    points[1].position.x = 3.0;

    let params = ClothParameters {
        ks: 10.0,
        ..Default::default()
    };

    accumulate_forces(&mut points, &[bending], &params, 1.0, &[]);
    assert!((points[1].forces - Vec3::new(-2.0, 0.0, 0.0)).length() < 1e-5);
    assert!((points[0].forces - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);

    accumulate_forces(&mut points, &[structural], &params, 1.0, &[]);
    assert!((points[1].forces - Vec3::new(-10.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn disabled_classes_exert_no_force() {
    let mut points = vec![
        PointMass::new(Vec3::ZERO, false),
        PointMass::new(Vec3::new(1.0, 0.0, 0.0), false),
    ];
    let spring = Spring::new(ParticleId(1), ParticleId(0), &points, SpringType::Structural);
    points[1].position.x = 4.0;

    let accel = [Vec3::new(0.0, -2.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
    accumulate_forces(&mut points, &[spring], &no_springs(), 0.5, &accel);

    for pm in &points {
        assert!((pm.forces - Vec3::new(0.5, -1.0, 0.0)).length() < 1e-6);
    }
}

#[test]
fn verlet_skips_pinned_and_applies_damping() {
    let mut points = vec![
        PointMass::new(Vec3::ZERO, true),
        PointMass::new(Vec3::ZERO, false),
    ];
    for pm in &mut points {
        pm.last_position = Vec3::new(-1.0, 0.0, 0.0);
        pm.forces = Vec3::new(0.0, 4.0, 0.0);
    }
    points[0].last_position = Vec3::ZERO;

    verlet_step(&mut points, 2.0, 0.5, 50.0);

    assert_eq!(points[0].position, Vec3::ZERO);
    // 0 + 0.5·(0 − (−1)) + (4 / 2)·0.25 on each axis.
    assert!((points[1].position - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
    assert_eq!(points[1].last_position, Vec3::ZERO);
}

#[test]
fn two_by_two_closed_form() {
    let mut d = desc(2, 2, 1.0, 1.0);
    d.thickness = 0.01;
    d.pinned = vec![[0, 0]];
    let mut cloth = Cloth::with_seed(d, 0).unwrap();

    let displaced = Vec3::new(1.05, 1.0, 1.0);
    {
        let p3 = &mut cloth.point_masses_mut()[3];
        p3.position = displaced;
        p3.last_position = displaced;
    }

    let params = ClothParameters {
        density: 1.0,
        ks: 100.0,
        damping: 0.0,
        ..ClothParameters::with_constraints(true, false, false)
    };
    let report = cloth.simulate(60.0, 1, &params, &[], &[]);
    assert_eq!(report.substeps, 1);

    let p1 = Vec3::new(1.0, 1.0, 0.0);
    let p2 = Vec3::new(0.0, 1.0, 1.0);
    let hooke = |delta: Vec3| delta.normalize() * (100.0 * (delta.length() - 1.0));
    let force = -(hooke(displaced - p2) + hooke(displaced - p1));

    let mass = 0.25;
    let dt = 1.0 / 60.0;
    let expected = displaced + force / mass * dt * dt;

    let actual = cloth.point_masses()[3].position;
    assert!((actual - expected).length() < 1e-5, "{actual} vs {expected}");
    assert!(actual.x < displaced.x, "spring pulls back towards rest");
    assert_eq!(cloth.point_masses()[0].position, cloth.point_masses()[0].start_position);
}

#[test]
fn free_fall_is_uniform_without_springs() {
    let fps = 60.0;
    let steps = 5;
    let frames = 4;
    let params = no_springs();

    let dt = substep_duration(fps, steps);
    let retain = 1.0 - params.damping / 100.0;
    let (mut y, mut last) = (1.0f32, 1.0f32);
    for _ in 0..steps * frames {
        let next = y + retain * (y - last) - GRAVITY * dt * dt;
        last = y;
        y = next;
    }

    for d in [desc(3, 3, 1.0, 1.0), desc(5, 2, 2.0, 1.0)] {
        let mut cloth = Cloth::with_seed(d, 0).unwrap();
        for _ in 0..frames {
            cloth.simulate(fps, steps, &params, &gravity(), &[]);
        }
        for pm in cloth.point_masses() {
            assert!((pm.position.y - y).abs() < 1e-5, "{} vs {y}", pm.position.y);
            assert_eq!(pm.position.x, pm.start_position.x);
            assert_eq!(pm.position.z, pm.start_position.z);
        }
    }
}

// ─── Strain Limiting Tests ────────────────────────────────────

#[test]
fn isolated_spring_limited_in_one_pass() {
    let stretched = Vec3::new(2.0, 1.0, 0.0);
    let params = ClothParameters {
        ks: 0.0,
        damping: 100.0,
        ..Default::default()
    };

    let mut cloth = Cloth::with_seed(desc(2, 1, 1.0, 1.0), 0).unwrap();
    cloth.point_masses_mut()[1].position = stretched;
    cloth.point_masses_mut()[1].last_position = stretched;
    let report = cloth.simulate(60.0, 1, &params, &[], &[]);
    assert_eq!(report.strain_corrections, 1);
    assert!((cloth.springs()[0].length(cloth.point_masses()) - MAX_STRAIN).abs() < 1e-5);
    assert!((cloth.point_masses()[0].position.x - 0.45).abs() < 1e-5);

    // A pinned endpoint leaves the whole correction to the free one.
    let mut d = desc(2, 1, 1.0, 1.0);
    d.pinned = vec![[0, 0]];
    let mut cloth = Cloth::with_seed(d, 0).unwrap();
    cloth.point_masses_mut()[1].position = stretched;
    cloth.point_masses_mut()[1].last_position = stretched;
    cloth.simulate(60.0, 1, &params, &[], &[]);
    assert_eq!(cloth.point_masses()[0].position, Vec3::new(0.0, 1.0, 0.0));
    assert!((cloth.point_masses()[1].position.x - MAX_STRAIN).abs() < 1e-5);
}

#[test]
fn both_pinned_spring_is_left_alone() {
    let mut points = vec![
        PointMass::new(Vec3::ZERO, true),
        PointMass::new(Vec3::X, true),
    ];
    let spring = Spring::new(ParticleId(0), ParticleId(1), &points, SpringType::Structural);
    points[1].position = Vec3::new(5.0, 0.0, 0.0);

    assert_eq!(limit_strain(&mut points, &[spring]), 0);
    assert_eq!(points[1].position, Vec3::new(5.0, 0.0, 0.0));
}

#[test]
fn strain_converges_over_substeps() {
    let params = ClothParameters {
        density: 1.0,
        ks: 0.0,
        damping: 100.0,
        ..Default::default()
    };
    let mut cloth = Cloth::with_seed(desc(5, 1, 4.0, 1.0), 0).unwrap();
    for pm in cloth.point_masses_mut() {
        pm.position.x *= 1.5;
        pm.last_position = pm.position;
    }
    let initial = cloth.max_strain();
    assert!((initial - 1.5).abs() < 1e-5);

    for _ in 0..20 {
        cloth.simulate(60.0, 10, &params, &[], &[]);
    }
    assert!(cloth.max_strain() <= MAX_STRAIN + 1e-3, "max strain {}", cloth.max_strain());
}

// ─── Pinning & Collision Tests ────────────────────────────────

#[test]
fn pinned_points_never_move() {
    let mut d = desc(6, 6, 1.0, 1.0);
    d.orientation = Orientation::Vertical;
    d.thickness = 0.01;
    d.pinned = vec![[0, 5], [5, 5]];
    let mut cloth = Cloth::with_seed(d, 3).unwrap();

    let objects: Vec<Box<dyn CollisionObject>> = vec![
        Box::new(Sphere::new(Vec3::new(0.5, 0.3, 0.3), 0.2, 0.3)),
        Box::new(Plane::new(Vec3::ZERO, Vec3::Y, 0.5)),
    ];
    let params = ClothParameters::default();
    let wind = [Vec3::new(0.0, -GRAVITY, 0.0), Vec3::new(0.0, 0.0, 2.0)];

    for _ in 0..30 {
        cloth.simulate(90.0, 10, &params, &wind, &objects);
        for pm in cloth.point_masses().iter().filter(|pm| pm.pinned) {
            assert_eq!(pm.position, pm.start_position);
        }
    }
    assert!(cloth.max_displacement() > 0.0);
}

#[test]
fn sheet_rests_on_plane() {
    let mut d = desc(8, 8, 1.0, 1.0);
    d.thickness = 0.01;
    let mut cloth = Cloth::with_seed(d, 0).unwrap();
    let objects: Vec<Box<dyn CollisionObject>> =
        vec![Box::new(Plane::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Y, 0.5))];
    let params = ClothParameters::default();

    for _ in 0..60 {
        cloth.simulate(90.0, 10, &params, &gravity(), &objects);
    }
    for pm in cloth.point_masses() {
        assert!(pm.position.y >= 0.49, "y = {}", pm.position.y);
    }
    assert!(cloth.point_masses().iter().all(|pm| pm.position.y < 0.6));
}

#[test]
fn sheet_drapes_over_sphere() {
    let mut d = desc(10, 10, 1.0, 1.0);
    d.thickness = 0.01;
    let mut cloth = Cloth::with_seed(d, 0).unwrap();
    let origin = Vec3::new(0.5, 0.5, 0.5);
    let radius = 0.3;
    let objects: Vec<Box<dyn CollisionObject>> = vec![Box::new(Sphere::new(origin, radius, 0.3))];
    let params = ClothParameters::default();

    for _ in 0..45 {
        cloth.simulate(90.0, 10, &params, &gravity(), &objects);
    }
    for pm in cloth.point_masses() {
        assert!(pm.position.distance(origin) >= radius - 0.05);
    }
    let centre = cloth.point_mass(5, 5).position;
    assert!(centre.y > origin.y, "sheet centre held up by the sphere");
}

/// A 2×1 sheet with both points moved into one hash cell, `gap` apart
/// along x and at rest.
fn touching_pair(gap: f32) -> Cloth {
    let mut d = desc(2, 1, 1.0, 1.0);
    d.thickness = 0.05;
    let mut cloth = Cloth::with_seed(d, 0).unwrap();
    let placed = [Vec3::new(0.5, 1.0, 0.5), Vec3::new(0.5 + gap, 1.0, 0.5)];
    for (pm, p) in cloth.point_masses_mut().iter_mut().zip(placed) {
        pm.position = p;
        pm.last_position = p;
    }
    cloth
}

#[test]
fn simulate_separates_touching_points() {
    let mut cloth = touching_pair(0.02);
    let report = cloth.simulate(90.0, 10, &no_springs(), &[], &[]);

    assert!(report.self_collision_contacts > 0);
    let [a, b] = [cloth.point_masses()[0].position, cloth.point_masses()[1].position];
    assert!(a.x < 0.5 && b.x > 0.52, "a = {a}, b = {b}");
    assert!(a.distance(b) > 0.02);
    assert!((a.y - 1.0).abs() < 1e-6 && (b.y - 1.0).abs() < 1e-6);
}

#[test]
fn colliders_run_after_self_collision() {
    // Self-collision pushes point 0 through the plane every substep; the
    // plane then restores it, so it must end exactly where it started.
    let mut cloth = touching_pair(0.02);
    let objects: Vec<Box<dyn CollisionObject>> =
        vec![Box::new(Plane::new(Vec3::new(0.499, 0.0, 0.0), Vec3::X, 1.0))];
    let report = cloth.simulate(90.0, 10, &no_springs(), &[], &objects);

    assert!(report.self_collision_contacts > 0);
    assert!((cloth.point_masses()[0].position.x - 0.5).abs() < 1e-6);
    assert!(cloth.point_masses()[1].position.x > 0.52);
}

#[test]
fn report_counts_substeps() {
    let mut cloth = Cloth::with_seed(desc(4, 4, 1.0, 1.0), 0).unwrap();
    let report = cloth.simulate(90.0, 7, &ClothParameters::default(), &gravity(), &[]);
    assert_eq!(report.substeps, 7);
    assert!(report.wall_time >= 0.0);
}

// ─── Reset Tests ──────────────────────────────────────────────

#[test]
fn reset_is_idempotent() {
    let mut d = desc(5, 5, 1.0, 1.0);
    d.pinned = vec![[0, 0]];
    let mut cloth = Cloth::with_seed(d, 0).unwrap();
    for _ in 0..10 {
        cloth.simulate(90.0, 10, &ClothParameters::default(), &gravity(), &[]);
    }
    assert!(cloth.max_displacement() > 0.0);

    cloth.reset();
    let once: Vec<PointMass> = cloth.point_masses().to_vec();
    cloth.reset();
    assert_eq!(cloth.point_masses(), once.as_slice());

    for pm in cloth.point_masses() {
        assert_eq!(pm.position, pm.start_position);
        assert_eq!(pm.last_position, pm.start_position);
    }
    assert_eq!(cloth.kinetic_energy(&ClothParameters::default(), 1.0 / 900.0), 0.0);
}

// ─── Parameter Tests ──────────────────────────────────────────

#[test]
fn parameter_defaults() {
    let p = ClothParameters::default();
    assert_eq!(p.density, 15.0);
    assert_eq!(p.ks, 5000.0);
    assert!((p.damping - 0.2).abs() < 1e-6);
    assert!(SpringType::all().iter().all(|&t| p.is_enabled(t)));
    p.validate().unwrap();
}

#[test]
fn parameter_validation() {
    let bad = [
        ClothParameters {
            density: 0.0,
            ..Default::default()
        },
        ClothParameters {
            ks: -1.0,
            ..Default::default()
        },
        ClothParameters {
            damping: 101.0,
            ..Default::default()
        },
        ClothParameters {
            damping: f32::NAN,
            ..Default::default()
        },
    ];
    for p in bad {
        assert!(matches!(p.validate(), Err(DrapeError::InvalidParameters(_))));
    }
}

#[test]
fn parameters_deserialize_with_defaults() {
    let p: ClothParameters =
        toml::from_str("ks = 800.0\nenable_bending_constraints = false").unwrap();
    assert_eq!(p.ks, 800.0);
    assert_eq!(p.density, 15.0);
    assert!(!p.is_enabled(SpringType::Bending));
    assert!(p.is_enabled(SpringType::Shearing));

    let json = serde_json::to_string(&p).unwrap();
    let back: ClothParameters = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

#[test]
fn desc_deserializes_orientation_and_pins() {
    let d: ClothDesc = serde_json::from_str(
        r#"{"num_width_points": 4, "num_height_points": 3, "orientation": "vertical", "pinned": [[0, 2]]}"#,
    )
    .unwrap();
    assert_eq!(d.orientation, Orientation::Vertical);
    assert_eq!(d.pinned, vec![[0, 2]]);
    assert_eq!(d.point_count(), 12);
    d.validate().unwrap();
}
