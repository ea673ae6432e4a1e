use strata_geom::Vec3;
use strata_mesh_cpu::{FLOATS_PER_TRIANGLE, MarchingCubes, TriangleBuffer};
use strata_world::{DensityGrid, MaterialId};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn tri_area_sum(tb: &TriangleBuffer) -> f32 {
    tb.triangles()
        .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
        .sum()
}

/// Solid at and below `solid_top`, empty above.
fn layered(size: usize, solid_top: usize, material: MaterialId) -> DensityGrid {
    DensityGrid::from_fn(size, |_, y, _| {
        if y <= solid_top { (1.0, material) } else { (0.0, material) }
    })
}

#[test]
fn uniform_grids_produce_nothing() {
    let mc = MarchingCubes::default();
    assert!(mc.generate_mesh(&DensityGrid::new(4), 1).is_empty());
    let solid = DensityGrid::filled(4, 1.0, MaterialId::ROCK);
    assert!(mc.generate_mesh(&solid, 1).is_empty());
    let at_iso = DensityGrid::filled(4, 0.5, MaterialId::ROCK);
    assert!(mc.generate_mesh(&at_iso, 1).is_empty());
}

#[test]
fn single_empty_corner_yields_one_triangle_facing_it() {
    let mut g = DensityGrid::filled(1, 1.0, MaterialId::ROCK);
    g.set(0, 0, 0, 0.0, MaterialId::ROCK);
    let mc = MarchingCubes::default();
    assert_eq!(mc.case_index(&[0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]), 1);
    let tb = mc.generate_mesh(&g, 1);
    assert_eq!(tb.triangle_count(), 1);
    for p in tb.positions() {
        let on_axis = [p.x, p.y, p.z].iter().filter(|&&c| approx(c, 0.5)).count();
        assert_eq!(on_axis, 1, "{p:?}");
    }
    for n in tb.normals() {
        assert!(n.x < 0.0 && n.y < 0.0 && n.z < 0.0, "{n:?}");
    }
}

#[test]
fn two_adjacent_empty_corners_yield_two_triangles() {
    let mut g = DensityGrid::filled(1, 1.0, MaterialId::ROCK);
    g.set(0, 0, 0, 0.0, MaterialId::ROCK);
    g.set(1, 0, 0, 0.0, MaterialId::ROCK);
    let tb = MarchingCubes::default().generate_mesh(&g, 1);
    assert_eq!(tb.triangle_count(), 2);
    assert!(approx(tri_area_sum(&tb), 0.5_f32.sqrt()));
}

#[test]
fn flat_ground_faces_up_at_interpolated_height() {
    let g = layered(4, 1, MaterialId::GRASS);
    let tb = MarchingCubes::default().generate_mesh(&g, 1);
    // One quad (two triangles) per column.
    assert_eq!(tb.triangle_count(), 4 * 4 * 2);
    assert_eq!(tb.floats().len() % FLOATS_PER_TRIANGLE, 0);
    for p in tb.positions() {
        assert!(approx(p.y, 1.5));
        assert!((0.0..=4.0).contains(&p.x) && (0.0..=4.0).contains(&p.z));
    }
    for n in tb.normals() {
        assert!(approx(n.x, 0.0) && approx(n.y, 1.0) && approx(n.z, 0.0), "{n:?}");
    }
    assert!(tb.materials().all(|m| m == 2.0));
    assert!(approx(tri_area_sum(&tb), 16.0));
}

#[test]
fn material_comes_from_cell_base_corner() {
    let mut g = layered(2, 0, MaterialId::ROCK);
    for z in 0..=2 {
        for x in 0..=2 {
            g.set(x, 0, z, 1.0, MaterialId::GRASS);
        }
    }
    let tb = MarchingCubes::default().generate_mesh(&g, 1);
    assert!(!tb.is_empty());
    assert!(tb.materials().all(|m| m == 2.0));
}

#[test]
fn extraction_is_repeatable() {
    let g = DensityGrid::from_fn(6, |x, y, z| {
        let d = ((x * 7 + y * 13 + z * 5) % 11) as f32 / 10.0;
        (d, MaterialId::ROCK)
    });
    let mc = MarchingCubes::default();
    let a = mc.generate_mesh(&g, 1);
    let b = mc.generate_mesh(&g, 1);
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn coarser_stride_scales_positions() {
    let g = layered(4, 1, MaterialId::ROCK);
    let tb = MarchingCubes::default().generate_mesh(&g, 2);
    // 2x2 cells of edge 2; samples at y=0 (solid) and y=2 (empty) meet halfway.
    assert_eq!(tb.triangle_count(), 2 * 2 * 2);
    for p in tb.positions() {
        assert!(approx(p.y, 1.0));
        assert!((0.0..=4.0).contains(&p.x));
    }
    assert!(approx(tri_area_sum(&tb), 16.0));
}

#[test]
fn stride_larger_than_grid_produces_nothing() {
    let g = layered(4, 1, MaterialId::ROCK);
    assert!(MarchingCubes::default().generate_mesh(&g, 5).is_empty());
}

#[test]
#[should_panic(expected = "detail level")]
fn zero_stride_is_rejected() {
    let g = layered(2, 0, MaterialId::ROCK);
    let _ = MarchingCubes::default().generate_mesh(&g, 0);
}

#[test]
fn interpolation_snaps_near_endpoints() {
    let mc = MarchingCubes::new(0.5);
    let p1 = Vec3::ZERO;
    let p2 = Vec3::new(0.0, 2.0, 0.0);
    assert_eq!(mc.interpolate_edge(p1, p2, 0.5, 1.0), p1);
    assert_eq!(mc.interpolate_edge(p1, p2, 0.0, 0.5), p2);
    assert_eq!(mc.interpolate_edge(p1, p2, 0.7, 0.7), p1);
    let mid = mc.interpolate_edge(p1, p2, 0.0, 1.0);
    assert!(approx(mid.y, 1.0));
    let quarter = mc.interpolate_edge(p1, p2, 0.25, 1.25);
    assert!(approx(quarter.y, 0.5));
}
