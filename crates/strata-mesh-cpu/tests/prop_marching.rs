use proptest::prelude::*;
use strata_mesh_cpu::{FLOATS_PER_TRIANGLE, MarchingCubes, collision_triangles};
use strata_world::{DensityGrid, MaterialId};

const N: usize = 3;

fn grid_from(samples: &[(f32, bool)]) -> DensityGrid {
    let dim = N + 1;
    DensityGrid::from_fn(N, |x, y, z| {
        let (d, grass) = samples[(y * dim + z) * dim + x];
        (d, if grass { MaterialId::GRASS } else { MaterialId::ROCK })
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn output_is_well_formed(samples in prop::collection::vec((0.0f32..=1.0, any::<bool>()), (N + 1).pow(3))) {
        let g = grid_from(&samples);
        let tb = MarchingCubes::default().generate_mesh(&g, 1);
        prop_assert_eq!(tb.floats().len() % FLOATS_PER_TRIANGLE, 0);
        for p in tb.positions() {
            prop_assert!((0.0..=N as f32).contains(&p.x));
            prop_assert!((0.0..=N as f32).contains(&p.y));
            prop_assert!((0.0..=N as f32).contains(&p.z));
        }
        for n in tb.normals() {
            let len = n.length();
            prop_assert!(len < 1e-3 || (len - 1.0).abs() < 1e-3);
        }
        for m in tb.materials() {
            prop_assert!(m == 0.0 || m == 2.0);
        }
        prop_assert_eq!(collision_triangles(&tb).triangle_count(), tb.triangle_count());
    }

    #[test]
    fn empty_iff_uniform(samples in prop::collection::vec((0.0f32..=1.0, any::<bool>()), (N + 1).pow(3))) {
        let g = grid_from(&samples);
        let tb = MarchingCubes::default().generate_mesh(&g, 1);
        prop_assert_eq!(tb.is_empty(), g.is_uniform());
    }
}
