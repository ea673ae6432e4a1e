use proptest::prelude::*;
use std::collections::HashSet;
use strata_runtime::spherical_offsets;
use strata_world::ChunkCoord;

proptest! {
    #[test]
    fn offsets_match_brute_force_sphere(r in 0i32..8) {
        let offs = spherical_offsets(r);
        let set: HashSet<ChunkCoord> = offs.iter().copied().collect();
        prop_assert_eq!(set.len(), offs.len());
        let mut expected = 0;
        for x in -r..=r {
            for y in -r..=r {
                for z in -r..=r {
                    if x * x + y * y + z * z <= r * r {
                        expected += 1;
                        prop_assert!(set.contains(&ChunkCoord::new(x, y, z)));
                    }
                }
            }
        }
        prop_assert_eq!(offs.len(), expected);
    }

    #[test]
    fn offsets_are_symmetric(r in 0i32..8) {
        let set: HashSet<ChunkCoord> = spherical_offsets(r).into_iter().collect();
        for o in &set {
            prop_assert!(set.contains(&ChunkCoord::new(-o.cx, -o.cy, -o.cz)));
            prop_assert!(set.contains(&ChunkCoord::new(o.cy, o.cz, o.cx)));
        }
    }
}
