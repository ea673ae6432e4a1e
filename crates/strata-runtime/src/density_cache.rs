use std::sync::Arc;

use hashbrown::HashMap;
use strata_world::{ChunkCoord, DensityGrid, DensitySource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DensityCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizes generated grids by exact chunk coordinate. Entries are never evicted.
#[derive(Debug, Default)]
pub struct DensityCache {
    entries: HashMap<ChunkCoord, Arc<DensityGrid>>,
    hits: u64,
    misses: u64,
}

impl DensityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached grid for `coord`, generating it from `source` on first use.
    pub fn get_or_generate<S: DensitySource + ?Sized>(
        &mut self,
        coord: ChunkCoord,
        source: &S,
    ) -> Arc<DensityGrid> {
        if let Some(grid) = self.entries.get(&coord) {
            self.hits += 1;
            return Arc::clone(grid);
        }
        self.misses += 1;
        let grid = Arc::new(source.generate_density(coord));
        debug_assert_eq!(grid.size(), source.chunk_size());
        self.entries.insert(coord, Arc::clone(&grid));
        grid
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<Arc<DensityGrid>> {
        self.entries.get(&coord).cloned()
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> DensityCacheStats {
        DensityCacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use strata_world::MaterialId;

    struct Counting {
        calls: Cell<usize>,
    }

    impl DensitySource for Counting {
        fn chunk_size(&self) -> usize {
            2
        }
        fn generate_density(&self, coord: ChunkCoord) -> DensityGrid {
            self.calls.set(self.calls.get() + 1);
            DensityGrid::filled(2, coord.cy as f32, MaterialId::ROCK)
        }
    }

    #[test]
    fn second_request_is_a_hit_and_shares_the_grid() {
        let src = Counting { calls: Cell::new(0) };
        let mut cache = DensityCache::new();
        let c = ChunkCoord::new(0, 1, 0);
        let a = cache.get_or_generate(c, &src);
        let b = cache.get_or_generate(c, &src);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(src.calls.get(), 1);
        assert_eq!(
            cache.stats(),
            DensityCacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn lookups_do_not_generate() {
        let src = Counting { calls: Cell::new(0) };
        let mut cache = DensityCache::new();
        assert!(cache.get(ChunkCoord::new(1, 2, 0)).is_none());
        cache.get_or_generate(ChunkCoord::new(1, 2, 0), &src);
        cache.get_or_generate(ChunkCoord::new(0, 0, 1), &src);
        assert!(cache.contains(ChunkCoord::new(1, 2, 0)));
        assert!(cache.contains(ChunkCoord::new(0, 0, 1)));
        assert_eq!(cache.len(), 2);
        assert_eq!(src.calls.get(), 2);
    }
}
