use std::time::Instant;

use hashbrown::{HashMap, HashSet};
use strata_chunk::{BuildOptions, Chunk, ChunkMaterial, PhysicsBackend, RenderBackend};
use strata_geom::Vec3;
use strata_mesh_cpu::MarchingCubes;
use strata_world::{ChunkCoord, DensitySource};

use crate::density_cache::{DensityCache, DensityCacheStats};
use crate::offsets::spherical_offsets;
use crate::{DEFAULT_LOAD_BUDGET, DEFAULT_RENDER_DISTANCE};

#[derive(Clone, Debug, PartialEq)]
pub struct StreamConfig {
    /// Radius of the desired sphere, in chunks.
    pub render_distance: i32,
    /// Maximum chunk loads per tick.
    pub load_budget: usize,
    pub build: BuildOptions,
    pub material: ChunkMaterial,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            render_distance: DEFAULT_RENDER_DISTANCE,
            load_budget: DEFAULT_LOAD_BUDGET,
            build: BuildOptions::default(),
            material: ChunkMaterial::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub ticks: u64,
    pub loads: u64,
    pub unloads: u64,
    pub empty_chunks: u64,
    pub render_failures: u64,
    pub physics_failures: u64,
    /// Desired chunks still missing at the start of the last tick.
    pub pending: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub center: ChunkCoord,
    pub pending: usize,
    pub loaded: Vec<ChunkCoord>,
    pub unloaded: Vec<ChunkCoord>,
}

impl TickReport {
    /// True when the tick found nothing left to load.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }
}

/// Keeps the chunks within `render_distance` of the focus loaded, a bounded
/// number per tick, and unloads the rest. Owns every loaded chunk and the
/// density cache.
///
/// Call [`unload_all`](Self::unload_all) before dropping: the streamer holds no
/// backend references, so chunks still loaded at drop keep their meshes and
/// bodies registered with the collaborators.
pub struct ChunkStreamer<S: DensitySource> {
    source: S,
    config: StreamConfig,
    extractor: MarchingCubes,
    offsets: Vec<ChunkCoord>,
    cache: DensityCache,
    loaded: HashMap<ChunkCoord, Chunk>,
    stats: StreamStats,
}

impl<S: DensitySource> ChunkStreamer<S> {
    pub fn new(source: S, config: StreamConfig) -> Self {
        assert!(config.load_budget > 0, "load budget must be at least 1");
        assert!(config.build.detail_level > 0, "detail level must be at least 1");
        let offsets = spherical_offsets(config.render_distance);
        log::info!(
            target: "stream",
            "{} chunk offsets within render distance {}",
            offsets.len(),
            config.render_distance
        );
        Self {
            source,
            config,
            extractor: MarchingCubes::default(),
            offsets,
            cache: DensityCache::new(),
            loaded: HashMap::new(),
            stats: StreamStats::default(),
        }
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[inline]
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    #[inline]
    pub fn offsets(&self) -> &[ChunkCoord] {
        &self.offsets
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.source.chunk_size()
    }

    /// Chunk containing a world-space focus point.
    #[inline]
    pub fn center_for(&self, focus: Vec3) -> ChunkCoord {
        ChunkCoord::from_world(focus, self.chunk_size())
    }

    /// Desired coordinates around `center`, in offset order.
    pub fn desired_set(&self, center: ChunkCoord) -> Vec<ChunkCoord> {
        self.offsets
            .iter()
            .map(|o| center.offset(o.cx, o.cy, o.cz))
            .collect()
    }

    /// Desired coordinates around `center` that are not loaded yet, in load order.
    pub fn pending_loads(&self, center: ChunkCoord) -> Vec<ChunkCoord> {
        self.desired_set(center)
            .into_iter()
            .filter(|c| !self.loaded.contains_key(c))
            .collect()
    }

    /// Loaded coordinates in sorted order.
    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        let mut v: Vec<ChunkCoord> = self.loaded.keys().copied().collect();
        v.sort_unstable();
        v
    }

    #[inline]
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.loaded.contains_key(&coord)
    }

    #[inline]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.loaded.get(&coord)
    }

    #[inline]
    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    #[inline]
    pub fn cache_stats(&self) -> DensityCacheStats {
        self.cache.stats()
    }

    /// Advances streaming by one step around `focus`.
    ///
    /// Does nothing when every desired chunk is loaded. Otherwise loads up to
    /// `load_budget` missing chunks, then unloads every chunk outside the
    /// desired set.
    pub fn tick<R, P>(&mut self, focus: Vec3, renderer: &mut R, physics: &mut P) -> TickReport
    where
        R: RenderBackend + ?Sized,
        P: PhysicsBackend + ?Sized,
    {
        self.stats.ticks += 1;
        let center = self.center_for(focus);
        let pending = self.pending_loads(center);
        self.stats.pending = pending.len();
        let mut report = TickReport {
            center,
            pending: pending.len(),
            ..TickReport::default()
        };
        if pending.is_empty() {
            return report;
        }
        log::debug!(target: "stream", "{} chunks left to load around {}", pending.len(), center);

        for coord in pending.into_iter().take(self.config.load_budget) {
            self.load_chunk(coord, renderer, physics);
            report.loaded.push(coord);
        }

        let desired: HashSet<ChunkCoord> = self.desired_set(center).into_iter().collect();
        let stale: Vec<ChunkCoord> = self
            .loaded
            .keys()
            .filter(|c| !desired.contains(*c))
            .copied()
            .collect();
        for coord in stale {
            if let Some(mut chunk) = self.loaded.remove(&coord) {
                chunk.destroy(renderer, physics);
                self.stats.unloads += 1;
                log::debug!(target: "stream", "unloaded chunk {}", coord);
                report.unloaded.push(coord);
            }
        }
        report.unloaded.sort_unstable();
        report
    }

    fn load_chunk<R, P>(&mut self, coord: ChunkCoord, renderer: &mut R, physics: &mut P)
    where
        R: RenderBackend + ?Sized,
        P: PhysicsBackend + ?Sized,
    {
        let t0 = Instant::now();
        let grid = self.cache.get_or_generate(coord, &self.source);
        let mut chunk = Chunk::new(coord, grid);
        let outcome = chunk.build(&self.extractor, &self.config.build, renderer, physics);
        self.stats.loads += 1;
        if outcome.is_empty() {
            self.stats.empty_chunks += 1;
        }
        if outcome.render_error.is_some() {
            self.stats.render_failures += 1;
        }
        if outcome.physics_error.is_some() {
            self.stats.physics_failures += 1;
        }
        log::debug!(
            target: "stream",
            "loaded chunk {} tris={} build_us={} total_us={}",
            coord,
            outcome.triangles,
            outcome.micros,
            t0.elapsed().as_micros()
        );
        // Failed builds stay loaded so they are not retried every tick.
        self.loaded.insert(coord, chunk);
    }

    /// Binds the chunk material once and draws every loaded chunk that has a
    /// render mesh. Returns the number of draws issued.
    pub fn render_chunks<R: RenderBackend + ?Sized>(&self, renderer: &mut R) -> usize {
        renderer.bind_material(&self.config.material.bind());
        let mut draws = 0;
        for chunk in self.loaded.values() {
            if chunk.render(renderer) {
                draws += 1;
            }
        }
        draws
    }

    /// Destroys every loaded chunk. Cached density grids are kept.
    pub fn unload_all<R, P>(&mut self, renderer: &mut R, physics: &mut P)
    where
        R: RenderBackend + ?Sized,
        P: PhysicsBackend + ?Sized,
    {
        for (_, mut chunk) in self.loaded.drain() {
            chunk.destroy(renderer, physics);
            self.stats.unloads += 1;
        }
    }
}

impl<S: DensitySource> Drop for ChunkStreamer<S> {
    fn drop(&mut self) {
        if !self.loaded.is_empty() {
            log::warn!(
                target: "stream",
                "streamer dropped with {} chunks still loaded; their backend resources were not released",
                self.loaded.len()
            );
        }
    }
}
