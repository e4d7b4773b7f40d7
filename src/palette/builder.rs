//! Brute-force nearest-candidate search over the whole RGB color cube
//!
//! Every one of the 16,777,216 colors is matched independently against the
//! enabled tiles, the enabled walls and all paints. The cube is split into 256
//! red slabs which rayon fills in parallel; each slab owns a disjoint chunk of
//! the output, so no synchronisation is needed beyond the final join.
//!
//! Distances are exact integers and candidates are scanned in ascending id
//! order with a strict `<` comparison, so equal distances always resolve to
//! the lowest id. The output is therefore bit-identical for any thread count.

use rayon::prelude::*;
use std::time::Instant;

use crate::io::configuration::{COLOR_CUBE_SIZE, NONE_ID, SLAB_SIZE};
use crate::io::error::{Result, invalid_parameter};
use crate::math::cube::{distance_squared, unpack_red_major};
use crate::palette::candidates::{Candidate, CandidateSnapshot, PaintCandidate, Rgb};
use crate::palette::store::{PaletteStore, pack_tile_wall};

/// Raw builder output in red-major layout (`b + g·256 + r·65536`)
///
/// This is the builder's native volume layout; [`PaletteStore::load`]
/// re-indexes it into lookup order.
#[derive(Debug, Clone)]
pub struct PaletteVolume {
    tile_wall: Vec<u32>,
    paint: Vec<u8>,
}

impl PaletteVolume {
    /// Packed `(tile << 16) | wall` values in red-major order
    pub fn tile_wall(&self) -> &[u32] {
        &self.tile_wall
    }

    /// Paint ids in red-major order
    pub fn paint(&self) -> &[u8] {
        &self.paint
    }
}

/// Lowest-id enabled candidate nearest to `color`, or `NONE_ID`
pub fn nearest_candidate(candidates: &[Candidate], color: Rgb) -> u16 {
    let mut best_id = NONE_ID;
    let mut best_distance = u32::MAX;

    for candidate in candidates {
        let distance = distance_squared(color, candidate.color);
        if distance < best_distance {
            best_distance = distance;
            best_id = candidate.id;
            // Later candidates have higher ids and cannot beat an exact match
            if distance == 0 {
                break;
            }
        }
    }

    best_id
}

/// Lowest-id paint nearest to `color`; 0 when the list is empty
pub fn nearest_paint(paints: &[PaintCandidate], color: Rgb) -> u8 {
    let mut best_id = 0;
    let mut best_distance = u32::MAX;

    for paint in paints {
        let distance = distance_squared(color, paint.color);
        if distance < best_distance {
            best_distance = distance;
            best_id = paint.id;
            if distance == 0 {
                break;
            }
        }
    }

    best_id
}

/// Builds palette stores from a candidate snapshot
#[derive(Debug, Clone)]
pub struct PaletteBuilder {
    snapshot: CandidateSnapshot,
    threads: Option<usize>,
}

impl PaletteBuilder {
    /// Create a builder that runs on the global rayon pool
    pub const fn new(snapshot: CandidateSnapshot) -> Self {
        Self {
            snapshot,
            threads: None,
        }
    }

    /// Run the build on a dedicated pool with exactly `threads` workers
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` is zero
    pub fn with_threads(mut self, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(invalid_parameter(
                "threads",
                &threads,
                &"at least one worker thread is required",
            ));
        }
        self.threads = Some(threads);
        Ok(self)
    }

    /// The candidates this builder matches against
    pub const fn snapshot(&self) -> &CandidateSnapshot {
        &self.snapshot
    }

    /// Compute the raw red-major palette volume
    ///
    /// # Errors
    ///
    /// Returns an error if the dedicated thread pool cannot be created
    pub fn build_volume(&self) -> Result<PaletteVolume> {
        self.build_volume_with_progress(&|| {})
    }

    /// Compute the raw palette volume, calling `on_slab` after each red slab
    ///
    /// `on_slab` runs on worker threads, 256 times in total, in no
    /// particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the dedicated thread pool cannot be created
    pub fn build_volume_with_progress<F>(&self, on_slab: &F) -> Result<PaletteVolume>
    where
        F: Fn() + Sync,
    {
        let start = Instant::now();
        tracing::debug!(
            tiles = self.snapshot.tiles().len(),
            walls = self.snapshot.walls().len(),
            paints = self.snapshot.paints().len(),
            "matching color cube against candidates"
        );

        let mut tile_wall = vec![0u32; COLOR_CUBE_SIZE];
        let mut paint = vec![0u8; COLOR_CUBE_SIZE];

        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| invalid_parameter("threads", &threads, &e))?;
                pool.install(|| self.fill_slabs(&mut tile_wall, &mut paint, on_slab));
            }
            None => self.fill_slabs(&mut tile_wall, &mut paint, on_slab),
        }

        tracing::debug!(elapsed = ?start.elapsed(), "palette volume complete");

        Ok(PaletteVolume { tile_wall, paint })
    }

    /// Build a palette store ready for lookups
    ///
    /// # Errors
    ///
    /// Returns an error if the dedicated thread pool cannot be created
    pub fn build(&self) -> Result<PaletteStore> {
        self.build_with_progress(&|| {})
    }

    /// Build a palette store, reporting each completed red slab
    ///
    /// # Errors
    ///
    /// Returns an error if the dedicated thread pool cannot be created
    pub fn build_with_progress<F>(&self, on_slab: &F) -> Result<PaletteStore>
    where
        F: Fn() + Sync,
    {
        let start = Instant::now();
        let volume = self.build_volume_with_progress(on_slab)?;
        let store = PaletteStore::load(volume.tile_wall(), volume.paint())?;
        tracing::info!(elapsed = ?start.elapsed(), "palette built");
        Ok(store)
    }

    fn fill_slabs<F>(&self, tile_wall: &mut [u32], paint: &mut [u8], on_slab: &F)
    where
        F: Fn() + Sync,
    {
        let tiles = self.snapshot.tiles();
        let walls = self.snapshot.walls();
        let paints = self.snapshot.paints();

        tile_wall
            .par_chunks_mut(SLAB_SIZE)
            .zip(paint.par_chunks_mut(SLAB_SIZE))
            .enumerate()
            .for_each(|(slab, (tile_wall_slab, paint_slab))| {
                let base = slab * SLAB_SIZE;
                for (offset, (tile_wall_out, paint_out)) in tile_wall_slab
                    .iter_mut()
                    .zip(paint_slab.iter_mut())
                    .enumerate()
                {
                    let (r, g, b) = unpack_red_major(base + offset);
                    let color = [r, g, b];

                    let tile = nearest_candidate(tiles, color);
                    let wall = nearest_candidate(walls, color);
                    *tile_wall_out = pack_tile_wall(tile, wall);
                    *paint_out = nearest_paint(paints, color);
                }
                on_slab();
            });
    }
}
