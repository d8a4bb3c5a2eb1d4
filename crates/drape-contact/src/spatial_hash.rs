//! Spatial hash for cloth self-collision.
//!
//! Space is cut into boxes roughly three point-spacings wide. Each point
//! mass is binned into exactly one box; only particles sharing a box are
//! ever tested against each other, so contacts across box boundaries are
//! missed. Buckets are recycled between rebuilds.

use std::collections::HashMap;

use drape_types::constants::SPATIAL_CELL_FACTOR;
use drape_types::{PointMass, Vec3};

/// Scalar cell identifier.
///
/// Holds the bit pattern of the flattened `f64` key so it can be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey(u64);

impl CellKey {
    fn from_value(value: f64) -> Self {
        // -0.0 and 0.0 must land in the same bucket.
        let value = if value == 0.0 { 0.0 } else { value };
        Self(value.to_bits())
    }

    /// The flattened key value.
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Uniform-grid index from cell key to point-mass indices.
#[derive(Debug)]
pub struct SpatialHashIndex {
    /// Box dimensions along x, y and z.
    cell: Vec3,
    /// Physical cloth width, used by the key flattening.
    width: f64,
    /// Physical cloth height, used by the key flattening.
    height: f64,
    /// Cell key → indices into the point-mass store.
    buckets: HashMap<CellKey, Vec<usize>>,
    /// Emptied buckets kept for reuse on the next rebuild.
    spare: Vec<Vec<usize>>,
}

impl SpatialHashIndex {
    /// Creates an empty index sized for a `width × height` cloth sampled
    /// by `num_width_points × num_height_points` particles.
    pub fn new(width: f32, height: f32, num_width_points: usize, num_height_points: usize) -> Self {
        let w = SPATIAL_CELL_FACTOR * width / num_width_points.max(1) as f32;
        let h = SPATIAL_CELL_FACTOR * height / num_height_points.max(1) as f32;
        Self {
            cell: Vec3::new(w, h, w.max(h)),
            width: width as f64,
            height: height as f64,
            buckets: HashMap::new(),
            spare: Vec::new(),
        }
    }

    /// Box dimensions along each axis.
    #[inline]
    pub fn cell_size(&self) -> Vec3 {
        self.cell
    }

    /// Integer box coordinates containing `position`.
    pub fn cell_coords(&self, position: Vec3) -> [f64; 3] {
        [
            (position.x as f64 / self.cell.x as f64).floor(),
            (position.y as f64 / self.cell.y as f64).floor(),
            (position.z as f64 / self.cell.z as f64).floor(),
        ]
    }

    /// Maps a position to its cell key.
    ///
    /// The flattening `x + (W/3)·(y·(H/3) + z)` uses the physical cloth
    /// size, not the cell counts, so distinct boxes can share a key.
    /// Aliased boxes simply test against each other as well.
    pub fn hash_position(&self, position: Vec3) -> CellKey {
        let [x, y, z] = self.cell_coords(position);
        let factor = SPATIAL_CELL_FACTOR as f64;
        CellKey::from_value(x + self.width / factor * (y * self.height / factor + z))
    }

    /// Discards the previous contents and re-bins every point mass.
    pub fn rebuild(&mut self, points: &[PointMass]) {
        for (_, mut bucket) in self.buckets.drain() {
            bucket.clear();
            self.spare.push(bucket);
        }

        for (i, pm) in points.iter().enumerate() {
            let key = self.hash_position(pm.position);
            let spare = &mut self.spare;
            self.buckets
                .entry(key)
                .or_insert_with(|| spare.pop().unwrap_or_default())
                .push(i);
        }
    }

    /// Indices of the point masses binned under `key`.
    pub fn bucket(&self, key: CellKey) -> &[usize] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indices of the point masses sharing a cell with `position`.
    pub fn neighbors_of(&self, position: Vec3) -> &[usize] {
        self.bucket(self.hash_position(position))
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of indexed point masses.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
