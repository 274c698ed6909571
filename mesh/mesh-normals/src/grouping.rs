//! Position groups: vertex entries that share one position.
//!
//! Seams are encoded as several vertex entries at the same position. The
//! smoothing pass treats every entry of a group as seeing the faces of all
//! the others.

use hashbrown::HashMap;
use nalgebra::Point3;

use crate::params::PositionMatching;

/// Grouping key of a position.
pub type GroupKey = [u64; 3];

/// Strategy for deciding when two positions are the same.
///
/// Two positions match iff their keys are equal. Implement this to plug a
/// custom tolerance into [`PositionGroups::build`] and
/// [`recalculate_normals_with`](crate::recalculate_normals_with).
pub trait PositionKey {
    /// Map a position to its grouping key.
    fn key(&self, position: &Point3<f64>) -> GroupKey;

    /// Whether two positions map to the same key.
    fn same_position(&self, a: &Point3<f64>, b: &Point3<f64>) -> bool {
        self.key(a) == self.key(b)
    }
}

/// Bit-exact position matching.
///
/// `-0.0` and `0.0` compare equal and share a key. NaN coordinates only
/// match the identical bit pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactPosition;

impl PositionKey for ExactPosition {
    fn key(&self, position: &Point3<f64>) -> GroupKey {
        [
            canonical_bits(position.x),
            canonical_bits(position.y),
            canonical_bits(position.z),
        ]
    }
}

/// Position matching on a uniform grid.
///
/// Each coordinate is rounded to the nearest multiple of `cell_size`, and
/// the rounded cell index is keyed by its bits, so far-apart cells never
/// collide. Positions that straddle a rounding boundary can still land in
/// different cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPosition {
    /// Grid spacing in mesh units.
    pub cell_size: f64,
}

impl PositionKey for GridPosition {
    fn key(&self, position: &Point3<f64>) -> GroupKey {
        let cell = |c: f64| canonical_bits((c / self.cell_size).round());
        [cell(position.x), cell(position.y), cell(position.z)]
    }
}

impl PositionKey for PositionMatching {
    fn key(&self, position: &Point3<f64>) -> GroupKey {
        match *self {
            Self::Exact => ExactPosition.key(position),
            Self::Grid { cell_size } => GridPosition { cell_size }.key(position),
        }
    }
}

#[inline]
fn canonical_bits(c: f64) -> u64 {
    if c == 0.0 { 0 } else { c.to_bits() }
}

/// Vertex entries and incident faces at one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGroup {
    /// The shared key.
    pub key: GroupKey,
    /// Vertex entries at this position, sorted and de-duplicated.
    pub vertices: Vec<u32>,
    /// Face indices incident on any entry of the group.
    ///
    /// One item per face corner that lands here, so a collapsed face that
    /// touches the position twice is listed twice.
    pub faces: Vec<usize>,
}

impl PositionGroup {
    /// Whether more than one vertex entry sits at this position.
    #[must_use]
    pub fn is_split(&self) -> bool {
        self.vertices.len() > 1
    }
}

/// All position groups of a mesh snapshot.
///
/// Only entries referenced by a face are grouped. Groups are ordered by
/// first appearance in the face list.
#[derive(Debug, Clone, Default)]
pub struct PositionGroups {
    groups: Vec<PositionGroup>,
    slots: HashMap<GroupKey, usize>,
}

impl PositionGroups {
    /// Build position groups in a single pass over every face corner.
    ///
    /// Faces must already be validated against `positions.len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_normals::{ExactPosition, PositionGroups};
    /// use mesh_types::Point3;
    ///
    /// // Two triangles that share an edge through duplicated entries
    /// let positions = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(1.0, 1.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// let faces = [[0, 1, 2], [3, 4, 5]];
    ///
    /// let groups = PositionGroups::build(&positions, &faces, &ExactPosition);
    /// assert_eq!(groups.len(), 4);
    /// assert_eq!(groups.split_count(), 2);
    /// ```
    #[must_use]
    pub fn build<K: PositionKey + ?Sized>(
        positions: &[Point3<f64>],
        faces: &[[u32; 3]],
        matcher: &K,
    ) -> Self {
        let mut slots: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<PositionGroup> = Vec::new();

        for (face_idx, face) in faces.iter().enumerate() {
            for &v in face {
                let key = matcher.key(&positions[v as usize]);
                let slot = *slots.entry(key).or_insert_with(|| {
                    groups.push(PositionGroup {
                        key,
                        vertices: Vec::new(),
                        faces: Vec::new(),
                    });
                    groups.len() - 1
                });

                let group = &mut groups[slot];
                group.vertices.push(v);
                group.faces.push(face_idx);
            }
        }

        for group in &mut groups {
            group.vertices.sort_unstable();
            group.vertices.dedup();
        }

        Self { groups, slots }
    }

    /// Number of distinct positions referenced by faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no face references any position.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of positions shared by two or more vertex entries.
    #[must_use]
    pub fn split_count(&self) -> usize {
        self.groups.iter().filter(|g| g.is_split()).count()
    }

    /// Iterate over all groups.
    pub fn iter(&self) -> impl Iterator<Item = &PositionGroup> {
        self.groups.iter()
    }

    /// Find the group of a key.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&PositionGroup> {
        self.slots.get(key).map(|&slot| &self.groups[slot])
    }
}

impl<'a> IntoIterator for &'a PositionGroups {
    type Item = &'a PositionGroup;
    type IntoIter = std::slice::Iter<'a, PositionGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Count how many vertex entries share each position.
///
/// Unlike [`PositionGroups`], every entry is counted, referenced by a face
/// or not.
#[must_use]
pub fn split_vertex_counts<K: PositionKey + ?Sized>(
    positions: &[Point3<f64>],
    matcher: &K,
) -> HashMap<GroupKey, usize> {
    let mut counts: HashMap<GroupKey, usize> = HashMap::new();
    for position in positions {
        *counts.entry(matcher.key(position)).or_default() += 1;
    }
    counts
}
