//! Result types for normal recomputation.

// Contribution counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use std::fmt;

use mesh_types::Vector3;

/// Statistics gathered during one recomputation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalsSummary {
    /// Number of vertex entries (length of the output).
    pub vertex_count: usize,

    /// Number of faces.
    pub face_count: usize,

    /// Number of distinct positions referenced by faces.
    pub position_groups: usize,

    /// Number of positions shared by two or more vertex entries (seams).
    pub shared_positions: usize,

    /// Number of faces with a zero-length normal.
    pub degenerate_faces: usize,

    /// Number of face contributions summed into a vertex normal.
    pub accepted_contributions: usize,

    /// Number of face contributions skipped by the smoothing-angle test.
    pub rejected_contributions: usize,

    /// Number of vertex entries whose normal came out zero.
    pub zero_normals: usize,
}

impl NormalsSummary {
    /// Check if any contribution was rejected as across a hard edge.
    #[must_use]
    pub const fn had_rejections(&self) -> bool {
        self.rejected_contributions > 0
    }

    /// Fraction of tested contributions that were accepted.
    ///
    /// `1.0` when nothing was tested.
    #[must_use]
    pub fn acceptance_ratio(&self) -> f64 {
        let tested = self.accepted_contributions + self.rejected_contributions;
        if tested == 0 {
            1.0
        } else {
            self.accepted_contributions as f64 / tested as f64
        }
    }
}

impl fmt::Display for NormalsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Normals: {} vertices, {} faces, {} seams, {} accepted / {} rejected contributions",
            self.vertex_count,
            self.face_count,
            self.shared_positions,
            self.accepted_contributions,
            self.rejected_contributions
        )?;
        if self.degenerate_faces > 0 {
            write!(f, ", {} degenerate faces", self.degenerate_faces)?;
        }
        if self.zero_normals > 0 {
            write!(f, ", {} zero normals", self.zero_normals)?;
        }
        Ok(())
    }
}

/// Recomputed normals together with their statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalsOutput {
    /// One normal per vertex entry, unit length or zero.
    pub normals: Vec<Vector3<f64>>,

    /// Statistics for this run.
    pub summary: NormalsSummary,
}

impl NormalsOutput {
    /// Discard the summary and keep the normals.
    #[must_use]
    pub fn into_normals(self) -> Vec<Vector3<f64>> {
        self.normals
    }
}
