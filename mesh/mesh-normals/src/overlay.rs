//! Normal overlay: line segments for inspecting vertex normals.
//!
//! Builds one segment per vertex entry from its position along its normal,
//! optionally restricted to seam entries, and exports the segments as OBJ
//! lines for external viewers.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use mesh_types::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NormalsError, NormalsResult};
use crate::grouping::{ExactPosition, PositionKey, split_vertex_counts};

/// Display settings for the normal overlay.
///
/// Persisted as JSON so they survive between sessions. Fields missing from
/// a stored file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Length of each drawn normal in mesh units.
    ///
    /// Default: `1.0`
    pub normal_length: f64,

    /// Label each segment with its vertex entry index.
    ///
    /// Default: `false`
    pub show_indices: bool,

    /// Only draw entries whose position is shared with another entry.
    ///
    /// Default: `false`
    pub split_vertices_only: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            normal_length: 1.0,
            show_indices: false,
            split_vertices_only: false,
        }
    }
}

impl OverlaySettings {
    /// Set the drawn normal length.
    #[must_use]
    pub const fn with_normal_length(mut self, length: f64) -> Self {
        self.normal_length = length;
        self
    }

    /// Enable or disable index labels.
    #[must_use]
    pub const fn with_show_indices(mut self, show: bool) -> Self {
        self.show_indices = show;
        self
    }

    /// Enable or disable the seam-only filter.
    #[must_use]
    pub const fn with_split_vertices_only(mut self, only: bool) -> Self {
        self.split_vertices_only = only;
        self
    }

    /// Load settings from a JSON file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> NormalsResult<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No overlay settings found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Save settings to a JSON file, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> NormalsResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// One drawn normal.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalSegment {
    /// Vertex entry index.
    pub vertex: usize,
    /// The entry's position.
    pub start: Point3<f64>,
    /// `start + normal * normal_length`.
    pub end: Point3<f64>,
    /// Index label, when enabled.
    pub label: Option<String>,
}

impl NormalSegment {
    /// Drawn length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Build overlay segments for a set of vertex normals.
///
/// Zero normals give zero-length segments. Seams are detected with exact
/// position matching.
///
/// # Errors
///
/// Returns [`NormalsError::LengthMismatch`] if `positions` and `normals`
/// differ in length.
///
/// # Example
///
/// ```
/// use mesh_normals::{build_overlay, recalculate_mesh_normals, NormalParams, OverlaySettings};
/// use mesh_types::split_unit_cube;
///
/// let cube = split_unit_cube();
/// let normals = recalculate_mesh_normals(&cube, &NormalParams::for_cad())
///     .unwrap()
///     .into_normals();
///
/// let settings = OverlaySettings::default().with_normal_length(0.25);
/// let segments = build_overlay(&cube.positions(), &normals, &settings).unwrap();
/// assert_eq!(segments.len(), 24);
/// assert!((segments[0].length() - 0.25).abs() < 1e-12);
/// ```
pub fn build_overlay(
    positions: &[Point3<f64>],
    normals: &[Vector3<f64>],
    settings: &OverlaySettings,
) -> NormalsResult<Vec<NormalSegment>> {
    if positions.len() != normals.len() {
        return Err(NormalsError::LengthMismatch {
            positions: positions.len(),
            normals: normals.len(),
        });
    }

    let counts = settings
        .split_vertices_only
        .then(|| split_vertex_counts(positions, &ExactPosition));

    let segments: Vec<NormalSegment> = positions
        .iter()
        .zip(normals)
        .enumerate()
        .filter(|(_, (position, _))| {
            counts.as_ref().is_none_or(|counts| {
                counts
                    .get(&ExactPosition.key(position))
                    .is_some_and(|&count| count > 1)
            })
        })
        .map(|(vertex, (position, normal))| NormalSegment {
            vertex,
            start: *position,
            end: position + normal * settings.normal_length,
            label: settings.show_indices.then(|| vertex.to_string()),
        })
        .collect();

    debug!(
        segments = segments.len(),
        vertices = positions.len(),
        "Built normal overlay"
    );

    Ok(segments)
}

/// Write overlay segments as OBJ vertex and line records.
///
/// Each segment becomes two `v` records and one `l` record. Labels are
/// written as comments ahead of their segment.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_overlay_obj<W: Write>(segments: &[NormalSegment], writer: W) -> NormalsResult<()> {
    let mut writer = BufWriter::new(writer);

    writeln!(writer, "# Vertex normal overlay")?;
    writeln!(writer, "# {} segments", segments.len())?;

    for (i, segment) in segments.iter().enumerate() {
        if let Some(label) = &segment.label {
            writeln!(writer, "# vertex {label}")?;
        }
        let (s, e) = (&segment.start, &segment.end);
        writeln!(writer, "v {} {} {}", s.x, s.y, s.z)?;
        writeln!(writer, "v {} {} {}", e.x, e.y, e.z)?;
        // OBJ indices are 1-based
        writeln!(writer, "l {} {}", 2 * i + 1, 2 * i + 2)?;
    }

    writer.flush()?;
    Ok(())
}
