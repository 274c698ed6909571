//! Parameters for normal recomputation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NormalsError, NormalsResult};

/// How incident faces are weighted when summed into a vertex normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WeightingMode {
    /// Plain per-entry sum of raw face normals.
    ///
    /// Ignores position sharing and the smoothing angle entirely.
    Unweighted,

    /// Faces are weighted by their area.
    AreaWeighted,

    /// Faces are weighted by the corner angle they subtend at the vertex.
    AngleWeighted,

    /// Faces are weighted by area times subtended corner angle.
    #[default]
    AreaAndAngleWeighted,
}

impl WeightingMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Unweighted,
        Self::AreaWeighted,
        Self::AngleWeighted,
        Self::AreaAndAngleWeighted,
    ];

    /// Whether this mode needs the subtended corner angle.
    #[must_use]
    pub const fn uses_corner_angle(self) -> bool {
        matches!(self, Self::AngleWeighted | Self::AreaAndAngleWeighted)
    }
}

impl fmt::Display for WeightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unweighted => "unweighted",
            Self::AreaWeighted => "area-weighted",
            Self::AngleWeighted => "angle-weighted",
            Self::AreaAndAngleWeighted => "area-and-angle-weighted",
        };
        f.write_str(name)
    }
}

/// How vertex entries are recognized as sharing a position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PositionMatching {
    /// Bit-exact coordinate equality (`-0.0` and `0.0` match).
    ///
    /// Near-duplicates produced by floating-point drift stay separate.
    #[default]
    Exact,

    /// Coordinates are rounded to the nearest multiple of `cell_size`
    /// before comparison.
    Grid {
        /// Grid spacing in mesh units.
        cell_size: f64,
    },
}

/// Configuration parameters for normal recomputation.
///
/// # Example
///
/// ```
/// use mesh_normals::{NormalParams, WeightingMode};
///
/// // Defaults: area-and-angle weighting, 60 degree smoothing angle
/// let params = NormalParams::default();
///
/// // Or customize
/// let params = NormalParams::default()
///     .with_mode(WeightingMode::AngleWeighted)
///     .with_smoothing_angle(30.0);
/// assert!((params.smoothing_angle - 30.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalParams {
    /// Face weighting mode.
    ///
    /// Default: [`WeightingMode::AreaAndAngleWeighted`]
    pub mode: WeightingMode,

    /// Smoothing angle in degrees.
    ///
    /// A face whose normal deviates from a vertex entry's reference normal
    /// by more than this is treated as across a hard edge and does not
    /// contribute. Ignored by [`WeightingMode::Unweighted`].
    /// Default: `60.0`
    pub smoothing_angle: f64,

    /// Strategy for recognizing shared positions.
    ///
    /// Default: [`PositionMatching::Exact`]
    pub position_matching: PositionMatching,

    /// Vectors at or below this length are treated as zero.
    ///
    /// Must be finite and non-negative.
    ///
    /// Default: `0.0` (only exact zero)
    pub epsilon: f64,
}

impl Default for NormalParams {
    fn default() -> Self {
        Self {
            mode: WeightingMode::AreaAndAngleWeighted,
            smoothing_angle: 60.0,
            position_matching: PositionMatching::Exact,
            epsilon: 0.0,
        }
    }
}

impl NormalParams {
    /// Create params that smooth across every edge.
    #[must_use]
    pub fn smooth() -> Self {
        Self {
            smoothing_angle: 180.0,
            ..Default::default()
        }
    }

    /// Create params that keep every non-coplanar edge hard.
    ///
    /// A small tolerance absorbs rounding between coplanar faces.
    #[must_use]
    pub fn faceted() -> Self {
        Self {
            smoothing_angle: 1.0,
            ..Default::default()
        }
    }

    /// Create params for CAD-style models with crisp 30 degree creases.
    #[must_use]
    pub fn for_cad() -> Self {
        Self {
            smoothing_angle: 30.0,
            ..Default::default()
        }
    }

    /// Set the weighting mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: WeightingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the smoothing angle in degrees.
    #[must_use]
    pub const fn with_smoothing_angle(mut self, degrees: f64) -> Self {
        self.smoothing_angle = degrees;
        self
    }

    /// Set the position matching strategy.
    #[must_use]
    pub const fn with_position_matching(mut self, matching: PositionMatching) -> Self {
        self.position_matching = matching;
        self
    }

    /// Set the zero-length threshold.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check the params before any computation runs.
    ///
    /// # Errors
    ///
    /// Returns [`NormalsError::InvalidAngle`] for a NaN smoothing angle and
    /// [`NormalsError::InvalidCellSize`] for a grid cell size that is not
    /// finite and positive. An epsilon that is negative or not finite gives
    /// [`NormalsError::InvalidEpsilon`].
    pub fn validate(&self) -> NormalsResult<()> {
        if self.smoothing_angle.is_nan() {
            return Err(NormalsError::InvalidAngle(self.smoothing_angle));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(NormalsError::InvalidEpsilon(self.epsilon));
        }
        if let PositionMatching::Grid { cell_size } = self.position_matching {
            if !cell_size.is_finite() || cell_size <= 0.0 {
                return Err(NormalsError::InvalidCellSize(cell_size));
            }
        }
        Ok(())
    }
}
