// ---------------------------------------------------------------------------
// WorldConfigError: typed validation errors for world creation
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised when validating generation parameters at world-creation time.
///
/// Bad parameters fail fast here instead of being clamped into silently
/// different terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldConfigError {
    /// The world must span at least one chunk on each axis.
    EmptyWorld,
    /// A chunk must cover at least one world unit per side.
    ZeroChunkSize,
    /// Noise scale must be strictly positive; zero would collapse every
    /// sample onto the same input point.
    NonPositiveNoiseScale,
    /// At least one noise octave is required.
    ZeroOctaves,
    /// Per-octave amplitude falloff must be strictly positive.
    NonPositivePersistence,
    /// Per-octave frequency gain must be strictly positive.
    NonPositiveLacunarity,
    /// The height multiplier must be a finite number.
    NonFiniteHeightMultiplier,
    /// The camera height anchoring full detail must be strictly positive.
    NonPositiveFullDetailHeight,
}

impl fmt::Display for WorldConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldConfigError::EmptyWorld => {
                write!(f, "world dimensions must be at least 1x1 chunks")
            }
            WorldConfigError::ZeroChunkSize => {
                write!(f, "chunk size must be at least 1 world unit")
            }
            WorldConfigError::NonPositiveNoiseScale => {
                write!(f, "noise scale must be strictly positive")
            }
            WorldConfigError::ZeroOctaves => {
                write!(f, "at least one noise octave is required")
            }
            WorldConfigError::NonPositivePersistence => {
                write!(f, "noise persistence must be strictly positive")
            }
            WorldConfigError::NonPositiveLacunarity => {
                write!(f, "noise lacunarity must be strictly positive")
            }
            WorldConfigError::NonFiniteHeightMultiplier => {
                write!(f, "height multiplier must be finite")
            }
            WorldConfigError::NonPositiveFullDetailHeight => {
                write!(f, "full-detail camera height must be strictly positive")
            }
        }
    }
}

impl std::error::Error for WorldConfigError {}
