mod quadratic;

pub use quadratic::FlattenQuadratic;

/// Parameters controlling curve flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlattenParams {
    /// Shortest chord a flattened segment may have, except the final one.
    pub min_chord_length: f64,
    /// Maximum number of segments for one curve.
    pub max_segments: usize,
}

impl Default for FlattenParams {
    fn default() -> Self {
        Self {
            min_chord_length: 0.1,
            max_segments: 100,
        }
    }
}
