//! Sampling and tolerance parameters.

use crate::float_types::{Real, tolerance};
use serde::{Deserialize, Serialize};

/// Every resolution- or tolerance-dependent operation reads its parameters
/// from here. Serializable so a scene can store the settings a region was
/// built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Maximum |f| for a segment endpoint to count as on its base, and
    /// maximum distance for boundary membership and joint matching.
    pub tolerance: Real,
    /// Polyline vertices per full turn of a circular arc, and the number of
    /// march steps across the bounding-box diagonal of a traced curve.
    pub segment_samples: usize,
    /// Explicit march step for traced curves. `None` derives it from the
    /// curve extent and `segment_samples`.
    pub march_step: Option<Real>,
    /// Hard cap on march steps for a single trace.
    pub max_march_steps: usize,
    /// Newton iterations when projecting a predicted point back onto a curve.
    pub newton_iterations: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tolerance: tolerance(),
            segment_samples: 256,
            march_step: None,
            max_march_steps: 200_000,
            newton_iterations: 32,
        }
    }
}

impl SamplingConfig {
    pub const fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub const fn with_segment_samples(mut self, samples: usize) -> Self {
        self.segment_samples = samples;
        self
    }

    pub const fn with_march_step(mut self, step: Real) -> Self {
        self.march_step = Some(step);
        self
    }

    /// Step used when tracing a curve whose relevant extent is `extent`.
    pub fn step_for_extent(&self, extent: Real) -> Real {
        if let Some(step) = self.march_step {
            return step.max(self.tolerance);
        }
        let samples = self.segment_samples.max(8) as Real;
        let step = if extent.is_finite() && extent > 0.0 {
            extent / samples
        } else {
            1.0 / samples
        };
        step.max(self.tolerance * 10.0)
    }
}
