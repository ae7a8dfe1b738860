/// Pipeline-state key identifying one compiled shader variant

use crate::shader::Stage;

/// The subset of pipeline state that affects generated code
///
/// Two keys select the same variant iff every field matches exactly;
/// equality is structural, not semantic. Fields that cannot influence code
/// generation for a given stage are zeroed by [`ShaderKey::normalized_for`]
/// so that semantically-identical requests collapse to one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaderKey {
    /// Compile the binning-pass variant (a vertex-only hardware concept)
    pub binning_pass: bool,

    /// Two-sided color selection in the fragment stage
    pub color_two_side: bool,

    /// Compile the fragment stage at half precision
    pub half_precision: bool,

    /// Flat-shaded rasterization forces flat varying interpolation
    pub rasterflat: bool,

    /// Per-sample texture-coordinate saturation is in effect
    pub has_per_samp: bool,

    /// Per-sampler saturation mask for the S axis, vertex stage
    pub vsaturate_s: u16,
    /// Per-sampler saturation mask for the T axis, vertex stage
    pub vsaturate_t: u16,
    /// Per-sampler saturation mask for the R axis, vertex stage
    pub vsaturate_r: u16,

    /// Per-sampler saturation mask for the S axis, fragment stage
    pub fsaturate_s: u16,
    /// Per-sampler saturation mask for the T axis, fragment stage
    pub fsaturate_t: u16,
    /// Per-sampler saturation mask for the R axis, fragment stage
    pub fsaturate_r: u16,
}

impl ShaderKey {
    /// Zero every field that cannot influence code generation for `stage`
    ///
    /// Runs before each cache lookup and before constructing a new variant,
    /// so the key stored with a variant is always the normalized form.
    /// Normalizing an already-normalized key is a no-op.
    pub fn normalized_for(mut self, stage: Stage) -> ShaderKey {
        match stage {
            Stage::Fragment | Stage::Compute => {
                self.binning_pass = false;
                if self.has_per_samp {
                    self.vsaturate_s = 0;
                    self.vsaturate_t = 0;
                    self.vsaturate_r = 0;
                }
            }
            Stage::Vertex => {
                self.color_two_side = false;
                self.half_precision = false;
                self.rasterflat = false;
                if self.has_per_samp {
                    self.fsaturate_s = 0;
                    self.fsaturate_t = 0;
                    self.fsaturate_r = 0;
                }
            }
        }
        self
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
