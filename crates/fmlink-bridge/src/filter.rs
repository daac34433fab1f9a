//! Filter seam for the conversion paths
//!
//! De-emphasis (modem to network) and pre-emphasis (network to modem) are
//! not implemented yet; the bridge only reserves their insertion points.
//! A CTCSS-stripping low-pass would slot into the same seam.

/// In-place processing over a block of normalized samples.
pub trait AudioFilter {
    fn process(&mut self, samples: &mut [f32]);
}

/// Leaves samples untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl AudioFilter for PassThrough {
    fn process(&mut self, _samples: &mut [f32]) {}
}
