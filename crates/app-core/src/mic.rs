//! Microphone level reduction and blow detection.
//!
//! The frontend feeds one analyser snapshot per frame; everything here is
//! pure so the trigger logic tests without an audio graph.

use crate::constants::{BLOW_HOLD_FRAMES, BLOW_THRESHOLD};

/// Mean of an analyser's byte frequency bins (0..255). Empty input is silent.
#[inline]
pub fn band_average(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    bins.iter().map(|b| *b as u32).sum::<u32>() as f32 / bins.len() as f32
}

/// Fires once the band average stays above the threshold for a few
/// consecutive frames, then re-arms after a quiet frame.
#[derive(Clone, Copy, Debug)]
pub struct BlowDetector {
    threshold: f32,
    hold_frames: u32,
    run: u32,
}

impl Default for BlowDetector {
    fn default() -> Self {
        Self::new(BLOW_THRESHOLD, BLOW_HOLD_FRAMES)
    }
}

impl BlowDetector {
    pub fn new(threshold: f32, hold_frames: u32) -> Self {
        Self {
            threshold,
            hold_frames: hold_frames.max(1),
            run: 0,
        }
    }

    /// Feed one frame's level; true exactly on the frame the sustain
    /// requirement is first met.
    pub fn feed(&mut self, level: f32) -> bool {
        if level > self.threshold {
            if self.run >= self.hold_frames {
                return false;
            }
            self.run += 1;
            self.run == self.hold_frames
        } else {
            self.run = 0;
            false
        }
    }
}
