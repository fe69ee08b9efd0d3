use crate::wire::DecodeError;
use crate::SCOPE_FRAME_LEN;

/// Size of one scope record: interleaved `f32` stereo pairs.
pub const SAMPLE_RECORD_SIZE: usize = SCOPE_FRAME_LEN * std::mem::size_of::<f32>();

/// One block of interleaved stereo samples from the engine, `[l0, r0, l1, r1, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFrame {
    pub samples: [f32; SCOPE_FRAME_LEN],
}

impl Default for SampleFrame {
    fn default() -> Self {
        Self {
            samples: [0.0; SCOPE_FRAME_LEN],
        }
    }
}

impl SampleFrame {
    /// Build from interleaved samples. Missing samples are zero, extras are ignored.
    pub fn from_interleaved(samples: &[f32]) -> Self {
        let mut frame = Self::default();
        for (dst, src) in frame.samples.iter_mut().zip(samples) {
            *dst = *src;
        }
        frame
    }

    /// Decode a [`SAMPLE_RECORD_SIZE`] record.
    pub fn from_record(record: &[u8]) -> Result<Self, DecodeError> {
        if record.len() != SAMPLE_RECORD_SIZE {
            return Err(DecodeError::WrongLength {
                expected: SAMPLE_RECORD_SIZE,
                actual: record.len(),
            });
        }
        let mut frame = Self::default();
        for (dst, chunk) in frame.samples.iter_mut().zip(record.chunks_exact(4)) {
            *dst = f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(frame)
    }

    pub fn to_record(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
    }

    /// `(left, right)` pairs in sample order.
    pub fn pairs(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.samples.chunks_exact(2).map(|p| (p[0], p[1]))
    }
}
