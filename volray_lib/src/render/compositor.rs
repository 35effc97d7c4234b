use crate::color::{self, RGBA};

/// Front-to-back accumulator of premultiplied color.
///
/// Alpha never decreases and stays in <0;1> as long as every added
/// sample has opacity in <0;1>.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    color: RGBA,
}

impl Accumulator {
    pub fn new() -> Accumulator {
        Accumulator {
            color: color::zero(),
        }
    }

    /// Blend `sample` behind everything accumulated so far.
    /// `sample` color is straight (not premultiplied).
    pub fn add(&mut self, sample: &RGBA) {
        let weight = (1.0 - self.color.w) * sample.w;
        self.color.x += weight * sample.x;
        self.color.y += weight * sample.y;
        self.color.z += weight * sample.z;
        self.color.w += weight;
    }

    pub fn opacity(&self) -> f32 {
        self.color.w
    }

    pub fn color(&self) -> RGBA {
        self.color
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of compositing one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeResult {
    /// Premultiplied color
    pub color: RGBA,
    /// Number of samples consumed
    pub steps: usize,
}

impl CompositeResult {
    /// Transparent, no samples
    pub fn empty() -> CompositeResult {
        CompositeResult {
            color: color::zero(),
            steps: 0,
        }
    }
}

/// Composite colored samples front to back.
///
/// With `early_exit` set, stops right after opacity reaches the threshold.
pub fn composite<I>(samples: I, early_exit: Option<f32>) -> CompositeResult
where
    I: IntoIterator<Item = RGBA>,
{
    let mut accum = Accumulator::new();
    let mut steps = 0;

    for sample in samples {
        accum.add(&sample);
        steps += 1;

        if let Some(threshold) = early_exit {
            if accum.opacity() >= threshold {
                break;
            }
        }
    }

    CompositeResult {
        color: accum.color(),
        steps,
    }
}
