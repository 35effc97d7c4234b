//! Parameter animation.
//!
//! A [`Timeline`] is a list of [`Chapter`]s played one after another. Each chapter
//! eases linearly from the targets of the previous chapter to its own targets.
//! Sampling is a pure function of elapsed time, so frames can be rendered in any order.

use nalgebra::{vector, Vector3};

use crate::render::RenderParameters;

/// One segment of a timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chapter {
    /// Length in seconds
    pub duration: f32,
    /// Cross section reached at the end of the chapter
    pub cross_section: Vector3<f32>,
    /// Alpha reached at the end of the chapter
    pub alpha: f32,
}

impl Chapter {
    pub fn new(duration: f32, cross_section: Vector3<f32>, alpha: f32) -> Chapter {
        Chapter {
            duration,
            cross_section,
            alpha,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    base: RenderParameters,
    chapters: Vec<Chapter>,
}

impl Timeline {
    /// Timeline starting from `base`.
    /// Fields not animated by chapters (step size, color mode, iso value) stay as in `base`.
    pub fn new(base: RenderParameters) -> Timeline {
        Timeline {
            base,
            chapters: vec![],
        }
    }

    /// Append chapter. Chapters with non-positive or non-finite duration are skipped.
    pub fn chapter(mut self, chapter: Chapter) -> Timeline {
        if chapter.duration.is_finite() && chapter.duration > 0.0 {
            self.chapters.push(chapter);
        } else {
            log::warn!("Skipping chapter with duration {}", chapter.duration);
        }
        self
    }

    /// Slice through the middle of the volume, then open it up again
    pub fn slice_sweep(base: RenderParameters) -> Timeline {
        let full = base.cross_section;
        Timeline::new(base)
            .chapter(Chapter::new(2.0, vector![full.x, full.y, 0.02], base.alpha))
            .chapter(Chapter::new(2.0, vector![0.02, full.y, full.z], base.alpha))
            .chapter(Chapter::new(2.0, full, 0.3))
            .chapter(Chapter::new(1.0, full, base.alpha))
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Sum of chapter durations, in seconds
    pub fn duration(&self) -> f32 {
        self.chapters.iter().map(|c| c.duration).sum()
    }

    /// Same timeline played over `seconds`, chapter lengths keep their proportions.
    /// Non-positive or non-finite lengths leave the timeline unchanged.
    pub fn stretched(mut self, seconds: f32) -> Timeline {
        let duration = self.duration();
        if !(seconds.is_finite() && seconds > 0.0) || duration <= 0.0 {
            log::warn!("Cannot stretch timeline to {} s", seconds);
            return self;
        }
        let k = seconds / duration;
        for chapter in &mut self.chapters {
            chapter.duration *= k;
        }
        self
    }

    /// Parameters at `time` seconds.
    ///
    /// Before the start (or for NaN) returns the base parameters,
    /// past the end the targets of the last chapter.
    pub fn sample(&self, time: f32) -> RenderParameters {
        let mut params = self.base;
        if time.is_nan() || time <= 0.0 {
            return params;
        }

        let mut start = 0.0;
        let mut from_section = self.base.cross_section;
        let mut from_alpha = self.base.alpha;

        for chapter in &self.chapters {
            let end = start + chapter.duration;
            if time < end {
                let k = (time - start) / chapter.duration;
                params.cross_section = from_section.lerp(&chapter.cross_section, k);
                params.alpha = from_alpha + (chapter.alpha - from_alpha) * k;
                return params;
            }
            start = end;
            from_section = chapter.cross_section;
            from_alpha = chapter.alpha;
        }

        params.cross_section = from_section;
        params.alpha = from_alpha;
        params
    }

    /// Sample times of a `fps` frames per second playback, including both ends
    pub fn frame_times(&self, fps: u32) -> impl Iterator<Item = f32> {
        let duration = self.duration();
        let frames = (duration * fps as f32).ceil() as u32;
        (0..=frames).map(move |i| f32::min(i as f32 / fps as f32, duration))
    }
}
