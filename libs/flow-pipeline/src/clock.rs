//! # Frame Clock
//!
//! Turns the host's elapsed time into the values forwarded to the tube
//! shader each frame. Never feeds back into geometry.

/// Per-frame shader inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameUniforms {
    /// Seconds since the clock started (`uTime`).
    pub time: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
}

/// Tracks elapsed time between frames.
///
/// # Example
///
/// ```rust
/// use flow_pipeline::FrameClock;
///
/// let mut clock = FrameClock::new();
/// assert_eq!(clock.tick(0.5).delta, 0.5);
///
/// let uniforms = clock.tick(0.75);
/// assert_eq!(uniforms.time, 0.75);
/// assert_eq!(uniforms.delta, 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_elapsed: f64,
}

impl FrameClock {
    /// Creates a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances to `elapsed` seconds.
    ///
    /// A host clock that goes backwards yields a zero delta.
    pub fn tick(&mut self, elapsed: f64) -> FrameUniforms {
        let delta = (elapsed - self.last_elapsed).max(0.0);
        self.last_elapsed = elapsed;
        FrameUniforms {
            time: elapsed as f32,
            delta: delta as f32,
        }
    }

    /// Elapsed seconds at the last tick.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.last_elapsed
    }
}
