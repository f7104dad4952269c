/// Caller-driven frame clock.
///
/// The canvas never reads a system clock; the host passes the presentation
/// time of each frame to [`update`](Self::update).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTime {
    time: f64,
    delta: f64,
    frame_count: u64,
    refresh_rate: f64,
}

impl FrameTime {
    /// Weight of the newest frame in the smoothed refresh rate.
    const REFRESH_RATE_SLEW: f64 = 0.3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Advances to `time` (seconds).
    ///
    /// The first update yields a zero delta. Time going backwards also yields a
    /// zero delta and is logged.
    pub fn update(&mut self, time: f64) {
        let delta = if self.frame_count == 0 { 0.0 } else { time - self.time };
        self.delta = if delta < 0.0 {
            log::warn!("frame time went backwards ({} -> {})", self.time, time);
            0.0
        } else {
            delta
        };

        if self.delta > 0.0 {
            let rate = 1.0 / self.delta;
            self.refresh_rate = if self.refresh_rate == 0.0 {
                rate
            } else {
                rate * Self::REFRESH_RATE_SLEW + self.refresh_rate * (1.0 - Self::REFRESH_RATE_SLEW)
            };
        }

        self.time = time;
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Smoothed frames per second; 0 until two frames have been seen.
    #[inline]
    pub fn refresh_rate(&self) -> f64 {
        self.refresh_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_no_delta() {
        let mut t = FrameTime::new();
        t.update(5.0);
        assert_eq!(t.delta(), 0.0);
        assert_eq!(t.frame_count(), 1);
        assert_eq!(t.time(), 5.0);
    }

    #[test]
    fn delta_tracks_successive_updates() {
        let mut t = FrameTime::new();
        t.update(1.0);
        t.update(1.5);
        assert_eq!(t.delta(), 0.5);
        assert_eq!(t.refresh_rate(), 2.0);
    }

    #[test]
    fn backwards_time_clamps_delta() {
        let mut t = FrameTime::new();
        t.update(2.0);
        t.update(1.0);
        assert_eq!(t.delta(), 0.0);
        assert_eq!(t.time(), 1.0);
        assert_eq!(t.frame_count(), 2);
    }
}
