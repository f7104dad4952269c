use crate::coords::Vec2;

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

impl SpreadMode {
    /// Maps an arbitrary parameter into [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t - t.floor(),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient in region-local pixel space.
///
/// `start` and `end` are in the same space as shape geometry. Stops are kept
/// sorted by `t` on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, mut stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        stops.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { start, end, stops, spread }
    }

    /// Evenly spaced stops from `colors`.
    pub fn from_colors(start: Vec2, end: Vec2, colors: &[Color]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &c)| ColorStop::new(i as f32 / last, c))
            .collect();
        Self::new(start, end, stops, SpreadMode::Pad)
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }

    /// Color at parameter `t` along the gradient axis, after spread.
    pub fn sample(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::transparent();
        };
        let t = self.spread.apply(t);
        if t <= first.t {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.t {
                let span = b.t - a.t;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.t) / span);
            }
        }
        self.stops[self.stops.len() - 1].color
    }

    /// Samples `resolution` evenly spaced texels over [0, 1].
    pub fn sample_row(&self, resolution: usize) -> Vec<Color> {
        let denom = resolution.saturating_sub(1).max(1) as f32;
        (0..resolution).map(|i| self.sample(i as f32 / denom)).collect()
    }

    /// Blends two gradients; positions and colors are interpolated by `t`.
    ///
    /// Colors are compared at the union of both stop sets so neither
    /// gradient loses detail.
    pub fn interpolate_with(&self, other: &LinearGradient, t: f32) -> LinearGradient {
        let mut ts: Vec<f32> = self.stops.iter().chain(other.stops.iter()).map(|s| s.t).collect();
        ts.sort_by(f32::total_cmp);
        ts.dedup_by(|a, b| (*a - *b).abs() <= f32::EPSILON);

        let stops = ts
            .into_iter()
            .map(|st| ColorStop::new(st, self.sample(st).lerp(other.sample(st), t)))
            .collect();
        LinearGradient::new(
            self.start.lerp(other.start, t),
            self.end.lerp(other.end, t),
            stops,
            if t < 0.5 { self.spread } else { other.spread },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_to_white() -> LinearGradient {
        LinearGradient::from_colors(
            Vec2::zero(),
            Vec2::new(10.0, 0.0),
            &[Color::black(), Color::white()],
        )
    }

    #[test]
    fn sample_interpolates_between_stops() {
        let g = black_to_white();
        assert_eq!(g.sample(0.0), Color::black());
        assert_eq!(g.sample(1.0), Color::white());
        assert_eq!(g.sample(0.5), Color::from_premul(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn pad_clamps_out_of_range() {
        let g = black_to_white();
        assert_eq!(g.sample(-3.0), Color::black());
        assert_eq!(g.sample(7.0), Color::white());
    }

    #[test]
    fn reflect_mirrors() {
        assert!((SpreadMode::Reflect.apply(1.25) - 0.75).abs() < 1e-6);
        assert!((SpreadMode::Repeat.apply(1.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn sample_row_hits_both_ends() {
        let row = black_to_white().sample_row(5);
        assert_eq!(row.len(), 5);
        assert_eq!(row[0], Color::black());
        assert_eq!(row[4], Color::white());
    }

    #[test]
    fn stops_are_sorted() {
        let g = LinearGradient::new(
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            vec![ColorStop::new(1.0, Color::white()), ColorStop::new(0.0, Color::black())],
            SpreadMode::Pad,
        );
        assert_eq!(g.stops[0].t, 0.0);
        assert!(g.is_valid());
    }
}
