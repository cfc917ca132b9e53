use serde::Serialize;

/// Plasma, 11 steps, dark to bright
pub const PLASMA_11: [&str; 11] = [
    "#0C0786", "#40039C", "#6A00A7", "#8F0DA3", "#B02A8F", "#CA4678", "#E06461", "#F1824C",
    "#FCA635", "#FCCC25", "#EFF821",
];

/// Maps values onto a palette over a fixed domain. Values outside the
/// domain clip to the first or last color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearColorMapper {
    pub palette: Vec<String>,
    pub low: f64,
    pub high: f64,
}

impl LinearColorMapper {
    pub fn new(palette: Vec<String>, low: f64, high: f64) -> Self {
        Self { palette, low, high }
    }

    /// Reversed plasma: bright for quiet, dark for busy
    pub fn busyness(ceiling: f64) -> Self {
        let palette = PLASMA_11.iter().rev().map(|c| c.to_string()).collect();
        Self::new(palette, 0.0, ceiling)
    }

    pub fn color_index(&self, value: f64) -> usize {
        let n = self.palette.len();
        if n == 0 || value.is_nan() || value <= self.low {
            return 0;
        }
        if value >= self.high {
            return n - 1;
        }
        let normed = (value - self.low) / (self.high - self.low);
        ((normed * n as f64).floor() as usize).min(n - 1)
    }

    pub fn color(&self, value: f64) -> &str {
        self.palette
            .get(self.color_index(value))
            .map(String::as_str)
            .unwrap_or("#808080")
    }

    /// Stepped colorscale in the runtime's `[[fraction, color], ...]` form,
    /// matching `color` bin for bin.
    pub fn colorscale(&self) -> Vec<(f64, String)> {
        let n = self.palette.len();
        let mut stops = Vec::with_capacity(n * 2);
        for (i, color) in self.palette.iter().enumerate() {
            stops.push((i as f64 / n as f64, color.clone()));
            stops.push(((i + 1) as f64 / n as f64, color.clone()));
        }
        stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_brightest_color() {
        let mapper = LinearColorMapper::busyness(30.0);
        assert_eq!(mapper.color(0.0), "#EFF821");
        assert_eq!(mapper.color(-4.0), "#EFF821");
    }

    #[test]
    fn values_at_or_above_the_ceiling_saturate() {
        let mapper = LinearColorMapper::busyness(30.0);
        assert_eq!(mapper.color(30.0), "#0C0786");
        assert_eq!(mapper.color(120.0), "#0C0786");
        assert_eq!(mapper.color(29.9), "#0C0786");
    }

    #[test]
    fn bins_are_evenly_spaced() {
        let mapper = LinearColorMapper::busyness(11.0);
        for i in 0..11 {
            assert_eq!(mapper.color_index(i as f64 + 0.5), i);
        }
    }

    #[test]
    fn colorscale_spans_unit_interval() {
        let scale = LinearColorMapper::busyness(30.0).colorscale();
        assert_eq!(scale.len(), 22);
        assert_eq!(scale.first().map(|s| s.0), Some(0.0));
        assert_eq!(scale.last().map(|s| s.0), Some(1.0));
        assert_eq!(scale[0].1, scale[1].1);
    }
}
