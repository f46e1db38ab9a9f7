/// Maps a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            d0: domain.0,
            d1: domain.1,
            r0: range.0,
            r1: range.1,
        }
    }

    pub fn map(&self, v: f64) -> f64 {
        let span = self.d1 - self.d0;
        if span == 0.0 {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (v - self.d0) / span * (self.r1 - self.r0)
    }
}

/// Round step for roughly `count` intervals over `[0, max]`.
fn nice_step(max: f64, count: usize) -> f64 {
    let raw = max / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    nice * magnitude
}

/// Ticks from zero up to the first round value covering `max`.
pub fn nice_ticks(max: f64, count: usize) -> Vec<f64> {
    if !max.is_finite() || max <= 0.0 {
        return vec![0.0, 1.0];
    }
    let step = nice_step(max, count);
    let n = (max / step).ceil() as usize;
    (0..=n).map(|i| i as f64 * step).collect()
}

/// About `count` evenly spaced positions between `min` and `max`, snapped to
/// day boundaries when the window spans several days.
pub fn time_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    const DAY_MS: f64 = 86_400_000.0;
    if !(max > min) || count == 0 {
        return Vec::new();
    }
    let span = max - min;
    if span >= 2.0 * DAY_MS {
        let days = (span / DAY_MS).ceil();
        let step_days = (days / count as f64).ceil().max(1.0);
        let step = step_days * DAY_MS;
        let first = (min / DAY_MS).ceil() * DAY_MS;
        let mut ticks = Vec::new();
        let mut t = first;
        while t <= max {
            ticks.push(t);
            t += step;
        }
        ticks
    } else {
        let step = span / count as f64;
        (0..=count).map(|i| min + i as f64 * step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_linearly() {
        let s = LinearScale::new((0.0, 100.0), (200.0, 0.0));
        assert_eq!(s.map(0.0), 200.0);
        assert_eq!(s.map(100.0), 0.0);
        assert_eq!(s.map(25.0), 150.0);
    }

    #[test]
    fn degenerate_domain_centres() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 10.0));
        assert_eq!(s.map(5.0), 5.0);
    }

    #[test]
    fn ticks_cover_max() {
        assert_eq!(nice_ticks(95.0, 4), vec![0.0, 50.0, 100.0]);
        assert_eq!(nice_ticks(1200.0, 5), vec![0.0, 500.0, 1000.0, 1500.0]);
        let t = nice_ticks(3.7, 4);
        assert_eq!(t.first(), Some(&0.0));
        assert!(*t.last().unwrap() >= 3.7);
        assert_eq!(nice_ticks(0.0, 4), vec![0.0, 1.0]);
    }

    #[test]
    fn day_ticks_on_midnight() {
        let day = 86_400_000.0;
        let ticks = time_ticks(0.5 * day, 14.2 * day, 7);
        assert_eq!(ticks.first(), Some(&day));
        assert!(ticks.iter().all(|t| t % day == 0.0));
        assert!(ticks.len() <= 8);
    }

    #[test]
    fn short_windows_split_evenly() {
        let ticks = time_ticks(0.0, 3_600_000.0, 4);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[2], 1_800_000.0);
    }
}
