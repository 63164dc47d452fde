// File: crates/peloton-core/src/scale.rs
// Summary: Linear domain-to-pixel scales for year (X) and race time (Y), plus tick generation.

use crate::layout::Layout;
use crate::record::{Dataset, DomainBounds, RaceTime, Record};

/// Tick steps for the time axis, in seconds.
const TIME_STEPS: [f64; 13] = [
    1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 900.0, 1800.0, 3600.0,
];

/// Affine map from a continuous domain `[d0, d1]` onto a pixel range `[r0, r1]`.
///
/// The range may be inverted (`r0 > r1`). A zero-width domain maps every
/// input to the midpoint of the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.r0, self.r1)
    }

    pub fn is_degenerate(&self) -> bool {
        (self.d1 - self.d0).abs() < 1e-12
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        if self.is_degenerate() {
            return (self.r0 + self.r1) * 0.5;
        }
        let t = (v - self.d0) / (self.d1 - self.d0);
        // endpoint-exact form: t == 0 yields r0, t == 1 yields r1
        self.r0 * (1.0 - t) + self.r1 * t
    }

    #[inline]
    pub fn from_px(&self, px: f64) -> f64 {
        if self.is_degenerate() || (self.r1 - self.r0).abs() < 1e-12 {
            return self.d0;
        }
        let t = (px - self.r0) / (self.r1 - self.r0);
        self.d0 * (1.0 - t) + self.d1 * t
    }

    /// Roughly `count` round tick values (1, 2 or 5 times a power of ten) inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if self.is_degenerate() {
            return vec![self.d0];
        }
        let (lo, hi) = self.sorted_domain();
        ticks_between(lo, hi, nice_step(hi - lo, count.max(1)))
    }

    /// Like [`LinearScale::ticks`] but choosing the step from a fixed ladder.
    pub fn ticks_from_ladder(&self, ladder: &[f64], count: usize) -> Vec<f64> {
        if self.is_degenerate() {
            return vec![self.d0];
        }
        let (lo, hi) = self.sorted_domain();
        let span = hi - lo;
        let count = count.max(1) as f64;
        let step = ladder
            .iter()
            .copied()
            .find(|s| span / s <= count)
            .unwrap_or_else(|| nice_step(span, count as usize));
        ticks_between(lo, hi, step)
    }

    fn sorted_domain(&self) -> (f64, f64) {
        if self.d0 <= self.d1 { (self.d0, self.d1) } else { (self.d1, self.d0) }
    }
}

fn nice_step(span: f64, count: usize) -> f64 {
    let raw = span / count as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    // round to the nearest of 1, 2, 5, 10 on a log scale
    let nice = if norm >= 50f64.sqrt() {
        10.0
    } else if norm >= 10f64.sqrt() {
        5.0
    } else if norm >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    nice * mag
}

fn ticks_between(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 {
        return vec![lo];
    }
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// The pair of mappings consumed by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Scales {
    /// Scales for a dataset; `None` when it has no records.
    pub fn for_dataset(dataset: &Dataset, layout: &Layout) -> Option<Self> {
        dataset.bounds().map(|b| ScaleBuilder::build(&b, layout))
    }

    pub fn x_px(&self, year: i32) -> f64 {
        self.x.to_px(f64::from(year))
    }

    pub fn y_px(&self, time: RaceTime) -> f64 {
        self.y.to_px(f64::from(time.total_seconds()))
    }

    pub fn position(&self, record: &Record) -> (f64, f64) {
        (self.x_px(record.year), self.y_px(record.time))
    }

    /// Whole-year ticks, at least one year apart.
    pub fn year_ticks(&self, count: usize) -> Vec<i32> {
        let mut out: Vec<i32> = Vec::new();
        for v in self.x.ticks(count) {
            let year = v.round() as i32;
            if (v - f64::from(year)).abs() < 1e-9 && out.last() != Some(&year) {
                out.push(year);
            }
        }
        out
    }

    pub fn time_ticks(&self, count: usize) -> Vec<RaceTime> {
        self.y
            .ticks_from_ladder(&TIME_STEPS, count)
            .into_iter()
            .filter(|v| *v >= 0.0)
            .map(|v| RaceTime::from_seconds(v.round() as u32))
            .collect()
    }
}

/// Builds [`Scales`] from domain bounds and a layout.
pub struct ScaleBuilder;

impl ScaleBuilder {
    /// `x`: `[min_year, max_year]` onto `[padding, width - padding]`.
    /// `y`: `[min_time, max_time]` onto `[height - padding, padding]`; pixel y grows downwards.
    pub fn build(bounds: &DomainBounds, layout: &Layout) -> Scales {
        let x = LinearScale::new(
            (f64::from(bounds.min_year), f64::from(bounds.max_year)),
            (layout.plot_left(), layout.plot_right()),
        );
        let y = LinearScale::new(
            (
                f64::from(bounds.min_time.total_seconds()),
                f64::from(bounds.max_time.total_seconds()),
            ),
            (layout.plot_bottom(), layout.plot_top()),
        );
        tracing::debug!(
            years = ?(bounds.min_year, bounds.max_year),
            times = %format_args!("{}..{}", bounds.min_time, bounds.max_time),
            width = layout.width,
            height = layout.height,
            "built scales"
        );
        Scales { x, y }
    }

    /// Convenience over raw records; `None` for an empty slice.
    pub fn from_records(records: &[Record], layout: &Layout) -> Option<Scales> {
        DomainBounds::from_records(records).map(|b| Self::build(&b, layout))
    }
}
