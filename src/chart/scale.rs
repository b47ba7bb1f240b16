//! Scale mappings from data domains to pixel ranges. These are pure value
//! types so chart geometry stays testable without any paint target.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};

/// Continuous linear scale.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Extend the domain outward to round tick boundaries (the usual
    /// power-of-ten times 1/2/5 step).
    pub fn nice(mut self, tick_count: usize) -> Self {
        let (start, stop) = self.domain;
        if start == stop {
            return self;
        }
        let step = tick_step(start, stop, tick_count);
        if step > 0.0 {
            self.domain = (
                (start / step).floor() * step,
                (stop / step).ceil() * step,
            );
        }
        self
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Tick values inside the domain at the nice step for the count.
    pub fn ticks(&self, tick_count: usize) -> Vec<f64> {
        let (start, stop) = self.domain;
        if start == stop {
            return vec![start];
        }
        let step = tick_step(start, stop, tick_count);
        if step <= 0.0 {
            return vec![start, stop];
        }
        let first = (start / step).ceil();
        let last = (stop / step).floor();
        let mut out = Vec::new();
        let mut i = first;
        while i <= last {
            out.push(i * step);
            i += 1.0;
        }
        out
    }
}

/// Step size covering roughly `count` ticks over `[start, stop]`, snapped to
/// 1/2/5 times a power of ten.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let step0 = (stop - start).abs() / count;
    if step0 == 0.0 {
        return 0.0;
    }
    let step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    step1 * factor
}

/// Ordinal band scale with symmetric inner/outer padding, one band per
/// category in domain order.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    pub domain: Vec<String>,
    pub range: (f64, f64),
    pub padding: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self { domain, range, padding }
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / (n + self.padding)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Leading edge of the band for a category, if present.
    pub fn position(&self, key: &str) -> Option<f64> {
        let idx = self.domain.iter().position(|d| d == key)? as f64;
        let step = self.step();
        Some(self.range.0 + step * self.padding + idx * step)
    }

    /// Center of the band for a category.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|p| p + self.bandwidth() / 2.0)
    }
}

/// Time scale over UTC timestamps, linear in pixels, with the domain niced
/// outward to whole-day boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    pub domain: (DateTime<Utc>, DateTime<Utc>),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Round the domain outward to midnight boundaries.
    pub fn nice(mut self) -> Self {
        let (start, stop) = self.domain;
        let floor = floor_day(start);
        let ceil = if stop == floor_day(stop) {
            stop
        } else {
            floor_day(stop) + Duration::days(1)
        };
        self.domain = (floor, ceil);
        self
    }

    pub fn scale(&self, value: DateTime<Utc>) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = (d1 - d0).num_seconds() as f64;
        if span == 0.0 {
            return r0;
        }
        let offset = (value - d0).num_seconds() as f64;
        r0 + offset / span * (r1 - r0)
    }

    /// First-of-month tick dates inside the domain, ascending.
    pub fn month_ticks(&self) -> Vec<DateTime<Utc>> {
        let (start, stop) = self.domain;
        let mut ticks = Vec::new();
        let mut year = start.year();
        let mut month = start.month();
        // Advance to the first month boundary at or after the start.
        if !(start.day() == 1 && start.num_seconds_from_midnight() == 0) {
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        loop {
            let Some(tick) = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single() else {
                break;
            };
            if tick > stop {
                break;
            }
            ticks.push(tick);
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        ticks
    }
}

fn floor_day(t: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(t.year(), t.month(), t.day(), 0, 0, 0)
        .single()
        .unwrap_or(t)
}
