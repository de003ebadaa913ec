//! Tick layout for the value (vertical) and time (horizontal) axes.
//!
//! Both layouts are pure. Their results are handed to a `FadingGroup`, so a
//! tick's `id` must stay identical whenever two layouts place a tick at the
//! same position.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::fading_group::FadeKey;
use crate::core::format::{
    cut_large, format_day, format_hour, format_millisecond, format_minute, format_month,
    format_number, format_second, format_year, round_to_digits,
};

/// Horizontal room reserved per time label, in CSS pixels.
pub const TIME_TICK_SPACING_PX: f64 = 60.0;

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;
const MS_PER_MONTH: f64 = 31.0 * MS_PER_DAY;
const MS_PER_YEAR: f64 = 12.0 * MS_PER_MONTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub id: String,
    pub position: f64,
    pub label: String,
}

impl FadeKey for Tick {
    type Key = String;

    fn fade_key(&self) -> Self::Key {
        self.id.clone()
    }
}

pub type TickSet = SmallVec<[Tick; 8]>;

/// Value-axis layout: the ticks plus the widened bounds that become the
/// chart's vertical scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTicks {
    pub min: f64,
    pub max: f64,
    pub ticks: TickSet,
}

impl ValueTicks {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

fn round_tick_value(value: f64, log_spread: f64) -> f64 {
    if log_spread < 0.0 {
        let digits = (-log_spread).ceil() as u32 + 1;
        round_to_digits(value, digits)
    } else {
        value.round()
    }
}

fn closest_round(value: f64, log_spread: f64, upper: bool) -> f64 {
    let scale = 10f64.powf(log_spread.floor());
    if upper {
        (value / scale).ceil() * scale
    } else {
        (value / scale).floor() * scale
    }
}

/// Lays out `count` "nice" ticks for the value range `[min, max]`.
///
/// Bounds are widened to the power-of-ten step of the range and split into
/// `count` equal steps starting at the lower bound. A zero-width range yields
/// a single tick at 0 with synthetic bounds `[-1, 1]`.
#[must_use]
pub fn value_ticks(min: f64, max: f64, count: usize) -> ValueTicks {
    let spread = max - min;
    if spread == 0.0 || !spread.is_finite() || count == 0 {
        let mut ticks = TickSet::new();
        ticks.push(Tick {
            id: "0".to_owned(),
            position: 0.0,
            label: "0".to_owned(),
        });
        return ValueTicks {
            min: -1.0,
            max: 1.0,
            ticks,
        };
    }

    let log_spread = spread.abs().log10();
    let low_bound = closest_round(min, log_spread, false);
    let high_bound = closest_round(max, log_spread, true);
    let step = (high_bound - low_bound) / count as f64;

    let ticks = (0..count)
        .map(|index| {
            let value = round_tick_value(low_bound + step * index as f64, log_spread);
            Tick {
                id: format_number(value),
                position: value,
                label: cut_large(value),
            }
        })
        .collect();

    ValueTicks {
        min: low_bound,
        max: high_bound,
        ticks,
    }
}

/// Calendar bucket used to space and label time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl TimeUnit {
    /// Coarsest first; selection takes the first unit that overflows capacity.
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Year,
        TimeUnit::Month,
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
        TimeUnit::Millisecond,
    ];

    #[must_use]
    pub const fn size_ms(self) -> f64 {
        match self {
            TimeUnit::Year => MS_PER_YEAR,
            TimeUnit::Month => MS_PER_MONTH,
            TimeUnit::Day => MS_PER_DAY,
            TimeUnit::Hour => MS_PER_HOUR,
            TimeUnit::Minute => MS_PER_MINUTE,
            TimeUnit::Second => MS_PER_SECOND,
            TimeUnit::Millisecond => 1.0,
        }
    }

    #[must_use]
    pub fn format(self, stamp_ms: f64) -> String {
        match self {
            TimeUnit::Year => format_year(stamp_ms),
            TimeUnit::Month => format_month(stamp_ms),
            TimeUnit::Day => format_day(stamp_ms),
            TimeUnit::Hour => format_hour(stamp_ms),
            TimeUnit::Minute => format_minute(stamp_ms),
            TimeUnit::Second => format_second(stamp_ms),
            TimeUnit::Millisecond => format_millisecond(stamp_ms),
        }
    }
}

/// Resolved time-axis spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeTickPlan {
    pub unit: TimeUnit,
    /// Power-of-two multiplier of `unit`; kept in `f64` so huge spans cannot
    /// overflow an integer.
    pub step: f64,
    pub capacity: u64,
}

impl TimeTickPlan {
    #[must_use]
    pub fn interval_ms(self) -> f64 {
        self.unit.size_ms() * self.step
    }
}

/// Number of labels that fit in `pixel_width` CSS pixels (at least one).
#[must_use]
pub fn time_tick_capacity(pixel_width: f64, spacing_px: f64) -> u64 {
    if !pixel_width.is_finite() || pixel_width <= 0.0 {
        return 1;
    }
    if !spacing_px.is_finite() || spacing_px <= 0.0 {
        return 1;
    }
    ((pixel_width / spacing_px).floor() as u64).max(1)
}

/// Chooses the unit and power-of-two step for `[min, max]` (milliseconds).
#[must_use]
pub fn plan_time_ticks(min: f64, max: f64, pixel_width: f64, spacing_px: f64) -> TimeTickPlan {
    let capacity = time_tick_capacity(pixel_width, spacing_px);
    let span = (max - min).max(0.0);
    let capacity_f = capacity as f64;

    let unit = TimeUnit::ALL
        .into_iter()
        .find(|unit| span / unit.size_ms() > capacity_f)
        .unwrap_or(TimeUnit::Millisecond);

    let per_tick = span / unit.size_ms() / capacity_f;
    let step = if per_tick.is_nan() || per_tick <= 1.0 {
        1.0
    } else {
        next_power_of_two(per_tick.ceil())
    };

    TimeTickPlan {
        unit,
        step,
        capacity,
    }
}

/// Smallest power of two `>= value`, for `value >= 1`. Saturates to
/// infinity instead of overflowing.
fn next_power_of_two(value: f64) -> f64 {
    let step = value.log2().ceil().exp2();
    if step < value { step * 2.0 } else { step }
}

/// Lays out time ticks across `[min, max]` (epoch milliseconds) for an axis
/// `pixel_width` CSS pixels wide.
///
/// Emits at most `capacity + 1` ticks, starting from the last multiple of the
/// tick interval at or before `min`. Tick ids are the raw stamps.
#[must_use]
pub fn time_ticks(min: f64, max: f64, pixel_width: f64) -> Vec<Tick> {
    time_ticks_with_spacing(min, max, pixel_width, TIME_TICK_SPACING_PX)
}

/// `time_ticks` with a custom per-label pixel budget.
#[must_use]
pub fn time_ticks_with_spacing(
    min: f64,
    max: f64,
    pixel_width: f64,
    spacing_px: f64,
) -> Vec<Tick> {
    if !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }

    let plan = plan_time_ticks(min, max, pixel_width, spacing_px);
    let interval = plan.interval_ms();
    if !interval.is_finite() {
        return Vec::new();
    }
    let first = (min / interval).floor();
    let limit = plan.capacity as usize + 1;

    let mut ticks = Vec::with_capacity(limit);
    let mut index = 0.0;
    loop {
        let stamp = (first + index) * interval;
        if stamp > max || ticks.len() >= limit {
            break;
        }
        ticks.push(Tick {
            id: format_number(stamp),
            position: stamp,
            label: plan.unit.format(stamp),
        });
        index += 1.0;
    }
    ticks
}
