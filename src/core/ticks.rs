use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Axis;
use crate::error::{ChartError, ChartResult};

/// Ascending table of "round" tick steps considered by auto-scaling.
pub const PREFERRED_SCALE_STEPS: [f64; 18] = [
    0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 1.5, 2.0, 2.5, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0,
    500.0, 1000.0,
];

/// Number of tick intervals auto-scaling aims for.
pub const TARGET_TICK_COUNT: f64 = 8.0;

/// Upper bound on enumerated ticks per axis.
pub const MAX_TICK_COUNT: usize = 1_000;

const DEGENERATE_WIDEN_RATIO: f64 = 0.05;
const ZERO_VALUE_HALF_SPAN: f64 = 1.0;
const TICK_EPSILON: f64 = 1e-9;
const DECADE: f64 = 10.0;

/// Step table and label density used by `select_tick_scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickScaleTuning {
    pub preferred_steps: Vec<f64>,
    pub target_tick_count: f64,
}

impl Default for TickScaleTuning {
    fn default() -> Self {
        Self {
            preferred_steps: PREFERRED_SCALE_STEPS.to_vec(),
            target_tick_count: TARGET_TICK_COUNT,
        }
    }
}

impl TickScaleTuning {
    pub fn validate(&self) -> ChartResult<()> {
        if self.preferred_steps.is_empty() {
            return Err(ChartError::InvalidData(
                "preferred tick steps must not be empty".to_owned(),
            ));
        }
        if self
            .preferred_steps
            .iter()
            .any(|step| !step.is_finite() || *step <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "preferred tick steps must be finite and > 0".to_owned(),
            ));
        }
        if self
            .preferred_steps
            .windows(2)
            .any(|pair| pair[1] <= pair[0])
        {
            return Err(ChartError::InvalidData(
                "preferred tick steps must be strictly ascending".to_owned(),
            ));
        }
        if !self.target_tick_count.is_finite() || self.target_tick_count <= 0.0 {
            return Err(ChartError::InvalidData(
                "target tick count must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Axis bounds plus the spacing between consecutive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl TickScale {
    /// Validates manually supplied bounds for `axis`.
    pub fn validated(axis: Axis, min: f64, max: f64, step: f64) -> ChartResult<Self> {
        let valid = min.is_finite()
            && max.is_finite()
            && step.is_finite()
            && min < max
            && step > 0.0;
        if !valid {
            return Err(ChartError::InvalidAxisBounds {
                axis,
                min,
                max,
                tick: step,
            });
        }
        Ok(Self { min, max, step })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Number of tick values in `[min, max]`, capped at `MAX_TICK_COUNT`.
    #[must_use]
    pub fn tick_count(self) -> usize {
        if !self.step.is_finite() || self.step <= 0.0 || self.max < self.min {
            return 0;
        }
        let intervals = (self.span() / self.step + TICK_EPSILON).floor();
        if !intervals.is_finite() || intervals >= MAX_TICK_COUNT as f64 {
            warn!(
                min = self.min,
                max = self.max,
                step = self.step,
                cap = MAX_TICK_COUNT,
                "tick enumeration capped"
            );
            return MAX_TICK_COUNT;
        }
        intervals as usize + 1
    }

    /// Tick values `min + i * step` for every tick up to and including `max`.
    #[must_use]
    pub fn tick_values(self) -> Vec<f64> {
        (0..self.tick_count())
            .map(|index| offset_by_steps(self.min, self.step, index as f64))
            .collect()
    }

    /// Tick values strictly below `max`; the last one coincides with the plot edge.
    #[must_use]
    pub fn grid_values(self) -> Vec<f64> {
        let limit = self.max - self.step * TICK_EPSILON;
        self.tick_values()
            .into_iter()
            .filter(|value| *value < limit)
            .collect()
    }
}

/// Widens a zero-width range so it can still be scaled.
///
/// A flat value `v` becomes `[v - 5%|v|, v + 5%|v|]`; a flat zero becomes
/// `[-1, 1]`.
#[must_use]
pub fn widen_degenerate_range(min: f64, max: f64) -> (f64, f64) {
    if min != max {
        return (min, max);
    }
    let half_span = if min == 0.0 {
        ZERO_VALUE_HALF_SPAN
    } else {
        min.abs() * DEGENERATE_WIDEN_RATIO
    };
    (min - half_span, max + half_span)
}

/// Picks the preferred step whose interval count is closest to the target.
///
/// Ties resolve to the smallest step because the candidates are scanned in
/// ascending order with a strict comparison. When even the largest table
/// step leaves more intervals than the target, the table's top decade is
/// repeated at increasing powers of ten (`2000, 5000, 10000, ...`).
#[must_use]
pub fn select_step(range: f64, tuning: &TickScaleTuning) -> f64 {
    let steps = &tuning.preferred_steps;
    let Some(largest) = steps.last().copied() else {
        return 1.0;
    };

    let mut best_step = steps[0];
    let mut best_delta = f64::INFINITY;
    let mut consider = |step: f64| {
        let delta = (range / step - tuning.target_tick_count).abs();
        if delta < best_delta {
            best_step = step;
            best_delta = delta;
        }
    };
    for step in steps.iter().copied() {
        consider(step);
    }

    let top_decade: Vec<f64> = steps
        .iter()
        .copied()
        .filter(|step| *step * DECADE > largest)
        .collect();
    let mut decade = DECADE;
    let mut reached = largest;
    while range / reached > tuning.target_tick_count && reached.is_finite() {
        for step in &top_decade {
            let candidate = step * decade;
            if candidate.is_finite() {
                consider(candidate);
                reached = candidate;
            } else {
                reached = f64::INFINITY;
            }
        }
        decade *= DECADE;
    }
    best_step
}

/// Chooses rounded axis bounds and tick spacing covering `[min, max]`.
pub fn select_tick_scale(min: f64, max: f64, tuning: &TickScaleTuning) -> ChartResult<TickScale> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(
            "tick scale input must be finite".to_owned(),
        ));
    }
    if min > max {
        return Err(ChartError::InvalidData(
            "tick scale input must satisfy min <= max".to_owned(),
        ));
    }
    tuning.validate()?;

    let (min, max) = widen_degenerate_range(min, max);
    let range = max - min;
    if !range.is_finite() {
        return Err(ChartError::InvalidData(
            "tick scale input span overflows f64".to_owned(),
        ));
    }
    let step = select_step(range, tuning);

    let mut lower_steps = (min / step).floor();
    let mut axis_min = offset_by_steps(0.0, step, lower_steps);
    if axis_min > min {
        lower_steps -= 1.0;
        axis_min = offset_by_steps(0.0, step, lower_steps);
    }

    let mut upper_steps = (max / step).ceil();
    let mut axis_max = offset_by_steps(0.0, step, upper_steps);
    if axis_max < max {
        upper_steps += 1.0;
        axis_max = offset_by_steps(0.0, step, upper_steps);
    }
    if axis_max <= axis_min {
        axis_max = offset_by_steps(axis_min, step, 1.0);
    }
    if !axis_min.is_finite() || !axis_max.is_finite() {
        return Err(ChartError::InvalidData(
            "rounded tick scale bounds overflow f64".to_owned(),
        ));
    }

    Ok(TickScale {
        min: axis_min,
        max: axis_max,
        step,
    })
}

/// Computes `origin + steps * step` in decimal arithmetic so round steps
/// produce round values (`0.1 * 3 == 0.3`), falling back to float math when a
/// value does not fit a `Decimal`.
fn offset_by_steps(origin: f64, step: f64, steps: f64) -> f64 {
    let exact = Decimal::from_f64(origin)
        .zip(Decimal::from_f64(step))
        .zip(Decimal::from_f64(steps))
        .and_then(|((origin, step), steps)| step.checked_mul(steps)?.checked_add(origin))
        .and_then(|value| value.to_f64());
    exact.unwrap_or(origin + steps * step)
}

#[cfg(test)]
mod tests {
    use super::{TickScaleTuning, offset_by_steps, select_step};

    #[test]
    fn decimal_offsets_stay_round() {
        assert_eq!(offset_by_steps(0.0, 0.1, 3.0), 0.3);
        assert_eq!(offset_by_steps(-0.5, 0.25, 3.0), 0.25);
    }

    #[test]
    fn equal_deltas_prefer_the_first_step() {
        let tuning = TickScaleTuning {
            preferred_steps: vec![1.0, 3.0],
            target_tick_count: 2.0,
        };
        // 4/1 - 2 = 2 and |4/3 - 2| = 0.67, so only the second is strictly better.
        assert_eq!(select_step(4.0, &tuning), 3.0);

        let tied = TickScaleTuning {
            preferred_steps: vec![1.0, 2.0],
            target_tick_count: 3.0,
        };
        // |4/1 - 3| == |4/2 - 3| == 1.
        assert_eq!(select_step(4.0, &tied), 1.0);
    }

    #[test]
    fn unsorted_tuning_is_rejected() {
        let tuning = TickScaleTuning {
            preferred_steps: vec![2.0, 1.0],
            target_tick_count: 8.0,
        };
        assert!(tuning.validate().is_err());
    }
}
