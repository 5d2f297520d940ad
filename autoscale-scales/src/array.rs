//! Nice tick arithmetic on f64 domains.
//!
//! Increments follow the 1-2-5 progression. Like d3, [`tick_increment`] reports
//! steps below one as a negative inverse (`-10` for a step of `0.1`), so that
//! decimal ticks are produced by division and come out exact.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Generate approximately `count` evenly spaced ticks between `start` and `stop`
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !count.is_finite() || !start.is_finite() || !stop.is_finite() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1) as usize + 1;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    if reverse {
        (0..n).map(|k| value(i2 - k as f64)).collect()
    } else {
        (0..n).map(|k| value(i1 + k as f64)).collect()
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10.0_f64.powf(power);
    let factor = step_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inverse = 10.0_f64.powf(-power) / factor;
        i1 = (start * inverse).round();
        i2 = (stop * inverse).round();
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        inc = -inverse;
    } else {
        inc = 10.0_f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Tick increment for roughly `count` ticks over the range.
///
/// Returns a negative inverse for steps below one, and NaN when no step exists.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start) / count;
    if !(step > 0.0) || !step.is_finite() {
        return f64::NAN;
    }
    let power = step.log10().floor();
    let factor = step_factor(step / 10.0_f64.powf(power));
    if power >= 0.0 {
        factor * 10.0_f64.powf(power)
    } else {
        -10.0_f64.powf(-power) / factor
    }
}

/// Positive step size of an increment returned by [`tick_increment`]
pub fn step_size(inc: f64) -> f64 {
    if inc < 0.0 {
        -1.0 / inc
    } else {
        inc
    }
}

/// Extends the domain outward to multiples of the increment
pub fn snap_to_increment(low: f64, high: f64, inc: f64) -> (f64, f64) {
    if inc > 0.0 {
        ((low / inc).floor() * inc, (high / inc).ceil() * inc)
    } else if inc < 0.0 {
        ((low * inc).ceil() / inc, (high * inc).floor() / inc)
    } else {
        (low, high)
    }
}

/// Extends the domain to nice round values, re-deriving the increment until it
/// settles (at most ten rounds)
pub fn nice_domain(low: f64, high: f64, count: f64) -> (f64, f64) {
    if low == high || !low.is_finite() || !high.is_finite() {
        return (low, high);
    }
    let (mut start, mut stop) = if low <= high { (low, high) } else { (high, low) };

    let mut prestep = 0.0;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if step == prestep || step.is_nan() || step == 0.0 {
            break;
        }
        (start, stop) = snap_to_increment(start, stop, step);
        prestep = step;
    }

    if low <= high {
        (start, stop)
    } else {
        (stop, start)
    }
}

/// Every multiple of the increment from `low` to `high`, both included.
///
/// The bounds are expected to already be multiples of the increment.
pub fn step_multiples(low: f64, high: f64, inc: f64) -> Vec<f64> {
    if inc == 0.0 || !inc.is_finite() {
        return vec![];
    }
    let (i1, i2) = if inc > 0.0 {
        ((low / inc).round(), (high / inc).round())
    } else {
        ((low * -inc).round(), (high * -inc).round())
    };
    if !(i2 >= i1) {
        return vec![];
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|k| {
            let i = i1 + k as f64;
            if inc < 0.0 {
                i / -inc
            } else {
                i * inc
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn test_ticks() {
        assert_eq!(
            ticks(0.0, 1.0, 10.0),
            vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
        );
        assert_eq!(ticks(0.0, 1.0, 7.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(0.0, 1.0, 3.0), vec![0.0, 0.5, 1.0]);
        assert_eq!(ticks(0.0, 1.0, 1.0), vec![0.0, 1.0]);
        assert_eq!(ticks(-10.0, 10.0, 4.0), vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
        assert_eq!(ticks(1.0, 0.0, 3.0), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_ticks_edge_cases() {
        assert_eq!(ticks(f64::NAN, 1.0, 1.0), Vec::<f64>::new());
        assert_eq!(ticks(0.0, 1.0, 0.0), Vec::<f64>::new());
        assert_eq!(ticks(0.0, 1.0, -1.0), Vec::<f64>::new());
        assert_eq!(ticks(0.0, 1.0, f64::INFINITY), Vec::<f64>::new());
        assert_eq!(ticks(1.0, 1.0, 10.0), vec![1.0]);
    }

    #[rstest]
    #[case(0.0, 1.0, 10.0, -10.0)]
    #[case(0.0, 1.0, 5.0, -5.0)]
    #[case(0.0, 10.0, 10.0, 1.0)]
    #[case(0.0, 100.0, 10.0, 10.0)]
    #[case(0.0, 100.0, 5.0, 20.0)]
    fn test_tick_increment(
        #[case] start: f64,
        #[case] stop: f64,
        #[case] count: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(tick_increment(start, stop, count), expected);
    }

    #[test]
    fn test_tick_increment_degenerate() {
        assert!(tick_increment(1.0, 1.0, 10.0).is_nan());
        assert!(tick_increment(0.0, 1.0, 0.0).is_nan());
        assert_eq!(step_size(-10.0), 0.1);
        assert_eq!(step_size(20.0), 20.0);
    }

    #[rstest]
    #[case((0.3, 9.7), 10.0, (0.0, 10.0))]
    #[case((1.1, 10.9), 10.0, (1.0, 11.0))]
    #[case((-3.3, 47.1), 5.0, (-10.0, 50.0))]
    #[case((9.7, 0.3), 10.0, (10.0, 0.0))]
    #[case((2.0, 2.0), 10.0, (2.0, 2.0))]
    fn test_nice_domain(#[case] domain: (f64, f64), #[case] count: f64, #[case] expected: (f64, f64)) {
        let (low, high) = nice_domain(domain.0, domain.1, count);
        assert_approx_eq!(f64, low, expected.0);
        assert_approx_eq!(f64, high, expected.1);
    }

    #[test]
    fn test_snap_and_multiples() {
        assert_eq!(snap_to_increment(0.5, 9.5, 1.0), (0.0, 10.0));
        assert_eq!(snap_to_increment(0.34, 0.71, -10.0), (0.3, 0.8));
        assert_eq!(step_multiples(0.0, 1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(step_multiples(0.3, 0.6, -10.0), vec![0.3, 0.4, 0.5, 0.6]);
        assert_eq!(step_multiples(1.0, 0.0, 1.0), Vec::<f64>::new());
    }
}
