//! Smoothstep-eased interpolation across colour stop tables.

use crate::models::style::StopTable;
use image::Rgb;

/// Cubic ease `t²(3 - 2t)` with zero slope at both ends.
///
/// Does not clamp; callers keep `t` inside [0, 1].
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Blends two colours channel by channel after easing `t`.
///
/// Channels are truncated toward zero, so for `t` in [0, 1] each channel
/// stays between the two inputs.
pub fn lerp_color(c1: Rgb<u8>, c2: Rgb<u8>, t: f64) -> Rgb<u8> {
    let s = smoothstep(t);
    let blend = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * s) as u8;
    Rgb([
        blend(c1[0], c2[0]),
        blend(c1[1], c2[1]),
        blend(c1[2], c2[2]),
    ])
}

/// Looks up `ratio` in `table`, clamping it to [0, 1] first.
///
/// The first segment containing the ratio wins, so a ratio sitting exactly
/// on an inner stop takes the end colour of the segment before it.
pub fn interpolate_gradient(table: &StopTable, ratio: f64) -> Rgb<u8> {
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };

    for w in table.stops().windows(2) {
        let (lo, hi) = (&w[0], &w[1]);
        if lo.value <= ratio && ratio <= hi.value {
            let t = (ratio - lo.value) / (hi.value - lo.value);
            return lerp_color(lo.rgb(), hi.rgb(), t);
        }
    }

    table.last().rgb()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::ColourStop;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn black_to_grey() -> StopTable {
        StopTable::new(vec![
            ColourStop::new(0.0, 0, 0, 0),
            ColourStop::new(1.0, 100, 100, 100),
        ])
        .unwrap()
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn test_smoothstep_is_monotonic() {
        let mut prev = smoothstep(0.0);
        for i in 1..=1000 {
            let s = smoothstep(i as f64 / 1000.0);
            assert!(s >= prev, "smoothstep decreased at step {}", i);
            prev = s;
        }
    }

    #[test]
    fn test_smoothstep_does_not_clamp() {
        assert!(smoothstep(-1.0) > 1.0);
        assert!(smoothstep(2.0) < 0.0);
    }

    #[test]
    fn test_lerp_color_truncates() {
        // smoothstep(0.25) = 0.15625, 100 * 0.15625 = 15.625
        let c = lerp_color(Rgb([0, 0, 0]), Rgb([100, 100, 100]), 0.25);
        assert_eq!(c, Rgb([15, 15, 15]));
    }

    #[test]
    fn test_lerp_color_stays_between_inputs() {
        let a = Rgb([210, 24, 140]);
        let b = Rgb([34, 180, 141]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let t: f64 = rng.random_range(0.0..=1.0);
            let c = lerp_color(a, b, t);
            for i in 0..3 {
                let (lo, hi) = (a[i].min(b[i]), a[i].max(b[i]));
                assert!(
                    lo <= c[i] && c[i] <= hi,
                    "channel {} = {} escaped [{}, {}] at t={}",
                    i,
                    c[i],
                    lo,
                    hi,
                    t
                );
            }
        }
    }

    #[test]
    fn test_midpoint_is_exact() {
        assert_eq!(
            interpolate_gradient(&black_to_grey(), 0.5),
            Rgb([50, 50, 50])
        );
    }

    #[test]
    fn test_out_of_range_ratios_clamp() {
        let table = black_to_grey();
        let low = interpolate_gradient(&table, 0.0);
        let high = interpolate_gradient(&table, 1.0);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let below: f64 = rng.random_range(-100.0..0.0);
            let above: f64 = rng.random_range(1.0..100.0);
            assert_eq!(interpolate_gradient(&table, below), low);
            assert_eq!(interpolate_gradient(&table, above), high);
        }
        assert_eq!(interpolate_gradient(&table, f64::NEG_INFINITY), low);
        assert_eq!(interpolate_gradient(&table, f64::INFINITY), high);
        assert_eq!(interpolate_gradient(&table, f64::NAN), low);
    }

    #[test]
    fn test_inner_stop_is_hit_exactly() {
        let table = StopTable::new(vec![
            ColourStop::new(0.0, 0, 0, 0),
            ColourStop::new(0.33, 134, 89, 14),
            ColourStop::new(1.0, 255, 255, 255),
        ])
        .unwrap();
        assert_eq!(interpolate_gradient(&table, 0.33), Rgb([134, 89, 14]));
    }
}
