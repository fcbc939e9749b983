use cmv_verify::ulp::{next_down, next_up};
use cmv_verify::Interval;
use proptest::prelude::*;

/// Correctly rounded `e^x` for a handful of arguments.
const EXP_TABLE: [(f64, f64); 7] = [
    (1.0, 2.718281828459045),
    (-1.0, 0.36787944117144233),
    (0.5, 1.6487212707001282),
    (2.0, 7.38905609893065),
    (10.0, 22026.465794806718),
    (-10.0, 4.5399929762484854e-5),
    (0.0, 1.0),
];

/// Encloses `e^n` using only interval multiplication of an enclosure of `e`
/// (or `1/e` for negative `n`).
fn exp_by_powers(n: i32) -> Interval {
    let base = if n >= 0 { EXP_TABLE[0].1 } else { EXP_TABLE[1].1 };
    let factor = Interval::new(next_down(base), next_up(base)).unwrap();
    (0..n.unsigned_abs()).fold(Interval::point(1.0), |acc, _| acc * factor)
}

fn interval_from(a: f64, b: f64) -> Interval {
    Interval::new(a.min(b), a.max(b)).unwrap()
}

/// Error-free transform: `a + b == s + err` exactly.
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

fn point_in(iv: &Interval, frac: f64) -> f64 {
    let x = iv.lo() + (iv.hi() - iv.lo()) * frac;
    x.clamp(iv.lo(), iv.hi())
}

proptest! {
    #[test]
    fn operations_preserve_ordering(
        a in -1e6f64..1e6, b in -1e6f64..1e6,
        c in -1e6f64..1e6, d in -1e6f64..1e6,
        e in -50f64..50.0, f in -50f64..50.0,
    ) {
        let x = interval_from(a, b);
        let y = interval_from(c, d);
        let sum = x + y;
        let product = x * y;
        let exp = interval_from(e, f).exp();
        prop_assert!(sum.lo() <= sum.hi());
        prop_assert!(product.lo() <= product.hi());
        prop_assert!(exp.lo() <= exp.hi());
        prop_assert!(exp.lo() >= 0.0);
    }

    #[test]
    fn point_sums_enclose_the_exact_sum(a in -1e12f64..1e12, b in -1e12f64..1e12) {
        let (s, err) = two_sum(a, b);
        let sum = Interval::point(a) + Interval::point(b);
        prop_assert!(sum.lo() < s && s < sum.hi());
        prop_assert!(err <= sum.hi() - s);
        prop_assert!(-err <= s - sum.lo());
    }

    #[test]
    fn point_products_enclose_the_exact_product(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        prop_assume!(a.abs() > 1e-100 && b.abs() > 1e-100);
        let p = a * b;
        let residual = a.mul_add(b, -p);
        let product = Interval::point(a) * Interval::point(b);
        prop_assert!(product.lo() < p && p < product.hi());
        prop_assert!(residual <= product.hi() - p);
        prop_assert!(-residual <= p - product.lo());
    }

    #[test]
    fn members_map_into_results(
        a in -1e3f64..1e3, b in -1e3f64..1e3,
        c in -1e3f64..1e3, d in -1e3f64..1e3,
        fx in 0f64..=1.0, fy in 0f64..=1.0,
    ) {
        let x = interval_from(a, b);
        let y = interval_from(c, d);
        let px = point_in(&x, fx);
        let py = point_in(&y, fy);
        prop_assert!((x + y).contains(px + py));
        prop_assert!((x * y).contains(px * py));
    }

    #[test]
    fn exponential_agrees_with_repeated_products(n in -40i32..40, a in -40i32..40) {
        // Both enclose the exact e^n, so they must overlap.
        let direct = Interval::point(f64::from(n)).exp();
        let reference = exp_by_powers(n);
        prop_assert!(direct.lo() <= reference.hi() && reference.lo() <= direct.hi(),
            "n = {}: {} vs {}", n, direct, reference);

        // Monotone in the argument, so [min, max] covers every integer between.
        let (lo, hi) = (n.min(a), n.max(a));
        let spanning = Interval::new(f64::from(lo), f64::from(hi)).unwrap().exp();
        let inner = exp_by_powers((lo + hi) / 2);
        prop_assert!(spanning.lo() <= inner.hi() && inner.lo() <= spanning.hi());
    }
}

#[test]
fn exponential_encloses_correctly_rounded_values() {
    for (x, expected) in EXP_TABLE {
        let e = Interval::point(x).exp();
        assert!(e.contains(expected), "exp({x}) = {expected} not in {e}");
        assert!(e.width() > 0.0);
    }
}
