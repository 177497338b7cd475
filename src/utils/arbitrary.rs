//! Float generators for geometry property tests

use quickcheck::{Arbitrary, Gen};

/// An offset: any finite float, or absent.
#[must_use]
pub fn optional_finite_float(g: &mut Gen) -> Option<f64> {
    optional(g, finite_float)
}

/// A width or height: strictly positive and finite, or absent.
#[must_use]
pub fn optional_positive_float(g: &mut Gen) -> Option<f64> {
    optional(g, |g| {
        let float = finite_float(g).abs();
        if float == 0.0 {
            1.0
        } else {
            float
        }
    })
}

fn optional(g: &mut Gen, generate: impl FnOnce(&mut Gen) -> f64) -> Option<f64> {
    bool::arbitrary(g).then(|| generate(g))
}

fn finite_float(g: &mut Gen) -> f64 {
    Some(f64::arbitrary(g))
        .filter(|float| float.is_finite())
        .unwrap_or_default()
}
