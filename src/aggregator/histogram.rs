//! Shared-range histograms for comparing two samples of one feature.
//!
//! Both samples are binned over the combined `[min, max]` so their bars
//! line up on the same axis. Bins are half-open `[lower, upper)` except
//! the last, which also holds `max`.

use crate::format::to_fixed;
use crate::parser::schema::{Bin, FeatureDistribution, FeaturePanel, PanelState};
use log::debug;

/// Bin two samples over their combined range
///
/// **Public** - main entry point for distribution charts
///
/// # Arguments
/// * `sample_a` - Flagged (anomalous) values
/// * `sample_b` - Unflagged (normal) values
/// * `bin_count` - Number of equal-width bins
///
/// # Returns
/// * empty when neither sample has a finite value (or `bin_count` is 0)
/// * a single bin when every value is identical
/// * otherwise exactly `bin_count` bins
///
/// Non-finite values are dropped before anything is computed.
pub fn build_comparison(sample_a: &[f64], sample_b: &[f64], bin_count: usize) -> Vec<Bin> {
    let a: Vec<f64> = finite_values(sample_a);
    let b: Vec<f64> = finite_values(sample_b);

    let Some((min, max)) = combined_range(&a, &b) else {
        return Vec::new();
    };

    if min == max {
        return vec![Bin {
            lower: min,
            upper: max,
            label: to_fixed(min, 2),
            count_a: a.len(),
            count_b: b.len(),
            upper_inclusive: true,
        }];
    }

    if bin_count == 0 {
        debug!("Histogram requested with zero bins");
        return Vec::new();
    }

    // Work on half-values so spans wider than f64::MAX stay finite
    let half_span = max / 2.0 - min / 2.0;
    let edge = |i: usize| {
        if i == bin_count {
            max
        } else {
            (min / 2.0 + half_span * (i as f64 / bin_count as f64)) * 2.0
        }
    };

    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| {
            let lower = edge(i);
            let upper = edge(i + 1);
            Bin {
                lower,
                upper,
                label: format!("{}-{}", to_fixed(lower, 2), to_fixed(upper, 2)),
                count_a: 0,
                count_b: 0,
                upper_inclusive: i + 1 == bin_count,
            }
        })
        .collect();

    for &v in &a {
        bins[bin_index(v, min, half_span, bin_count)].count_a += 1;
    }
    for &v in &b {
        bins[bin_index(v, min, half_span, bin_count)].count_b += 1;
    }

    bins
}

/// One chart panel per feature of the distribution map
///
/// Features without usable samples render as `Invalid`; features whose
/// samples are both empty render as `NoData`.
pub fn feature_panels(
    distributions: &[FeatureDistribution],
    bin_count: usize,
) -> Vec<FeaturePanel> {
    distributions
        .iter()
        .map(|dist| {
            let state = match &dist.samples {
                None => PanelState::Invalid,
                Some(s) if s.anomaly.is_empty() && s.normal.is_empty() => PanelState::NoData,
                Some(s) => PanelState::Histogram {
                    bins: build_comparison(&s.anomaly, &s.normal, bin_count),
                },
            };
            FeaturePanel {
                feature: dist.feature.clone(),
                state,
            }
        })
        .collect()
}

fn finite_values(sample: &[f64]) -> Vec<f64> {
    sample.iter().copied().filter(|v| v.is_finite()).collect()
}

/// `(min, max)` over both samples, `None` if both are empty
fn combined_range(a: &[f64], b: &[f64]) -> Option<(f64, f64)> {
    a.iter().chain(b).fold(None, |range, &v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Bin of `v` by its relative position in `[min, max]`, clamped into the last bin
fn bin_index(v: f64, min: f64, half_span: f64, bin_count: usize) -> usize {
    let position = (v / 2.0 - min / 2.0) / half_span;
    let idx = (position * bin_count as f64).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(bin_count - 1)
    }
}
