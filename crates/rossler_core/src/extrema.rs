//! Strict local extrema of a sampled coordinate.

use crate::result::ExtremumRecord;

/// Indices of strict interior maxima and minima.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extrema {
    pub maxima: Vec<usize>,
    pub minima: Vec<usize>,
}

/// Classifies interior samples `1..len-1` using strict inequalities only.
///
/// Plateaus are never reported and neither are the endpoints. Comparisons
/// involving NaN are false, so NaN neighbourhoods are skipped as well.
pub fn detect_extrema(values: &[f64]) -> Extrema {
    let mut extrema = Extrema::default();
    for (offset, window) in values.windows(3).enumerate() {
        let (prev, cur, next) = (window[0], window[1], window[2]);
        if prev < cur && cur > next {
            extrema.maxima.push(offset + 1);
        } else if prev > cur && cur < next {
            extrema.minima.push(offset + 1);
        }
    }
    extrema
}

/// Turns one trajectory's extrema into bifurcation-diagram records.
pub struct ExtremaDetector;

impl ExtremaDetector {
    /// Appends `(parameter, value)` records for every strict extremum of `values`.
    /// Returns the number of maxima and minima found.
    pub fn scan_into(
        parameter: f64,
        values: &[f64],
        maxima: &mut Vec<ExtremumRecord>,
        minima: &mut Vec<ExtremumRecord>,
    ) -> (usize, usize) {
        let extrema = detect_extrema(values);
        let record = |i: usize| ExtremumRecord {
            parameter,
            value: values[i],
        };
        maxima.extend(extrema.maxima.iter().copied().map(record));
        minima.extend(extrema.minima.iter().copied().map(record));
        (extrema.maxima.len(), extrema.minima.len())
    }
}
