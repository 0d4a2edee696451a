use crate::config::{EdgePolicy, PeakDetectionConfig};
use crate::constants::MIN_PEAK_SIGNAL_LEN;
use crate::error::Result;
use crate::signal_processing::{auto_threshold, first_difference};

/// Detect peaks by amplitude, neighbour threshold, spacing and flat-top edge
///
/// Stages, each narrowing the previous candidate set:
/// 1. resolve the threshold (a quarter of the signal range when unset)
/// 2. collect local maxima according to the edge policy
/// 3. drop the first and last sample
/// 4. drop peaks below `minimum_height`
/// 5. drop peaks rising less than `threshold` above either neighbour
/// 6. suppress peaks within `minimum_distance` of a taller peak
///
/// Returns strictly ascending indices in `1..len-1`. Signals shorter than
/// three samples have no peaks.
///
/// # Errors
/// Returns `SignalError::InvalidArgument` if the threshold is negative or
/// the minimum height is NaN
pub fn find_peaks_parametric(x: &[f64], config: &PeakDetectionConfig) -> Result<Vec<usize>> {
    config.validate()?;

    if x.len() < MIN_PEAK_SIGNAL_LEN {
        return Ok(Vec::new());
    }

    let threshold = config.threshold.unwrap_or_else(|| auto_threshold(x));

    let mut ind = edge_candidates(x, config.edge);
    log::trace!("Edge policy {}: {} candidates", config.edge, ind.len());

    // First and last samples cannot be peaks
    ind.retain(|&i| i != 0 && i != x.len() - 1);

    if let Some(minimum_height) = config.minimum_height {
        ind.retain(|&i| x[i] >= minimum_height);
    }

    if threshold > 0.0 {
        // NaN rises are kept
        ind.retain(|&i| {
            let rise = (x[i] - x[i - 1]).min(x[i] - x[i + 1]);
            !(rise < threshold)
        });
    }

    if config.minimum_distance > 1 {
        ind = suppress_close_peaks(x, &ind, config.minimum_distance);
    }

    log::debug!(
        "Parametric peak finder: {} peaks in {} samples (threshold {:.4})",
        ind.len(),
        x.len(),
        threshold
    );

    Ok(ind)
}

/// Indices whose surrounding slopes match the edge policy, ascending.
///
/// The slope before index 0 and after the last index count as zero, so the
/// boundary samples may appear here and must be removed by the caller.
fn edge_candidates(x: &[f64], edge: EdgePolicy) -> Vec<usize> {
    let diff = first_difference(x);
    let slope_after = |i: usize| diff.get(i).copied().unwrap_or(0.0);
    let slope_before = |i: usize| if i == 0 { 0.0 } else { diff[i - 1] };

    (0..x.len())
        .filter(|&i| {
            let (before, after) = (slope_before(i), slope_after(i));
            match edge {
                EdgePolicy::None => after < 0.0 && before > 0.0,
                _ => {
                    (edge.includes_rising() && after <= 0.0 && before > 0.0)
                        || (edge.includes_falling() && after < 0.0 && before >= 0.0)
                }
            }
        })
        .collect()
}

/// Greedy non-maximum suppression
///
/// Visits candidates from tallest to shortest, ties in index order. Each
/// surviving candidate removes every other candidate within `distance`
/// samples (inclusive). Survivors are returned in index order.
fn suppress_close_peaks(x: &[f64], ind: &[usize], distance: usize) -> Vec<usize> {
    let mut by_height = ind.to_vec();
    by_height.sort_by(|&a, &b| x[b].total_cmp(&x[a]));

    let mut removed = vec![false; by_height.len()];
    for current in 0..by_height.len() {
        if removed[current] {
            continue;
        }
        let center = by_height[current];
        for (other, &idx) in by_height.iter().enumerate() {
            if other != current && idx.abs_diff(center) <= distance {
                removed[other] = true;
            }
        }
    }

    let mut kept: Vec<usize> = by_height
        .into_iter()
        .zip(removed)
        .filter_map(|(idx, gone)| (!gone).then_some(idx))
        .collect();
    kept.sort_unstable();
    kept
}
