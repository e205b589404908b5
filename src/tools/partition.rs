use anyhow::ensure;
use log::info;

use crate::data_structs::Segment;

/// Splits `0..n_sites` into `ceil(n_sites / batch_size)` contiguous
/// segments whose sizes differ by at most one.
///
/// Segment `i` spans `[floor(i * n / k), floor((i + 1) * n / k) - 1]` for
/// `k` segments. No sites produce no segments.
pub fn partition_sites(
    n_sites: usize,
    batch_size: usize,
) -> anyhow::Result<Vec<Segment>> {
    ensure!(batch_size > 0, "Batch size must be greater than 0");

    let n_segments = n_sites.div_ceil(batch_size);
    let boundary = |i: usize| (i as u128 * n_sites as u128 / n_segments as u128) as usize;
    let segments: Vec<Segment> = (0..n_segments)
        .map(|i| Segment::new(boundary(i), boundary(i + 1) - 1))
        .collect();

    info!(
        "Split {} sites into {} segments (batch size {})",
        n_sites,
        segments.len(),
        batch_size
    );
    Ok(segments)
}
