/// Downsample a (date, issue count) series to at most `target_points` entries
/// to reduce visual noise and improve rendering performance.
///
/// Each window is represented by its first date and its most recent count,
/// since an issue total is a level, not an increment.
pub fn aggregate_series(data: &[(String, u64)], target_points: usize) -> Vec<(String, u64)> {
    if data.len() <= target_points {
        return data.to_vec();
    }

    let window_size = (data.len() as f64 / target_points as f64).ceil() as usize;
    let mut aggregated = Vec::new();

    for chunk in data.chunks(window_size) {
        let date = chunk[0].0.clone();
        let count = chunk[chunk.len() - 1].1;
        aggregated.push((date, count));
    }

    aggregated
}
