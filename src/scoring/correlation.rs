/// Pearson correlation over the pairs where both values are present.
///
/// Returns `None` when fewer than two complete pairs exist or when either
/// side has zero variance over those pairs.
pub fn pairwise_pearson<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let complete: Vec<(f64, f64)> = pairs
        .into_iter()
        .filter_map(|(x, y)| x.zip(y))
        .collect();

    if complete.len() < 2 {
        return None;
    }

    let n = complete.len() as f64;
    let mean_x = complete.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = complete.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &complete {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    let r = sxy / (sxx * syy).sqrt();
    // rounding can push |r| a hair past 1
    Some(r.clamp(-1.0, 1.0))
}

/// Spearman-Brown step-up of a split-half correlation, floored at -1.
///
/// `2r / (1 + r)` diverges as `r` approaches -1; anything below -1 is
/// reported as -1.
pub fn spearman_brown(r: f64) -> f64 {
    let adjusted = (2.0 * r) / (1.0 + r);
    if adjusted < -1.0 {
        -1.0
    } else {
        adjusted
    }
}
