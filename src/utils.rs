use serde::Serialize;

/// min / max / mean of a batch of scores.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summary of a slice; an empty slice gives all zeros.
pub fn vec_stats(xs: &[f64]) -> Stats {
    if xs.is_empty() {
        return Stats { min: 0.0, max: 0.0, mean: 0.0 };
    }
    let mut mn = xs[0];
    let mut mx = xs[0];
    let mut sum = 0.0f64;
    for &v in xs {
        if v < mn { mn = v; }
        if v > mx { mx = v; }
        sum += v;
    }
    Stats { min: mn, max: mx, mean: sum / (xs.len() as f64) }
}
