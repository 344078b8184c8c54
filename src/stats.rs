//! Summary statistics over match lengths.

/// Mean, spread and range of a set of move counts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchStats {
    pub trials: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    pub std_error: f64,
    pub min: usize,
    pub max: usize,
}

impl MatchStats {
    /// `None` for an empty slice.
    pub fn from_moves(moves: &[usize]) -> Option<Self> {
        let n = moves.len();
        let min = *moves.iter().min()?;
        let max = *moves.iter().max()?;
        let mean = moves.iter().sum::<usize>() as f64 / n as f64;
        let var = if n > 1 {
            moves
                .iter()
                .map(|&m| {
                    let d = m as f64 - mean;
                    d * d
                })
                .sum::<f64>()
                / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = libm::sqrt(var);
        Some(Self {
            trials: n,
            mean,
            std_dev,
            std_error: std_dev / libm::sqrt(n as f64),
            min,
            max,
        })
    }
}
