//! Per-noise-strength results, confidence intervals and pseudo-threshold estimation.

/// z-score of a two-sided 95% interval.
pub const Z_95: f64 = 1.96;

/// CSV header matching [`EvaluationResult::to_csv`].
pub const CSV_HEADER: &str = "code,p,trials,successes,success_fraction,ci_low,ci_high";

/// Outcome of one noise strength.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Per-Pauli error probability of the noisy identity.
    pub p: f64,
    pub trials: usize,
    pub successes: usize,
    /// successes / trials.
    pub success_fraction: f64,
    /// 95% Wilson interval on the success fraction.
    pub ci_low: f64,
    pub ci_high: f64,
}

impl EvaluationResult {
    pub fn new(p: f64, trials: usize, successes: usize) -> Self {
        let success_fraction = if trials > 0 {
            successes as f64 / trials as f64
        } else {
            0.0
        };
        let (ci_low, ci_high) = wilson_ci(successes, trials, Z_95);
        Self {
            p,
            trials,
            successes,
            success_fraction,
            ci_low,
            ci_high,
        }
    }

    pub fn failure_fraction(&self) -> f64 {
        1.0 - self.success_fraction
    }

    /// Failure probability of a bare qubit in `|0⟩` under the same channel: X or Y flips it.
    pub fn unencoded_failure(&self) -> f64 {
        2.0 * self.p
    }

    /// CSV row for `code`.
    pub fn to_csv(&self, code: &str) -> String {
        format!(
            "{},{:.6},{},{},{:.6},{:.6},{:.6}",
            code,
            self.p,
            self.trials,
            self.successes,
            self.success_fraction,
            self.ci_low,
            self.ci_high,
        )
    }
}

/// Confidence bounds on a success rate from the Wilson score method, clamped to
/// `[0, 1]`. `z` sets the width (`Z_95` for a two-sided 95 % interval). No trials
/// means no information, so the whole unit interval comes back.
pub fn wilson_ci(successes: usize, trials: usize, z: f64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }
    let n = trials as f64;
    let hits = successes as f64;
    let misses = n - hits;
    let z2 = z * z;

    // Centre and half-width share the factor 1 / (n + z²).
    let scale = 1.0 / (n + z2);
    let centre = (hits + 0.5 * z2) * scale;
    let half_width = z * scale * (hits * misses / n + 0.25 * z2).sqrt();
    ((centre - half_width).max(0.0), (centre + half_width).min(1.0))
}

/// Noise strength at which the encoded failure rate overtakes the unencoded one (`2p`).
///
/// `results` must be ordered by increasing `p`. Scans adjacent pairs for the first sign
/// change of `failure - 2p` from negative to non-negative and interpolates linearly.
/// Returns `None` when there is no crossing.
pub fn estimate_pseudo_threshold(results: &[EvaluationResult]) -> Option<f64> {
    let gap = |r: &EvaluationResult| r.failure_fraction() - r.unencoded_failure();
    for window in results.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        let (ga, gb) = (gap(a), gap(b));
        if ga < 0.0 && gb >= 0.0 {
            let frac = -ga / (gb - ga);
            return Some(a.p + frac * (b.p - a.p));
        }
    }
    None
}
