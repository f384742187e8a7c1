use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Ordinary least-squares fit of `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    pub slope_stderr: f64,
    pub intercept_stderr: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a straight line through `(x, y)` by ordinary least squares.
///
/// # Errors
/// Returns an error if the slices differ in length, hold fewer than two points,
/// or if all `x` values are identical.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    let n_vals = x.len();
    if n_vals != y.len() {
        bail!("x and y must have the same length, but have {n_vals} and {}", y.len());
    }
    if n_vals < 2 {
        bail!("at least 2 points are needed, but there are {n_vals}");
    }

    if x.iter().all(|&xi| xi == x[0]) {
        bail!("all x values are identical");
    }

    let n_f = n_vals as f64;
    let x_mean = x.iter().sum::<f64>() / n_f;
    let y_mean = y.iter().sum::<f64>() / n_f;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let x_diff = xi - x_mean;
        let y_diff = yi - y_mean;
        ss_xx += x_diff * x_diff;
        ss_yy += y_diff * y_diff;
        ss_xy += x_diff * y_diff;
    }

    let slope = ss_xy / ss_xx;
    let intercept = y_mean - slope * x_mean;

    let r = if ss_yy == 0.0 {
        0.0
    } else {
        (ss_xy / (ss_xx * ss_yy).sqrt()).clamp(-1.0, 1.0)
    };
    let r_squared = r * r;

    let (slope_stderr, intercept_stderr) = if n_vals > 2 {
        let df = (n_vals - 2) as f64;
        let slope_stderr = ((1.0 - r_squared) * ss_yy / ss_xx / df).sqrt();
        let intercept_stderr = slope_stderr * (ss_xx / n_f + x_mean * x_mean).sqrt();
        (slope_stderr, intercept_stderr)
    } else {
        (0.0, 0.0)
    };

    Ok(LinearFit {
        slope,
        intercept,
        r,
        r_squared,
        slope_stderr,
        intercept_stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn exact_line() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<_> = x.iter().map(|xi| 2.0 - 0.5 * xi).collect();
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, -0.5, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r, -1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.slope_stderr, 0.0, epsilon = 1e-6);
        assert_relative_eq!(fit.predict(10.0), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn noisy_line_matches_reference() {
        // Reference values from scipy.stats.linregress.
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 0.6, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 2.2, epsilon = 1e-12);
        assert_relative_eq!(fit.r, 0.7745966692414834, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 0.6, epsilon = 1e-12);
        assert_relative_eq!(fit.slope_stderr, 0.28284271247461906, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept_stderr, 0.938083151964686, epsilon = 1e-12);
    }

    #[test]
    fn two_points_have_zero_stderr() {
        let fit = linear_regression(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert_relative_eq!(fit.slope, 2.0);
        assert_relative_eq!(fit.intercept, 1.0);
        assert_eq!(fit.slope_stderr, 0.0);
        assert_eq!(fit.intercept_stderr, 0.0);
    }

    #[test]
    fn constant_y_has_zero_correlation() {
        let fit = linear_regression(&[0.0, 1.0, 2.0], &[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 3.0);
        assert_eq!(fit.r, 0.0);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(linear_regression(&[1.0, 2.0], &[1.0]).is_err());
        assert!(linear_regression(&[1.0], &[1.0]).is_err());
        assert!(linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
        for t in [0.1, 0.7, 3.3] {
            let err = linear_regression(&[t, t, t], &[1.0, 0.5, 0.25]).unwrap_err();
            assert!(err.to_string().contains("identical"), "{t}: {err}");
        }
    }
}
