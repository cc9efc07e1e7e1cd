//! Linear approximation over a user-selected window of a series.
//!
//! [`fit`] is the hot path, called on every drag of a window edge: it selects
//! the points with `x1 <= x < x2`, drops NaN pairs and fits either the
//! endpoint line or an ordinary least-squares line. [`best_subset`] is the
//! slow exploratory search and is never called from [`fit`].

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Fit algorithm selected by the caller
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, Deserialize, Display, EnumString, PartialEq, Eq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Line through the first and last valid point of the window
    #[default]
    #[strum(serialize = "two-point")]
    TwoPoint,
    /// Ordinary least squares over every valid point of the window
    #[strum(serialize = "regression")]
    Regression,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FitError {
    #[error("no valid points in window [{x1}, {x2})")]
    EmptyWindow { x1: f64, x2: f64 },

    #[error("x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("series has {points} points, search is limited to {max_points}")]
    SearchTooLarge { points: usize, max_points: usize },

    #[error("search needs a window of at least {min_window} points, {available} available")]
    WindowTooSmall { min_window: usize, available: usize },
}

/// Fitted line plus the points it was computed from
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, regression mode only
    pub r_squared: Option<f64>,
    /// Valid window points in inclusion order
    pub window_points: Vec<(f64, f64)>,
}

impl FitResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Where the line crosses y = 0 (threshold current on a power curve)
    pub fn x_intercept(&self) -> Option<f64> {
        if self.slope == 0.0 {
            None
        } else {
            Some(-self.intercept / self.slope)
        }
    }

    pub fn stats(&self) -> Option<WindowStats> {
        WindowStats::compute(&self.window_points)
    }
}

/// Summary of the y-values inside a fit window
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WindowStats {
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub delta: f64,
}

impl WindowStats {
    pub fn compute(points: &[(f64, f64)]) -> Option<Self> {
        let first = points.first()?.1;
        let last = points.last()?.1;
        let ys = points.iter().map(|&(_, y)| y);
        let min = ys.clone().fold(f64::INFINITY, f64::min);
        let max = ys.clone().fold(f64::NEG_INFINITY, f64::max);
        let mean = ys.sum::<f64>() / points.len() as f64;
        Some(Self {
            first,
            last,
            min,
            max,
            mean,
            delta: last - first,
        })
    }
}

/// Valid `(x, y)` pairs with `low <= x < high`, where `low`/`high` are the
/// window edges in either order
pub fn select_window(
    xs: &[f64],
    ys: &[f64],
    x1: f64,
    x2: f64,
) -> Result<Vec<(f64, f64)>, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    let (low, high) = if x1 > x2 { (x2, x1) } else { (x1, x2) };

    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|&(&x, _)| low <= x && x < high)
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(&x, &y)| (x, y))
        .collect();

    if points.is_empty() {
        return Err(FitError::EmptyWindow { x1: low, x2: high });
    }
    Ok(points)
}

/// Fit a line over the window `[x1, x2)` of the series.
///
/// In two-point mode a window whose first and last valid points share the
/// same x yields slope 0 and the first y as intercept, the same as a
/// single-point window.
pub fn fit(xs: &[f64], ys: &[f64], x1: f64, x2: f64, mode: FitMode) -> Result<FitResult, FitError> {
    let points = select_window(xs, ys, x1, x2)?;
    Ok(fit_points(points, mode))
}

/// Fit over every valid point of the series
pub fn fit_all(xs: &[f64], ys: &[f64], mode: FitMode) -> Result<FitResult, FitError> {
    fit(xs, ys, f64::NEG_INFINITY, f64::INFINITY, mode)
}

/// Fit over an already selected, NaN-free, non-empty window
pub fn fit_points(window_points: Vec<(f64, f64)>, mode: FitMode) -> FitResult {
    let (slope, intercept, r_squared) = match mode {
        FitMode::TwoPoint => {
            let (slope, intercept) = two_point(&window_points);
            (slope, intercept, None)
        }
        FitMode::Regression => {
            let (slope, intercept, r2) = regression(&window_points);
            (slope, intercept, Some(r2))
        }
    };
    FitResult {
        slope,
        intercept,
        r_squared,
        window_points,
    }
}

/// Line through the first and last point.
///
/// One point (or coincident first/last x) gives a flat line through the
/// first y.
pub fn two_point(points: &[(f64, f64)]) -> (f64, f64) {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (points.first(), points.last())
    else {
        return (0.0, f64::NAN);
    };
    if points.len() == 1 || x_last == x_first {
        return (0.0, y_first);
    }
    let slope = (y_last - y_first) / (x_last - x_first);
    (slope, y_first - slope * x_first)
}

/// Ordinary least squares of y on x: `(slope, intercept, r_squared)`.
///
/// With no spread in x the slope is 0 and the intercept is the mean of y.
/// With no spread in y, R² is 1 for a perfect fit and 0 otherwise.
pub fn regression(points: &[(f64, f64)]) -> (f64, f64, f64) {
    if points.is_empty() {
        return (0.0, f64::NAN, f64::NAN);
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in points {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }

    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for &(x, y) in points {
        let residual = y - (slope * x + intercept);
        ss_res += residual * residual;
        ss_tot += (y - mean_y) * (y - mean_y);
    }
    (slope, intercept, r_squared(ss_res, ss_tot))
}

fn r_squared(ss_res: f64, ss_tot: f64) -> f64 {
    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// Limits for [`best_subset`]
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SearchBounds {
    /// Smallest window (points) considered
    pub min_window: usize,
    /// Stride for both window start and window end
    pub step: usize,
    /// Refuse series with more valid points than this
    pub max_points: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            min_window: 10,
            step: 1,
            max_points: 2000,
        }
    }
}

/// Winning window of [`best_subset`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BestSubset {
    /// Index of the first point in the input series
    pub start: usize,
    /// Index one past the last point in the input series
    pub end: usize,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Relative size below which a window's sum of squares is treated as zero
const ROUNDING_TOLERANCE: f64 = 1e-10;

/// Running sums over centered values, so every window is an O(1) regression
struct PrefixSums {
    x: Vec<f64>,
    y: Vec<f64>,
    xx: Vec<f64>,
    xy: Vec<f64>,
    yy: Vec<f64>,
}

impl PrefixSums {
    fn new(points: &[(f64, f64)]) -> Self {
        let n = points.len() as f64;
        let cx = points.iter().map(|p| p.0).sum::<f64>() / n;
        let cy = points.iter().map(|p| p.1).sum::<f64>() / n;

        let mut sums = Self {
            x: vec![0.0; points.len() + 1],
            y: vec![0.0; points.len() + 1],
            xx: vec![0.0; points.len() + 1],
            xy: vec![0.0; points.len() + 1],
            yy: vec![0.0; points.len() + 1],
        };
        for (i, &(x, y)) in points.iter().enumerate() {
            let (x, y) = (x - cx, y - cy);
            sums.x[i + 1] = sums.x[i] + x;
            sums.y[i + 1] = sums.y[i] + y;
            sums.xx[i + 1] = sums.xx[i] + x * x;
            sums.xy[i + 1] = sums.xy[i] + x * y;
            sums.yy[i + 1] = sums.yy[i] + y * y;
        }
        sums
    }

    /// `(slope, r_squared, mean_x, mean_y)` in centered coordinates
    fn window(&self, start: usize, end: usize) -> (f64, f64, f64, f64) {
        let n = (end - start) as f64;
        let sx = self.x[end] - self.x[start];
        let sy = self.y[end] - self.y[start];
        let sxx = self.xx[end] - self.xx[start] - sx * sx / n;
        let sxy = self.xy[end] - self.xy[start] - sx * sy / n;
        let syy = self.yy[end] - self.yy[start] - sy * sy / n;

        // Cancellation noise scales with the window's raw sums of squares
        let tol_x = ROUNDING_TOLERANCE * (self.xx[end] - self.xx[start]);
        let tol_y = ROUNDING_TOLERANCE * (self.yy[end] - self.yy[start]);

        let slope = if sxx <= tol_x { 0.0 } else { sxy / sxx };
        let ss_tot = if syy <= tol_y { 0.0 } else { syy };
        let ss_res = (ss_tot - slope * sxy).max(0.0);
        let ss_res = if ss_res <= tol_y { 0.0 } else { ss_res };
        (slope, r_squared(ss_res, ss_tot), sx / n, sy / n)
    }
}

/// Slide windows of every size `>= min_window` over the series and return
/// the one with the highest R². O(n²) windows; refuses series above
/// `bounds.max_points`. NaN pairs are dropped before the search, reported
/// indices refer to the input series.
pub fn best_subset(xs: &[f64], ys: &[f64], bounds: SearchBounds) -> Result<BestSubset, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }

    let (indices, points): (Vec<usize>, Vec<(f64, f64)>) = xs
        .iter()
        .zip(ys)
        .enumerate()
        .filter(|(_, (x, y))| !x.is_nan() && !y.is_nan())
        .map(|(i, (&x, &y))| (i, (x, y)))
        .unzip();

    let n = points.len();
    if n > bounds.max_points {
        return Err(FitError::SearchTooLarge {
            points: n,
            max_points: bounds.max_points,
        });
    }
    let min_window = bounds.min_window.max(2);
    if n < min_window {
        return Err(FitError::WindowTooSmall {
            min_window,
            available: n,
        });
    }
    let step = bounds.step.max(1);

    let n_f = n as f64;
    let cx = points.iter().map(|p| p.0).sum::<f64>() / n_f;
    let cy = points.iter().map(|p| p.1).sum::<f64>() / n_f;
    let sums = PrefixSums::new(&points);

    let mut best: Option<(usize, usize, f64, f64, f64)> = None;
    for start in (0..=n - min_window).step_by(step) {
        for end in (start + min_window..=n).step_by(step) {
            let (slope, r2, mx, my) = sums.window(start, end);
            if best.map_or(true, |(_, _, _, _, best_r2)| r2 > best_r2) {
                // Back from centered coordinates
                let intercept = (my + cy) - slope * (mx + cx);
                best = Some((start, end, slope, intercept, r2));
            }
        }
    }

    let (start, end, slope, intercept, r_squared) =
        best.ok_or(FitError::WindowTooSmall {
            min_window,
            available: n,
        })?;
    tracing::debug!(
        "Best linear window {}..{} of {} points, R² = {:.6}",
        start,
        end,
        n,
        r_squared
    );
    Ok(BestSubset {
        start: indices[start],
        end: indices[end - 1] + 1,
        slope,
        intercept,
        r_squared,
    })
}

/// Which plot a fit annotates; decides the legend values
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumString, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum AnnotationRole {
    LivPower,
    LivVoltage,
    LivSpectrumMean,
    LtPower,
    LtVoltage,
    LtTemperature,
    PulsePower,
    PulseVoltage,
    PulseIntensity,
}

/// One labelled legend value
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Annotation {
    pub label: &'static str,
    pub value: f64,
}

/// Legend values shown next to a fitted line for the given plot role
pub fn annotate(role: AnnotationRole, result: &FitResult) -> Vec<Annotation> {
    let stats = result.stats();
    let stat = |f: fn(&WindowStats) -> f64| stats.as_ref().map_or(f64::NAN, f);
    let k = Annotation {
        label: "k",
        value: result.slope,
    };
    let threshold = Annotation {
        label: "I₀",
        value: result.x_intercept().unwrap_or(f64::NAN),
    };

    match role {
        AnnotationRole::LivPower | AnnotationRole::PulsePower => vec![k, threshold],
        AnnotationRole::LivVoltage | AnnotationRole::PulseVoltage => vec![
            k,
            Annotation {
                label: "V₀",
                value: result.intercept,
            },
        ],
        AnnotationRole::LivSpectrumMean => vec![Annotation {
            label: "W₀",
            value: result.intercept,
        }],
        AnnotationRole::LtPower => vec![
            k,
            Annotation {
                label: "Δ",
                value: stat(|s| s.delta),
            },
        ],
        AnnotationRole::LtVoltage => vec![
            Annotation {
                label: "Δ",
                value: stat(|s| s.delta),
            },
            Annotation {
                label: "mean",
                value: stat(|s| s.mean),
            },
            Annotation {
                label: "min",
                value: stat(|s| s.min),
            },
            Annotation {
                label: "max",
                value: stat(|s| s.max),
            },
        ],
        AnnotationRole::LtTemperature => vec![
            Annotation {
                label: "mean",
                value: stat(|s| s.mean),
            },
            Annotation {
                label: "min",
                value: stat(|s| s.min),
            },
            Annotation {
                label: "max",
                value: stat(|s| s.max),
            },
        ],
        AnnotationRole::PulseIntensity => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_two_point_line() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 2.0];
        // x = 2 is outside [0, 2)
        let result = fit(&xs, &ys, 0.0, 2.0, FitMode::TwoPoint).unwrap();
        assert_eq!(result.slope, 1.0);
        assert_eq!(result.intercept, 0.0);
        assert_eq!(result.window_points, vec![(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(result.r_squared, None);

        let all = fit(&xs, &ys, 0.0, 2.5, FitMode::TwoPoint).unwrap();
        assert_eq!(all.slope, 1.0);
        assert_eq!(all.intercept, 0.0);
        assert_eq!(all.window_points.len(), 3);
    }

    #[test]
    fn test_swapped_edges() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let a = fit(&xs, &ys, 0.5, 3.5, FitMode::TwoPoint).unwrap();
        let b = fit(&xs, &ys, 3.5, 0.5, FitMode::TwoPoint).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.slope, 2.0);
        assert_eq!(a.intercept, 1.0);
    }

    #[test]
    fn test_empty_window() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(
            fit(&xs, &ys, 5.0, 6.0, FitMode::TwoPoint),
            Err(FitError::EmptyWindow { x1: 5.0, x2: 6.0 })
        );
        assert!(matches!(
            fit(&xs, &ys, 5.0, 6.0, FitMode::Regression),
            Err(FitError::EmptyWindow { .. })
        ));
    }

    #[test]
    fn test_nan_points_dropped() {
        let xs = [0.0, 1.0, 2.0, f64::NAN, 4.0];
        let ys = [f64::NAN, 2.0, 4.0, 6.0, 8.0];
        let result = fit(&xs, &ys, 0.0, 10.0, FitMode::TwoPoint).unwrap();
        assert_eq!(result.window_points, vec![(1.0, 2.0), (2.0, 4.0), (4.0, 8.0)]);
        assert_eq!(result.slope, 2.0);
        assert_eq!(result.intercept, 0.0);

        let only_nan = fit(&[0.0], &[f64::NAN], 0.0, 1.0, FitMode::Regression);
        assert!(matches!(only_nan, Err(FitError::EmptyWindow { .. })));
    }

    #[test]
    fn test_single_point_window() {
        let result = fit(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0], 0.5, 1.5, FitMode::TwoPoint).unwrap();
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.intercept, 6.0);

        let result =
            fit(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0], 0.5, 1.5, FitMode::Regression).unwrap();
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.intercept, 6.0);
        assert_eq!(result.r_squared, Some(1.0));
    }

    #[test]
    fn test_two_point_coincident_endpoints_is_flat() {
        let result = fit(&[1.0, 2.0, 1.0], &[5.0, 6.0, 7.0], 0.0, 3.0, FitMode::TwoPoint).unwrap();
        assert_eq!(result.window_points.len(), 3);
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.intercept, 5.0);
    }

    #[test]
    fn test_regression() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let result = fit(&xs, &ys, 0.0, 4.0, FitMode::Regression).unwrap();
        assert!(approx(result.slope, 2.0));
        assert!(approx(result.intercept, 1.0));
        assert!(approx(result.r_squared.unwrap(), 1.0));

        // Regression uses interior points, two-point does not
        let ys = [0.0, 2.0, 0.0, 0.0];
        let reg = fit(&xs, &ys, 0.0, 4.0, FitMode::Regression).unwrap();
        let tp = fit(&xs, &ys, 0.0, 4.0, FitMode::TwoPoint).unwrap();
        assert_eq!(tp.slope, 0.0);
        assert!(approx(reg.slope, -0.2));
        assert!(reg.r_squared.unwrap() < 1.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            fit(&[0.0, 1.0], &[0.0], 0.0, 1.0, FitMode::TwoPoint),
            Err(FitError::LengthMismatch { x_len: 2, y_len: 1 })
        );
    }

    #[test]
    fn test_x_intercept_and_stats() {
        let result = fit(
            &[1.0, 2.0, 3.0],
            &[0.0, 0.5, 1.0],
            0.0,
            10.0,
            FitMode::TwoPoint,
        )
        .unwrap();
        assert_eq!(result.x_intercept(), Some(1.0));
        assert_eq!(result.predict(5.0), 2.0);

        let stats = result.stats().unwrap();
        assert_eq!(stats.first, 0.0);
        assert_eq!(stats.last, 1.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.mean, 0.5);
        assert_eq!(stats.delta, 1.0);
    }

    #[test]
    fn test_best_subset_finds_linear_part() {
        let xs: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs
            .iter()
            .map(|&x| {
                if x < 10.0 {
                    2.0 * x + 1.0
                } else {
                    // Saturating tail
                    21.0 + ((x - 10.0) * 1.7).sin() * 3.0
                }
            })
            .collect();

        let best = best_subset(
            &xs,
            &ys,
            SearchBounds {
                min_window: 5,
                step: 1,
                max_points: 100,
            },
        )
        .unwrap();
        assert!(best.r_squared > 0.999_999);
        // x = 10 still lies on the line
        assert!(best.end <= 11);
        assert!(best.end - best.start >= 5);
        assert!((best.slope - 2.0).abs() < 1e-6);
        assert!((best.intercept - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_best_subset_bounds() {
        let xs: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let ys = xs.clone();
        assert_eq!(
            best_subset(
                &xs,
                &ys,
                SearchBounds {
                    min_window: 5,
                    step: 1,
                    max_points: 10,
                }
            ),
            Err(FitError::SearchTooLarge {
                points: 50,
                max_points: 10
            })
        );
        assert!(matches!(
            best_subset(&xs[..3], &ys[..3], SearchBounds::default()),
            Err(FitError::WindowTooSmall { .. })
        ));
    }

    #[test]
    fn test_best_subset_matches_regression_at_small_scale() {
        let xs: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let ys: Vec<f64> = [3.0, -1.0, 4.0, -1.0, 5.0, -9.0, 2.0, -6.0, 5.0, 3.0, -5.0, 8.0]
            .iter()
            .map(|v| v * 1e-8)
            .collect();

        let best = best_subset(
            &xs,
            &ys,
            SearchBounds {
                min_window: 10,
                step: 1,
                max_points: 100,
            },
        )
        .unwrap();

        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(&ys)
            .map(|(&x, &y)| (x, y))
            .collect();
        let (slope, _, r2) = regression(&points[best.start..best.end]);
        assert!(best.r_squared < 1.0);
        assert!((best.r_squared - r2).abs() < 1e-6);
        assert!((best.slope - slope).abs() < 1e-14);
    }

    #[test]
    fn test_best_subset_reports_input_indices() {
        let xs = [f64::NAN, 0.0, 1.0, 2.0, 3.0];
        let ys = [9.0, 0.0, 1.0, 2.0, 3.0];
        let best = best_subset(
            &xs,
            &ys,
            SearchBounds {
                min_window: 4,
                step: 1,
                max_points: 100,
            },
        )
        .unwrap();
        assert_eq!((best.start, best.end), (1, 5));
        assert!((best.slope - 1.0).abs() < 1e-9);
        assert!(best.intercept.abs() < 1e-9);
    }

    #[test]
    fn test_annotate_roles() {
        let result = fit(&[1.0, 3.0], &[0.0, 2.0], 0.0, 10.0, FitMode::TwoPoint).unwrap();

        let power = annotate(AnnotationRole::LivPower, &result);
        assert_eq!(power[0], Annotation { label: "k", value: 1.0 });
        assert_eq!(power[1], Annotation { label: "I₀", value: 1.0 });

        let voltage = annotate(AnnotationRole::LivVoltage, &result);
        assert_eq!(voltage[1], Annotation { label: "V₀", value: -1.0 });

        let temperature = annotate(AnnotationRole::LtTemperature, &result);
        let labels: Vec<&str> = temperature.iter().map(|a| a.label).collect();
        assert_eq!(labels, vec!["mean", "min", "max"]);
        assert_eq!(temperature[0].value, 1.0);

        assert!(annotate(AnnotationRole::PulseIntensity, &result).is_empty());
        assert_eq!(
            AnnotationRole::from_str("lt-power").unwrap(),
            AnnotationRole::LtPower
        );
    }

    #[test]
    fn test_fit_mode_names() {
        assert_eq!(FitMode::from_str("regression").unwrap(), FitMode::Regression);
        assert_eq!(FitMode::TwoPoint.as_ref(), "two-point");
        assert_eq!(FitMode::default(), FitMode::TwoPoint);
    }
}
