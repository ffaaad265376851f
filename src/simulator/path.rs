use ndarray::{s, Array1, Array2, ArrayView1, Axis};

/// A sampled 2D trajectory.
///
/// `positions` has shape `(steps, 2)`; row `i` is the position at `times[i]`.
#[derive(Clone, Debug)]
pub struct Path {
    times: Array1<f64>,
    positions: Array2<f64>,
    dt: f64,
}

impl Path {
    pub(crate) fn new(times: Array1<f64>, positions: Array2<f64>, dt: f64) -> Self {
        debug_assert_eq!(times.len(), positions.nrows());
        debug_assert_eq!(positions.ncols(), 2);
        Self {
            times,
            positions,
            dt,
        }
    }

    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    pub fn positions(&self) -> &Array2<f64> {
        &self.positions
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.positions.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.nrows() == 0
    }

    /// First coordinate of every sample
    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.positions.column(0)
    }

    /// Second coordinate of every sample
    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.positions.column(1)
    }

    pub fn initial_position(&self) -> Option<[f64; 2]> {
        self.row(0)
    }

    pub fn final_position(&self) -> Option<[f64; 2]> {
        self.len().checked_sub(1).and_then(|i| self.row(i))
    }

    fn row(&self, i: usize) -> Option<[f64; 2]> {
        (i < self.len()).then(|| [self.positions[[i, 0]], self.positions[[i, 1]]])
    }

    /// Per-step displacements, shape `(steps - 1, 2)`.
    pub fn increments(&self) -> Array2<f64> {
        if self.len() < 2 {
            return Array2::zeros((0, 2));
        }
        &self.positions.slice(s![1.., ..]) - &self.positions.slice(s![..-1, ..])
    }

    /// Largest distance from the origin reached along each axis.
    pub fn max_abs_displacement(&self) -> [f64; 2] {
        let max_abs = |col: ArrayView1<'_, f64>| col.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        [max_abs(self.x()), max_abs(self.y())]
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

/// A Kac walk trajectory together with the velocity that produced it.
///
/// `velocities` has the same shape as the positions. Row `i` holds the velocity
/// active between samples `i` and `i + 1`; the last row is the state left after the
/// final step.
#[derive(Clone, Debug)]
pub struct KacPath {
    path: Path,
    velocities: Array2<f64>,
    flips: usize,
}

impl KacPath {
    pub(crate) fn new(path: Path, velocities: Array2<f64>, flips: usize) -> Self {
        debug_assert_eq!(path.positions().dim(), velocities.dim());
        Self {
            path,
            velocities,
            flips,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }

    pub fn positions(&self) -> &Array2<f64> {
        self.path.positions()
    }

    pub fn velocities(&self) -> &Array2<f64> {
        &self.velocities
    }

    /// Number of flip events that fired during the simulation
    pub fn flips(&self) -> usize {
        self.flips
    }
}

impl AsRef<Path> for KacPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Independent trajectories drawn with one parameter setting.
#[derive(Clone, Debug)]
pub struct Ensemble<P = Path> {
    paths: Vec<P>,
}

impl<P> Ensemble<P> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, path: P) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[P] {
        &self.paths
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_inner(self) -> Vec<P> {
        self.paths
    }
}

impl<P: AsRef<Path>> Ensemble<P> {
    /// Sample mean and variance of the pooled per-step increments, per coordinate.
    ///
    /// Returns `None` when fewer than two increments are available.
    pub fn increment_moments(&self) -> Option<IncrementMoments> {
        let pooled: Vec<Array2<f64>> = self.paths.iter().map(|p| p.as_ref().increments()).collect();
        let views: Vec<_> = pooled.iter().map(|a| a.view()).collect();
        let all = ndarray::concatenate(Axis(0), &views).ok()?;
        IncrementMoments::from_increments(&all)
    }
}

impl<P> IntoIterator for Ensemble<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a Ensemble<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Empirical first and second moments of increments, per coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncrementMoments {
    pub count: usize,
    pub mean: [f64; 2],
    /// Unbiased sample variance
    pub variance: [f64; 2],
}

impl IncrementMoments {
    pub fn from_increments(increments: &Array2<f64>) -> Option<Self> {
        let n = increments.nrows();
        if n < 2 {
            return None;
        }
        let mean = increments.mean_axis(Axis(0))?;
        let variance = increments.var_axis(Axis(0), 1.0);
        Some(Self {
            count: n,
            mean: [mean[0], mean[1]],
            variance: [variance[0], variance[1]],
        })
    }
}
