use std::fmt;

/// Identifies one step of a nested solve: which outer (nonlinear) iteration
/// the solver is in, and which inner (linear) iteration within it.
///
/// Ids are totally ordered with the outer count dominating: an id with a
/// larger outer count is greater no matter what its inner count is, because
/// inner counting restarts at every outer step. So `(2,0)` comes after
/// `(1,7)`. This is a lexicographic order, not a componentwise one.
///
/// Equal ids hash equal and the hash covers both fields, so ids are safe to
/// use as keys for per-iteration residuals, matrices or logs.
// Field order matters: the derived Ord compares `outer` before `inner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IterationId {
    /// Count of the current outer (nonlinear) iteration.
    pub outer: usize,
    /// Count of the current inner (linear) iteration.
    /// Resets to zero at the start of every outer iteration.
    pub inner: usize,
}

impl IterationId {
    /// Id for the given outer and inner counts.
    pub fn new(outer: usize, inner: usize) -> Self {
        Self { outer, inner }
    }

    /// Id of the first inner step of the next outer iteration.
    pub fn next_outer(self) -> Self {
        Self {
            outer: self.outer + 1,
            inner: 0,
        }
    }

    /// Id of the next inner step within the same outer iteration.
    pub fn next_inner(self) -> Self {
        Self {
            outer: self.outer,
            inner: self.inner + 1,
        }
    }
}

impl fmt::Display for IterationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.outer, self.inner)
    }
}
