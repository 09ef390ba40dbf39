use serde::{Deserialize, Serialize};

/// `f(x) = a + b*x + c*x^2 + d*x^3`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CubicFunction {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl CubicFunction {
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Constant function.
    #[must_use]
    pub fn constant(a: f64) -> Self {
        Self::new(a, 0.0, 0.0, 0.0)
    }

    #[must_use]
    pub fn value(&self, x: f64) -> f64 {
        self.a + x * (self.b + x * (self.c + x * self.d))
    }

    /// First derivative.
    #[must_use]
    pub fn slope(&self, x: f64) -> f64 {
        self.b + x * (2.0 * self.c + x * 3.0 * self.d)
    }

    /// Second derivative.
    #[must_use]
    pub fn second_derivative(&self, x: f64) -> f64 {
        2.0 * self.c + 6.0 * self.d * x
    }
}

/// A real function of the arc-length parameter.
///
/// Used for lateral offsets and heights along a reference curve.
#[derive(Debug, Clone, PartialEq)]
pub enum UnivariateFunction {
    Constant(f64),
    /// Cubic evaluated at `s - start`.
    Cubic { start: f64, function: CubicFunction },
    /// Cubic pieces sorted by start; each piece is active from its start
    /// until the next one begins. Values before the first start use the
    /// first piece.
    Piecewise(Vec<(f64, CubicFunction)>),
}

impl UnivariateFunction {
    /// The zero function.
    #[must_use]
    pub fn zero() -> Self {
        Self::Constant(0.0)
    }

    /// Builds a piecewise function, sorting the pieces by start.
    #[must_use]
    pub fn piecewise(mut pieces: Vec<(f64, CubicFunction)>) -> Self {
        pieces.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self::Piecewise(pieces)
    }

    #[must_use]
    pub fn value(&self, s: f64) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Cubic { start, function } => function.value(s - start),
            Self::Piecewise(pieces) => match active_piece(pieces, s) {
                Some((start, function)) => function.value(s - start),
                None => 0.0,
            },
        }
    }

    #[must_use]
    pub fn slope(&self, s: f64) -> f64 {
        match self {
            Self::Constant(_) => 0.0,
            Self::Cubic { start, function } => function.slope(s - start),
            Self::Piecewise(pieces) => match active_piece(pieces, s) {
                Some((start, function)) => function.slope(s - start),
                None => 0.0,
            },
        }
    }
}

impl Default for UnivariateFunction {
    fn default() -> Self {
        Self::zero()
    }
}

fn active_piece(pieces: &[(f64, CubicFunction)], s: f64) -> Option<&(f64, CubicFunction)> {
    let index = pieces.partition_point(|(start, _)| *start <= s);
    pieces.get(index.saturating_sub(1))
}
