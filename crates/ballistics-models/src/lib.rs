//! ballistics-models
//!
//! Tabulated drag-coefficient curves (G1/G7 and custom tables) and the
//! ballistic coefficient that ties a projectile to one of them.
//!
//! A table is turned into a [`DragCurve`] once: every interior point gets the
//! quadratic through itself and its two neighbours,
//!
//!   cd(M) ≈ a·M² + b·M + c
//!
//! the first point gets the straight line to its neighbour and the last point a
//! constant. A query finds the bracketing table interval by binary search and
//! evaluates the segment of whichever endpoint is closer to the query Mach.
//! That is a lookup-table approximation, not a blend of both brackets, and it
//! is kept because published reference trajectories were computed this way.
//!
//! Exports:
//!   - [`DragCurve::interpolate_drag`] – raw drag coefficient at a Mach number
//!   - [`DragCurve::drag`] – the same, scaled by [`PI_RHO`] for the solver
//!   - [`DragFamily`] / [`DragModel`] – standard and custom curves
//!   - [`BallisticCoefficient`]

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

pub mod tables;

/// π·ρ₀ folded with the imperial unit constants of the point-mass equation.
pub const PI_RHO: f64 = 2.085_51e-4;

/// One row of a drag table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragPoint {
    pub mach: f64,
    pub cd: f64,
}

impl DragPoint {
    pub const fn new(mach: f64, cd: f64) -> Self {
        Self { mach, cd }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DragTableError {
    #[error("drag table needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("drag table Mach values must be strictly ascending (index {index}: {previous} then {mach})")]
    NotAscending { index: usize, previous: f64, mach: f64 },
    #[error("drag table has a non-finite value at index {0}")]
    NonFinite(usize),
}

/// Quadratic `a·M² + b·M + c` fitted around one table point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSegment {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl CurveSegment {
    #[inline]
    pub fn eval(&self, mach: f64) -> f64 {
        self.c + mach * (self.b + self.a * mach)
    }
}

/// A drag table with its piecewise quadratic approximation.
///
/// Immutable once built; share it freely between calculations.
#[derive(Clone, Debug)]
pub struct DragCurve {
    points: Vec<DragPoint>,
    segments: Vec<CurveSegment>,
}

impl DragCurve {
    /// Validate `table` and fit its curve.
    pub fn new(table: &[DragPoint]) -> Result<Self, DragTableError> {
        if table.len() < 2 {
            return Err(DragTableError::TooFewPoints(table.len()));
        }
        for (index, point) in table.iter().enumerate() {
            if !point.mach.is_finite() || !point.cd.is_finite() {
                return Err(DragTableError::NonFinite(index));
            }
        }
        for (index, pair) in table.windows(2).enumerate() {
            if pair[1].mach <= pair[0].mach {
                return Err(DragTableError::NotAscending {
                    index: index + 1,
                    previous: pair[0].mach,
                    mach: pair[1].mach,
                });
            }
        }
        Ok(Self::fit(table))
    }

    /// Fit without validation; `table` must hold at least two ascending points.
    fn fit(table: &[DragPoint]) -> Self {
        let n = table.len();
        let mut segments = Vec::with_capacity(n);

        let rate = (table[1].cd - table[0].cd) / (table[1].mach - table[0].mach);
        segments.push(CurveSegment { a: 0.0, b: rate, c: table[0].cd - table[0].mach * rate });

        for i in 1..n - 1 {
            let (x1, y1) = (table[i - 1].mach, table[i - 1].cd);
            let (x2, y2) = (table[i].mach, table[i].cd);
            let (x3, y3) = (table[i + 1].mach, table[i + 1].cd);

            let a_num = (y3 - y1) * (x2 - x1) - (y2 - y1) * (x3 - x1);
            let a_den = (x3 * x3 - x1 * x1) * (x2 - x1) - (x2 * x2 - x1 * x1) * (x3 - x1);
            let a = a_num / a_den;
            let b = (y2 - y1 - a * (x2 * x2 - x1 * x1)) / (x2 - x1);
            let c = y1 - (a * x1 * x1 + b * x1);
            segments.push(CurveSegment { a, b, c });
        }

        segments.push(CurveSegment { a: 0.0, b: 0.0, c: table[n - 1].cd });

        Self { points: table.to_vec(), segments }
    }

    pub fn points(&self) -> &[DragPoint] {
        &self.points
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// Drag coefficient at `mach`.
    ///
    /// Evaluates the segment of the bracketing table point nearest to `mach`
    /// (ties go to the upper point). Below the table the first segment
    /// extrapolates linearly; above it the last value is held.
    pub fn interpolate_drag(&self, mach: f64) -> f64 {
        let mut lo = 0;
        let mut hi = self.points.len() - 1;
        while hi - lo > 1 {
            let mid = (hi + lo) / 2;
            if self.points[mid].mach < mach {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let nearest = if self.points[hi].mach - mach > mach - self.points[lo].mach { lo } else { hi };
        self.segments[nearest].eval(mach)
    }

    /// Drag factor used by the point-mass solver: `interpolate_drag(mach) * PI_RHO`.
    #[inline]
    pub fn drag(&self, mach: f64) -> f64 {
        self.interpolate_drag(mach) * PI_RHO
    }
}

/* ----------------------------- standard curves ----------------------------- */

static G1_CURVE: OnceLock<DragCurve> = OnceLock::new();
static G7_CURVE: OnceLock<DragCurve> = OnceLock::new();

/// Standard reference projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragFamily {
    G1,
    G7,
}

impl DragFamily {
    pub fn table(self) -> &'static [DragPoint] {
        match self {
            DragFamily::G1 => &tables::G1_TABLE,
            DragFamily::G7 => &tables::G7_TABLE,
        }
    }

    /// The family's curve, fitted on first use.
    pub fn curve(self) -> &'static DragCurve {
        match self {
            DragFamily::G1 => G1_CURVE.get_or_init(|| DragCurve::fit(&tables::G1_TABLE)),
            DragFamily::G7 => G7_CURVE.get_or_init(|| DragCurve::fit(&tables::G7_TABLE)),
        }
    }
}

impl fmt::Display for DragFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragFamily::G1 => f.write_str("G1"),
            DragFamily::G7 => f.write_str("G7"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown drag family `{0}` (expected G1 or G7)")]
pub struct UnknownDragFamily(pub String);

impl FromStr for DragFamily {
    type Err = UnknownDragFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G1" => Ok(DragFamily::G1),
            "G7" => Ok(DragFamily::G7),
            _ => Err(UnknownDragFamily(s.to_owned())),
        }
    }
}

/// The curve a ballistic coefficient refers to.
#[derive(Clone, Debug)]
pub enum DragModel {
    Standard(DragFamily),
    Custom(Arc<DragCurve>),
}

impl DragModel {
    /// Build a model from a caller-supplied table.
    pub fn custom(table: &[DragPoint]) -> Result<Self, DragTableError> {
        Ok(DragModel::Custom(Arc::new(DragCurve::new(table)?)))
    }

    pub fn curve(&self) -> &DragCurve {
        match self {
            DragModel::Standard(family) => family.curve(),
            DragModel::Custom(curve) => curve.as_ref(),
        }
    }
}

impl From<DragFamily> for DragModel {
    fn from(family: DragFamily) -> Self {
        DragModel::Standard(family)
    }
}

/* ------------------------- ballistic coefficient ------------------------- */

/// Whether a coefficient value is a ballistic coefficient or a form factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoefficientKind {
    BallisticCoefficient,
    FormFactor,
}

#[derive(Debug, Error, PartialEq)]
pub enum CoefficientError {
    #[error("coefficient must be a positive finite number, got {0}")]
    NonPositive(f64),
}

#[derive(Clone, Debug)]
pub struct BallisticCoefficient {
    value: f64,
    kind: CoefficientKind,
    model: DragModel,
}

impl BallisticCoefficient {
    pub fn new(value: f64, model: impl Into<DragModel>) -> Result<Self, CoefficientError> {
        Self::with_kind(value, CoefficientKind::BallisticCoefficient, model.into())
    }

    /// A form factor; the projectile converts it to a BC using its mass and diameter.
    pub fn form_factor(value: f64, model: impl Into<DragModel>) -> Result<Self, CoefficientError> {
        Self::with_kind(value, CoefficientKind::FormFactor, model.into())
    }

    fn with_kind(value: f64, kind: CoefficientKind, model: DragModel) -> Result<Self, CoefficientError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CoefficientError::NonPositive(value));
        }
        Ok(Self { value, kind, model })
    }

    pub fn value(&self) -> f64 { self.value }
    pub fn kind(&self) -> CoefficientKind { self.kind }
    pub fn model(&self) -> &DragModel { &self.model }

    /// Solver drag factor at `mach`.
    #[inline]
    pub fn drag(&self, mach: f64) -> f64 {
        self.model.curve().drag(mach)
    }
}

/* -------------------------------- tests -------------------------------- */
