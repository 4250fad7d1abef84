//! Rotation angles, encoded as rational numbers of half-turns or as symbols.

use std::fmt::{self, Display};

use num::{Rational64, Zero};

/// Largest denominator kept when a floating point angle is made exact.
pub const MAX_DENOM: i64 = 1 << 20;

/// Floating point phases this close to a fraction are taken to be that
/// fraction.
const TOLERANCE: f64 = 1e-12;

/// An exact phase, expressed in half-turns.
///
/// The phase is always normalized to be in the range (-1,1], so `Phase::new(2)`
/// is the zero phase and `Phase::new(-1)` is the half-turn `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phase {
    r: Rational64,
}

impl Phase {
    /// Creates a new phase, normalized to be in the range (-1,1].
    pub fn new(r: impl Into<Rational64>) -> Self {
        let r = r.into();
        let denom = *r.denom();
        let mut num = r.numer().rem_euclid(2 * denom);
        if num > denom {
            num -= 2 * denom;
        }
        Phase {
            r: Rational64::new(num, denom),
        }
    }

    /// Returns the phase as a rational number of half-turns.
    pub fn to_rational(&self) -> Rational64 {
        self.r
    }

    /// Creates a phase from a floating point number of half-turns.
    ///
    /// The value is rounded to the first continued-fraction convergent within
    /// a small tolerance of it, or else to the last convergent whose
    /// denominator is at most [MAX_DENOM]. Returns `None` for non-finite input.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        Some(Self::new(convergent(f.rem_euclid(2.0))))
    }

    /// Creates a phase from an angle in radians.
    pub fn from_radians(theta: f64) -> Option<Self> {
        Self::from_f64(theta / std::f64::consts::PI)
    }

    /// Returns `true` if the phase is 0 or 1, i.e. the rotation is a Pauli
    /// or the identity up to global phase.
    pub fn is_pauli(&self) -> bool {
        self.r.is_zero() || self.r == Rational64::from_integer(1)
    }

    /// Returns `true` if the phase is either -1/2 or 1/2.
    pub fn is_proper_clifford(&self) -> bool {
        self.r == Rational64::new(1, 2) || self.r == Rational64::new(-1, 2)
    }

    /// Returns `true` if the phase is either -1/4 or 1/4, the angle of a T or
    /// T-dagger gate.
    pub fn is_t(&self) -> bool {
        self.r == Rational64::new(1, 4) || self.r == Rational64::new(-1, 4)
    }
}

/// Rounds `x`, in [0, 2), to a fraction through its continued fraction
/// expansion.
fn convergent(x: f64) -> Rational64 {
    // previous and current convergents p/q
    let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);
    let mut rest = x;
    loop {
        // past MAX_DENOM the next denominator is too large anyway
        let a = rest.floor().min(MAX_DENOM as f64 + 1.0) as i64;
        let (p, q) = (a * p1 + p0, a * q1 + q0);
        if q > MAX_DENOM {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p, q);
        if (x - p as f64 / q as f64).abs() < TOLERANCE {
            break;
        }
        rest = 1.0 / (rest - a as f64);
    }
    Rational64::new(p1, q1)
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.r)
    }
}

impl From<Rational64> for Phase {
    fn from(r: Rational64) -> Phase {
        Phase::new(r)
    }
}

impl From<i64> for Phase {
    fn from(i: i64) -> Phase {
        Phase::new(Rational64::from_integer(i))
    }
}

impl From<(i64, i64)> for Phase {
    fn from(i: (i64, i64)) -> Phase {
        let r: Rational64 = i.into();
        Phase::new(r)
    }
}

impl Zero for Phase {
    fn zero() -> Self {
        Phase::new(Rational64::zero())
    }

    fn is_zero(&self) -> bool {
        self.r.is_zero()
    }
}

impl std::ops::Add for Phase {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.r + other.r)
    }
}

/// The angle of a rotation gate: exact, or a free parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Angle {
    Exact(Phase),
    Symbolic(String),
}

impl Angle {
    /// The exact phase, if the angle is not symbolic.
    pub fn exact(&self) -> Option<Phase> {
        match self {
            Angle::Exact(p) => Some(*p),
            Angle::Symbolic(_) => None,
        }
    }

    /// Negates the angle, as taking the adjoint of a rotation does.
    pub fn negated(&self) -> Angle {
        match self {
            Angle::Exact(p) => Angle::Exact(Phase::new(-p.to_rational())),
            Angle::Symbolic(s) => Angle::Symbolic(format!("-({s})")),
        }
    }
}

impl From<Phase> for Angle {
    fn from(p: Phase) -> Angle {
        Angle::Exact(p)
    }
}

impl From<(i64, i64)> for Angle {
    fn from(r: (i64, i64)) -> Angle {
        Angle::Exact(r.into())
    }
}

impl From<i64> for Angle {
    fn from(i: i64) -> Angle {
        Angle::Exact(i.into())
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Angle::Exact(p) => write!(f, "{p}"),
            Angle::Symbolic(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Phase::new(2), Phase::zero())]
    #[case(Phase::new(-1), Phase::new(1))]
    #[case(Phase::from((7, 4)), Phase::from((-1, 4)))]
    #[case(Phase::from((-3, 2)), Phase::from((1, 2)))]
    fn normalize(#[case] p: Phase, #[case] expected: Phase) {
        assert_eq!(p, expected);
    }

    #[test]
    fn classification() {
        assert!(Phase::from(1).is_pauli());
        assert!(Phase::zero().is_pauli());
        assert!(Phase::from((-1, 2)).is_proper_clifford());
        assert!(Phase::from((1, 4)).is_t());
        assert!(Phase::from((-1, 4)).is_t());
        assert!(!Phase::from((3, 4)).is_t());
        assert!(!Phase::from((1, 8)).is_proper_clifford());
    }

    #[test]
    fn from_float() {
        assert_eq!(Phase::from_radians(-std::f64::consts::PI), Some(Phase::from(1)));
        assert_eq!(Phase::from_f64(-2.0), Some(Phase::zero()));
        assert_eq!(Phase::from_f64(0.1), Some(Phase::from((1, 10))));
        assert_eq!(Phase::from_f64(f64::NAN), None);
        assert_eq!(Phase::from_f64(f64::INFINITY), None);
    }

    #[rstest]
    #[case(1.0 / 3.0, (1, 3))]
    #[case(0.75, (3, 4))]
    #[case(-0.125, (-1, 8))]
    #[case(3.5, (-1, 2))]
    #[case(1.0 - 1e-15, (1, 1))]
    fn rounds_to_nearby_fraction(#[case] f: f64, #[case] r: (i64, i64)) {
        assert_eq!(Phase::from_f64(f), Some(Phase::from(r)));
    }

    #[test]
    fn rounding_bounds_denominator() {
        let r = Phase::from_f64(0.123456789).unwrap().to_rational();
        assert!(*r.denom() <= MAX_DENOM);
        let err = 0.123456789 - *r.numer() as f64 / *r.denom() as f64;
        assert!(err.abs() < 1.0 / MAX_DENOM as f64);
    }
}
