// bloqcost - gate-count resource estimation for quantum programs
// Copyright (C) 2025 - Aleks Kissinger
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integer counts that may depend on unresolved parameters.
//!
//! A [SymbolicInt] is either a concrete integer or a polynomial with integer
//! coefficients over named symbols, e.g. the `n - 1` And gates used by an
//! `n`-bit adder. Values are kept normalised: zero coefficients are dropped
//! and a polynomial with only a constant term collapses to
//! [SymbolicInt::Const]. Hence `n - n` *is* the concrete zero and
//! [Zero::is_zero] never needs to guess.
//!
//! Integers are arbitrary precision. Multiplicities compound along call
//! graphs, and a few dozen levels of doubling already exceed 64 bits.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

use itertools::Itertools;
use num::{BigInt, One, Signed, ToPrimitive, Zero};
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

/// A product of symbols raised to positive powers.
///
/// Symbols are kept sorted by name and each appears once, so equal monomials
/// have equal representations. The empty monomial is the constant 1.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Monomial(Vec<(String, u32)>);

impl Monomial {
    pub fn one() -> Self {
        Monomial(vec![])
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Monomial(vec![(name.into(), 1)])
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Total degree of the monomial.
    pub fn degree(&self) -> u32 {
        self.0.iter().map(|(_, e)| e).sum()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(s, _)| s.as_str())
    }

    /// Iterate over `(symbol, exponent)` pairs in name order.
    pub fn powers(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.0.iter().map(|(s, e)| (s.as_str(), *e))
    }
}

impl Mul<&Monomial> for &Monomial {
    type Output = Monomial;

    fn mul(self, rhs: &Monomial) -> Monomial {
        let mut powers = Vec::with_capacity(self.0.len() + rhs.0.len());

        // merge the two sorted lists, adding exponents of shared symbols
        let mut i = 0;
        let mut j = 0;
        while i < self.0.len() && j < rhs.0.len() {
            let (s1, e1) = &self.0[i];
            let (s2, e2) = &rhs.0[j];
            match s1.cmp(s2) {
                Ordering::Less => {
                    powers.push((s1.clone(), *e1));
                    i += 1;
                }
                Ordering::Greater => {
                    powers.push((s2.clone(), *e2));
                    j += 1;
                }
                Ordering::Equal => {
                    powers.push((s1.clone(), e1 + e2));
                    i += 1;
                    j += 1;
                }
            }
        }
        powers.extend_from_slice(&self.0[i..]);
        powers.extend_from_slice(&rhs.0[j..]);

        Monomial(powers)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        let s = self
            .0
            .iter()
            .map(|(s, e)| {
                if *e == 1 {
                    s.clone()
                } else {
                    format!("{s}**{e}")
                }
            })
            .join("*");
        write!(f, "{s}")
    }
}

type Terms = BTreeMap<Monomial, BigInt>;

/// A count that is either a concrete integer or a polynomial over symbols.
///
/// The `Poly` variant always contains at least one non-constant term.
/// Counts produced by costing are non-negative by convention; subtraction is
/// offered for building multiplicities like `n - 1` but the cost engine never
/// subtracts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolicInt {
    Const(BigInt),
    Poly(BTreeMap<Monomial, BigInt>),
}

pub use SymbolicInt::{Const, Poly};

impl SymbolicInt {
    /// The count consisting of a single free symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        let mut terms = Terms::new();
        terms.insert(Monomial::symbol(name), BigInt::one());
        Poly(terms)
    }

    /// Builds a normalised count from a term map.
    fn from_terms(mut terms: Terms) -> Self {
        terms.retain(|_, c| !c.is_zero());
        if terms.len() == 1 {
            if let Some(c) = terms.remove(&Monomial::one()) {
                return Const(c);
            }
        }
        if terms.is_empty() {
            SymbolicInt::zero()
        } else {
            Poly(terms)
        }
    }

    fn terms(&self) -> Terms {
        match self {
            Const(c) if c.is_zero() => Terms::new(),
            Const(c) => Terms::from([(Monomial::one(), c.clone())]),
            Poly(terms) => terms.clone(),
        }
    }

    /// Returns the concrete value, if the count has no free symbols.
    pub fn as_const(&self) -> Option<&BigInt> {
        match self {
            Const(c) => Some(c),
            Poly(_) => None,
        }
    }

    /// The concrete value, if there is one and it fits in an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        self.as_const()?.to_i64()
    }

    /// True for concrete counts below zero. Symbolic counts are taken to be
    /// non-negative.
    pub fn is_negative(&self) -> bool {
        matches!(self, Const(c) if c.is_negative())
    }

    #[inline]
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Poly(_))
    }

    /// The free symbols of the count, sorted and without repeats.
    pub fn free_symbols(&self) -> Vec<&str> {
        match self {
            Const(_) => vec![],
            Poly(terms) => terms
                .keys()
                .flat_map(|m| m.symbols())
                .sorted()
                .dedup()
                .collect(),
        }
    }

    /// Raise to a non-negative integer power.
    pub fn pow(&self, exp: u32) -> Self {
        let mut acc = SymbolicInt::one();
        for _ in 0..exp {
            acc = &acc * self;
        }
        acc
    }

    /// Replaces `symbol` by `value` everywhere it occurs.
    pub fn subs(&self, symbol: &str, value: impl Into<SymbolicInt>) -> Self {
        let value = value.into();
        let mut values = FxHashMap::default();
        values.insert(symbol.to_string(), value);
        self.subs_all(&values)
    }

    /// Replaces every symbol that has an entry in `values`.
    pub fn subs_all(&self, values: &FxHashMap<String, SymbolicInt>) -> Self {
        let Poly(terms) = self else {
            return self.clone();
        };

        terms
            .iter()
            .map(|(m, c)| {
                m.powers().fold(Const(c.clone()), |acc, (s, e)| {
                    let factor = match values.get(s) {
                        Some(v) => v.pow(e),
                        None => SymbolicInt::from_terms(Terms::from([(
                            Monomial(vec![(s.to_string(), e)]),
                            BigInt::one(),
                        )])),
                    };
                    &acc * &factor
                })
            })
            .sum()
    }
}

impl Default for SymbolicInt {
    fn default() -> Self {
        SymbolicInt::zero()
    }
}

macro_rules! from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SymbolicInt {
                fn from(c: $t) -> Self {
                    Const(BigInt::from(c))
                }
            }
        )*
    };
}

from_primitive!(i32, i64, u32, u64, usize);

impl From<BigInt> for SymbolicInt {
    fn from(c: BigInt) -> Self {
        Const(c)
    }
}

impl From<&SymbolicInt> for SymbolicInt {
    fn from(c: &SymbolicInt) -> Self {
        c.clone()
    }
}

impl PartialEq<i64> for SymbolicInt {
    fn eq(&self, other: &i64) -> bool {
        self.to_i64() == Some(*other)
    }
}

impl PartialEq<i32> for SymbolicInt {
    fn eq(&self, other: &i32) -> bool {
        self.to_i64() == Some(i64::from(*other))
    }
}

impl Zero for SymbolicInt {
    fn zero() -> Self {
        Const(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        matches!(self, Const(c) if c.is_zero())
    }
}

impl One for SymbolicInt {
    fn one() -> Self {
        Const(BigInt::one())
    }

    fn is_one(&self) -> bool {
        matches!(self, Const(c) if c.is_one())
    }
}

impl Add<&SymbolicInt> for &SymbolicInt {
    type Output = SymbolicInt;

    fn add(self, rhs: &SymbolicInt) -> SymbolicInt {
        match (self, rhs) {
            (Const(a), Const(b)) => Const(a + b),
            _ => {
                let mut terms = self.terms();
                for (m, c) in rhs.terms() {
                    *terms.entry(m).or_insert_with(BigInt::zero) += c;
                }
                SymbolicInt::from_terms(terms)
            }
        }
    }
}

impl Mul<&SymbolicInt> for &SymbolicInt {
    type Output = SymbolicInt;

    fn mul(self, rhs: &SymbolicInt) -> SymbolicInt {
        match (self, rhs) {
            (Const(a), Const(b)) => Const(a * b),
            (Const(z), _) | (_, Const(z)) if z.is_zero() => SymbolicInt::zero(),
            _ => {
                let (lhs, rhs) = (self.terms(), rhs.terms());
                let mut terms = Terms::new();
                for (m1, c1) in &lhs {
                    for (m2, c2) in &rhs {
                        *terms.entry(m1 * m2).or_insert_with(BigInt::zero) += c1 * c2;
                    }
                }
                SymbolicInt::from_terms(terms)
            }
        }
    }
}

impl Neg for &SymbolicInt {
    type Output = SymbolicInt;

    fn neg(self) -> SymbolicInt {
        match self {
            Const(c) => Const(-c),
            Poly(terms) => Poly(terms.iter().map(|(m, c)| (m.clone(), -c)).collect()),
        }
    }
}

impl Neg for SymbolicInt {
    type Output = SymbolicInt;

    fn neg(self) -> SymbolicInt {
        -&self
    }
}

impl Sub<&SymbolicInt> for &SymbolicInt {
    type Output = SymbolicInt;

    fn sub(self, rhs: &SymbolicInt) -> SymbolicInt {
        self + &(-rhs)
    }
}

/// Derive the owned and mixed-reference variants of a binary operator from
/// the `&a op &b` implementation, plus the `i64` right-hand side.
macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<SymbolicInt> for SymbolicInt {
            type Output = SymbolicInt;
            fn $method(self, rhs: SymbolicInt) -> SymbolicInt {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&SymbolicInt> for SymbolicInt {
            type Output = SymbolicInt;
            fn $method(self, rhs: &SymbolicInt) -> SymbolicInt {
                (&self).$method(rhs)
            }
        }

        impl $trait<SymbolicInt> for &SymbolicInt {
            type Output = SymbolicInt;
            fn $method(self, rhs: SymbolicInt) -> SymbolicInt {
                self.$method(&rhs)
            }
        }

        impl $trait<i64> for SymbolicInt {
            type Output = SymbolicInt;
            fn $method(self, rhs: i64) -> SymbolicInt {
                (&self).$method(&SymbolicInt::from(rhs))
            }
        }

        impl $trait<i64> for &SymbolicInt {
            type Output = SymbolicInt;
            fn $method(self, rhs: i64) -> SymbolicInt {
                self.$method(&SymbolicInt::from(rhs))
            }
        }

        impl $trait<SymbolicInt> for i64 {
            type Output = SymbolicInt;
            fn $method(self, rhs: SymbolicInt) -> SymbolicInt {
                (&SymbolicInt::from(self)).$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl AddAssign<&SymbolicInt> for SymbolicInt {
    fn add_assign(&mut self, rhs: &SymbolicInt) {
        *self = &*self + rhs;
    }
}

impl AddAssign<SymbolicInt> for SymbolicInt {
    fn add_assign(&mut self, rhs: SymbolicInt) {
        *self = &*self + &rhs;
    }
}

impl MulAssign<&SymbolicInt> for SymbolicInt {
    fn mul_assign(&mut self, rhs: &SymbolicInt) {
        *self = &*self * rhs;
    }
}

impl Sum for SymbolicInt {
    fn sum<I: Iterator<Item = SymbolicInt>>(iter: I) -> Self {
        iter.fold(SymbolicInt::zero(), |acc, x| &acc + &x)
    }
}

impl<'a> Sum<&'a SymbolicInt> for SymbolicInt {
    fn sum<I: Iterator<Item = &'a SymbolicInt>>(iter: I) -> Self {
        iter.fold(SymbolicInt::zero(), |acc, x| &acc + x)
    }
}

/// Renders in the usual computer-algebra style: highest degree first, the
/// constant last, e.g. `n**2 + 3*n - 1`.
impl fmt::Display for SymbolicInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let terms = match self {
            Const(c) => return write!(f, "{c}"),
            Poly(terms) => terms,
        };

        let ordered = terms
            .iter()
            .sorted_by(|(m1, _), (m2, _)| m2.degree().cmp(&m1.degree()).then(m1.cmp(m2)));
        for (i, (m, c)) in ordered.enumerate() {
            let sign = if c.is_negative() { "-" } else { "+" };
            if i == 0 {
                if c.is_negative() {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {sign} ")?;
            }
            let c = c.abs();
            if m.is_one() {
                write!(f, "{c}")?;
            } else if c.is_one() {
                write!(f, "{m}")?;
            } else {
                write!(f, "{c}*{m}")?;
            }
        }
        Ok(())
    }
}

/// Concrete counts serialize as integers, symbolic ones (and integers too
/// wide for an `i64`) as their rendering.
impl Serialize for SymbolicInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_i64() {
            Some(c) => serializer.serialize_i64(c),
            None => serializer.collect_str(self),
        }
    }
}
