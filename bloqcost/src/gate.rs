// bloqcost - gate-count resource estimation for quantum programs
// Copyright (C) 2021 - Aleks Kissinger
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

use std::fmt;

use crate::bloq::{bloq_ref, Bloq, Callees, DecomposeError};
use crate::phase::Angle;
use crate::symbolic::SymbolicInt;

/// The axis of a single-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A single-qubit computational or Hadamard basis element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Basis {
    #[display("0")]
    Zero,
    #[display("1")]
    One,
    #[display("+")]
    Plus,
    #[display("-")]
    Minus,
}

/// Bloqs that only rearrange or (de)allocate wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BookkeepingKind {
    Split,
    Join,
    Partition,
    Allocate,
    Free,
    Cast,
}

/// The atomic gates understood by the leaf classifiers.
///
/// Every gate is itself a [Bloq]. A few composite gates (`CZ`, `SWAP`, `CCZ`)
/// are not leaves of any costing scheme and declare a decomposition into
/// gates that are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gate {
    X,
    Y,
    Z,
    T { adjoint: bool },
    S { adjoint: bool },
    Hadamard,
    CNOT,
    CZ,
    SWAP,
    Toffoli,
    CCZ,
    TwoBitCSwap,
    /// Logical AND of two qubits into a fresh target; `uncompute` is its
    /// measurement-based inverse.
    And { uncompute: bool },
    /// A single control flipping `bitsize` targets.
    MultiTargetCNOT { bitsize: SymbolicInt },
    /// An unspecified Clifford on `n` qubits.
    ArbitraryClifford { n: usize },
    Rotation { axis: Axis, angle: Angle },
    Measure,
    State(Basis),
    Effect(Basis),
    Bookkeeping(BookkeepingKind),
    GlobalPhase,
    Identity,
    /// An opaque gate known only by name.
    Unknown(String),
}

use Gate::*;

impl Gate {
    pub fn rx(angle: impl Into<Angle>) -> Gate {
        Rotation {
            axis: Axis::X,
            angle: angle.into(),
        }
    }

    pub fn ry(angle: impl Into<Angle>) -> Gate {
        Rotation {
            axis: Axis::Y,
            angle: angle.into(),
        }
    }

    pub fn rz(angle: impl Into<Angle>) -> Gate {
        Rotation {
            axis: Axis::Z,
            angle: angle.into(),
        }
    }

    /// Looks up a gate by its OpenQASM name.
    ///
    /// Rotations are created with a zero angle, to be set by the caller.
    pub fn from_qasm_name(s: &str) -> Gate {
        match s {
            "rz" => Gate::rz(0),
            "rx" => Gate::rx(0),
            "ry" => Gate::ry(0),
            "x" => X,
            "y" => Y,
            "z" => Z,
            "s" => S { adjoint: false },
            "t" => T { adjoint: false },
            "sdg" => S { adjoint: true },
            "tdg" => T { adjoint: true },
            "h" => Hadamard,
            "id" => Identity,
            "cx" | "CX" => CNOT,
            "cz" => CZ,
            "ccx" => Toffoli,
            "ccz" => CCZ,
            "swap" => SWAP,
            "cswap" => TwoBitCSwap,
            // n.b. these are pyzx-specific gates
            "init_anc" => State(Basis::Zero),
            "post_sel" => Effect(Basis::Zero),
            _ => Unknown(s.to_string()),
        }
    }

    /// The inverse gate.
    pub fn adjoint(&self) -> Gate {
        match self {
            T { adjoint } => T { adjoint: !adjoint },
            S { adjoint } => S { adjoint: !adjoint },
            And { uncompute } => And {
                uncompute: !uncompute,
            },
            Rotation { axis, angle } => Rotation {
                axis: *axis,
                angle: angle.negated(),
            },
            State(b) => Effect(*b),
            Effect(b) => State(*b),
            Bookkeeping(BookkeepingKind::Split) => Bookkeeping(BookkeepingKind::Join),
            Bookkeeping(BookkeepingKind::Join) => Bookkeeping(BookkeepingKind::Split),
            Bookkeeping(BookkeepingKind::Allocate) => Bookkeeping(BookkeepingKind::Free),
            Bookkeeping(BookkeepingKind::Free) => Bookkeeping(BookkeepingKind::Allocate),
            g => g.clone(), // everything else is self-adjoint
        }
    }

    fn push_ccz_decomp(callees: &mut Callees) {
        callees.push((bloq_ref(CNOT), 6.into()));
        callees.push((bloq_ref(T { adjoint: false }), 4.into()));
        callees.push((bloq_ref(T { adjoint: true }), 3.into()));
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            X => write!(f, "XGate"),
            Y => write!(f, "YGate"),
            Z => write!(f, "ZGate"),
            T { adjoint: false } => write!(f, "TGate"),
            T { adjoint: true } => write!(f, "TGate†"),
            S { adjoint: false } => write!(f, "SGate"),
            S { adjoint: true } => write!(f, "SGate†"),
            Hadamard => write!(f, "Hadamard"),
            CNOT => write!(f, "CNOT"),
            CZ => write!(f, "CZ"),
            SWAP => write!(f, "SWAP"),
            Toffoli => write!(f, "Toffoli"),
            CCZ => write!(f, "CCZ"),
            TwoBitCSwap => write!(f, "TwoBitCSwap"),
            And { uncompute: false } => write!(f, "And"),
            And { uncompute: true } => write!(f, "And†"),
            MultiTargetCNOT { bitsize } => write!(f, "MultiTargetCNOT({bitsize})"),
            ArbitraryClifford { n } => write!(f, "ArbitraryClifford(n={n})"),
            Rotation { axis, angle } => write!(f, "R{}({angle})", axis.to_string().to_lowercase()),
            Measure => write!(f, "Measure"),
            State(b) => write!(f, "|{b}>"),
            Effect(b) => write!(f, "<{b}|"),
            Bookkeeping(b) => write!(f, "{b}"),
            GlobalPhase => write!(f, "GlobalPhase"),
            Identity => write!(f, "Identity"),
            Unknown(name) => write!(f, "{name}"),
        }
    }
}

impl Bloq for Gate {
    fn gate(&self) -> Option<&Gate> {
        Some(self)
    }

    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        let mut callees = Callees::new();
        match self {
            CZ => {
                callees.push((bloq_ref(Hadamard), 2.into()));
                callees.push((bloq_ref(CNOT), 1.into()));
            }
            SWAP => {
                callees.push((bloq_ref(CNOT), 3.into()));
            }
            CCZ => {
                Gate::push_ccz_decomp(&mut callees);
            }
            Unknown(name) => return Err(DecomposeError::NotImplemented(name.clone())),
            g => return Err(DecomposeError::Atomic(g.to_string())),
        }
        Ok(callees)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("t", T { adjoint: false })]
    #[case("sdg", S { adjoint: true })]
    #[case("cx", CNOT)]
    #[case("ccx", Toffoli)]
    #[case("init_anc", State(Basis::Zero))]
    #[case("foo", Unknown("foo".into()))]
    fn qasm_names(#[case] name: &str, #[case] g: Gate) {
        assert_eq!(Gate::from_qasm_name(name), g);
    }

    #[test]
    fn adjoints() {
        assert_eq!(T { adjoint: false }.adjoint(), T { adjoint: true });
        assert_eq!(And { uncompute: false }.adjoint(), And { uncompute: true });
        assert_eq!(Gate::rz((1, 4)).adjoint(), Gate::rz((-1, 4)));
        assert_eq!(Hadamard.adjoint(), Hadamard);
    }

    #[test]
    fn display() {
        assert_eq!(T { adjoint: true }.to_string(), "TGate†");
        assert_eq!(Gate::rz((1, 4)).to_string(), "Rz(1/4)");
        assert_eq!(
            MultiTargetCNOT {
                bitsize: 12.into()
            }
            .to_string(),
            "MultiTargetCNOT(12)"
        );
    }

    #[test]
    fn ccz_decomposition() {
        let callees = CCZ.build_call_graph().unwrap();
        let total: SymbolicInt = callees.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 13);
        assert!(matches!(
            Toffoli.build_call_graph(),
            Err(DecomposeError::Atomic(_))
        ));
    }
}
