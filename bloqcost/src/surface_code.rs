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

//! Detailed gate counts for a surface code compilation.
//!
//! Leaves are recognized by an ordered list of rules, and the first rule that
//! applies decides the cost. The order matters where rules overlap:
//!
//! - a rotation by a whole number of half-turns is a Pauli, and costs nothing,
//!   before it could count as a rotation;
//! - a Z rotation by ±1/4 is T-like, ahead of the generic rotation rule;
//! - a rotation by ±1/2 is a single-qubit Clifford, also ahead of the generic
//!   rotation rule;
//! - any other rotation, including one with a symbolic angle, is a rotation.

use std::fmt;

use crate::bloq::Bloq;
use crate::classify::{
    bloq_is_bookkeeping, bloq_is_clifford_1q, bloq_is_pauli, bloq_is_rotation,
    bloq_is_state_or_effect, bloq_is_t_like,
};
use crate::costing::CostKey;
use crate::gate::Gate;
use crate::gate_counts::GateCounts;

/// How the measurement-based uncomputation of an `And` is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AndUncompute {
    /// One measured qubit.
    #[default]
    Measurement,
    /// The same as computing an `And`.
    AndGate,
}

/// One leaf rule: the cost of the gates it recognizes, `None` otherwise.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    cost: fn(&SurfaceCodeGatesCost, &Gate) -> Option<GateCounts>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rule({})", self.name)
    }
}

macro_rules! counts {
    ($($field:ident : $v:expr),* $(,)?) => {
        GateCounts { $($field: $v.into(),)* ..GateCounts::default() }
    };
}

fn when(cond: bool, gc: impl FnOnce() -> GateCounts) -> Option<GateCounts> {
    cond.then(gc)
}

const RULES: &[Rule] = &[
    Rule {
        name: "pauli",
        cost: |_, g| when(bloq_is_pauli(g), GateCounts::default),
    },
    Rule {
        name: "t",
        cost: |_, g| when(bloq_is_t_like(g), || counts!(t: 1)),
    },
    Rule {
        name: "hadamard",
        cost: |_, g| when(matches!(g, Gate::Hadamard), || counts!(hadamard: 1)),
    },
    Rule {
        name: "s_gate",
        cost: |_, g| when(matches!(g, Gate::S { .. }), || counts!(s_gate: 1)),
    },
    Rule {
        name: "toffoli",
        cost: |_, g| when(matches!(g, Gate::Toffoli), || counts!(toffoli: 1)),
    },
    Rule {
        name: "measurement",
        cost: |_, g| {
            when(matches!(g, Gate::Measure), || {
                counts!(measurement_total_qubits: 1)
            })
        },
    },
    Rule {
        name: "cnot",
        cost: |_, g| when(matches!(g, Gate::CNOT), || counts!(cnot: 1)),
    },
    Rule {
        name: "and",
        cost: |key, g| match g {
            Gate::And { uncompute: true } if key.and_uncompute == AndUncompute::Measurement => {
                Some(counts!(measurement_total_qubits: 1))
            }
            Gate::And { .. } => Some(counts!(and_gate: 1)),
            _ => None,
        },
    },
    Rule {
        name: "cswap",
        cost: |_, g| when(matches!(g, Gate::TwoBitCSwap), || counts!(cswap: 1)),
    },
    Rule {
        name: "multi_target_pauli",
        cost: |_, g| match g {
            Gate::MultiTargetCNOT { bitsize } => Some(counts!(
                multi_target_pauli_count: 1,
                multi_target_pauli_total_targets: bitsize,
            )),
            _ => None,
        },
    },
    Rule {
        name: "single_qubit_clifford",
        cost: |_, g| {
            when(bloq_is_clifford_1q(g), || {
                counts!(single_qubit_clifford: 1)
            })
        },
    },
    Rule {
        name: "two_qubit_clifford",
        cost: |_, g| {
            when(matches!(g, Gate::ArbitraryClifford { n: 2 }), || {
                counts!(two_qubit_clifford: 2)
            })
        },
    },
    Rule {
        name: "state_or_effect",
        cost: |_, g| when(bloq_is_state_or_effect(g), GateCounts::default),
    },
    Rule {
        name: "bookkeeping",
        cost: |_, g| when(bloq_is_bookkeeping(g), GateCounts::default),
    },
    Rule {
        name: "rotation",
        cost: |_, g| when(bloq_is_rotation(g), || counts!(rotation: 1)),
    },
];

/// Counts the gates in a surface code error correction scheme in detail.
///
/// The cost value type for this scheme is [GateCounts].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceCodeGatesCost {
    and_uncompute: AndUncompute,
}

impl SurfaceCodeGatesCost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_and_uncompute(mut self, policy: AndUncompute) -> Self {
        self.and_uncompute = policy;
        self
    }

    pub fn and_uncompute(&self) -> AndUncompute {
        self.and_uncompute
    }

    /// The leaf rules, in the order they are tried.
    pub fn rules() -> &'static [Rule] {
        RULES
    }

    pub fn rule_names() -> impl Iterator<Item = &'static str> {
        Self::rules().iter().map(|r| r.name)
    }

    /// The cost of a gate, and the name of the rule that recognized it.
    pub fn classify_gate(&self, g: &Gate) -> Option<(&'static str, GateCounts)> {
        Self::rules()
            .iter()
            .find_map(|r| (r.cost)(self, g).map(|gc| (r.name, gc)))
    }
}

impl fmt::Display for SurfaceCodeGatesCost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "detailed gate counts")
    }
}

impl CostKey for SurfaceCodeGatesCost {
    type Value = GateCounts;

    fn classify(&self, bloq: &dyn Bloq) -> Option<GateCounts> {
        let (_, gc) = self.classify_gate(bloq.gate()?)?;
        Some(gc)
    }
}
