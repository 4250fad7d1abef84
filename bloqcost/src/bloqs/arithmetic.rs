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

//! Ripple-carry addition, costed after Gidney's construction
//! (arXiv:1709.06648), with sizes that may be symbolic.

use std::fmt;

use num::{One, Signed};

use crate::bloq::{bloq_ref, Bloq, Callees, DecomposeError};
use crate::gate::Gate;
use crate::symbolic::SymbolicInt;

/// In-place addition `|a>|b> -> |a>|a + b>` of two `bitsize`-bit registers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Add {
    bitsize: SymbolicInt,
}

impl Add {
    pub fn new(bitsize: impl Into<SymbolicInt>) -> Self {
        Add {
            bitsize: bitsize.into(),
        }
    }

    pub fn bitsize(&self) -> &SymbolicInt {
        &self.bitsize
    }
}

impl fmt::Display for Add {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Add({})", self.bitsize)
    }
}

impl Bloq for Add {
    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        match self.bitsize.as_const() {
            Some(n) if n.is_one() => return Ok(vec![(bloq_ref(Gate::CNOT), 1.into())]),
            Some(n) if !n.is_positive() => {
                return Err(DecomposeError::Other {
                    bloq: self.to_string(),
                    reason: format!("bitsize must be positive, got {n}"),
                })
            }
            _ => {}
        }
        let n = &self.bitsize;
        let n_and = n - 1;
        let n_cnot = (n - 2) * 6 + 3;
        Ok(vec![
            (bloq_ref(Gate::And { uncompute: false }), n_and.clone()),
            (bloq_ref(Gate::And { uncompute: true }), n_and),
            (bloq_ref(Gate::CNOT), n_cnot),
        ])
    }
}

/// Addition of a classical constant `k` into a `bitsize`-bit register,
/// optionally controlled by one qubit.
///
/// The constant is loaded into a scratch register with one X (or CNOT, when
/// controlled) per bit, which is an upper bound independent of `k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddK {
    bitsize: SymbolicInt,
    k: i64,
    controls: usize,
}

impl AddK {
    pub fn new(bitsize: impl Into<SymbolicInt>, k: i64) -> Self {
        AddK {
            bitsize: bitsize.into(),
            k,
            controls: 0,
        }
    }

    pub fn controlled(mut self) -> Self {
        self.controls += 1;
        self
    }
}

impl fmt::Display for AddK {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.controls > 0 {
            write!(f, "C{}", "C".repeat(self.controls - 1))?;
        }
        write!(f, "AddK({}, k={})", self.bitsize, self.k)
    }
}

impl Bloq for AddK {
    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        let load = match self.controls {
            0 => Gate::X,
            1 => Gate::CNOT,
            _ => return Err(DecomposeError::NotImplemented(self.to_string())),
        };
        Ok(vec![
            (bloq_ref(load), self.bitsize.clone()),
            (bloq_ref(Add::new(self.bitsize.clone())), 1.into()),
        ])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::costing::get_cost_value;
    use crate::surface_code::SurfaceCodeGatesCost;

    fn n() -> SymbolicInt {
        SymbolicInt::symbol("n")
    }

    #[test]
    fn symbolic_add() {
        let key = SurfaceCodeGatesCost::default();
        let gc = get_cost_value(&bloq_ref(Add::new(n())), &key).unwrap();
        assert_eq!(
            gc.to_string(),
            "and_gate: n - 1, cnot: 6*n - 9, measurement_total_qubits: n - 1"
        );

        let concrete = get_cost_value(&bloq_ref(Add::new(8)), &key).unwrap();
        assert_eq!(gc.subs("n", 8), concrete);
        assert_eq!(concrete.cnot, 39);
    }

    #[test]
    fn one_bit_add() {
        let gc = get_cost_value(&bloq_ref(Add::new(1)), &SurfaceCodeGatesCost::default())
            .unwrap();
        assert_eq!(gc.to_string(), "cnot: 1");
        assert!(Add::new(0).build_call_graph().is_err());
    }

    #[test]
    fn add_k() {
        let key = SurfaceCodeGatesCost::default();
        let gc = get_cost_value(&bloq_ref(AddK::new(n(), 5)), &key).unwrap();
        let add = get_cost_value(&bloq_ref(Add::new(n())), &key).unwrap();
        // X gates are Paulis, and free
        assert_eq!(gc, add);

        let gc = get_cost_value(&bloq_ref(AddK::new(n(), 5).controlled()), &key).unwrap();
        assert_eq!(gc.cnot, SymbolicInt::from(7) * n() - 9);
        assert_eq!(AddK::new(4, 5).controlled().to_string(), "CAddK(4, k=5)");

        let err = get_cost_value(&bloq_ref(AddK::new(4, 5).controlled().controlled()), &key);
        assert!(err.is_err());
        assert_eq!(gc.subs("n", 4).and_gate, 3);
    }
}
