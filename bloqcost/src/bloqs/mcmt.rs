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

//! Multi-controlled gates built from `And` ladders.

use std::fmt;

use crate::bloq::{bloq_ref, Bloq, Callees, DecomposeError};
use crate::circuit::Circuit;
use crate::gate::Gate;

/// The AND of `n` controls, computed into a ladder of `n - 1` ancillas; the
/// last ancilla holds the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MultiAnd {
    n: usize,
    adjoint: bool,
}

impl MultiAnd {
    pub fn new(n: usize) -> Self {
        MultiAnd { n, adjoint: false }
    }

    pub fn num_controls(&self) -> usize {
        self.n
    }

    pub fn adjoint(&self) -> Self {
        MultiAnd {
            n: self.n,
            adjoint: !self.adjoint,
        }
    }

    fn check(&self) -> Result<(), DecomposeError> {
        if self.n < 2 {
            Err(DecomposeError::Other {
                bloq: self.to_string(),
                reason: "at least two controls are needed".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// The ladder as a circuit, with controls on qubits `0..n` and ancillas
    /// on `n..2n-1`.
    pub fn decompose_bloq(&self) -> Result<Circuit, DecomposeError> {
        self.check()?;
        let n = self.n;
        let mut c = Circuit::new(2 * n - 1).with_name(self.to_string());
        c.push(Gate::And { uncompute: false }, vec![0, 1, n]);
        for i in 2..n {
            c.push(Gate::And { uncompute: false }, vec![n + i - 2, i, n + i - 1]);
        }
        if self.adjoint {
            c.adjoint();
        }
        Ok(c)
    }
}

impl fmt::Display for MultiAnd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MultiAnd(n={})", self.n)?;
        if self.adjoint {
            write!(f, "†")?;
        }
        Ok(())
    }
}

impl Bloq for MultiAnd {
    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        self.check()?;
        Ok(vec![(
            bloq_ref(Gate::And {
                uncompute: self.adjoint,
            }),
            (self.n - 1).into(),
        )])
    }
}

/// An X gate on one target, controlled on `n` qubits all being one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MultiControlX {
    n: usize,
}

impl MultiControlX {
    pub fn new(n: usize) -> Self {
        MultiControlX { n }
    }
}

impl fmt::Display for MultiControlX {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MultiControlX(n={})", self.n)
    }
}

impl Bloq for MultiControlX {
    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        Ok(match self.n {
            0 => vec![(bloq_ref(Gate::X), 1.into())],
            1 => vec![(bloq_ref(Gate::CNOT), 1.into())],
            n => {
                let and = MultiAnd::new(n);
                vec![
                    (bloq_ref(and), 1.into()),
                    (bloq_ref(Gate::CNOT), 1.into()),
                    (bloq_ref(and.adjoint()), 1.into()),
                ]
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::costing::get_cost_value;
    use crate::gate_counts::GateCounts;
    use crate::surface_code::SurfaceCodeGatesCost;
    use rstest::rstest;

    #[rstest]
    #[case(2)]
    #[case(5)]
    #[case(9)]
    fn multi_and_matches_decomposition(#[case] n: usize) {
        let key = SurfaceCodeGatesCost::default();
        for bloq in [MultiAnd::new(n), MultiAnd::new(n).adjoint()] {
            let direct = get_cost_value(&bloq_ref(bloq), &key).unwrap();
            let circ = bloq.decompose_bloq().unwrap();
            assert_eq!(circ.num_gates(), n - 1);
            let decomposed = get_cost_value(&bloq_ref(circ), &key).unwrap();
            assert_eq!(direct, decomposed);
        }
    }

    #[test]
    fn multi_and_too_small() {
        assert!(matches!(
            MultiAnd::new(1).build_call_graph(),
            Err(DecomposeError::Other { .. })
        ));
    }

    #[test]
    fn multi_control_x() {
        let gc = get_cost_value(
            &bloq_ref(MultiControlX::new(3)),
            &SurfaceCodeGatesCost::default(),
        )
        .unwrap();
        assert_eq!(
            gc,
            GateCounts {
                and_gate: 2.into(),
                measurement_total_qubits: 2.into(),
                cnot: 1.into(),
                ..Default::default()
            }
        );
    }

    #[rstest]
    #[case(0, "-")]
    #[case(1, "cnot: 1")]
    fn small_multi_control_x(#[case] n: usize, #[case] expected: &str) {
        let gc = get_cost_value(
            &bloq_ref(MultiControlX::new(n)),
            &SurfaceCodeGatesCost::default(),
        )
        .unwrap();
        assert_eq!(gc.to_string(), expected);
    }
}
