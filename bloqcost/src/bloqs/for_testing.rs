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

use std::fmt;

use crate::bloq::{bloq_ref, Bloq, BloqRef, Callees, DecomposeError};
use crate::gate::Gate;

/// A named bloq whose call graph is given explicitly.
#[derive(Debug, Clone)]
pub struct CostingBloq {
    name: String,
    callees: Callees,
}

impl CostingBloq {
    pub fn new(name: impl Into<String>, callees: Callees) -> Self {
        CostingBloq {
            name: name.into(),
            callees,
        }
    }
}

impl fmt::Display for CostingBloq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Bloq for CostingBloq {
    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        Ok(self.callees.clone())
    }
}

/// A toy algorithm: two calls to a T/Hadamard subroutine and one call to a
/// Toffoli-heavy one.
///
/// Its detailed gate counts are `t: 40, toffoli: 100, hadamard: 20`.
pub fn make_example_costing_bloqs() -> BloqRef {
    let func1 = bloq_ref(CostingBloq::new(
        "Func1",
        vec![
            (bloq_ref(Gate::Hadamard), 10.into()),
            (bloq_ref(Gate::T { adjoint: false }), 10.into()),
            (bloq_ref(Gate::T { adjoint: true }), 10.into()),
        ],
    ));
    let func2 = bloq_ref(CostingBloq::new(
        "Func2",
        vec![(bloq_ref(Gate::Toffoli), 100.into())],
    ));
    bloq_ref(CostingBloq::new(
        "Algo",
        vec![(func1, 2.into()), (func2, 1.into())],
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::costing::get_cost_value;
    use crate::gate_counts::GateCounts;
    use crate::surface_code::SurfaceCodeGatesCost;

    #[test]
    fn example_algorithm() {
        let algo = make_example_costing_bloqs();
        let gc = get_cost_value(&algo, &SurfaceCodeGatesCost::default()).unwrap();
        assert_eq!(
            gc,
            GateCounts {
                toffoli: 100.into(),
                t: (2 * 2 * 10).into(),
                hadamard: (2 * 10).into(),
                ..Default::default()
            }
        );
        assert_eq!(algo.to_string(), "Algo");
    }
}
