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

use num::Rational64;

use crate::bloq::{bloq_ref, Bloq, Callees, DecomposeError};
use crate::gate::Gate;
use crate::phase::Phase;

/// Prepares the phase gradient state on `bitsize` qubits by rotating qubit
/// `i` about Z by `1/2^i` half-turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseGradientUnitary {
    bitsize: usize,
    adjoint: bool,
}

impl PhaseGradientUnitary {
    pub fn new(bitsize: usize) -> Self {
        PhaseGradientUnitary {
            bitsize,
            adjoint: false,
        }
    }

    pub fn adjoint(&self) -> Self {
        PhaseGradientUnitary {
            bitsize: self.bitsize,
            adjoint: !self.adjoint,
        }
    }
}

impl fmt::Display for PhaseGradientUnitary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PhaseGradientUnitary({})", self.bitsize)?;
        if self.adjoint {
            write!(f, "†")?;
        }
        Ok(())
    }
}

impl Bloq for PhaseGradientUnitary {
    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        if self.bitsize >= 63 {
            return Err(DecomposeError::Other {
                bloq: self.to_string(),
                reason: "rotation angles below 1/2^62 are not representable".to_string(),
            });
        }
        let sign = if self.adjoint { -1 } else { 1 };
        Ok((0..self.bitsize)
            .map(|i| {
                let phase = Phase::new(Rational64::new(sign, 1 << i));
                (bloq_ref(Gate::rz(phase)), 1.into())
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::costing::get_cost_value;
    use crate::gate_counts::GateCounts;
    use crate::surface_code::SurfaceCodeGatesCost;

    #[test]
    fn phase_gradient() {
        let key = SurfaceCodeGatesCost::default();
        let expected = GateCounts {
            t: 1.into(),
            rotation: 7.into(),
            single_qubit_clifford: 1.into(),
            ..Default::default()
        };
        let pg = PhaseGradientUnitary::new(10);
        assert_eq!(get_cost_value(&bloq_ref(pg), &key).unwrap(), expected);
        assert_eq!(get_cost_value(&bloq_ref(pg.adjoint()), &key).unwrap(), expected);
    }

    #[test]
    fn too_wide() {
        assert!(PhaseGradientUnitary::new(100).build_call_graph().is_err());
    }
}
