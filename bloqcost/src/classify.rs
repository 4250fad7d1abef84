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

//! Structural predicates on gates, shared by the costing schemes.
//!
//! Predicates only look at a gate's kind and attributes. Rotations with a
//! symbolic angle are never Pauli, Clifford or T-like.

use crate::gate::{Axis, Gate};

/// A single-qubit Pauli or a rotation by a whole number of half-turns.
pub fn bloq_is_pauli(g: &Gate) -> bool {
    match g {
        Gate::X | Gate::Y | Gate::Z => true,
        Gate::Rotation { angle, .. } => angle.exact().is_some_and(|p| p.is_pauli()),
        _ => false,
    }
}

/// A T gate, its adjoint, or a Z rotation by a quarter half-turn.
pub fn bloq_is_t_like(g: &Gate) -> bool {
    match g {
        Gate::T { .. } => true,
        Gate::Rotation {
            axis: Axis::Z,
            angle,
        } => angle.exact().is_some_and(|p| p.is_t()),
        _ => false,
    }
}

/// A single-qubit Clifford that is not a Pauli: an arbitrary one-qubit
/// Clifford, or a rotation by exactly ±1/2.
pub fn bloq_is_clifford_1q(g: &Gate) -> bool {
    match g {
        Gate::ArbitraryClifford { n: 1 } => true,
        Gate::Rotation { angle, .. } => angle.exact().is_some_and(|p| p.is_proper_clifford()),
        _ => false,
    }
}

pub fn bloq_is_rotation(g: &Gate) -> bool {
    matches!(g, Gate::Rotation { .. })
}

pub fn bloq_is_state_or_effect(g: &Gate) -> bool {
    matches!(g, Gate::State(_) | Gate::Effect(_))
}

/// Wire rearrangements, allocations and gates with no effect on the state.
pub fn bloq_is_bookkeeping(g: &Gate) -> bool {
    matches!(g, Gate::Bookkeeping(_) | Gate::GlobalPhase | Gate::Identity)
}
