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

pub mod symbolic;
pub mod phase;
pub mod gate;
pub mod bloq;
pub mod gate_counts;
pub mod classify;
pub mod costing;
pub mod surface_code;
pub mod registry;
pub mod circuit;
pub mod bloqs;

pub use bloq::{bloq_ref, Bloq, BloqRef};
pub use costing::{get_cost_value, CostError, CostKey, CostValue};
pub use gate_counts::GateCounts;
pub use surface_code::SurfaceCodeGatesCost;
pub use symbolic::SymbolicInt;
