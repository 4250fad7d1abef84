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

//! A small library of composite bloqs with declared call graphs.

pub mod arithmetic;
pub mod for_testing;
pub mod mcmt;
pub mod rotations;

pub use arithmetic::{Add, AddK};
pub use for_testing::{make_example_costing_bloqs, CostingBloq};
pub use mcmt::{MultiAnd, MultiControlX};
pub use rotations::PhaseGradientUnitary;
