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

use std::fmt;
use std::ops::{Add, AddAssign, Mul};

use itertools::Itertools;
use num::Zero;
use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::bloq::{BloqId, BloqRef};
use crate::costing::CostValue;
use crate::symbolic::SymbolicInt;

/// Bloqs that could be neither classified nor decomposed, with the number of
/// times each was reached.
///
/// Keyed by bloq identity: two separately built bloqs with the same name are
/// kept apart. Entries never hold a zero count.
#[derive(Clone, Default)]
pub struct UnrecognizedBloqs(FxHashMap<BloqId, (BloqRef, SymbolicInt)>);

impl UnrecognizedBloqs {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The count recorded for `bloq`, if any.
    pub fn get(&self, bloq: &BloqRef) -> Option<&SymbolicInt> {
        self.0.get(&BloqId::of(bloq)).map(|(_, n)| n)
    }

    /// Entries ordered by bloq name, then identity, for stable output.
    pub fn iter(&self) -> impl Iterator<Item = (&BloqRef, &SymbolicInt)> + '_ {
        self.0
            .iter()
            .map(|(id, (b, n))| (b.to_string(), *id, b, n))
            .sorted_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)))
            .map(|(_, _, b, n)| (b, n))
    }

    fn add_count(&mut self, bloq: &BloqRef, n: &SymbolicInt) {
        let id = BloqId::of(bloq);
        let count = match self.0.get(&id) {
            Some((_, m)) => m + n,
            None => n.clone(),
        };
        if count.is_zero() {
            self.0.remove(&id);
        } else {
            self.0.insert(id, (bloq.clone(), count));
        }
    }

    fn scaled(&self, k: &SymbolicInt) -> Self {
        UnrecognizedBloqs(
            self.0
                .iter()
                .map(|(id, (b, n))| (*id, (b.clone(), k * n)))
                .filter(|(_, (_, n))| !n.is_zero())
                .collect(),
        )
    }
}

impl PartialEq for UnrecognizedBloqs {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|(id, (_, n))| other.0.get(id).is_some_and(|(_, m)| m == n))
    }
}

impl fmt::Debug for UnrecognizedBloqs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(b, n)| (b.to_string(), n)))
            .finish()
    }
}

/// Counts of the typical target gates of a surface code compilation.
///
/// Specifically, this holds counts for T gates (and adjoints), Toffolis,
/// controlled swaps, And gates, single-qubit rotations, the Clifford gates by
/// family, multi-target Paulis, and measured qubits. Counts may be symbolic.
/// Values are combined with `+` and scaled with `*`; nothing is mutated in
/// place after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateCounts {
    pub t: SymbolicInt,
    pub toffoli: SymbolicInt,
    pub cswap: SymbolicInt,
    pub and_gate: SymbolicInt,
    pub rotation: SymbolicInt,
    pub hadamard: SymbolicInt,
    pub s_gate: SymbolicInt,
    pub cnot: SymbolicInt,
    pub single_qubit_clifford: SymbolicInt,
    pub two_qubit_clifford: SymbolicInt,
    pub multi_target_pauli_count: SymbolicInt,
    pub multi_target_pauli_total_targets: SymbolicInt,
    pub measurement_total_qubits: SymbolicInt,
    pub unrecognized: UnrecognizedBloqs,
}

impl GateCounts {
    /// The counts for a single occurrence of a bloq that could be neither
    /// classified nor decomposed.
    pub fn unrecognized(bloq: &BloqRef) -> Self {
        let mut counts = GateCounts::default();
        counts.unrecognized.add_count(bloq, &SymbolicInt::from(1));
        counts
    }

    /// All counters, in declaration order.
    pub fn fields(&self) -> [(&'static str, &SymbolicInt); 13] {
        [
            ("t", &self.t),
            ("toffoli", &self.toffoli),
            ("cswap", &self.cswap),
            ("and_gate", &self.and_gate),
            ("rotation", &self.rotation),
            ("hadamard", &self.hadamard),
            ("s_gate", &self.s_gate),
            ("cnot", &self.cnot),
            ("single_qubit_clifford", &self.single_qubit_clifford),
            ("two_qubit_clifford", &self.two_qubit_clifford),
            ("multi_target_pauli_count", &self.multi_target_pauli_count),
            (
                "multi_target_pauli_total_targets",
                &self.multi_target_pauli_total_targets,
            ),
            ("measurement_total_qubits", &self.measurement_total_qubits),
        ]
    }

    /// The non-zero counters, in declaration order.
    pub fn asdict(&self) -> Vec<(&'static str, SymbolicInt)> {
        self.fields()
            .into_iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }

    /// Applies `f` to every counter; unrecognized bloqs are left untouched.
    fn map_fields(&self, f: impl Fn(&SymbolicInt) -> SymbolicInt) -> GateCounts {
        GateCounts {
            t: f(&self.t),
            toffoli: f(&self.toffoli),
            cswap: f(&self.cswap),
            and_gate: f(&self.and_gate),
            rotation: f(&self.rotation),
            hadamard: f(&self.hadamard),
            s_gate: f(&self.s_gate),
            cnot: f(&self.cnot),
            single_qubit_clifford: f(&self.single_qubit_clifford),
            two_qubit_clifford: f(&self.two_qubit_clifford),
            multi_target_pauli_count: f(&self.multi_target_pauli_count),
            multi_target_pauli_total_targets: f(&self.multi_target_pauli_total_targets),
            measurement_total_qubits: f(&self.measurement_total_qubits),
            unrecognized: self.unrecognized.clone(),
        }
    }

    /// Multiplies every counter and every unrecognized multiplicity by `k`.
    ///
    /// `k` counts occurrences and must not be negative. Symbolic scalars are
    /// assumed to be non-negative; a negative constant panics in debug builds.
    pub fn scale(&self, k: &SymbolicInt) -> GateCounts {
        debug_assert!(!k.is_negative(), "cannot scale gate counts by {k}");
        let mut counts = self.map_fields(|v| k * v);
        counts.unrecognized = self.unrecognized.scaled(k);
        counts
    }

    /// Substitutes values for symbols in every count.
    pub fn subs_all(&self, values: &FxHashMap<String, SymbolicInt>) -> GateCounts {
        let mut counts = self.map_fields(|v| v.subs_all(values));
        counts.unrecognized = UnrecognizedBloqs(
            self.unrecognized
                .0
                .iter()
                .map(|(id, (b, n))| (*id, (b.clone(), n.subs_all(values))))
                .filter(|(_, (_, n))| !n.is_zero())
                .collect(),
        );
        counts
    }

    /// Substitutes a value for a single symbol in every count.
    pub fn subs(&self, symbol: &str, value: impl Into<SymbolicInt>) -> GateCounts {
        let mut values = FxHashMap::default();
        values.insert(symbol.to_string(), value.into());
        self.subs_all(&values)
    }

    /// Total number of Clifford gates, over all Clifford families.
    pub fn total_clifford(&self) -> SymbolicInt {
        [
            &self.hadamard,
            &self.s_gate,
            &self.cnot,
            &self.single_qubit_clifford,
            &self.two_qubit_clifford,
        ]
        .into_iter()
        .sum()
    }

    /// Lattice surgery spacetime volume of the non-Clifford part of the
    /// computation, given the volume of each kind of non-Clifford gate.
    pub fn lattice_surgery_spacetime_volume(&self, volumes: &SpacetimeVolumes) -> SymbolicInt {
        [
            (&self.t, &volumes.t),
            (&self.toffoli, &volumes.toffoli),
            (&self.cswap, &volumes.cswap),
            (&self.and_gate, &volumes.and_gate),
            (&self.rotation, &volumes.rotation),
        ]
        .into_iter()
        .map(|(n, v)| n * v)
        .sum()
    }
}

/// Spacetime volume of each non-Clifford gate. Defaults to free symbols
/// `volume_per_t`, `volume_per_toffoli`, etc.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacetimeVolumes {
    pub t: SymbolicInt,
    pub toffoli: SymbolicInt,
    pub cswap: SymbolicInt,
    pub and_gate: SymbolicInt,
    pub rotation: SymbolicInt,
}

impl Default for SpacetimeVolumes {
    fn default() -> Self {
        SpacetimeVolumes {
            t: SymbolicInt::symbol("volume_per_t"),
            toffoli: SymbolicInt::symbol("volume_per_toffoli"),
            cswap: SymbolicInt::symbol("volume_per_cswap"),
            and_gate: SymbolicInt::symbol("volume_per_and_gate"),
            rotation: SymbolicInt::symbol("volume_per_rotation"),
        }
    }
}

impl Add<&GateCounts> for &GateCounts {
    type Output = GateCounts;

    fn add(self, rhs: &GateCounts) -> GateCounts {
        let r = rhs.fields();
        let l = self.fields();
        let sum = |i: usize| l[i].1 + r[i].1;
        let mut unrecognized = self.unrecognized.clone();
        for (b, n) in rhs.unrecognized.0.values() {
            unrecognized.add_count(b, n);
        }
        GateCounts {
            t: sum(0),
            toffoli: sum(1),
            cswap: sum(2),
            and_gate: sum(3),
            rotation: sum(4),
            hadamard: sum(5),
            s_gate: sum(6),
            cnot: sum(7),
            single_qubit_clifford: sum(8),
            two_qubit_clifford: sum(9),
            multi_target_pauli_count: sum(10),
            multi_target_pauli_total_targets: sum(11),
            measurement_total_qubits: sum(12),
            unrecognized,
        }
    }
}

impl Add<GateCounts> for GateCounts {
    type Output = GateCounts;
    fn add(self, rhs: GateCounts) -> GateCounts {
        &self + &rhs
    }
}

impl Add<&GateCounts> for GateCounts {
    type Output = GateCounts;
    fn add(self, rhs: &GateCounts) -> GateCounts {
        &self + rhs
    }
}

impl AddAssign<&GateCounts> for GateCounts {
    fn add_assign(&mut self, rhs: &GateCounts) {
        *self = &*self + rhs;
    }
}

impl AddAssign<GateCounts> for GateCounts {
    fn add_assign(&mut self, rhs: GateCounts) {
        *self = &*self + &rhs;
    }
}

impl Mul<&SymbolicInt> for &GateCounts {
    type Output = GateCounts;
    fn mul(self, k: &SymbolicInt) -> GateCounts {
        self.scale(k)
    }
}

impl Mul<SymbolicInt> for GateCounts {
    type Output = GateCounts;
    fn mul(self, k: SymbolicInt) -> GateCounts {
        self.scale(&k)
    }
}

impl Mul<GateCounts> for SymbolicInt {
    type Output = GateCounts;
    fn mul(self, v: GateCounts) -> GateCounts {
        v.scale(&self)
    }
}

impl Mul<i64> for GateCounts {
    type Output = GateCounts;
    fn mul(self, k: i64) -> GateCounts {
        self.scale(&k.into())
    }
}

impl Mul<GateCounts> for i64 {
    type Output = GateCounts;
    fn mul(self, v: GateCounts) -> GateCounts {
        v.scale(&self.into())
    }
}

impl Mul<i32> for GateCounts {
    type Output = GateCounts;
    fn mul(self, k: i32) -> GateCounts {
        self.scale(&k.into())
    }
}

impl Mul<GateCounts> for i32 {
    type Output = GateCounts;
    fn mul(self, v: GateCounts) -> GateCounts {
        v.scale(&self.into())
    }
}

impl Zero for GateCounts {
    fn zero() -> Self {
        GateCounts::default()
    }

    fn is_zero(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_zero()) && self.unrecognized.is_empty()
    }
}

impl CostValue for GateCounts {
    fn scaled(&self, k: &SymbolicInt) -> Self {
        self.scale(k)
    }

    fn unrecognized(bloq: &BloqRef) -> Self {
        GateCounts::unrecognized(bloq)
    }
}

/// Lists the non-zero counts as `name: value`, then the unrecognized bloqs,
/// or `-` if there is nothing to list.
impl fmt::Display for GateCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let strs: Vec<String> = self
            .asdict()
            .into_iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .chain(self.unrecognized.iter().map(|(b, n)| format!("{b}: {n}")))
            .collect();
        if strs.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", strs.join(", "))
        }
    }
}

impl Serialize for GateCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let counts = self.asdict();
        let extra = usize::from(!self.unrecognized.is_empty());
        let mut map = serializer.serialize_map(Some(counts.len() + extra))?;
        for (k, v) in &counts {
            map.serialize_entry(k, v)?;
        }
        if !self.unrecognized.is_empty() {
            let mut by_name: Vec<(String, SymbolicInt)> = vec![];
            for (b, n) in self.unrecognized.iter() {
                let name = b.to_string();
                match by_name.last_mut() {
                    Some((last, m)) if *last == name => *m += n,
                    _ => by_name.push((name, n.clone())),
                }
            }
            map.serialize_entry("unrecognized", &SerializeEntries(&by_name))?;
        }
        map.end()
    }
}

struct SerializeEntries<'a>(&'a [(String, SymbolicInt)]);

impl Serialize for SerializeEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bloq::bloq_ref;
    use crate::gate::Gate;
    use serde_json::json;

    fn n() -> SymbolicInt {
        SymbolicInt::symbol("n")
    }

    #[test]
    fn detailed_gate_counts() {
        let gc = GateCounts {
            t: 100.into(),
            toffoli: 13.into(),
            ..Default::default()
        };
        assert_eq!(gc.to_string(), "t: 100, toffoli: 13");
        assert_eq!(
            gc.asdict(),
            vec![("t", SymbolicInt::from(100)), ("toffoli", 13.into())]
        );

        let t10 = GateCounts {
            t: 10.into(),
            ..Default::default()
        };
        let t20 = GateCounts {
            t: 20.into(),
            ..Default::default()
        };
        assert_eq!(t10.clone() * 2, t20);
        assert_eq!(2 * t10, t20);
    }

    #[test]
    fn symbolic_zero_is_omitted() {
        let gc = GateCounts {
            t: n(),
            toffoli: n() - n(),
            cswap: 2.into(),
            ..Default::default()
        };
        assert_eq!(gc.to_string(), "t: n, cswap: 2");
    }

    #[test]
    fn empty_renders_dash() {
        assert_eq!(GateCounts::zero().to_string(), "-");
        assert!(GateCounts::zero().is_zero());
    }

    #[test]
    fn zero_is_identity() {
        let gc = GateCounts {
            t: 100.into(),
            toffoli: 13.into(),
            ..Default::default()
        };
        assert_eq!(&gc + &GateCounts::zero(), gc);
        assert_eq!(&GateCounts::zero() + &gc, gc);
    }

    #[test]
    fn unrecognized_merge_by_identity() {
        let oracle = bloq_ref(Gate::Unknown("Oracle".into()));
        let other = bloq_ref(Gate::Unknown("Oracle".into()));

        let once = GateCounts::unrecognized(&oracle);
        let twice = &once + &once;
        assert_eq!(twice.unrecognized.get(&oracle), Some(&SymbolicInt::from(2)));
        assert_eq!(twice.to_string(), "Oracle: 2");

        let both = &once + &GateCounts::unrecognized(&other);
        assert_eq!(both.unrecognized.len(), 2);
        assert_ne!(both, twice);

        assert!(once.scale(&0.into()).is_zero());
        assert_eq!(once.scale(&0.into()), GateCounts::zero());
    }

    #[test]
    fn unrecognized_listed_after_counts() {
        let oracle = bloq_ref(Gate::Unknown("Oracle".into()));
        let gc = GateCounts {
            hadamard: 3.into(),
            ..GateCounts::unrecognized(&oracle)
        };
        assert_eq!(gc.to_string(), "hadamard: 3, Oracle: 1");
    }

    #[test]
    fn symbolic_scaling() {
        let gc = GateCounts {
            t: 4.into(),
            cnot: n(),
            ..Default::default()
        };
        let scaled = gc.scale(&(n() + 1));
        assert_eq!(scaled.t, n() * 4 + 4);
        assert_eq!(scaled.cnot, n() * n() + n());
        assert_eq!(scaled.subs("n", 2).to_string(), "t: 12, cnot: 6");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot scale gate counts by -2")]
    fn negative_scale() {
        let gc = GateCounts {
            t: 4.into(),
            ..Default::default()
        };
        let _ = gc * -2;
    }

    #[test]
    fn clifford_total_and_volume() {
        let gc = GateCounts {
            t: 8.into(),
            toffoli: 2.into(),
            hadamard: 3.into(),
            cnot: 4.into(),
            two_qubit_clifford: 2.into(),
            ..Default::default()
        };
        assert_eq!(gc.total_clifford(), 9);

        let volume = gc.lattice_surgery_spacetime_volume(&SpacetimeVolumes::default());
        assert_eq!(volume.to_string(), "8*volume_per_t + 2*volume_per_toffoli");

        let volumes = SpacetimeVolumes {
            t: 10.into(),
            toffoli: 25.into(),
            cswap: 0.into(),
            and_gate: 0.into(),
            rotation: 0.into(),
        };
        assert_eq!(gc.lattice_surgery_spacetime_volume(&volumes), 130);
    }

    #[test]
    fn serialize() {
        let oracle = bloq_ref(Gate::Unknown("Oracle".into()));
        let gc = GateCounts {
            t: n(),
            cnot: 3.into(),
            ..GateCounts::unrecognized(&oracle)
        };
        assert_eq!(
            serde_json::to_value(&gc).unwrap(),
            json!({"t": "n", "cnot": 3, "unrecognized": {"Oracle": 1}})
        );
    }
}
