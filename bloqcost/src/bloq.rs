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

//! Bloqs, their identities, and the interface for walking their call graphs.
//!
//! A bloq is a named building block of a quantum program. Some bloqs are
//! atomic gates (see [Gate]); others declare how many times they invoke each
//! of their callees. Bloqs are shared through [BloqRef] and identified by the
//! address of that shared allocation: two structurally equal bloqs created
//! separately are *different* bloqs as far as costing is concerned. Build a
//! bloq once and clone the [BloqRef] to make call sites share it.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::gate::Gate;
use crate::symbolic::SymbolicInt;

/// A shared handle to a bloq.
pub type BloqRef = Arc<dyn Bloq>;

/// One level of a call graph: each callee with the number of times it is
/// invoked.
pub type Callees = Vec<(BloqRef, SymbolicInt)>;

/// A computational building block, possibly decomposing into smaller ones.
pub trait Bloq: fmt::Debug + fmt::Display + Send + Sync {
    /// The atomic gate this bloq is, if any. Leaf classifiers inspect this.
    fn gate(&self) -> Option<&Gate> {
        None
    }

    /// The bloqs called by this one, with their multiplicities.
    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        Err(DecomposeError::NotImplemented(self.to_string()))
    }
}

/// Wraps a bloq into a fresh [BloqRef], with its own identity.
pub fn bloq_ref(bloq: impl Bloq + 'static) -> BloqRef {
    Arc::new(bloq)
}

/// The identity of a shared bloq.
///
/// Only meaningful while the [BloqRef] it was taken from is alive; holders of
/// a `BloqId` keep the corresponding `BloqRef` around for that reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BloqId(usize);

impl BloqId {
    pub fn of(bloq: &BloqRef) -> Self {
        BloqId(Arc::as_ptr(bloq) as *const () as usize)
    }
}

/// Why a bloq could not be expanded into its callees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecomposeError {
    /// The bloq does not declare a call graph.
    #[error("{0} does not declare a decomposition")]
    NotImplemented(String),
    /// The bloq is atomic and has no callees by construction.
    #[error("{0} is atomic")]
    Atomic(String),
    /// The call graph exists but could not be produced.
    #[error("cannot decompose {bloq}: {reason}")]
    Other { bloq: String, reason: String },
}

/// Expands a bloq into its callees, one level deep.
pub trait CalleeEnumerator: Send + Sync {
    fn callees(&self, bloq: &BloqRef) -> Result<Callees, DecomposeError>;
}

impl<F> CalleeEnumerator for F
where
    F: Fn(&BloqRef) -> Result<Callees, DecomposeError> + Send + Sync,
{
    fn callees(&self, bloq: &BloqRef) -> Result<Callees, DecomposeError> {
        self(bloq)
    }
}

type Generalizer = Box<dyn Fn(&BloqRef) -> Option<BloqRef> + Send + Sync>;

/// The default enumerator: asks each bloq for its declared call graph.
///
/// An optional generalizer is applied to each callee. It may replace a callee
/// by another bloq, or drop it by returning `None`. Callees that end up with
/// the same identity are merged and their multiplicities added, keeping the
/// order in which they first appear.
#[derive(Default)]
pub struct DeclaredCallees {
    generalizer: Option<Generalizer>,
}

impl DeclaredCallees {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generalizer(
        mut self,
        f: impl Fn(&BloqRef) -> Option<BloqRef> + Send + Sync + 'static,
    ) -> Self {
        self.generalizer = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for DeclaredCallees {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DeclaredCallees")
            .field("generalizer", &self.generalizer.is_some())
            .finish()
    }
}

impl CalleeEnumerator for DeclaredCallees {
    fn callees(&self, bloq: &BloqRef) -> Result<Callees, DecomposeError> {
        let callees = bloq.build_call_graph()?;
        let Some(generalize) = &self.generalizer else {
            return Ok(callees);
        };

        let mut merged: Callees = Vec::with_capacity(callees.len());
        let mut index: FxHashMap<BloqId, usize> = FxHashMap::default();
        for (callee, n) in callees {
            let Some(callee) = generalize(&callee) else {
                continue;
            };
            match index.get(&BloqId::of(&callee)) {
                Some(&i) => merged[i].1 += n,
                None => {
                    index.insert(BloqId::of(&callee), merged.len());
                    merged.push((callee, n));
                }
            }
        }
        Ok(merged)
    }
}

/// A generalizer dropping bookkeeping bloqs (splits, joins, allocations, ...).
pub fn ignore_bookkeeping(bloq: &BloqRef) -> Option<BloqRef> {
    match bloq.gate() {
        Some(Gate::Bookkeeping(_)) => None,
        _ => Some(bloq.clone()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bloqs::CostingBloq;
    use crate::gate::{BookkeepingKind, Gate};

    #[test]
    fn identity_is_per_allocation() {
        let a = bloq_ref(Gate::Hadamard);
        let b = bloq_ref(Gate::Hadamard);
        assert_eq!(BloqId::of(&a), BloqId::of(&a.clone()));
        assert_ne!(BloqId::of(&a), BloqId::of(&b));
    }

    #[test]
    fn undeclared_decomposition() {
        let b = bloq_ref(Gate::Unknown("Oracle".into()));
        assert_eq!(
            DeclaredCallees::new().callees(&b).unwrap_err(),
            DecomposeError::NotImplemented("Oracle".into())
        );
    }

    #[test]
    fn generalizer_drops_and_merges() {
        let h = bloq_ref(Gate::Hadamard);
        let h2 = bloq_ref(Gate::Hadamard);
        let split = bloq_ref(Gate::Bookkeeping(BookkeepingKind::Split));
        let root = bloq_ref(CostingBloq::new(
            "Root",
            vec![(h.clone(), 2.into()), (split, 1.into()), (h2, 3.into())],
        ));

        let plain = DeclaredCallees::new().callees(&root).unwrap();
        assert_eq!(plain.len(), 3);

        let h_canon = h.clone();
        let enumerator = DeclaredCallees::new().with_generalizer(move |b| {
            let b = ignore_bookkeeping(b)?;
            match b.gate() {
                Some(Gate::Hadamard) => Some(h_canon.clone()),
                _ => Some(b),
            }
        });
        let callees = enumerator.callees(&root).unwrap();
        assert_eq!(callees.len(), 1);
        assert_eq!(BloqId::of(&callees[0].0), BloqId::of(&h));
        assert_eq!(callees[0].1, 5);
    }
}
