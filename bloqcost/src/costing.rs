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

//! Costing schemes and the memoized evaluation of a bloq's cost.
//!
//! A [CostKey] decides the base cost of leaf bloqs. Every other bloq costs the
//! sum of its callees' costs, each scaled by the number of times it is called.
//! An [Evaluation] walks the call graph depth first with an explicit stack,
//! so arbitrarily deep call graphs do not exhaust the host stack, and caches
//! each bloq's cost so that shared callees are costed once per run.

use std::fmt;

use num::Zero;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::bloq::{Bloq, BloqId, BloqRef, CalleeEnumerator, Callees, DeclaredCallees, DecomposeError};
use crate::symbolic::SymbolicInt;

/// A value produced by a costing scheme.
///
/// Cost values form a commutative monoid under `+` (with [Zero::zero] as the
/// identity), and [CostValue::scaled] acts as repeated addition.
pub trait CostValue:
    Clone + fmt::Debug + fmt::Display + PartialEq + Zero + Send + Sync + 'static
{
    /// The value multiplied by a (possibly symbolic) non-negative count.
    fn scaled(&self, k: &SymbolicInt) -> Self;

    /// The cost of one occurrence of a bloq that could be neither classified
    /// nor decomposed.
    fn unrecognized(bloq: &BloqRef) -> Self;
}

/// A costing scheme.
pub trait CostKey: fmt::Display + Send + Sync {
    type Value: CostValue;

    /// The base cost of `bloq` if it is a leaf of this scheme, or `None` if
    /// its cost must be computed from its callees.
    fn classify(&self, bloq: &dyn Bloq) -> Option<Self::Value>;

    fn zero(&self) -> Self::Value {
        Self::Value::zero()
    }
}

/// What to do when a bloq is neither a leaf nor decomposable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecompFailure {
    /// Fail the whole evaluation, naming the bloq.
    #[default]
    Strict,
    /// Record the bloq as unrecognized and carry on.
    Lenient,
}

/// Errors raised while computing costs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    /// Two cost values of different types were combined.
    #[error("cannot combine a {found} value with a {expected} value")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A bloq could not be decomposed while costing in strict mode.
    #[error("cannot compute {key} for {bloq}: {source}")]
    DecompositionUnavailable {
        bloq: String,
        key: String,
        #[source]
        source: DecomposeError,
    },
    /// A registered scheme produced, or was asked for, a value of the wrong type.
    #[error("{key} values should be {expected}, got {found}")]
    InvalidCostValue {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A bloq's decomposition reaches the bloq itself.
    #[error("cannot compute {key} for {bloq}: its call graph is cyclic")]
    Cycle { bloq: String, key: String },
    #[error("no cost key named '{0}'")]
    UnknownKey(String),
    #[error("a cost key named '{0}' is already registered")]
    DuplicateKey(String),
}

/// Costs computed so far, per bloq identity.
///
/// Each entry keeps its bloq alive, so an identity cannot be reused by another
/// bloq while the cache exists.
#[derive(Debug, Clone)]
pub struct CostCache<V> {
    costs: FxHashMap<BloqId, (BloqRef, V)>,
}

impl<V> Default for CostCache<V> {
    fn default() -> Self {
        CostCache {
            costs: FxHashMap::default(),
        }
    }
}

impl<V: CostValue> CostCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn get(&self, bloq: &BloqRef) -> Option<&V> {
        self.costs.get(&BloqId::of(bloq)).map(|(_, v)| v)
    }

    pub fn contains(&self, bloq: &BloqRef) -> bool {
        self.costs.contains_key(&BloqId::of(bloq))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BloqRef, &V)> + '_ {
        self.costs.values().map(|(b, v)| (b, v))
    }

    /// Entries are written once; a second write for the same bloq is ignored.
    fn insert(&mut self, bloq: BloqRef, v: V) {
        self.costs.entry(BloqId::of(&bloq)).or_insert((bloq, v));
    }
}

enum Frame {
    /// Cost the bloq, or schedule its callees.
    Enter(BloqRef),
    /// All callees are costed; fold them into the bloq's cost.
    Exit(BloqRef, Callees),
}

/// One run of a costing scheme, owning the cache for that run.
pub struct Evaluation<'a, K: CostKey> {
    key: &'a K,
    callees: &'a dyn CalleeEnumerator,
    failure: DecompFailure,
    cache: CostCache<K::Value>,
}

impl<'a, K: CostKey> Evaluation<'a, K> {
    pub fn new(key: &'a K, callees: &'a dyn CalleeEnumerator) -> Self {
        Evaluation {
            key,
            callees,
            failure: DecompFailure::default(),
            cache: CostCache::default(),
        }
    }

    pub fn with_decomp_failure(mut self, failure: DecompFailure) -> Self {
        self.failure = failure;
        self
    }

    pub fn with_lenient_decomp(self) -> Self {
        self.with_decomp_failure(DecompFailure::Lenient)
    }

    /// Starts from previously computed costs of the same scheme.
    pub fn with_cache(mut self, cache: CostCache<K::Value>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &CostCache<K::Value> {
        &self.cache
    }

    pub fn into_cache(self) -> CostCache<K::Value> {
        self.cache
    }

    /// Computes the cost of `root`, and of every bloq it reaches.
    pub fn evaluate(&mut self, root: &BloqRef) -> Result<K::Value, CostError> {
        let mut stack = vec![Frame::Enter(root.clone())];
        // bloqs whose callees are still being costed, i.e. the current path
        let mut active: FxHashSet<BloqId> = FxHashSet::default();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(bloq) => {
                    if self.cache.contains(&bloq) {
                        continue;
                    }
                    let id = BloqId::of(&bloq);
                    if active.contains(&id) {
                        return Err(self.cycle(&bloq));
                    }

                    if let Some(cost) = self.key.classify(bloq.as_ref()) {
                        self.cache.insert(bloq, cost);
                        continue;
                    }

                    let callees = match self.callees.callees(&bloq) {
                        Ok(callees) => callees,
                        Err(source) if self.failure == DecompFailure::Strict => {
                            return Err(CostError::DecompositionUnavailable {
                                bloq: bloq.to_string(),
                                key: self.key.to_string(),
                                source,
                            });
                        }
                        Err(e) => {
                            log::warn!("Counting {bloq} as unrecognized: {e}");
                            Callees::new()
                        }
                    };

                    if callees.is_empty() {
                        let cost = K::Value::unrecognized(&bloq);
                        self.cache.insert(bloq, cost);
                        continue;
                    }

                    log::debug!(
                        "Computing {} for {} from {} callee(s)",
                        self.key,
                        bloq,
                        callees.len()
                    );
                    active.insert(id);
                    let enter: Vec<Frame> = callees
                        .iter()
                        .rev()
                        .map(|(callee, _)| Frame::Enter(callee.clone()))
                        .collect();
                    stack.push(Frame::Exit(bloq, callees));
                    stack.extend(enter);
                }
                Frame::Exit(bloq, callees) => {
                    let mut total = self.key.zero();
                    for (callee, n) in &callees {
                        let Some(cost) = self.cache.get(callee) else {
                            return Err(self.cycle(callee));
                        };
                        total = total + cost.scaled(n);
                    }
                    active.remove(&BloqId::of(&bloq));
                    self.cache.insert(bloq, total);
                }
            }
        }

        log::info!(
            "Computed {} for {} ({} bloqs costed)",
            self.key,
            root,
            self.cache.len()
        );
        match self.cache.get(root) {
            Some(cost) => Ok(cost.clone()),
            None => Err(self.cycle(root)),
        }
    }

    fn cycle(&self, bloq: &BloqRef) -> CostError {
        CostError::Cycle {
            bloq: bloq.to_string(),
            key: self.key.to_string(),
        }
    }
}

/// Computes the cost of `bloq` under `key`, decomposing bloqs through their
/// declared call graphs and failing on bloqs that cannot be costed.
pub fn get_cost_value<K: CostKey>(bloq: &BloqRef, key: &K) -> Result<K::Value, CostError> {
    let enumerator = DeclaredCallees::new();
    Evaluation::new(key, &enumerator).evaluate(bloq)
}

/// Like [get_cost_value], reusing and extending a cache of earlier results.
pub fn get_cost_value_with_cache<K: CostKey>(
    bloq: &BloqRef,
    key: &K,
    cache: &mut CostCache<K::Value>,
) -> Result<K::Value, CostError> {
    let enumerator = DeclaredCallees::new();
    let mut evaluation = Evaluation::new(key, &enumerator).with_cache(std::mem::take(cache));
    let result = evaluation.evaluate(bloq);
    *cache = evaluation.into_cache();
    result
}

/// The cost of `bloq` and of every bloq in its call graph.
pub fn query_costs<K: CostKey>(
    bloq: &BloqRef,
    key: &K,
) -> Result<CostCache<K::Value>, CostError> {
    let enumerator = DeclaredCallees::new();
    let mut evaluation = Evaluation::new(key, &enumerator);
    evaluation.evaluate(bloq)?;
    Ok(evaluation.into_cache())
}
