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

//! A registry of named costing schemes with differing value types.
//!
//! Schemes are stored type-erased, and registering one hands back a typed
//! [RegistryKey] through which its values come back with their concrete type.
//! Values obtained by name come back as [AnyCost].

use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::bloq::{BloqRef, CalleeEnumerator, DeclaredCallees};
use crate::costing::{CostError, CostKey, CostValue, DecompFailure, Evaluation};
use crate::symbolic::SymbolicInt;

trait ErasedValue: fmt::Debug + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn type_name(&self) -> &'static str;
    fn clone_box(&self) -> Box<dyn ErasedValue>;
    fn eq_dyn(&self, other: &dyn ErasedValue) -> bool;
    /// `None` if `other` has a different type.
    fn add_dyn(&self, other: &dyn ErasedValue) -> Option<Box<dyn ErasedValue>>;
    fn scaled_dyn(&self, k: &SymbolicInt) -> Box<dyn ErasedValue>;
}

impl<V: CostValue> ErasedValue for V {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn type_name(&self) -> &'static str {
        type_name::<V>()
    }

    fn clone_box(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn ErasedValue) -> bool {
        other.as_any().downcast_ref::<V>() == Some(self)
    }

    fn add_dyn(&self, other: &dyn ErasedValue) -> Option<Box<dyn ErasedValue>> {
        let other = other.as_any().downcast_ref::<V>()?;
        Some(Box::new(self.clone() + other.clone()))
    }

    fn scaled_dyn(&self, k: &SymbolicInt) -> Box<dyn ErasedValue> {
        Box::new(self.scaled(k))
    }
}

/// A cost value of any scheme.
pub struct AnyCost(Box<dyn ErasedValue>);

impl AnyCost {
    pub fn new<V: CostValue>(v: V) -> Self {
        AnyCost(Box::new(v))
    }

    /// The name of the concrete value type.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    pub fn is<V: CostValue>(&self) -> bool {
        self.0.as_any().is::<V>()
    }

    pub fn downcast_ref<V: CostValue>(&self) -> Option<&V> {
        self.0.as_any().downcast_ref()
    }

    /// The concrete value, or the value itself back if it has another type.
    pub fn downcast<V: CostValue>(self) -> Result<V, AnyCost> {
        if !self.is::<V>() {
            return Err(self);
        }
        match self.0.into_any().downcast::<V>() {
            Ok(v) => Ok(*v),
            Err(_) => unreachable!("type checked above"),
        }
    }

    /// Adds two values of the same scheme.
    pub fn try_add(&self, other: &AnyCost) -> Result<AnyCost, CostError> {
        match self.0.add_dyn(other.0.as_ref()) {
            Some(sum) => Ok(AnyCost(sum)),
            None => Err(CostError::TypeMismatch {
                expected: self.type_name(),
                found: other.type_name(),
            }),
        }
    }

    pub fn scaled(&self, k: &SymbolicInt) -> AnyCost {
        AnyCost(self.0.scaled_dyn(k))
    }
}

impl Clone for AnyCost {
    fn clone(&self) -> Self {
        AnyCost(self.0.clone_box())
    }
}

impl PartialEq for AnyCost {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_dyn(other.0.as_ref())
    }
}

impl fmt::Debug for AnyCost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for AnyCost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A costing scheme with its value type erased.
trait ErasedKey: fmt::Display + Send + Sync {
    fn evaluate(
        &self,
        root: &BloqRef,
        callees: &dyn CalleeEnumerator,
        failure: DecompFailure,
    ) -> Result<AnyCost, CostError>;

    fn value_type(&self) -> &'static str;
}

impl<K: CostKey> ErasedKey for K {
    fn evaluate(
        &self,
        root: &BloqRef,
        callees: &dyn CalleeEnumerator,
        failure: DecompFailure,
    ) -> Result<AnyCost, CostError> {
        Evaluation::new(self, callees)
            .with_decomp_failure(failure)
            .evaluate(root)
            .map(AnyCost::new)
    }

    fn value_type(&self) -> &'static str {
        type_name::<K::Value>()
    }
}

/// A typed handle to a registered scheme whose values have type `V`.
pub struct RegistryKey<V> {
    name: String,
    value: PhantomData<fn() -> V>,
}

impl<V> RegistryKey<V> {
    fn new(name: String) -> Self {
        RegistryKey {
            name,
            value: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<V> Clone for RegistryKey<V> {
    fn clone(&self) -> Self {
        RegistryKey::new(self.name.clone())
    }
}

impl<V> fmt::Debug for RegistryKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RegistryKey<{}>({})", type_name::<V>(), self.name)
    }
}

struct Entry {
    name: String,
    key: Box<dyn ErasedKey>,
    callees: Arc<dyn CalleeEnumerator>,
    failure: DecompFailure,
}

/// Named costing schemes, each with the enumerator and failure mode it is
/// evaluated with.
#[derive(Default)]
pub struct CostRegistry {
    entries: Vec<Entry>,
    index: FxHashMap<String, usize>,
}

impl CostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scheme, to be evaluated strictly over declared call graphs.
    pub fn register<K: CostKey + 'static>(
        &mut self,
        name: impl Into<String>,
        key: K,
    ) -> Result<RegistryKey<K::Value>, CostError> {
        self.register_with(
            name,
            key,
            Arc::new(DeclaredCallees::new()),
            DecompFailure::Strict,
        )
    }

    pub fn register_with<K: CostKey + 'static>(
        &mut self,
        name: impl Into<String>,
        key: K,
        callees: Arc<dyn CalleeEnumerator>,
        failure: DecompFailure,
    ) -> Result<RegistryKey<K::Value>, CostError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(CostError::DuplicateKey(name));
        }
        log::debug!("Registering {key} as '{name}' ({failure:?})");
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(Entry {
            name: name.clone(),
            key: Box::new(key),
            callees,
            failure,
        });
        Ok(RegistryKey::new(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    fn entry(&self, name: &str) -> Result<&Entry, CostError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| CostError::UnknownKey(name.to_string()))
    }

    /// Evaluates the scheme registered under `name`, with a fresh cache.
    pub fn evaluate(&self, name: &str, root: &BloqRef) -> Result<AnyCost, CostError> {
        let e = self.entry(name)?;
        e.key.evaluate(root, e.callees.as_ref(), e.failure)
    }

    /// Evaluates a scheme through its typed handle, with a fresh cache.
    pub fn evaluate_for_registry<V: CostValue>(
        &self,
        key: &RegistryKey<V>,
        root: &BloqRef,
    ) -> Result<V, CostError> {
        let e = self.entry(&key.name)?;
        if e.key.value_type() != type_name::<V>() {
            return Err(CostError::InvalidCostValue {
                key: e.key.to_string(),
                expected: type_name::<V>(),
                found: e.key.value_type(),
            });
        }
        let value = e.key.evaluate(root, e.callees.as_ref(), e.failure)?;
        value.downcast::<V>().map_err(|v| CostError::InvalidCostValue {
            key: e.key.to_string(),
            expected: type_name::<V>(),
            found: v.type_name(),
        })
    }

    /// Evaluates every registered scheme, in registration order.
    pub fn evaluate_all(&self, root: &BloqRef) -> Vec<(&str, Result<AnyCost, CostError>)> {
        self.entries
            .iter()
            .map(|e| {
                let cost = e.key.evaluate(root, e.callees.as_ref(), e.failure);
                (e.name.as_str(), cost)
            })
            .collect()
    }
}

impl fmt::Debug for CostRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.name, e.key.to_string(), e.failure)))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bloq::{bloq_ref, Bloq};
    use crate::bloqs::{make_example_costing_bloqs, CostingBloq};
    use crate::gate::Gate;
    use crate::gate_counts::GateCounts;
    use crate::surface_code::SurfaceCodeGatesCost;

    use num::Zero;
    use rstest::{fixture, rstest};

    /// Number of gates, of any kind.
    #[derive(Debug, Clone, PartialEq, Default)]
    struct LeafCount(SymbolicInt);

    impl std::ops::Add for LeafCount {
        type Output = LeafCount;
        fn add(self, rhs: LeafCount) -> LeafCount {
            LeafCount(self.0 + rhs.0)
        }
    }

    impl Zero for LeafCount {
        fn zero() -> Self {
            LeafCount::default()
        }
        fn is_zero(&self) -> bool {
            self.0.is_zero()
        }
    }

    impl fmt::Display for LeafCount {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{} gates", self.0)
        }
    }

    impl CostValue for LeafCount {
        fn scaled(&self, k: &SymbolicInt) -> Self {
            LeafCount(&self.0 * k)
        }
        fn unrecognized(_: &BloqRef) -> Self {
            LeafCount::default()
        }
    }

    struct LeafCounter;

    impl fmt::Display for LeafCounter {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "leaf count")
        }
    }

    impl CostKey for LeafCounter {
        type Value = LeafCount;
        fn classify(&self, bloq: &dyn Bloq) -> Option<LeafCount> {
            bloq.gate().map(|_| LeafCount(1.into()))
        }
    }

    #[fixture]
    fn registry() -> CostRegistry {
        let mut r = CostRegistry::new();
        r.register("gates", SurfaceCodeGatesCost::default()).unwrap();
        r.register("leaves", LeafCounter).unwrap();
        r
    }

    #[test]
    fn typed_evaluation() {
        let mut r = CostRegistry::new();
        let gates = r.register("gates", SurfaceCodeGatesCost::default()).unwrap();
        let leaves = r.register("leaves", LeafCounter).unwrap();
        let algo = make_example_costing_bloqs();

        let gc: GateCounts = r.evaluate_for_registry(&gates, &algo).unwrap();
        assert_eq!(gc.to_string(), "t: 40, toffoli: 100, hadamard: 20");
        let lc: LeafCount = r.evaluate_for_registry(&leaves, &algo).unwrap();
        assert_eq!(lc, LeafCount(160.into()));
    }

    #[rstest]
    fn named_evaluation(registry: CostRegistry) {
        let algo = make_example_costing_bloqs();
        let gc = registry.evaluate("gates", &algo).unwrap();
        assert!(gc.is::<GateCounts>());
        assert_eq!(gc.downcast_ref::<GateCounts>().unwrap().toffoli, 100);
        assert_eq!(gc.to_string(), "t: 40, toffoli: 100, hadamard: 20");

        let all = registry.evaluate_all(&algo);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].0, "leaves");
        assert_eq!(all[1].1.as_ref().unwrap().to_string(), "160 gates");
    }

    #[rstest]
    fn erased_arithmetic(registry: CostRegistry) {
        let t = bloq_ref(Gate::T { adjoint: false });
        let gc = registry.evaluate("gates", &t).unwrap();
        let lc = registry.evaluate("leaves", &t).unwrap();

        let sum = gc.try_add(&gc.scaled(&2.into())).unwrap();
        assert_eq!(sum.downcast::<GateCounts>().unwrap().t, 3);

        assert!(matches!(
            gc.try_add(&lc),
            Err(CostError::TypeMismatch { .. })
        ));
        assert_eq!(gc.clone(), gc);
        assert_ne!(gc, lc);
        assert!(lc.downcast::<GateCounts>().is_err());
    }

    #[rstest]
    fn registration_errors(mut registry: CostRegistry) {
        assert_eq!(
            registry.register("gates", LeafCounter).unwrap_err(),
            CostError::DuplicateKey("gates".into())
        );
        let root = make_example_costing_bloqs();
        assert_eq!(
            registry.evaluate("depth", &root).unwrap_err(),
            CostError::UnknownKey("depth".into())
        );

        let wrong: RegistryKey<LeafCount> = RegistryKey::new("gates".into());
        assert!(matches!(
            registry.evaluate_for_registry(&wrong, &root),
            Err(CostError::InvalidCostValue { .. })
        ));
    }

    #[test]
    fn per_entry_failure_mode() {
        let mut r = CostRegistry::new();
        let strict = r.register("strict", SurfaceCodeGatesCost::default()).unwrap();
        let lenient = r
            .register_with(
                "lenient",
                SurfaceCodeGatesCost::default(),
                Arc::new(DeclaredCallees::new()),
                DecompFailure::Lenient,
            )
            .unwrap();

        let oracle = bloq_ref(Gate::Unknown("Oracle".into()));
        let root = bloq_ref(CostingBloq::new("Root", vec![(oracle.clone(), 3.into())]));
        assert!(matches!(
            r.evaluate_for_registry(&strict, &root),
            Err(CostError::DecompositionUnavailable { .. })
        ));
        let gc = r.evaluate_for_registry(&lenient, &root).unwrap();
        assert_eq!(gc.unrecognized.get(&oracle), Some(&SymbolicInt::from(3)));
        assert_eq!(r.names().collect::<Vec<_>>(), ["strict", "lenient"]);
    }
}
