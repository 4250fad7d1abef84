#[cfg(test)]
mod test {
    use bloqcost::bloq::{bloq_ref, BloqRef};
    use bloqcost::gate::Gate;
    use bloqcost::{GateCounts, SymbolicInt};
    use num::Zero;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rstest::{fixture, rstest};

    struct Sampler {
        rng: SmallRng,
        oracles: Vec<BloqRef>,
    }

    impl Sampler {
        fn count(&mut self) -> SymbolicInt {
            let c = SymbolicInt::from(self.rng.random_range(0..20i64));
            if self.rng.random_bool(0.2) {
                c * SymbolicInt::symbol(if self.rng.random_bool(0.5) { "n" } else { "m" })
            } else {
                c
            }
        }

        fn scalar(&mut self) -> SymbolicInt {
            if self.rng.random_bool(0.25) {
                SymbolicInt::symbol("k") + self.rng.random_range(0..3i64)
            } else {
                self.rng.random_range(0..6i64).into()
            }
        }

        fn gate_counts(&mut self) -> GateCounts {
            let mut gc = GateCounts {
                t: self.count(),
                toffoli: self.count(),
                cswap: self.count(),
                and_gate: self.count(),
                rotation: self.count(),
                hadamard: self.count(),
                s_gate: self.count(),
                cnot: self.count(),
                single_qubit_clifford: self.count(),
                two_qubit_clifford: self.count(),
                multi_target_pauli_count: self.count(),
                multi_target_pauli_total_targets: self.count(),
                measurement_total_qubits: self.count(),
                ..Default::default()
            };
            for i in 0..self.oracles.len() {
                if self.rng.random_bool(0.3) {
                    let n = self.scalar();
                    gc += GateCounts::unrecognized(&self.oracles[i]).scale(&n);
                }
            }
            gc
        }
    }

    #[fixture]
    fn sampler() -> Sampler {
        Sampler {
            rng: SmallRng::seed_from_u64(1337),
            oracles: (0..3)
                .map(|i| bloq_ref(Gate::Unknown(format!("Oracle{i}"))))
                .collect(),
        }
    }

    #[rstest]
    fn addition_is_a_commutative_monoid(mut sampler: Sampler) {
        for _ in 0..200 {
            let a = sampler.gate_counts();
            let b = sampler.gate_counts();
            let c = sampler.gate_counts();
            assert_eq!(&a + &b, &b + &a);
            assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
            assert_eq!(&a + &GateCounts::zero(), a);
        }
    }

    #[rstest]
    fn scaling_is_repeated_addition(mut sampler: Sampler) {
        for _ in 0..200 {
            let v = sampler.gate_counts();
            let k1 = sampler.scalar();
            let k2 = sampler.scalar();
            assert_eq!(v.scale(&(&k1 + &k2)), &v.scale(&k1) + &v.scale(&k2));
            assert_eq!(v.scale(&0.into()), GateCounts::zero());
            assert_eq!(v.scale(&1.into()), v);
        }
    }

    #[rstest]
    fn scalar_on_either_side(mut sampler: Sampler) {
        for _ in 0..50 {
            let v = sampler.gate_counts();
            let k = sampler.scalar();
            assert_eq!(v.clone() * k.clone(), k * v);
        }
    }
}
