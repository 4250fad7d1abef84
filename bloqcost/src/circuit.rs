// bloqcost - gate-count resource estimation for quantum programs
// Copyright (C) 2021 - Aleks Kissinger
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

use crate::bloq::{bloq_ref, Bloq, Callees, DecomposeError};
use crate::gate::Gate;
use crate::phase::{Angle, Phase};
use num::Rational64;
use openqasm::{ast::Symbol, translate::Value, GenericError, ProgramVisitor};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt;

/// A gate applied to a list of qubits.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Op {
    pub gate: Gate,
    pub qs: Vec<usize>,
}

/// A type for quantum circuits
///
/// As a bloq, a circuit calls each distinct gate it contains as many times as
/// the gate occurs.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Circuit {
    name: String,
    nqubits: usize,
    pub ops: VecDeque<Op>,
}

impl Circuit {
    pub fn new(nqubits: usize) -> Circuit {
        Circuit {
            name: "Circuit".to_string(),
            ops: VecDeque::new(),
            nqubits,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Circuit {
        self.name = name.into();
        self
    }

    pub fn num_qubits(&self) -> usize {
        self.nqubits
    }

    pub fn num_gates(&self) -> usize {
        self.ops.len()
    }

    pub fn push(&mut self, gate: Gate, qs: Vec<usize>) {
        if let Some(&q) = qs.iter().max() {
            self.nqubits = self.nqubits.max(q + 1);
        }
        self.ops.push_back(Op { gate, qs });
    }

    pub fn add_gate_with_angle(&mut self, name: &str, qs: Vec<usize>, angle: impl Into<Angle>) {
        let mut gate = Gate::from_qasm_name(name);
        if let Gate::Rotation { angle: a, .. } = &mut gate {
            *a = angle.into();
        }
        self.push(gate, qs);
    }

    pub fn add_gate(&mut self, name: &str, qs: Vec<usize>) {
        self.push(Gate::from_qasm_name(name), qs);
    }

    pub fn adjoint(&mut self) {
        self.ops.make_contiguous().reverse();
        for op in &mut self.ops {
            op.gate = op.gate.adjoint();
        }
    }

    pub fn to_adjoint(&self) -> Circuit {
        let mut c = self.clone();
        c.adjoint();
        c
    }

    /// Each distinct gate in the circuit, with its number of occurrences, in
    /// order of first occurrence.
    pub fn gate_counts(&self) -> Vec<(&Gate, usize)> {
        let mut counts: Vec<(&Gate, usize)> = Vec::new();
        let mut index: FxHashMap<&Gate, usize> = FxHashMap::default();
        for op in &self.ops {
            match index.get(&op.gate) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(&op.gate, counts.len());
                    counts.push((&op.gate, 1));
                }
            }
        }
        counts
    }

    fn from_qasm_parser(read: impl FnOnce(&mut openqasm::Parser)) -> Result<Circuit, String> {
        let mut cache = openqasm::SourceCache::new();
        let mut parser = openqasm::Parser::new(&mut cache)
            .with_file_policy(openqasm::parser::FilePolicy::Ignore);
        read(&mut parser);
        parser.parse_source::<String>(
            "
            opaque rz(phase) q;
            opaque rx(phase) q;
            opaque ry(phase) q;
            opaque x q;
            opaque y q;
            opaque z q;
            opaque s q;
            opaque t q;
            opaque sdg q;
            opaque tdg q;
            opaque h q;
            opaque id q;
            opaque cx a, b;
            opaque cz a, b;
            opaque ccx a, b, c;
            opaque ccz a, b, c;
            opaque swap a, b;
            opaque cswap a, b, c;
            opaque init_anc a;
            opaque post_sel a;
        "
            .to_string(),
            None,
        );

        let program = parser.done().to_errors().map_err(|e| e.to_string())?;
        program
            .type_check()
            .to_errors()
            .map_err(|e| e.to_string())?;

        let mut writer = CircuitWriter {
            circuit: Circuit::new(0),
        };
        let mut linearize = openqasm::Linearize::new(&mut writer, usize::MAX);
        linearize
            .visit_program(&program)
            .to_errors()
            .map_err(|e| e.to_string())?;

        Ok(writer.circuit)
    }

    pub fn from_qasm(source: &str) -> Result<Circuit, String> {
        Circuit::from_qasm_parser(|parser| parser.parse_source::<String>(source.to_string(), None))
    }

    pub fn from_file(name: &str) -> Result<Circuit, String> {
        Circuit::from_qasm_parser(|parser| parser.parse_file(name))
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Bloq for Circuit {
    fn build_call_graph(&self) -> Result<Callees, DecomposeError> {
        Ok(self
            .gate_counts()
            .into_iter()
            .map(|(g, n)| (bloq_ref(g.clone()), n.into()))
            .collect())
    }
}

struct CircuitWriter {
    circuit: Circuit,
}

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
enum CircuitWriterError {
    #[error("arbitrary unitaries are not supported")]
    UnitaryNotSupported,
    #[error("resets are not supported")]
    ResetNotSupported,
    #[error("conditionals are not supported")]
    ConditionalNotSupported,
    #[error("angle is not a finite number")]
    InvalidAngle,
}

fn param_to_phase(value: Value) -> Option<Phase> {
    let b = Phase::new(Rational64::new(*value.b.numer(), *value.b.denom()));
    if value.a.numer() == &0 {
        Some(b)
    } else {
        let a = *value.a.numer() as f64 / *value.a.denom() as f64;
        Some(Phase::from_radians(a)? + b)
    }
}

impl openqasm::GateWriter for &mut CircuitWriter {
    type Error = CircuitWriterError;

    fn initialize(&mut self, qubits: &[Symbol], _: &[Symbol]) -> Result<(), Self::Error> {
        self.circuit = Circuit::new(qubits.len());
        Ok(())
    }

    fn write_cx(&mut self, a: usize, b: usize) -> Result<(), Self::Error> {
        self.circuit.push(Gate::CNOT, vec![a, b]);
        Ok(())
    }

    fn write_opaque(
        &mut self,
        name: &Symbol,
        params: &[Value],
        regs: &[usize],
    ) -> Result<(), Self::Error> {
        let mut g = Gate::from_qasm_name(name.as_str());
        if let (Gate::Rotation { angle, .. }, Some(&p)) = (&mut g, params.first()) {
            *angle = param_to_phase(p)
                .ok_or(CircuitWriterError::InvalidAngle)?
                .into();
        }

        self.circuit.push(g, regs.to_vec());

        Ok(())
    }

    fn write_u(&mut self, _: Value, _: Value, _: Value, _: usize) -> Result<(), Self::Error> {
        Err(CircuitWriterError::UnitaryNotSupported)
    }

    fn write_barrier(&mut self, _: &[usize]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write_reset(&mut self, _: usize) -> Result<(), Self::Error> {
        Err(CircuitWriterError::ResetNotSupported)
    }

    fn write_measure(&mut self, q: usize, _: usize) -> Result<(), Self::Error> {
        self.circuit.push(Gate::Measure, vec![q]);
        Ok(())
    }

    fn start_conditional(&mut self, _: usize, _: usize, _: u64) -> Result<(), Self::Error> {
        Err(CircuitWriterError::ConditionalNotSupported)
    }

    fn end_conditional(&mut self) -> Result<(), Self::Error> {
        Err(CircuitWriterError::ConditionalNotSupported)
    }
}
