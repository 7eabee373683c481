//! # qecc-circuit
//!
//! Small circuit model and noisy state-vector backend for stabilizer-code experiments.
//!
//! Circuits carry named quantum and classical registers, the gates
//! `id, h, x, y, z, cx, cz`, exact state preparation, mid-circuit measurement, reset,
//! and gates conditioned on classical bits measured earlier in the same shot.
//! Components are built over local indices and spliced together with
//! [`Circuit::compose`](circuit::Circuit::compose).
//!
//! [`NoisySimulator`](simulator::NoisySimulator) samples shots from a dense state
//! vector and injects Pauli errors after the gate kinds listed in its
//! [`NoiseModel`](noise::NoiseModel).
//!
//! ## Usage
//!
//! ```no_run
//! use qecc_circuit::prelude::*;
//!
//! let mut qc = Circuit::new("bell");
//! let q = qc.add_qreg("q", 2);
//! let c = qc.add_creg("c", 2);
//! qc.h(q.index(0)).cx(q.index(0), q.index(1));
//! qc.measure_many(&q.indices(), &c.indices());
//!
//! let counts = NoisySimulator::noiseless().with_seed(7).run(&qc, 1000).unwrap();
//! println!("{}", counts);
//! ```

pub mod circuit;
pub mod counts;
pub mod error;
pub mod gate;
pub mod noise;
pub mod register;
pub mod simulator;
pub mod state;

pub mod prelude {
    pub use crate::circuit::*;
    pub use crate::counts::*;
    pub use crate::error::*;
    pub use crate::gate::*;
    pub use crate::noise::*;
    pub use crate::register::*;
    pub use crate::simulator::*;
    pub use crate::state::*;
}
