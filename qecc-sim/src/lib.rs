//! # qecc-sim
//!
//! Shor's nine-qubit code and the five-qubit code as reusable circuit components, plus
//! a Monte Carlo harness that estimates how often they recover a logical state under
//! single-qubit Pauli noise.
//!
//! Codes implement [`StabilizerCode`](code::StabilizerCode): a logical-zero preparer, a
//! logical X, and a corrector that measures every check into a syndrome register and
//! applies recovery gates conditioned on it. The harness composes these into
//! `prepare → noise → correct → (decode) → measure` and samples it on the
//! `qecc-circuit` backend.
//!
//! ## Usage
//!
//! ```no_run
//! use qecc_sim::prelude::*;
//!
//! let code = FiveQubitCode::new();
//! let config = EvaluationConfig::decoded().with_trials(2000).with_seed(7);
//! let fractions = evaluate(vec![0.0, 0.05, 0.1], &code, &config).unwrap();
//! println!("success fractions: {:?}", fractions.as_slice());
//! ```

pub mod code;
pub mod config;
pub mod error;
pub mod five_qubit;
pub mod harness;
pub mod nine_qubit;
pub mod stats;

pub mod prelude {
    pub use crate::code::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::five_qubit::*;
    pub use crate::harness::*;
    pub use crate::nine_qubit::*;
    pub use crate::stats::*;
}
