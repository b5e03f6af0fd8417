//! Compilation of a smart-building configuration into a classical planning
//! task, and classification of the resulting plan into device commands.
//!
//! The pipeline is [`compile::compile`] (configuration to PDDL text),
//! an external [`solver::Solver`], and [`classify::classify`] (plan text to
//! per-intent command lists). [`compile::compile_and_solve`] chains the
//! three.

pub mod actions;
pub mod classify;
pub mod compile;
pub mod config;
pub mod context;
pub mod goal;
pub mod problem;
pub mod solver;
pub mod tags;
pub mod viz;
pub mod vocab;

pub use classify::{ClassifiedPlan, ClassifyError};
pub use compile::{Compilation, compile, compile_and_solve};
pub use config::{BuildingConfig, ConfigError};
pub use context::CompilationContext;
pub use solver::{SolveOutcome, Solver, SolverError};
pub use tags::{ExecutionMap, IntentTag};
