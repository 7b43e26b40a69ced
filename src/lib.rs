//! A tiny interactive catalogue of transport routes.
//!
//! This crate provides a minimal REPL that keeps an in-memory list of route
//! records (start point, end point, route number) and lets the user add,
//! list and look up routes, as well as save the whole list to a JSON file
//! and load it back. Loaded documents are checked against a fixed structural
//! schema before they replace the current list. It is intentionally small
//! and easy to read, suitable for coursework and experiments with command
//! dispatch and file persistence.
//!
//! The main entry point is [`Interpreter`], which can execute commands by name
//! with arguments using a set of pluggable factories. The public modules
//! [`command`], [`store`], [`schema`], [`persistence`] and [`session`] expose
//! the traits and types for implementing your own commands and for working
//! with the route list directly.

mod builtin;
pub mod command;
mod interpreter;
pub mod persistence;
pub mod schema;
pub mod session;
pub mod store;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
