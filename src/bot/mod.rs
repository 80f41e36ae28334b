//! Bot module - engine state, dispatch and runtime.

pub mod dispatcher;
mod runtime;

pub use runtime::Engine;
