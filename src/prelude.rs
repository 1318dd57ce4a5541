//! Commonly used imports
//!
//! Use `use duplex::prelude::*;` for quick access to the most common types
//! and functions.

// Core types
pub use crate::context::{Context, Deferred, Fallible, Identity};
pub use crate::pipe::{Duplex, Resume};

// Primitive constructors
pub use crate::pipe::{done, lift, request, respond};

// Ready-made stages
pub use crate::build::{collect, each};

// Composition
pub use crate::fuse::{feed, push};
pub use crate::kleisli::{compose_pull, compose_push, transparent};

// Re-basing and normalization
pub use crate::hoist::{hoist, Compose, Transform};
pub use crate::observe::observe;

// Execution
pub use crate::run::{run, run_pipe};
