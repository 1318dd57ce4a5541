//! # Duplex: Bidirectional Suspendable Pipelines
//!
//! Build composable, effectful data pipelines where every stage can both
//! pull values from upstream and push values downstream, with each exchange
//! carrying its own query and answer types.
//!
//! ## Core Pieces
//!
//! - **[`Duplex`]**: a pipeline stage suspended as a value, either waiting
//!   upstream, yielding downstream, pending an effect, or finished
//! - **[`Context`]**: the base effect system stages run in; [`Identity`],
//!   [`Deferred`] and [`Fallible`] ship with the crate
//!
//! ## Key Operations
//!
//! - **Sequencing**: `.and_then()` / `.map()` chain stages through their
//!   results without running any effect
//! - **Fusion**: `.pull_from()` / `.push_into()` (and [`feed`] / [`push`])
//!   wire two adjacent stages into one
//! - **Kleisli composition**: [`compose_pull`] / [`compose_push`] assemble
//!   parameterized stages point-free, with [`transparent`] as identity
//! - **Execution**: [`run`] / [`run_pipe`] drive a fused, self-sufficient
//!   stage to completion inside the base context
//! - **Normalization**: [`observe`] restores the law-abiding canonical form
//!   before structure-inspecting operations such as [`hoist`]
//!
//! ## Example
//!
//! ```rust
//! use duplex::prelude::*;
//!
//! // Yield 1..=3 downstream; collect three values from upstream.
//! let producer = |_: ()| each::<_, (), (), Identity>(1..=3).map(|()| Vec::new());
//! let consumer: Duplex<(), i32, (), (), Identity, Vec<i32>> = collect(3);
//!
//! // Fuse the two along their shared boundary and drive the result.
//! let collected = run_pipe(consumer.pull_from(producer));
//! assert_eq!(collected, vec![1, 2, 3]);
//! ```
//!
//! ## Representation and Laws
//!
//! Sequencing is deliberately cheap: it splices effect nodes structurally
//! instead of routing through the context's own sequencing. Everything in
//! the operation set above observes the result correctly anyway; only code
//! that pattern-matches a [`Duplex`] directly can see the difference, and
//! [`observe`] rewrites a stage into the fully lawful form when that
//! matters.

mod build;
pub mod context;
mod fuse;
mod hoist;
mod kleisli;
mod observe;
mod pipe;
pub mod prelude;
mod run;

pub use build::*;
pub use context::{Context, Deferred, Fallible, Identity};
pub use fuse::*;
pub use hoist::*;
pub use kleisli::*;
pub use observe::*;
pub use pipe::*;
pub use run::*;
