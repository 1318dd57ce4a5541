//! Driving a self-sufficient pipeline to completion.
//!
//! A stage is self-sufficient once every boundary query/answer the driver
//! would have to invent is the unit type: the driver resumes each remaining
//! suspension with `()` and discards yielded values, so all real exchange
//! must already have been fused away. What is left to do is run the effects,
//! in order, inside the base context, which is exactly what [`run`] does.
//!
//! The driver is a safe observer: it never needs a normalized input, because
//! it only ever walks the structure in sequencing order.
//!
//! # Examples
//!
//! ```rust
//! use duplex::prelude::*;
//!
//! let consumer: Duplex<(), i32, (), (), Identity, Vec<i32>> = collect(3);
//! let fused = consumer.pull_from(|()| {
//!     each::<_, (), (), Identity>(1..=3).map(|()| Vec::new())
//! });
//! assert_eq!(run(move || fused), vec![1, 2, 3]);
//! ```

use crate::context::Context;
use crate::pipe::Duplex;

/// Drive the stage built by `producer` to completion, returning its result
/// inside the base context.
pub fn run<Da, C, T, P>(producer: P) -> C::Op<T>
where
    Da: 'static,
    C: Context,
    T: 'static,
    P: FnOnce() -> Duplex<(), (), (), Da, C, T>,
{
    run_pipe(producer())
}

/// Thin variant of [`run`] taking the stage directly.
///
/// A failing action in a context like
/// [`Fallible`](crate::context::Fallible) aborts the loop with that failure
/// before `Done` is reached.
pub fn run_pipe<Da, C, T>(stage: Duplex<(), (), (), Da, C, T>) -> C::Op<T>
where
    Da: 'static,
    C: Context,
    T: 'static,
{
    match stage {
        Duplex::Await((), resume) => run_pipe(resume(())),
        Duplex::Yield(_, resume) => run_pipe(resume(())),
        Duplex::Effect(op) => C::and_then(*op, run_pipe),
        Duplex::Done(value) => C::of(value),
    }
}

impl<Da, C, T> Duplex<(), (), (), Da, C, T>
where
    Da: 'static,
    C: Context,
    T: 'static,
{
    /// Method form of [`run_pipe`].
    pub fn run(self) -> C::Op<T> {
        run_pipe(self)
    }
}
