//! Vertical composition: wiring two adjacent stages into one.
//!
//! [`feed`] and [`push`] are the two mutually recursive halves of pull/push
//! fusion. They connect a downstream stage's upstream boundary to an
//! upstream stage's downstream boundary, producing a single [`Duplex`] whose
//! inner connection is fully internalized: only the outer query/answer pairs
//! remain in the type.
//!
//! Fusion is downstream-driven. The upstream side runs only when the
//! downstream side actually asks for a value, each exchange forwards exactly
//! one query and one answer, and a `Done` on either side terminates the whole
//! fused stage with that result; the partner's remaining continuation is
//! dropped on the floor.
//!
//! # Examples
//!
//! ```rust
//! use duplex::prelude::*;
//!
//! let consumer: Duplex<(), i32, (), (), Identity, Vec<i32>> = collect(2);
//! let fused = consumer.pull_from(|()| {
//!     each::<_, (), (), Identity>(10..).map(|()| Vec::new())
//! });
//! assert_eq!(run_pipe(fused), vec![10, 11]);
//! ```

use crate::context::Context;
use crate::pipe::{Duplex, Resume};

/// Fuse `down` with a feeder for its upstream boundary.
///
/// `down` drives: whenever it awaits with a query, the feeder is invoked with
/// that query and its yields satisfy the await. Yields and effects of `down`
/// pass through untouched.
pub fn feed<Uq, Ua, Mq, Ma, Dq, Da, C, T>(
    feeder: Resume<Mq, Duplex<Uq, Ua, Mq, Ma, C, T>>,
    down: Duplex<Mq, Ma, Dq, Da, C, T>,
) -> Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Mq: 'static,
    Ma: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
{
    match down {
        Duplex::Await(query, resume) => push(feeder(query), resume),
        Duplex::Yield(answer, resume) => {
            Duplex::Yield(answer, Box::new(move |query| feed(feeder, resume(query))))
        }
        Duplex::Effect(op) => {
            Duplex::Effect(Box::new(C::and_then(*op, move |stage| C::of(feed(feeder, stage)))))
        }
        Duplex::Done(value) => Duplex::Done(value),
    }
}

/// Fuse `up` with a consumer for its downstream boundary.
///
/// `up` runs until it yields; the yield is handed to `on_output`, whose
/// awaits are in turn satisfied by `up`'s continuation via [`feed`]. Awaits
/// and effects of `up` pass through untouched.
pub fn push<Uq, Ua, Mq, Ma, Dq, Da, C, T>(
    up: Duplex<Uq, Ua, Mq, Ma, C, T>,
    on_output: Resume<Ma, Duplex<Mq, Ma, Dq, Da, C, T>>,
) -> Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Mq: 'static,
    Ma: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
{
    match up {
        Duplex::Await(query, resume) => {
            Duplex::Await(query, Box::new(move |answer| push(resume(answer), on_output)))
        }
        Duplex::Yield(answer, resume) => feed(resume, on_output(answer)),
        Duplex::Effect(op) => {
            Duplex::Effect(Box::new(C::and_then(*op, move |stage| C::of(push(stage, on_output)))))
        }
        Duplex::Done(value) => Duplex::Done(value),
    }
}

impl<Uq, Ua, Dq, Da, C, T> Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
{
    /// Satisfy this stage's upstream boundary with `feeder`.
    ///
    /// Method form of [`feed`]: `self` is the downstream, driving side.
    pub fn pull_from<Xq, Xa, F>(self, feeder: F) -> Duplex<Xq, Xa, Dq, Da, C, T>
    where
        Xq: 'static,
        Xa: 'static,
        F: FnOnce(Uq) -> Duplex<Xq, Xa, Uq, Ua, C, T> + 'static,
    {
        feed(Box::new(feeder), self)
    }

    /// Hand this stage's downstream outputs to `consumer`.
    ///
    /// Method form of [`push`]: `self` is the upstream, producing side.
    pub fn push_into<Xq, Xa, F>(self, consumer: F) -> Duplex<Uq, Ua, Xq, Xa, C, T>
    where
        Xq: 'static,
        Xa: 'static,
        F: FnOnce(Da) -> Duplex<Dq, Da, Xq, Xa, C, T> + 'static,
    {
        push(self, Box::new(consumer))
    }
}
