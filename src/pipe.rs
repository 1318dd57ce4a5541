//! The four-state suspended pipeline computation and its sequencing engine.
//!
//! [`Duplex`] is the sole data type of this crate: a pipeline stage captured
//! as a value, paused either at an upstream request, a downstream output, a
//! pending effect, or completion. Every other module builds on it.
//!
//! # Type parameters
//!
//! A stage talks to two neighbours, and each conversation has its own
//! query/answer pair:
//!
//! | parameter | meaning |
//! |-----------|---------|
//! | `Uq` | query this stage sends upstream |
//! | `Ua` | answer it gets back from upstream |
//! | `Dq` | query downstream sends to this stage |
//! | `Da` | answer this stage sends downstream |
//! | `C`  | the base [`Context`] effects run in |
//! | `T`  | the result this stage completes with |
//!
//! # Examples
//!
//! ```rust
//! use duplex::prelude::*;
//!
//! // Ask upstream for a number, double it, send it downstream.
//! let stage: Duplex<(), i32, (), i32, Identity, ()> =
//!     request(()).and_then(|n| respond(n * 2)).and_then(|_| done(()));
//! ```

use std::fmt;

use crate::context::Context;

/// A boxed one-shot continuation from a reply value to the next state.
pub type Resume<A, P> = Box<dyn FnOnce(A) -> P>;

/// A pipeline stage suspended as a value.
///
/// See the [module docs](self) for the type-parameter convention. The four
/// variants are the only suspension points a stage can be paused at; all
/// operations in this crate consume the value they are given and build a new
/// one, so a `Duplex` is always an immutable snapshot.
///
/// Each `resume` continuation must be invoked at most once, with the reply
/// the suspended stage is waiting for. The safe operation set (sequencing,
/// fusion, the driver) upholds this on its own. Matching on the variants
/// directly is possible but observes the raw representation, which does not
/// satisfy the sequencing laws structurally; see [`observe`](crate::observe)
/// for when that matters.
pub enum Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
{
    /// Waiting on upstream: a query was sent, the continuation wants the answer.
    Await(Uq, Resume<Ua, Self>),
    /// Produced for downstream: an answer is out, the continuation wants the
    /// next downstream query.
    Yield(Da, Resume<Dq, Self>),
    /// A base-context action must run first; running it yields the next state.
    Effect(Box<C::Op<Self>>),
    /// Finished with a result.
    Done(T),
}

/// Send `query` upstream and complete with the answer.
///
/// # Examples
///
/// ```rust
/// use duplex::prelude::*;
///
/// let stage: Duplex<&str, i32, (), (), Identity, i32> = request("next");
/// match stage {
///     Duplex::Await(q, resume) => {
///         assert_eq!(q, "next");
///         assert_eq!(resume(7).done_value(), Some(7));
///     }
///     _ => unreachable!(),
/// }
/// ```
pub fn request<Uq, Ua, Dq, Da, C>(query: Uq) -> Duplex<Uq, Ua, Dq, Da, C, Ua>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
{
    Duplex::Await(query, Box::new(Duplex::Done))
}

/// Send `answer` downstream and complete with the next downstream query.
pub fn respond<Uq, Ua, Dq, Da, C>(answer: Da) -> Duplex<Uq, Ua, Dq, Da, C, Dq>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
{
    Duplex::Yield(answer, Box::new(Duplex::Done))
}

/// Lift a base-context action into a stage that runs it and completes with
/// its value.
pub fn lift<Uq, Ua, Dq, Da, C, T>(op: C::Op<T>) -> Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
{
    Duplex::Effect(Box::new(C::and_then(op, |value| C::of(Duplex::Done(value)))))
}

/// Lift a plain value into an already-finished stage.
pub fn done<Uq, Ua, Dq, Da, C, T>(value: T) -> Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
{
    Duplex::Done(value)
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
    /// Run `self` to completion, then continue with the stage `next` builds
    /// from its result.
    ///
    /// Every suspension point of `self` is preserved in order and no effect
    /// runs here; effects execute only once the result is driven.
    ///
    /// Note that sequencing distributes over [`Duplex::Effect`] structurally
    /// rather than through the context's own sequencing, so the result of
    /// `lift(op).and_then(next)` is not byte-for-byte the node a fully lawful
    /// encoding would build. The difference is unobservable through the
    /// driver and through further sequencing; [`observe`](crate::observe)
    /// rebuilds the lawful form when something inspects variants directly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use duplex::prelude::*;
    ///
    /// let stage: Duplex<(), (), (), i32, Identity, &str> =
    ///     respond(1).and_then(|()| respond(2)).and_then(|()| done("ok"));
    /// ```
    pub fn and_then<U, K>(self, next: K) -> Duplex<Uq, Ua, Dq, Da, C, U>
    where
        U: 'static,
        K: FnOnce(T) -> Duplex<Uq, Ua, Dq, Da, C, U> + 'static,
    {
        match self {
            Duplex::Await(query, resume) => {
                Duplex::Await(query, Box::new(move |answer| resume(answer).and_then(next)))
            }
            Duplex::Yield(answer, resume) => {
                Duplex::Yield(answer, Box::new(move |query| resume(query).and_then(next)))
            }
            Duplex::Effect(op) => {
                Duplex::Effect(Box::new(C::and_then(*op, move |stage| C::of(stage.and_then(next)))))
            }
            Duplex::Done(value) => next(value),
        }
    }

    /// Map the completion result.
    ///
    /// Built per-variant rather than routed through [`and_then`](Self::and_then),
    /// so mapping never allocates an extra `Done` node at each suspension point.
    pub fn map<U, F>(self, f: F) -> Duplex<Uq, Ua, Dq, Da, C, U>
    where
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        match self {
            Duplex::Await(query, resume) => {
                Duplex::Await(query, Box::new(move |answer| resume(answer).map(f)))
            }
            Duplex::Yield(answer, resume) => {
                Duplex::Yield(answer, Box::new(move |query| resume(query).map(f)))
            }
            Duplex::Effect(op) => {
                Duplex::Effect(Box::new(C::and_then(*op, move |stage| C::of(stage.map(f)))))
            }
            Duplex::Done(value) => Duplex::Done(f(value)),
        }
    }

    /// Returns `true` if the stage has completed.
    pub fn is_done(&self) -> bool {
        matches!(self, Duplex::Done(_))
    }

    /// Extract the result if the stage has completed, discarding it otherwise.
    pub fn done_value(self) -> Option<T> {
        match self {
            Duplex::Done(value) => Some(value),
            _ => None,
        }
    }
}

impl<Uq, Ua, Dq, Da, C, T> fmt::Debug for Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: fmt::Debug + 'static,
    Ua: 'static,
    Dq: 'static,
    Da: fmt::Debug + 'static,
    C: Context,
    T: fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duplex::Await(query, _) => write!(f, "Await({query:?}, ..)"),
            Duplex::Yield(answer, _) => write!(f, "Yield({answer:?}, ..)"),
            Duplex::Effect(_) => write!(f, "Effect(..)"),
            Duplex::Done(value) => write!(f, "Done({value:?})"),
        }
    }
}
