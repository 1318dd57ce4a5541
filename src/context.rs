//! The base execution context that pipeline effects run in.
//!
//! A [`Context`] is a type-level handle for an effect system: it names an
//! operation type `Op<T>` together with the two things the pipeline core needs
//! from it: lifting a plain value into a no-op operation ([`Context::of`])
//! and sequencing one operation into the next ([`Context::and_then`]).
//!
//! The crate ships three reference contexts:
//!
//! - [`Identity`]: `Op<T>` is just `T`; everything runs strictly.
//! - [`Deferred`]: `Op<T>` is a boxed thunk; nothing runs until the driver
//!   forces the final operation.
//! - [`Fallible`]: `Op<T>` is a `Result`; a failing action aborts the driver
//!   with that error.
//!
//! # Examples
//!
//! ```rust
//! use duplex::context::{Context, Deferred};
//!
//! let op = Deferred::and_then(Deferred::of(2), |n| Deferred::of(n * 10));
//! assert_eq!(op(), 20);
//! ```

use std::marker::PhantomData;

/// Type-level handle for the effect system a pipeline runs in.
///
/// `Op<T>` is the context's operation type; [`of`](Context::of) lifts a pure
/// value and [`and_then`](Context::and_then) sequences two operations. These
/// two are the entire interface the pipeline core relies on.
pub trait Context: 'static {
    /// An operation in this context that produces a `T` when run.
    type Op<T: 'static>: 'static;

    /// Lift a plain value into a no-op operation yielding that value.
    fn of<T: 'static>(value: T) -> Self::Op<T>;

    /// Sequence `op` into the operation produced by `next`.
    fn and_then<T, U, F>(op: Self::Op<T>, next: F) -> Self::Op<U>
    where
        T: 'static,
        U: 'static,
        F: FnOnce(T) -> Self::Op<U> + 'static;
}

/// Map the value inside an operation.
///
/// Shorthand for [`Context::and_then`] followed by [`Context::of`].
pub fn map_op<C, T, U, F>(op: C::Op<T>, f: F) -> C::Op<U>
where
    C: Context,
    T: 'static,
    U: 'static,
    F: FnOnce(T) -> U + 'static,
{
    C::and_then(op, |value| C::of(f(value)))
}

/// The strict context: operations are plain values.
///
/// # Examples
///
/// ```rust
/// use duplex::context::{Context, Identity};
///
/// assert_eq!(Identity::of(7), 7);
/// assert_eq!(Identity::and_then(7, |n| n + 1), 8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity;

impl Context for Identity {
    type Op<T: 'static> = T;

    fn of<T: 'static>(value: T) -> T {
        value
    }

    fn and_then<T, U, F>(op: T, next: F) -> U
    where
        T: 'static,
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        next(op)
    }
}

/// The deferred context: operations are thunks, run only when called.
///
/// This is the context of choice for tests that need to assert an effect ran
/// a particular number of times, since building a pipeline in `Deferred`
/// performs no work at all.
///
/// # Examples
///
/// ```rust
/// use duplex::context::{Context, Deferred};
///
/// let op = Deferred::and_then(Deferred::of("a"), |s| Deferred::of(format!("{s}b")));
/// assert_eq!(op(), "ab");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Deferred;

impl Context for Deferred {
    type Op<T: 'static> = Box<dyn FnOnce() -> T>;

    fn of<T: 'static>(value: T) -> Self::Op<T> {
        Box::new(move || value)
    }

    fn and_then<T, U, F>(op: Self::Op<T>, next: F) -> Self::Op<U>
    where
        T: 'static,
        U: 'static,
        F: FnOnce(T) -> Self::Op<U> + 'static,
    {
        Box::new(move || next(op())())
    }
}

/// The failing context: operations are `Result`s over a fixed error type.
///
/// An `Err` action short-circuits all later sequencing, so a failing effect
/// aborts the driver with that error before the pipeline reaches completion.
///
/// # Examples
///
/// ```rust
/// use duplex::context::{Context, Fallible};
///
/// let ok: Result<i32, &str> = Fallible::and_then(Fallible::of(1), |n| Ok(n + 1));
/// assert_eq!(ok, Ok(2));
///
/// let err: Result<i32, &str> = Fallible::and_then(Err("boom"), |n: i32| Ok(n + 1));
/// assert_eq!(err, Err("boom"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<E>(PhantomData<fn() -> E>);

impl<E: 'static> Context for Fallible<E> {
    type Op<T: 'static> = Result<T, E>;

    fn of<T: 'static>(value: T) -> Result<T, E> {
        Ok(value)
    }

    fn and_then<T, U, F>(op: Result<T, E>, next: F) -> Result<U, E>
    where
        T: 'static,
        U: 'static,
        F: FnOnce(T) -> Result<U, E> + 'static,
    {
        op.and_then(next)
    }
}
