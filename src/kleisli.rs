//! Kleisli composition: treating parameterized stages as composable arrows.
//!
//! A parameterized stage is a function from a query to a [`Duplex`]. This
//! module composes two of them end-to-end with the fusion operators from
//! [`fuse`](crate::fuse), so pipelines assemble point-free, without naming
//! the intermediate connection.
//!
//! [`transparent`] is the two-sided identity for this composition: it
//! forwards every query upstream and every answer downstream unchanged.

use crate::context::Context;
use crate::fuse::{feed, push};
use crate::pipe::Duplex;

/// Compose two stages pull-style: every upstream request `down` makes is
/// satisfied by `up`.
///
/// The result is itself a parameterized stage, taking the outer downstream
/// query.
pub fn compose_pull<Uq, Ua, Mq, Ma, Dq, Da, C, T, F, G>(
    up: F,
    down: G,
) -> impl FnOnce(Dq) -> Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Mq: 'static,
    Ma: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
    F: FnOnce(Mq) -> Duplex<Uq, Ua, Mq, Ma, C, T> + 'static,
    G: FnOnce(Dq) -> Duplex<Mq, Ma, Dq, Da, C, T> + 'static,
{
    move |query| feed(Box::new(up), down(query))
}

/// Compose two stages push-style: every downstream output `up` produces is
/// consumed by `down`.
///
/// The result takes the answer that starts `up` off.
pub fn compose_push<Uq, Ua, Mq, Ma, Dq, Da, C, T, F, G>(
    up: F,
    down: G,
) -> impl FnOnce(Ua) -> Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Mq: 'static,
    Ma: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
    F: FnOnce(Ua) -> Duplex<Uq, Ua, Mq, Ma, C, T> + 'static,
    G: FnOnce(Ma) -> Duplex<Mq, Ma, Dq, Da, C, T> + 'static,
{
    move |answer| push(up(answer), Box::new(down))
}

/// The identity stage: forward the query upstream, forward the answer
/// downstream, repeat.
///
/// Composing any stage with `transparent` on either side leaves its
/// observable behavior unchanged. It never completes on its own, so its
/// result type is free.
pub fn transparent<Q, A, C, T>(query: Q) -> Duplex<Q, A, Q, A, C, T>
where
    Q: 'static,
    A: 'static,
    C: Context,
    T: 'static,
{
    Duplex::Await(
        query,
        Box::new(|answer| Duplex::Yield(answer, Box::new(transparent))),
    )
}
