//! Normalization: rewriting a stage into its law-abiding canonical form.
//!
//! Sequencing builds a deliberately cheap representation: it distributes
//! over [`Duplex::Effect`] structurally instead of going through the
//! context's own sequencing. The driver and further sequencing cannot tell
//! the difference, but code that matches on variants directly (effect
//! hoisting, or anything outside this crate's safe operation set) can.
//!
//! [`observe`] restores the canonical form: any run of chained or deferred
//! effects collapses into exactly one context hop in front of the next real
//! suspension point, and the rewrite recurses lazily into each continuation.
//! The price is that one hop even where none was structurally necessary,
//! which is why normalization is opt-in rather than built into sequencing.

use crate::context::Context;
use crate::pipe::Duplex;

/// Rewrite `stage` so its structure satisfies the sequencing laws under
/// direct inspection.
///
/// Idempotent up to driver observation: `observe(observe(p))` behaves like
/// `observe(p)`, and both behave like `p` itself when only driven.
///
/// # Examples
///
/// ```rust
/// use duplex::prelude::*;
///
/// let stage: Duplex<(), (), (), (), Identity, i32> = done(1).and_then(|n| done(n + 1));
/// // The canonical form always fronts a single effect hop.
/// assert!(matches!(observe(stage), Duplex::Effect(_)));
/// ```
pub fn observe<Uq, Ua, Dq, Da, C, T>(
    stage: Duplex<Uq, Ua, Dq, Da, C, T>,
) -> Duplex<Uq, Ua, Dq, Da, C, T>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
{
    Duplex::Effect(Box::new(settle(stage)))
}

/// Run down the chain of effect nodes inside the context until a real
/// suspension point shows up, then re-wrap its children for later
/// normalization.
fn settle<Uq, Ua, Dq, Da, C, T>(
    stage: Duplex<Uq, Ua, Dq, Da, C, T>,
) -> C::Op<Duplex<Uq, Ua, Dq, Da, C, T>>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    T: 'static,
{
    match stage {
        Duplex::Effect(op) => C::and_then(*op, settle),
        Duplex::Done(value) => C::of(Duplex::Done(value)),
        Duplex::Await(query, resume) => C::of(Duplex::Await(
            query,
            Box::new(move |answer| observe(resume(answer))),
        )),
        Duplex::Yield(answer, resume) => C::of(Duplex::Yield(
            answer,
            Box::new(move |query| observe(resume(query))),
        )),
    }
}
