//! Re-basing a pipeline onto a different effect context.
//!
//! [`hoist`] maps every [`Duplex::Effect`] action through a [`Transform`],
//! embedding a pipeline built for one [`Context`] into another. Because Rust
//! has no polymorphic closures, a transform is a trait with a generic
//! `apply` method rather than a plain function.
//!
//! Hoisting inspects the structure of its input directly, so it only applies
//! the transform at the effect nodes that structurally exist. Run the stage
//! through [`observe`](crate::observe::observe) first to guarantee every
//! suspension point carries exactly one context hop; hoisting a raw stage
//! may apply the transform at a different point relative to effects that
//! sequencing deferred into it.

use either::Either;

use crate::context::Context;
use crate::pipe::Duplex;

/// A context-to-context mapping, applied uniformly at every value type.
pub trait Transform<C: Context> {
    /// The context operations are mapped into.
    type Target: Context;

    /// Map one operation into the target context.
    fn apply<T: 'static>(&self, op: C::Op<T>) -> <Self::Target as Context>::Op<T>;
}

/// Two transforms applied in sequence: the second field first, then the first.
///
/// `Compose(g, f)` is the transform `hoist(g, hoist(f, ..))` collapses to.
#[derive(Debug, Clone, Copy)]
pub struct Compose<G, F>(pub G, pub F);

impl<C, F, G> Transform<C> for Compose<G, F>
where
    C: Context,
    F: Transform<C>,
    G: Transform<F::Target>,
{
    type Target = G::Target;

    fn apply<T: 'static>(&self, op: C::Op<T>) -> <G::Target as Context>::Op<T> {
        self.0.apply(self.1.apply(op))
    }
}

impl<C, L, R> Transform<C> for Either<L, R>
where
    C: Context,
    L: Transform<C>,
    R: Transform<C, Target = L::Target>,
{
    type Target = L::Target;

    fn apply<T: 'static>(&self, op: C::Op<T>) -> <L::Target as Context>::Op<T> {
        match self {
            Either::Left(l) => l.apply(op),
            Either::Right(r) => r.apply(op),
        }
    }
}

/// Map every effect node of `stage` through `nat`.
///
/// The continuation inside each effect is re-based in the source context
/// first, so `nat` is applied exactly once per effect node. See the
/// [module docs](self) for the normalize-first precondition.
pub fn hoist<Uq, Ua, Dq, Da, C, N, T>(
    nat: N,
    stage: Duplex<Uq, Ua, Dq, Da, C, T>,
) -> Duplex<Uq, Ua, Dq, Da, N::Target, T>
where
    Uq: 'static,
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
    N: Transform<C> + Clone + 'static,
    T: 'static,
{
    match stage {
        Duplex::Await(query, resume) => {
            Duplex::Await(query, Box::new(move |answer| hoist(nat, resume(answer))))
        }
        Duplex::Yield(answer, resume) => {
            Duplex::Yield(answer, Box::new(move |query| hoist(nat, resume(query))))
        }
        Duplex::Effect(op) => {
            let rebased = C::and_then(*op, {
                let nat = nat.clone();
                move |next| C::of(hoist(nat, next))
            });
            Duplex::Effect(Box::new(nat.apply(rebased)))
        }
        Duplex::Done(value) => Duplex::Done(value),
    }
}
