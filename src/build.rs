//! Ready-made stages for the common ends of a pipeline.
//!
//! Everything here is expressible with the primitives in
//! [`pipe`](crate::pipe); these are the shapes that show up in almost every
//! pipeline, pre-built.

use crate::context::Context;
use crate::pipe::Duplex;

/// A producer stage that yields every item of `items` in order, then
/// completes with `()`.
///
/// Downstream queries are unit: the stage yields on demand but ignores what
/// the demand says.
///
/// # Examples
///
/// ```rust
/// use duplex::prelude::*;
///
/// let mut stage = each::<_, (), (), Identity>(vec!["a", "b"]);
/// for expected in ["a", "b"] {
///     stage = match stage {
///         Duplex::Yield(item, resume) => {
///             assert_eq!(item, expected);
///             resume(())
///         }
///         _ => unreachable!(),
///     };
/// }
/// assert!(stage.is_done());
/// ```
pub fn each<I, Uq, Ua, C>(items: I) -> Duplex<Uq, Ua, (), <I::IntoIter as Iterator>::Item, C, ()>
where
    I: IntoIterator,
    I::IntoIter: 'static,
    <I::IntoIter as Iterator>::Item: 'static,
    Uq: 'static,
    Ua: 'static,
    C: Context,
{
    fn step<It, Uq, Ua, C>(mut items: It) -> Duplex<Uq, Ua, (), It::Item, C, ()>
    where
        It: Iterator + 'static,
        It::Item: 'static,
        Uq: 'static,
        Ua: 'static,
        C: Context,
    {
        match items.next() {
            Some(item) => Duplex::Yield(item, Box::new(move |()| step(items))),
            None => Duplex::Done(()),
        }
    }
    step(items.into_iter())
}

/// A consumer stage that requests `count` values from upstream and completes
/// with the answers, in arrival order.
pub fn collect<Ua, Dq, Da, C>(count: usize) -> Duplex<(), Ua, Dq, Da, C, Vec<Ua>>
where
    Ua: 'static,
    Dq: 'static,
    Da: 'static,
    C: Context,
{
    fn gather<Ua, Dq, Da, C>(acc: Vec<Ua>, left: usize) -> Duplex<(), Ua, Dq, Da, C, Vec<Ua>>
    where
        Ua: 'static,
        Dq: 'static,
        Da: 'static,
        C: Context,
    {
        if left == 0 {
            return Duplex::Done(acc);
        }
        Duplex::Await(
            (),
            Box::new(move |answer| {
                let mut acc = acc;
                acc.push(answer);
                gather(acc, left - 1)
            }),
        )
    }
    gather(Vec::with_capacity(count), count)
}
