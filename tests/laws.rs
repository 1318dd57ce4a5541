//! Algebraic law property tests for the pipeline core.
//!
//! Stages are generated as small command scripts (plain data), interpreted
//! into [`Duplex`] values over the [`Deferred`] context, and compared through
//! the driver: two stages are behaviorally equivalent when they produce the
//! same result and the same ordered effect log.
//!
//! # Laws Tested
//!
//! - sequencing left identity, right identity, associativity
//! - vertical-composition identity via `transparent`
//! - short-circuit on early completion
//! - normalization idempotence, and driver-transparency of `observe`
//! - hoist composition after normalization

use duplex::prelude::*;
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<i32>>>;

/// One suspension point of a generated stage.
#[derive(Clone, Debug)]
enum Cmd {
    /// Yield unit downstream.
    Yield,
    /// Request unit from upstream.
    Await,
    /// Run an effect that records the value into the log.
    Note(i8),
}

fn note(log: &Log, value: i32) -> Box<dyn FnOnce()> {
    let log = Rc::clone(log);
    Box::new(move || log.borrow_mut().push(value))
}

/// Interpret a script into a stage with all-unit boundaries, completing with
/// `result`.
fn script(mut cmds: Vec<Cmd>, result: i32, log: Log) -> Duplex<(), (), (), (), Deferred, i32> {
    if cmds.is_empty() {
        return Duplex::Done(result);
    }
    let cmd = cmds.remove(0);
    match cmd {
        Cmd::Yield => Duplex::Yield((), Box::new(move |()| script(cmds, result, log))),
        Cmd::Await => Duplex::Await((), Box::new(move |()| script(cmds, result, log))),
        Cmd::Note(n) => {
            let op = note(&log, i32::from(n));
            lift(op).and_then(move |()| script(cmds, result, log))
        }
    }
}

/// Drive a stage and report `(result, ordered effect log)`.
fn eval(stage: Duplex<(), (), (), (), Deferred, i32>, log: &Log) -> (i32, Vec<i32>) {
    let result = run_pipe(stage)();
    (result, log.borrow().clone())
}

fn arb_cmds() -> impl Strategy<Value = Vec<Cmd>> {
    prop::collection::vec(
        prop_oneof![
            Just(Cmd::Yield),
            Just(Cmd::Await),
            any::<i8>().prop_map(Cmd::Note),
        ],
        0..8,
    )
}

proptest! {
    #[test]
    fn sequencing_left_identity(cmds in arb_cmds(), r in any::<i32>(), shift in any::<i32>()) {
        let continuation = move |input: i32, cmds: Vec<Cmd>, log: Log| {
            script(cmds, input.wrapping_add(shift), log)
        };

        let log_l: Log = Rc::new(RefCell::new(Vec::new()));
        let lhs = {
            let cmds = cmds.clone();
            let log = Rc::clone(&log_l);
            Duplex::Done(r).and_then(move |t| continuation(t, cmds, log))
        };

        let log_r: Log = Rc::new(RefCell::new(Vec::new()));
        let rhs = continuation(r, cmds, Rc::clone(&log_r));

        prop_assert_eq!(eval(lhs, &log_l), eval(rhs, &log_r));
    }

    #[test]
    fn sequencing_right_identity(cmds in arb_cmds(), r in any::<i32>()) {
        let log_l: Log = Rc::new(RefCell::new(Vec::new()));
        let lhs = script(cmds.clone(), r, Rc::clone(&log_l)).and_then(Duplex::Done);

        let log_r: Log = Rc::new(RefCell::new(Vec::new()));
        let rhs = script(cmds, r, Rc::clone(&log_r));

        prop_assert_eq!(eval(lhs, &log_l), eval(rhs, &log_r));
    }

    #[test]
    fn sequencing_associativity(
        cmds1 in arb_cmds(),
        cmds2 in arb_cmds(),
        cmds3 in arb_cmds(),
        r in any::<i32>(),
        s1 in any::<i32>(),
        s2 in any::<i32>(),
    ) {
        let build = |log: Log, grouped_left: bool| {
            let k1 = {
                let cmds2 = cmds2.clone();
                let log = Rc::clone(&log);
                move |t: i32| script(cmds2, t.wrapping_add(s1), log)
            };
            let k2 = {
                let cmds3 = cmds3.clone();
                let log = Rc::clone(&log);
                move |t: i32| script(cmds3, t.wrapping_mul(s2), log)
            };
            let p = script(cmds1.clone(), r, log);
            if grouped_left {
                p.and_then(k1).and_then(k2)
            } else {
                p.and_then(move |t| k1(t).and_then(k2))
            }
        };

        let log_l: Log = Rc::new(RefCell::new(Vec::new()));
        let lhs = build(Rc::clone(&log_l), true);
        let log_r: Log = Rc::new(RefCell::new(Vec::new()));
        let rhs = build(Rc::clone(&log_r), false);

        prop_assert_eq!(eval(lhs, &log_l), eval(rhs, &log_r));
    }

    #[test]
    fn fusing_with_transparent_changes_nothing(cmds in arb_cmds(), r in any::<i32>()) {
        let log_p: Log = Rc::new(RefCell::new(Vec::new()));
        let plain = script(cmds.clone(), r, Rc::clone(&log_p));

        let log_w: Log = Rc::new(RefCell::new(Vec::new()));
        let wrapped = script(cmds, r, Rc::clone(&log_w)).pull_from(transparent);

        prop_assert_eq!(eval(plain, &log_p), eval(wrapped, &log_w));
    }

    #[test]
    fn observe_is_driver_transparent(cmds in arb_cmds(), r in any::<i32>()) {
        let log_p: Log = Rc::new(RefCell::new(Vec::new()));
        let plain = script(cmds.clone(), r, Rc::clone(&log_p));

        let log_n: Log = Rc::new(RefCell::new(Vec::new()));
        let normalized = observe(script(cmds, r, Rc::clone(&log_n)));

        prop_assert_eq!(eval(plain, &log_p), eval(normalized, &log_n));
    }

    #[test]
    fn observe_is_idempotent(cmds in arb_cmds(), r in any::<i32>()) {
        let log_once: Log = Rc::new(RefCell::new(Vec::new()));
        let once = observe(script(cmds.clone(), r, Rc::clone(&log_once)));

        let log_twice: Log = Rc::new(RefCell::new(Vec::new()));
        let twice = observe(observe(script(cmds, r, Rc::clone(&log_twice))));

        prop_assert_eq!(eval(once, &log_once), eval(twice, &log_twice));
    }

    #[test]
    fn hoist_composes_after_normalization(cmds in arb_cmds(), r in any::<i32>()) {
        let log_n: Log = Rc::new(RefCell::new(Vec::new()));
        let nested = hoist(
            Tag { label: 200, log: Rc::clone(&log_n) },
            hoist(
                Tag { label: 100, log: Rc::clone(&log_n) },
                observe(script(cmds.clone(), r, Rc::clone(&log_n))),
            ),
        );

        let log_c: Log = Rc::new(RefCell::new(Vec::new()));
        let composed = hoist(
            Compose(
                Tag { label: 200, log: Rc::clone(&log_c) },
                Tag { label: 100, log: Rc::clone(&log_c) },
            ),
            observe(script(cmds, r, Rc::clone(&log_c))),
        );

        prop_assert_eq!(eval(nested, &log_n), eval(composed, &log_c));
    }
}

/// Deferred-to-deferred transform that records `label` whenever a wrapped
/// operation runs.
#[derive(Clone)]
struct Tag {
    label: i32,
    log: Log,
}

impl Transform<Deferred> for Tag {
    type Target = Deferred;

    fn apply<T: 'static>(&self, op: Box<dyn FnOnce() -> T>) -> Box<dyn FnOnce() -> T> {
        let label = self.label;
        let log = Rc::clone(&self.log);
        Box::new(move || {
            log.borrow_mut().push(label);
            op()
        })
    }
}

#[test]
fn short_circuit_after_one_exchange() {
    let effects: Log = Rc::new(RefCell::new(Vec::new()));

    // Yields twice, logging before each yield.
    let producer = {
        let effects = Rc::clone(&effects);
        move |()| {
            lift(note(&effects, 1)).and_then({
                let effects = Rc::clone(&effects);
                move |()| {
                    Duplex::Yield(
                        10,
                        Box::new(move |()| {
                            lift(note(&effects, 2)).and_then(|()| {
                                Duplex::Yield(20, Box::new(|()| Duplex::Done(-1)))
                            })
                        }),
                    )
                }
            })
        }
    };

    // Requests once, then completes with that answer.
    let consumer: Duplex<(), i32, (), (), Deferred, i32> =
        Duplex::Await((), Box::new(Duplex::Done));

    let result = run_pipe(consumer.pull_from(producer))();
    assert_eq!(result, 10);
    assert_eq!(&*effects.borrow(), &[1]);
}

#[test]
fn three_value_pipeline_scenario() {
    let effects: Log = Rc::new(RefCell::new(Vec::new()));
    let seen: Log = Rc::new(RefCell::new(Vec::new()));

    fn produce(n: i32, effects: Log) -> Duplex<(), (), (), i32, Deferred, &'static str> {
        if n > 3 {
            return Duplex::Done("done");
        }
        lift(note(&effects, n))
            .and_then(move |()| Duplex::Yield(n, Box::new(move |()| produce(n + 1, effects))))
    }

    fn consume(left: usize, seen: Log) -> Duplex<(), i32, (), (), Deferred, &'static str> {
        if left == 0 {
            // One final request lets the producer's completion surface.
            return Duplex::Await((), Box::new(|_| Duplex::Done("consumer resumed past end")));
        }
        Duplex::Await(
            (),
            Box::new(move |answer| {
                seen.borrow_mut().push(answer);
                consume(left - 1, seen)
            }),
        )
    }

    let fused = consume(3, Rc::clone(&seen)).pull_from({
        let effects = Rc::clone(&effects);
        move |()| produce(1, effects)
    });

    // Nothing runs until the deferred operation is forced.
    assert!(effects.borrow().is_empty());
    let result = run_pipe(fused)();

    assert_eq!(result, "done");
    assert_eq!(&*seen.borrow(), &[1, 2, 3]);
    assert_eq!(&*effects.borrow(), &[1, 2, 3]);
}
