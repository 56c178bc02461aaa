#![forbid(unsafe_code)]

//! Multi-parent aggregation: one cell tracking the latest value of N inputs.
//!
//! # Design
//!
//! [`combine`] takes read-only views ([`Readable`]) of its inputs, so cells
//! with different incoming types can feed the same aggregate. Each input gets
//! a listener that overwrites its slot in a shared latest-values buffer and
//! pushes a clone of the whole buffer into the combined cell. The combined
//! cell itself is a plain identity-replace cell; aggregation lives entirely
//! in the wiring.
//!
//! Delivered aggregates are cloned per push: a listener that keeps a value
//! it was handed holds a snapshot, not a window onto later updates.
//!
//! # Invariants
//!
//! 1. The initial aggregate is every input's value at combine time, in
//!    argument order.
//! 2. After any single input's change, the aggregate has that input's slot
//!    updated and every other slot equal to its input's last-known value.
//! 3. One combined-cell notification per input change.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::{Cell, Readable};

/// Aggregate N same-typed inputs into a cell holding a `Vec` of their latest
/// values, positionally aligned with the input order.
pub fn combine<T: Clone + 'static>(inputs: &[&dyn Readable<T>]) -> Cell<Vec<T>, Vec<T>> {
    let latest: Vec<T> = inputs.iter().map(|input| input.pull()).collect();
    let combined = Cell::with_transition(|_, incoming: Vec<T>| incoming, latest.clone());

    let shared = Rc::new(RefCell::new(latest));
    for (slot, input) in inputs.iter().enumerate() {
        let latest = Rc::clone(&shared);
        let downstream = combined.clone();
        input.subscribe(Box::new(move |v| {
            latest.borrow_mut()[slot] = v.clone();
            let snapshot = latest.borrow().clone();
            downstream.push(snapshot);
        }));
    }

    combined
}

/// Aggregate two inputs of independent types into a pair-valued cell.
pub fn combine2<A, B>(a: &impl Readable<A>, b: &impl Readable<B>) -> Cell<(A, B), (A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    let shared = Rc::new(RefCell::new((a.pull(), b.pull())));
    let initial = shared.borrow().clone();
    let combined = Cell::with_transition(|_, incoming: (A, B)| incoming, initial);

    {
        let latest = Rc::clone(&shared);
        let downstream = combined.clone();
        a.subscribe(Box::new(move |v| {
            latest.borrow_mut().0 = v.clone();
            let snapshot = latest.borrow().clone();
            downstream.push(snapshot);
        }));
    }
    {
        let latest = shared;
        let downstream = combined.clone();
        b.subscribe(Box::new(move |v| {
            latest.borrow_mut().1 = v.clone();
            let snapshot = latest.borrow().clone();
            downstream.push(snapshot);
        }));
    }

    combined
}

/// Aggregate three inputs of independent types into a triple-valued cell.
pub fn combine3<A, B, C>(
    a: &impl Readable<A>,
    b: &impl Readable<B>,
    c: &impl Readable<C>,
) -> Cell<(A, B, C), (A, B, C)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    let shared = Rc::new(RefCell::new((a.pull(), b.pull(), c.pull())));
    let initial = shared.borrow().clone();
    let combined = Cell::with_transition(|_, incoming: (A, B, C)| incoming, initial);

    {
        let latest = Rc::clone(&shared);
        let downstream = combined.clone();
        a.subscribe(Box::new(move |v| {
            latest.borrow_mut().0 = v.clone();
            let snapshot = latest.borrow().clone();
            downstream.push(snapshot);
        }));
    }
    {
        let latest = Rc::clone(&shared);
        let downstream = combined.clone();
        b.subscribe(Box::new(move |v| {
            latest.borrow_mut().1 = v.clone();
            let snapshot = latest.borrow().clone();
            downstream.push(snapshot);
        }));
    }
    {
        let latest = shared;
        let downstream = combined.clone();
        c.subscribe(Box::new(move |v| {
            latest.borrow_mut().2 = v.clone();
            let snapshot = latest.borrow().clone();
            downstream.push(snapshot);
        }));
    }

    combined
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_aggregate_in_argument_order() {
        let a = Cell::new(1);
        let b = Cell::new(2);
        let c = Cell::new(3);
        let all = combine(&[&a, &b, &c]);
        assert_eq!(all.pull(), vec![1, 2, 3]);
    }

    #[test]
    fn single_input_change_updates_only_its_slot() {
        let a = Cell::new(10);
        let b = Cell::new(20);
        let pair = combine(&[&a, &b]);

        a.push(11);
        assert_eq!(pair.pull(), vec![11, 20]);

        b.push(21);
        assert_eq!(pair.pull(), vec![11, 21]);
    }

    #[test]
    fn inputs_with_different_incoming_types_aggregate() {
        let x = Cell::new(2);
        let y = Cell::new(3);
        // Cell<Vec<i32>, i32> and Cell<i32, i32> behind the same view type.
        let sum = combine(&[&x, &y]).map(|v| v.iter().sum::<i32>());
        let doubled = x.map(|v| v * 2);

        let all = combine(&[&sum, &doubled]);
        assert_eq!(all.pull(), vec![5, 4]);

        x.push(5);
        assert_eq!(all.pull(), vec![8, 10]);
    }

    #[test]
    fn one_notification_per_input_change() {
        let a = Cell::new(0);
        let b = Cell::new(0);
        let pair = combine(&[&a, &b]);

        let count = Rc::new(RefCell::new(0u32));
        let c = Rc::clone(&count);
        pair.on_change(move |_| *c.borrow_mut() += 1);

        a.push(1);
        b.push(2);
        a.push(3);
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn delivered_aggregate_is_a_snapshot() {
        let a = Cell::new(1);
        let b = Cell::new(2);
        let pair = combine(&[&a, &b]);

        let held = Rc::new(RefCell::new(Vec::new()));
        let h = Rc::clone(&held);
        pair.on_change(move |v| *h.borrow_mut() = v.clone());

        a.push(9);
        let first = held.borrow().clone();
        b.push(8);
        // The value delivered for the first change is unaffected by the second.
        assert_eq!(first, vec![9, 2]);
        assert_eq!(pair.pull(), vec![9, 8]);
    }

    #[test]
    fn combine2_pairs_heterogeneous_types() {
        let count = Cell::new(3);
        let label = Cell::new("items".to_string());
        let pair = combine2(&count, &label);
        assert_eq!(pair.pull(), (3, "items".to_string()));

        count.push(4);
        assert_eq!(pair.pull(), (4, "items".to_string()));

        label.push("boxes".to_string());
        assert_eq!(pair.pull(), (4, "boxes".to_string()));
    }

    #[test]
    fn combine3_tracks_all_slots() {
        let a = Cell::new(1u8);
        let b = Cell::new(2.5f64);
        let c = Cell::new(true);
        let triple = combine3(&a, &b, &c);
        assert_eq!(triple.pull(), (1, 2.5, true));

        c.push(false);
        b.push(0.5);
        assert_eq!(triple.pull(), (1, 0.5, false));
    }

    #[test]
    fn combined_cell_derives_like_any_other() {
        let x = Cell::new(3);
        let y = Cell::new(4);
        let sum = combine(&[&x, &y]).map(|v| v.iter().sum::<i32>());
        assert_eq!(sum.pull(), 7);

        x.push(12);
        assert_eq!(sum.pull(), 16);
    }
}
