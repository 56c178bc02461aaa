#![forbid(unsafe_code)]

//! The reactive cell primitive and its single-parent derivation operators.
//!
//! # Design
//!
//! [`Cell<S, T>`] holds a current value of type `T` in shared,
//! reference-counted storage (`Rc<RefCell<..>>`) together with a transition
//! function `Fn(&T, S) -> T` and an append-only list of change listeners.
//! Pushing a value of type `S` applies the transition, stores the result,
//! and notifies every listener with the new value, in registration order,
//! before `push` returns.
//!
//! Every derivation operator reduces to the same move: construct a cell
//! with some transition, then register a listener on the parent that pushes
//! into it. There is no operator-specific cell kind.
//!
//! # Invariants
//!
//! 1. The stored state is exactly the result of the last applied transition;
//!    `push_all` applies each value's full transition-and-notify cycle before
//!    the next value is touched.
//! 2. Listeners are notified in registration order, once per applied push —
//!    there is no equality gating, so pushing the current value again still
//!    notifies.
//! 3. The listener list is append-only; a registered listener lives as long
//!    as the cell.
//! 4. No `RefCell` borrow is held while a transition or listener runs, so a
//!    listener may push into any cell — including the one currently
//!    notifying — and the nested push completes synchronously before the
//!    outer notification pass resumes with its own pre-captured snapshot.
//!
//! # Failure Modes
//!
//! - **Listener panic**: a panicking listener aborts the notification pass
//!   mid-list and the panic surfaces to the caller of `push`. Listeners
//!   earlier in the list (and everything downstream of them) already reflect
//!   the new value; later ones do not. There is no rollback.
//! - **Listener leak**: there is no unsubscribe. A listener that captures a
//!   cell keeps that cell's interior alive for the parent's lifetime.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A change listener, shared so the dispatch loop can release the list
/// borrow between calls.
type Listener<T> = Rc<dyn Fn(&T)>;

/// Shared interior for [`Cell<S, T>`].
struct CellInner<S, T> {
    state: RefCell<T>,
    transition: Box<dyn Fn(&T, S) -> T>,
    listeners: RefCell<Vec<Listener<T>>>,
}

/// A reactive cell: a current value plus the transition function that
/// advances it and the listeners notified when it does.
///
/// `S` is the incoming-value type accepted by [`push`](Cell::push); `T` is
/// the stored state type. A source cell built with [`Cell::new`] has `S = T`
/// and identity-replace semantics: the incoming value becomes the state
/// verbatim.
///
/// Cloning a `Cell` creates a new handle to the **same** cell — both handles
/// see the same state and share the same listener list.
pub struct Cell<S, T> {
    inner: Rc<CellInner<S, T>>,
}

// Manual Clone: shares the same Rc.
impl<S, T> Clone for Cell<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, T: fmt::Debug> fmt::Debug for Cell<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("state", &self.inner.state.borrow())
            .field("listener_count", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> Cell<T, T> {
    /// Create a source cell holding `initial`.
    ///
    /// The transition ignores the current state and returns the incoming
    /// value unchanged, so `push(v)` sets the state to `v`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_transition(|_, incoming| incoming, initial)
    }
}

impl<S: 'static, T: Clone + 'static> Cell<S, T> {
    /// Construct a cell from a transition function and an initial state.
    /// Every operator in this crate bottoms out here.
    pub(crate) fn with_transition(
        transition: impl Fn(&T, S) -> T + 'static,
        state: T,
    ) -> Self {
        Self {
            inner: Rc::new(CellInner {
                state: RefCell::new(state),
                transition: Box::new(transition),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Apply one value: compute `transition(&state, value)`, store it, then
    /// notify every listener with the new value in registration order.
    ///
    /// The notification pass re-borrows the listener list per step, so
    /// listeners registered mid-pass are visited for this value, and a
    /// listener may push into any cell (this one included) without
    /// deadlocking the pass.
    pub fn push(&self, value: S) {
        let current = self.inner.state.borrow().clone();
        let next = (self.inner.transition)(&current, value);
        *self.inner.state.borrow_mut() = next.clone();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            listeners = self.inner.listeners.borrow().len(),
            "cell push applied"
        );

        let mut idx = 0;
        loop {
            let listener = {
                let listeners = self.inner.listeners.borrow();
                match listeners.get(idx) {
                    Some(l) => Rc::clone(l),
                    None => break,
                }
            };
            listener(&next);
            idx += 1;
        }
    }

    /// Apply each value, left to right, as a separate full push cycle: a
    /// value's entire downstream cascade completes before the next value
    /// is applied.
    pub fn push_all<I>(&self, values: I)
    where
        I: IntoIterator<Item = S>,
    {
        for value in values {
            self.push(value);
        }
    }

    /// Register a change listener. Listeners run in registration order on
    /// every applied push. There is no unsubscribe.
    pub fn on_change(&self, listener: impl Fn(&T) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Get a clone of the current state. Pure read, no side effects.
    #[must_use]
    pub fn pull(&self) -> T {
        self.inner.state.borrow().clone()
    }

    /// Access the current state by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Derive a cell whose value is always `f` applied to this cell's
    /// latest value.
    ///
    /// The derived cell is seeded eagerly with `f` of the current state, so
    /// it is never transiently uninitialized.
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Cell<T, U> {
        let initial = self.with(|v| f(v));
        let mapped = Cell::with_transition(move |_, incoming: T| f(&incoming), initial);
        let downstream = mapped.clone();
        self.on_change(move |v| downstream.push(v.clone()));
        mapped
    }

    /// Derive a cell that folds every value this cell takes on into a
    /// running accumulator, starting from `initial`.
    ///
    /// Unlike the other operators, the derived cell is NOT seeded from this
    /// cell's current state: the fold starts at `initial` and only values
    /// pushed after derivation enter it.
    pub fn reduce<U: Clone + 'static>(
        &self,
        f: impl Fn(&U, T) -> U + 'static,
        initial: U,
    ) -> Cell<T, U> {
        let folded = Cell::with_transition(f, initial);
        let downstream = folded.clone();
        self.on_change(move |v| downstream.push(v.clone()));
        folded
    }

    /// Derive a cell holding the sub-sequence of this cell's values for
    /// which `pred` returns true, seeded with the current state (the seed is
    /// not tested against `pred`).
    ///
    /// Values failing the predicate are dropped silently: no state change,
    /// no notification on the derived cell.
    pub fn filter(&self, pred: impl Fn(&T) -> bool + 'static) -> Cell<T, T> {
        let gated = Cell::with_transition(|_, incoming: T| incoming, self.pull());
        let downstream = gated.clone();
        self.on_change(move |v| {
            if pred(v) {
                downstream.push(v.clone());
            }
        });
        gated
    }
}

/// Object-safe read-only view of a cell: the seam [`combine`] consumes.
///
/// Implemented by every `Cell<S, T>` regardless of its incoming type `S`,
/// which is what lets cells with different transition shapes aggregate into
/// one combined cell.
///
/// [`combine`]: crate::combine::combine
pub trait Readable<T> {
    /// Clone of the current state.
    fn pull(&self) -> T;

    /// Register a boxed change listener. Same ordering and lifetime rules
    /// as [`Cell::on_change`].
    fn subscribe(&self, listener: Box<dyn Fn(&T)>);
}

impl<S: 'static, T: Clone + 'static> Readable<T> for Cell<S, T> {
    fn pull(&self) -> T {
        Cell::pull(self)
    }

    fn subscribe(&self, listener: Box<dyn Fn(&T)>) {
        self.inner.listeners.borrow_mut().push(Rc::from(listener));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
