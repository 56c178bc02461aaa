// Forbid unsafe in production; deny in tests (panic-propagation tests use
// catch_unwind, no unsafe needed anywhere).
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! flowcell: synchronous reactive cells.
//!
//! # Role
//! A [`Cell`] holds a current value, notifies listeners synchronously when it
//! changes, and derives new cells by mapping, reducing, filtering, or
//! combining existing ones. Cells form a directed acyclic dependency graph;
//! pushing into a source cell propagates depth-first through every reachable
//! derived cell before `push` returns.
//!
//! # Primary responsibilities
//! - **[`Cell`]**: value storage, transition application, ordered listener
//!   notification (`push` / `push_all` / `on_change` / `pull`).
//! - **Derivation**: [`Cell::map`], [`Cell::reduce`], [`Cell::filter`] for
//!   single-parent cells; [`combine`], [`combine2`], [`combine3`] for
//!   multi-parent aggregation over the [`Readable`] view.
//!
//! # What this crate deliberately does not do
//! No scheduler, no batching, no cycle detection, no unsubscribe, no error
//! isolation between listeners. Propagation is plain re-entrant function
//! calls on a single logical thread; a panicking callback surfaces to the
//! caller of `push` with the graph left partially updated.
//!
//! # Example
//! ```
//! use flowcell::{Cell, combine};
//!
//! let x = Cell::new(3);
//! let y = Cell::new(4);
//! let sum = combine(&[&x, &y]).map(|v| v.iter().sum::<i32>());
//! assert_eq!(sum.pull(), 7);
//!
//! x.push(12);
//! assert_eq!(sum.pull(), 16);
//! ```

pub mod cell;
pub mod combine;

pub use cell::{Cell, Readable};
pub use combine::{combine, combine2, combine3};
