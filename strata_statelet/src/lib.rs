// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Statelet: composable, `no_std` units of state and behavior.
//!
//! ## Overview
//!
//! A [`Statelet`] pairs a state type with a pure reducer, an acceptor gate, a spawner of
//! follow-up actions, and a bundle of action constructors.
//! Statelets compose into larger statelets; every combinator returns a [`Statelet`] again.
//!
//! - [`create`]: build an atomic statelet from a reducer, with optional acceptor and spawner.
//! - [`combine`]: product of two statelets over `(S1, S2)` and a composite action space.
//! - [`merge`]: [`combine`] under the left operand's name.
//! - [`combine_with`]: two statelets over one shared state, with an explicit merge of overlapping results.
//! - [`embed`]: relocate a statelet's state into a field of an enclosing state.
//! - [`array`]: lift a statelet over an ordered sequence of its state, with add/remove and targeting.
//!
//! ## Actions
//!
//! Actions are ordinary Rust values, usually one `enum` per statelet.
//! Composite action spaces declare which operand actions they contain through
//! [`Narrow`](crate::action::Narrow); every type narrows to itself, so operands that share one action
//! type all see every action.
//! [`target`](crate::action::target) addresses an action to matching elements of an [`array`].
//!
//! ## Driving statelets
//!
//! This crate only describes transitions.
//! `strata_dispatch` owns a state value and drains cascades of spawned actions through a statelet.
//!
//! ## Example
//!
//! ```
//! use strata_statelet::{Statelet, combine, create};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Pos {
//!     x: i32,
//!     y: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum Move {
//!     To(i32, i32),
//!     By(i32, i32),
//! }
//!
//! let positional = create("positional", |s: &Pos, a: &Move| match *a {
//!     Move::To(x, y) => Pos { x, y },
//!     Move::By(dx, dy) => Pos { x: s.x + dx, y: s.y + dy },
//! })
//! .with_actions(());
//!
//! // A character and the shadow that follows it respond to the same moves.
//! let pair = combine::<Move, _, _>("with_shadow", &positional, &positional);
//! let (next, spawned) = pair.process(&(Pos { x: 0, y: 0 }, Pos { x: 0, y: 1 }), &Move::By(2, 2));
//! assert_eq!(next, (Pos { x: 2, y: 2 }, Pos { x: 2, y: 3 }));
//! assert!(spawned.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod action;
pub mod array;
pub mod combine;
pub mod embed;
pub mod statelet;

pub use action::{Action, Narrow, Targeted, target};
pub use array::{Array, ArrayAction, ArrayActions, array};
pub use combine::{Combine, CombineWith, combine, combine_with, merge};
pub use embed::{Embed, embed};
pub use statelet::{AcceptAll, Basic, SpawnNone, Statelet, StateletBuilder, create};
