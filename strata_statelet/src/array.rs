// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lift a statelet over an ordered collection of its state.
//!
//! ## Overview
//!
//! [`array`] turns a statelet over `S` into a statelet over `Vec<S>`.
//! The sequence keeps insertion order and may hold duplicates.
//!
//! Its action type [`ArrayAction`] is closed: it either adds an element, removes elements, or
//! carries one of the inner statelet's actions with an optional target descriptor.
//! The add/remove markers are private to this module, so they never collide with the inner
//! statelet's own actions.
//!
//! ## Targeting
//!
//! An identity function `id(element, descriptor) -> bool` supplied at construction is the only
//! matching rule. It may match zero, one, or many elements.
//!
//! - `add(e)` appends `e` to the tail.
//! - `remove(v)` removes every element for which `id(e, v)` holds.
//! - An inner action with `target: Some(v)` is reduced only on matching elements; the others are
//!   carried over unchanged. With `target: None` it is reduced on every element.
//!
//! ## Gating and spawning
//!
//! - Add and remove are always accepted and spawn nothing.
//! - An inner action is accepted only if every element accepts it (an empty sequence accepts).
//!   There is no partial application.
//! - Spawned inner actions are concatenated in sequence order and carry no target: each one is
//!   broadcast to the whole sequence, even when the triggering action was targeted.
//!
//! ```
//! use strata_statelet::{Statelet, array, create};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Hp(i32);
//!
//! let hitable = create("hitable", |s: &Hp, n: &i32| Hp(s.0 - n)).with_actions(());
//! let list = array("hitables", hitable, |s: &Hp, t: &i32| s.0 == *t);
//!
//! let ops = list.actions();
//! let mut s = list.instance(Vec::new());
//! for hp in [10, 11, 100] {
//!     s = list.reduce(&s, &ops.add(Hp(hp)));
//! }
//! s = list.reduce(&s, &ops.remove(11));
//! assert_eq!(s, vec![Hp(10), Hp(100)]);
//!
//! s = list.reduce(&s, &ops.target(1, 100));
//! assert_eq!(s, vec![Hp(10), Hp(99)]);
//! ```

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::action::Targeted;
use crate::statelet::Statelet;

#[derive(Clone, Debug, PartialEq)]
enum Op<S, A, V> {
    Add(S),
    Remove(V),
    Item(Targeted<A, V>),
}

/// Action of an [`array`] statelet over elements `S`, inner actions `A`, and descriptors `V`.
///
/// Build one with [`ArrayAction::add`], [`ArrayAction::remove`], [`ArrayAction::broadcast`],
/// or from a [`Targeted`] action (see [`target`](crate::action::target)).
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayAction<S, A, V>(Op<S, A, V>);

impl<S, A, V> ArrayAction<S, A, V> {
    /// Append `element` to the tail of the sequence.
    pub fn add(element: S) -> Self {
        Self(Op::Add(element))
    }

    /// Remove every element matching `descriptor`.
    pub fn remove(descriptor: V) -> Self {
        Self(Op::Remove(descriptor))
    }

    /// Apply an inner action to every element.
    pub fn broadcast(action: A) -> Self {
        Self(Op::Item(Targeted::broadcast(action)))
    }

    /// The inner action and its target, if this is not an add or remove.
    pub fn as_item(&self) -> Option<&Targeted<A, V>> {
        match &self.0 {
            Op::Item(t) => Some(t),
            Op::Add(_) | Op::Remove(_) => None,
        }
    }

    /// True for an add action.
    pub fn is_add(&self) -> bool {
        matches!(self.0, Op::Add(_))
    }

    /// True for a remove action.
    pub fn is_remove(&self) -> bool {
        matches!(self.0, Op::Remove(_))
    }
}

impl<S, A, V> From<Targeted<A, V>> for ArrayAction<S, A, V> {
    fn from(t: Targeted<A, V>) -> Self {
        Self(Op::Item(t))
    }
}

/// Action bundle of an [`array`] statelet: the built-in collection actions plus the inner bundle.
pub struct ArrayActions<S, A, V, O> {
    inner: O,
    _phantom: PhantomData<fn(S, A, V)>,
}

impl<S, A, V, O> ArrayActions<S, A, V, O> {
    /// Append `element` to the tail of the sequence.
    pub fn add(&self, element: S) -> ArrayAction<S, A, V> {
        ArrayAction::add(element)
    }

    /// Remove every element matching `descriptor`.
    pub fn remove(&self, descriptor: V) -> ArrayAction<S, A, V> {
        ArrayAction::remove(descriptor)
    }

    /// Apply an inner action to every element.
    pub fn broadcast(&self, action: A) -> ArrayAction<S, A, V> {
        ArrayAction::broadcast(action)
    }

    /// Apply an inner action only to elements matching `descriptor`.
    pub fn target(&self, action: A, descriptor: V) -> ArrayAction<S, A, V> {
        crate::action::target(action, descriptor).into()
    }

    /// The inner statelet's action bundle.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<S, A, V, O: Clone> Clone for ArrayActions<S, A, V, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<S, A, V, O: core::fmt::Debug> core::fmt::Debug for ArrayActions<S, A, V, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArrayActions")
            .field("inner", &self.inner)
            .finish()
    }
}

/// Statelet over an ordered sequence of an inner statelet's state. See [`array`].
pub struct Array<T: Statelet, F, V> {
    name: &'static str,
    inner: T,
    id: F,
    actions: ArrayActions<T::State, T::Action, V, T::Actions>,
}

/// Lift `statelet` over `Vec<T::State>`, matching elements to descriptors with `id`.
pub fn array<T, F, V>(name: &'static str, statelet: T, id: F) -> Array<T, F, V>
where
    T: Statelet,
    T::Actions: Clone,
    F: Fn(&T::State, &V) -> bool,
{
    let actions = ArrayActions {
        inner: statelet.actions().clone(),
        _phantom: PhantomData,
    };
    Array {
        name,
        inner: statelet,
        id,
        actions,
    }
}

impl<T: Statelet, F, V> Array<T, F, V> {
    /// The lifted statelet.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T, F, V> Clone for Array<T, F, V>
where
    T: Statelet + Clone,
    T::Actions: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: self.inner.clone(),
            id: self.id.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<T: Statelet + core::fmt::Debug, F, V> core::fmt::Debug for Array<T, F, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Array")
            .field("name", &self.name)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<T, F, V> Statelet for Array<T, F, V>
where
    T: Statelet,
    T::State: Clone,
    F: Fn(&T::State, &V) -> bool,
{
    type State = Vec<T::State>;
    type Action = ArrayAction<T::State, T::Action, V>;
    type Actions = ArrayActions<T::State, T::Action, V, T::Actions>;

    fn name(&self) -> &'static str {
        self.name
    }

    fn actions(&self) -> &Self::Actions {
        &self.actions
    }

    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        match &action.0 {
            Op::Add(element) => {
                let mut out = Vec::with_capacity(state.len() + 1);
                out.extend_from_slice(state);
                out.push(element.clone());
                out
            }
            Op::Remove(descriptor) => state
                .iter()
                .filter(|e| !(self.id)(*e, descriptor))
                .cloned()
                .collect(),
            Op::Item(t) => state
                .iter()
                .map(|e| match &t.target {
                    Some(v) if !(self.id)(e, v) => e.clone(),
                    _ => self.inner.reduce(e, &t.action),
                })
                .collect(),
        }
    }

    fn accept(&self, state: &Self::State, action: &Self::Action) -> bool {
        match &action.0 {
            Op::Add(_) | Op::Remove(_) => true,
            Op::Item(t) => state.iter().all(|e| self.inner.accept(e, &t.action)),
        }
    }

    fn spawn(&self, state: &Self::State, action: &Self::Action) -> Vec<Self::Action> {
        match &action.0 {
            Op::Add(_) | Op::Remove(_) => Vec::new(),
            Op::Item(t) => state
                .iter()
                .flat_map(|e| self.inner.spawn(e, &t.action))
                .map(ArrayAction::broadcast)
                .collect(),
        }
    }
}
