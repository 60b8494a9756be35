// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lens-based relocation of a statelet's state into an enclosing state.
//!
//! [`embed`] takes a projection pair over one field of an enclosing state `W`:
//!
//! - `unwrap: &W -> &S` borrows the embedded slice,
//! - `wrap: S -> W` rebuilds a `W` after a transition.
//!
//! `wrap` only has to populate the embedded slice. `W` is usually a one-field struct naming the
//! slot in a larger composite, and [`combine`](crate::combine::combine) supplies the other
//! fields. The pair must satisfy `unwrap(&wrap(x)) == x`; it need not be an isomorphism over
//! all of `W`.

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::statelet::Statelet;

/// Statelet whose state lives inside an enclosing state `W`. See [`embed`].
pub struct Embed<T, W, Wr, Un> {
    name: &'static str,
    inner: T,
    wrap: Wr,
    unwrap: Un,
    _phantom: PhantomData<fn(&W) -> W>,
}

/// Relocate `statelet`'s state into the enclosing state `W`.
///
/// ```
/// use strata_statelet::{Statelet, create, embed};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Hp(i32);
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Minion {
///     minion1: Hp,
/// }
///
/// let hitable = create("hitable", |s: &Hp, n: &i32| Hp(s.0 - n)).with_actions(());
/// let minion = embed(
///     "minion1",
///     hitable,
///     |s| Minion { minion1: s },
///     |w: &Minion| &w.minion1,
/// );
///
/// let next = minion.reduce(&Minion { minion1: Hp(20) }, &5);
/// assert_eq!(next, Minion { minion1: Hp(15) });
/// ```
pub fn embed<T, W, Wr, Un>(
    name: &'static str,
    statelet: T,
    wrap: Wr,
    unwrap: Un,
) -> Embed<T, W, Wr, Un>
where
    T: Statelet,
    Wr: Fn(T::State) -> W,
    Un: Fn(&W) -> &T::State,
{
    Embed {
        name,
        inner: statelet,
        wrap,
        unwrap,
        _phantom: PhantomData,
    }
}

impl<T, W, Wr, Un> Embed<T, W, Wr, Un> {
    /// The embedded statelet.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Clone, W, Wr: Clone, Un: Clone> Clone for Embed<T, W, Wr, Un> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: self.inner.clone(),
            wrap: self.wrap.clone(),
            unwrap: self.unwrap.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: core::fmt::Debug, W, Wr, Un> core::fmt::Debug for Embed<T, W, Wr, Un> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Embed")
            .field("name", &self.name)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<T, W, Wr, Un> Statelet for Embed<T, W, Wr, Un>
where
    T: Statelet,
    Wr: Fn(T::State) -> W,
    Un: Fn(&W) -> &T::State,
{
    type State = W;
    type Action = T::Action;
    type Actions = T::Actions;

    fn name(&self) -> &'static str {
        self.name
    }

    fn actions(&self) -> &T::Actions {
        self.inner.actions()
    }

    fn reduce(&self, state: &W, action: &T::Action) -> W {
        (self.wrap)(self.inner.reduce((self.unwrap)(state), action))
    }

    fn accept(&self, state: &W, action: &T::Action) -> bool {
        self.inner.accept((self.unwrap)(state), action)
    }

    fn spawn(&self, state: &W, action: &T::Action) -> Vec<T::Action> {
        self.inner.spawn((self.unwrap)(state), action)
    }
}
