// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Statelet`] trait and the [`create`] builder for atomic statelets.
//!
//! ## Overview
//!
//! A statelet pairs a state shape with three pure functions over `(state, action)`:
//!
//! - a reducer computing the next state,
//! - an acceptor gating whether the action applies at all,
//! - a spawner producing follow-up actions.
//!
//! It also carries a bundle of action constructors under a namespace label ([`Statelet::name`]).
//! The bundle is any value you like, typically a zero-sized struct with one method per action.
//!
//! Every combinator in this crate returns a type that implements [`Statelet`] again, so composites
//! nest freely.
//!
//! ## Purity
//!
//! Reducers, acceptors, and spawners must be pure functions of their arguments.
//! Composition evaluates operands against the same input state and relies on this.

use alloc::vec::Vec;
use core::marker::PhantomData;

/// A composable unit of state and behavior.
pub trait Statelet {
    /// State this statelet reduces.
    type State;
    /// Closed set of actions this statelet understands.
    type Action;
    /// Bundle of action constructors attached with [`StateletBuilder::with_actions`].
    type Actions;

    /// Namespace label of the action bundle. Has no effect on reduction.
    fn name(&self) -> &'static str;

    /// The action constructor bundle.
    fn actions(&self) -> &Self::Actions;

    /// Compute the next state for an accepted action.
    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Gate an action; `false` discards it without any state change or spawning.
    fn accept(&self, state: &Self::State, action: &Self::Action) -> bool;

    /// Follow-up actions produced by an accepted action.
    fn spawn(&self, state: &Self::State, action: &Self::Action) -> Vec<Self::Action>;

    /// Establish an initial state value. Identity for every statelet in this crate.
    #[inline]
    fn instance(&self, state: Self::State) -> Self::State {
        state
    }

    /// Reduce and spawn against the same pre-transition state.
    fn process(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> (Self::State, Vec<Self::Action>) {
        let next = self.reduce(state, action);
        let spawned = self.spawn(state, action);
        (next, spawned)
    }
}

impl<T: Statelet + ?Sized> Statelet for &T {
    type State = T::State;
    type Action = T::Action;
    type Actions = T::Actions;

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn actions(&self) -> &Self::Actions {
        (**self).actions()
    }

    #[inline]
    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        (**self).reduce(state, action)
    }

    #[inline]
    fn accept(&self, state: &Self::State, action: &Self::Action) -> bool {
        (**self).accept(state, action)
    }

    #[inline]
    fn spawn(&self, state: &Self::State, action: &Self::Action) -> Vec<Self::Action> {
        (**self).spawn(state, action)
    }

    #[inline]
    fn instance(&self, state: Self::State) -> Self::State {
        (**self).instance(state)
    }

    #[inline]
    fn process(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> (Self::State, Vec<Self::Action>) {
        (**self).process(state, action)
    }
}

/// Default acceptor: every action is accepted.
pub type AcceptAll<S, A> = fn(&S, &A) -> bool;

/// Default spawner: nothing is spawned.
pub type SpawnNone<S, A> = fn(&S, &A) -> Vec<A>;

fn accept_all<S, A>(_: &S, _: &A) -> bool {
    true
}

fn spawn_none<S, A>(_: &S, _: &A) -> Vec<A> {
    Vec::new()
}

/// Start building an atomic statelet from its reducer.
///
/// The acceptor defaults to accepting everything and the spawner to spawning nothing;
/// override them with [`StateletBuilder::acceptor`] and [`StateletBuilder::spawner`].
/// Finish with [`StateletBuilder::with_actions`].
///
/// ```
/// use strata_statelet::{Statelet, create};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Hp(i32);
///
/// enum Hit {
///     Hurt(i32),
/// }
///
/// let hitable = create("hitable", |s: &Hp, a: &Hit| match a {
///     Hit::Hurt(n) => Hp(s.0 - n),
/// })
/// .acceptor(|s: &Hp, _: &Hit| s.0 > 0)
/// .with_actions(());
///
/// assert_eq!(hitable.reduce(&Hp(10), &Hit::Hurt(3)), Hp(7));
/// assert!(!hitable.accept(&Hp(0), &Hit::Hurt(1)));
/// ```
pub fn create<S, A, R>(
    name: &'static str,
    reducer: R,
) -> StateletBuilder<S, A, R, AcceptAll<S, A>, SpawnNone<S, A>>
where
    R: Fn(&S, &A) -> S,
{
    StateletBuilder {
        name,
        reducer,
        acceptor: accept_all::<S, A>,
        spawner: spawn_none::<S, A>,
        _phantom: PhantomData,
    }
}

/// Builder returned by [`create`].
pub struct StateletBuilder<S, A, R, Ac, Sp> {
    name: &'static str,
    reducer: R,
    acceptor: Ac,
    spawner: Sp,
    _phantom: PhantomData<fn(&S, &A)>,
}

impl<S, A, R, Ac, Sp> core::fmt::Debug for StateletBuilder<S, A, R, Ac, Sp> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateletBuilder")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S, A, R, Ac, Sp> StateletBuilder<S, A, R, Ac, Sp>
where
    R: Fn(&S, &A) -> S,
    Ac: Fn(&S, &A) -> bool,
    Sp: Fn(&S, &A) -> Vec<A>,
{
    /// Replace the acceptor.
    pub fn acceptor<Ac2>(self, acceptor: Ac2) -> StateletBuilder<S, A, R, Ac2, Sp>
    where
        Ac2: Fn(&S, &A) -> bool,
    {
        StateletBuilder {
            name: self.name,
            reducer: self.reducer,
            acceptor,
            spawner: self.spawner,
            _phantom: PhantomData,
        }
    }

    /// Replace the spawner.
    pub fn spawner<Sp2>(self, spawner: Sp2) -> StateletBuilder<S, A, R, Ac, Sp2>
    where
        Sp2: Fn(&S, &A) -> Vec<A>,
    {
        StateletBuilder {
            name: self.name,
            reducer: self.reducer,
            acceptor: self.acceptor,
            spawner,
            _phantom: PhantomData,
        }
    }

    /// Attach the action constructor bundle and finish the statelet.
    pub fn with_actions<O>(self, actions: O) -> Basic<S, A, R, Ac, Sp, O> {
        Basic {
            name: self.name,
            reducer: self.reducer,
            acceptor: self.acceptor,
            spawner: self.spawner,
            actions,
            _phantom: PhantomData,
        }
    }
}

/// An atomic statelet built with [`create`].
pub struct Basic<S, A, R, Ac, Sp, O> {
    name: &'static str,
    reducer: R,
    acceptor: Ac,
    spawner: Sp,
    actions: O,
    _phantom: PhantomData<fn(&S, &A)>,
}

impl<S, A, R: Clone, Ac: Clone, Sp: Clone, O: Clone> Clone for Basic<S, A, R, Ac, Sp, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            reducer: self.reducer.clone(),
            acceptor: self.acceptor.clone(),
            spawner: self.spawner.clone(),
            actions: self.actions.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<S, A, R, Ac, Sp, O> core::fmt::Debug for Basic<S, A, R, Ac, Sp, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Basic")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S, A, R, Ac, Sp, O> Statelet for Basic<S, A, R, Ac, Sp, O>
where
    R: Fn(&S, &A) -> S,
    Ac: Fn(&S, &A) -> bool,
    Sp: Fn(&S, &A) -> Vec<A>,
{
    type State = S;
    type Action = A;
    type Actions = O;

    fn name(&self) -> &'static str {
        self.name
    }

    fn actions(&self) -> &O {
        &self.actions
    }

    fn reduce(&self, state: &S, action: &A) -> S {
        (self.reducer)(state, action)
    }

    fn accept(&self, state: &S, action: &A) -> bool {
        (self.acceptor)(state, action)
    }

    fn spawn(&self, state: &S, action: &A) -> Vec<A> {
        (self.spawner)(state, action)
    }
}
