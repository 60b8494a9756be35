// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Product combinators: [`combine`], [`merge`], and [`combine_with`].
//!
//! ## Overview
//!
//! [`combine`] builds a statelet over the conjoined state `(S1, S2)` and a composite action
//! space `A` that [narrows](crate::action::Narrow) to each operand's actions.
//!
//! - Reducer: each operand reduces its own slice of the same input state; an operand whose
//!   action does not narrow keeps its slice unchanged.
//! - Acceptor: logical AND of both operands.
//! - Spawner: the left operand's spawned actions, then the right operand's.
//! - Actions: the pair `(left bundle, right bundle)`, cloned from the operands.
//!
//! Because the slices are disjoint, no field can be written twice.
//! When two statelets genuinely share one state type, use [`combine_with`] and say how
//! overlapping results merge.
//!
//! [`merge`] is [`combine`] under the left operand's name.

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::action::Narrow;
use crate::statelet::Statelet;

/// Statelet over the product of two operands' states. See [`combine`].
pub struct Combine<L: Statelet, R: Statelet, A> {
    name: &'static str,
    left: L,
    right: R,
    actions: (L::Actions, R::Actions),
    _phantom: PhantomData<fn() -> A>,
}

/// Build a composite statelet over `(left state, right state)` and action space `A`.
///
/// ```
/// use strata_statelet::{Statelet, combine, create};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Hp(i32);
/// #[derive(Clone, Debug, PartialEq)]
/// struct Block(bool);
///
/// // Both operands understand the same action type here, so both see every action.
/// #[derive(Clone, Debug)]
/// enum Act {
///     Hurt(i32),
///     Guard,
/// }
///
/// let hitable = create("hitable", |s: &Hp, a: &Act| match a {
///     Act::Hurt(n) => Hp(s.0 - n),
///     Act::Guard => s.clone(),
/// })
/// .with_actions(());
/// let blockable = create("blockable", |_: &Block, a: &Act| Block(matches!(a, Act::Guard)))
///     .with_actions(());
///
/// let character = combine::<Act, _, _>("character", hitable, blockable);
/// let next = character.reduce(&(Hp(10), Block(false)), &Act::Hurt(4));
/// assert_eq!(next, (Hp(6), Block(false)));
/// ```
pub fn combine<A, L, R>(name: &'static str, left: L, right: R) -> Combine<L, R, A>
where
    L: Statelet,
    R: Statelet,
    L::Actions: Clone,
    R::Actions: Clone,
    A: Narrow<L::Action> + Narrow<R::Action>,
{
    let actions = (left.actions().clone(), right.actions().clone());
    Combine {
        name,
        left,
        right,
        actions,
        _phantom: PhantomData,
    }
}

/// [`combine`] that presents itself under the left operand's name.
pub fn merge<A, L, R>(left: L, right: R) -> Combine<L, R, A>
where
    L: Statelet,
    R: Statelet,
    L::Actions: Clone,
    R::Actions: Clone,
    A: Narrow<L::Action> + Narrow<R::Action>,
{
    let name = left.name();
    combine(name, left, right)
}

impl<L: Statelet, R: Statelet, A> Combine<L, R, A> {
    /// The left operand.
    pub fn left(&self) -> &L {
        &self.left
    }

    /// The right operand.
    pub fn right(&self) -> &R {
        &self.right
    }
}

impl<L, R, A> Clone for Combine<L, R, A>
where
    L: Statelet + Clone,
    R: Statelet + Clone,
    L::Actions: Clone,
    R::Actions: Clone,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            left: self.left.clone(),
            right: self.right.clone(),
            actions: self.actions.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<L, R, A> core::fmt::Debug for Combine<L, R, A>
where
    L: Statelet + core::fmt::Debug,
    R: Statelet + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Combine")
            .field("name", &self.name)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

fn reduce_narrowed<T, A>(statelet: &T, state: &T::State, action: &A) -> T::State
where
    T: Statelet,
    T::State: Clone,
    A: Narrow<T::Action>,
{
    match Narrow::<T::Action>::narrow(action) {
        Some(a) => statelet.reduce(state, a),
        None => state.clone(),
    }
}

fn accept_narrowed<T, A>(statelet: &T, state: &T::State, action: &A) -> bool
where
    T: Statelet,
    A: Narrow<T::Action>,
{
    match Narrow::<T::Action>::narrow(action) {
        Some(a) => statelet.accept(state, a),
        None => true,
    }
}

fn spawn_narrowed<T, A>(statelet: &T, state: &T::State, action: &A, out: &mut Vec<A>)
where
    T: Statelet,
    A: Narrow<T::Action>,
{
    if let Some(a) = Narrow::<T::Action>::narrow(action) {
        out.extend(
            statelet
                .spawn(state, a)
                .into_iter()
                .map(<A as From<T::Action>>::from),
        );
    }
}

impl<L, R, A> Statelet for Combine<L, R, A>
where
    L: Statelet,
    R: Statelet,
    L::State: Clone,
    R::State: Clone,
    A: Narrow<L::Action> + Narrow<R::Action>,
{
    type State = (L::State, R::State);
    type Action = A;
    type Actions = (L::Actions, R::Actions);

    fn name(&self) -> &'static str {
        self.name
    }

    fn actions(&self) -> &Self::Actions {
        &self.actions
    }

    fn reduce(&self, state: &Self::State, action: &A) -> Self::State {
        (
            reduce_narrowed(&self.left, &state.0, action),
            reduce_narrowed(&self.right, &state.1, action),
        )
    }

    fn accept(&self, state: &Self::State, action: &A) -> bool {
        accept_narrowed(&self.left, &state.0, action)
            && accept_narrowed(&self.right, &state.1, action)
    }

    fn spawn(&self, state: &Self::State, action: &A) -> Vec<A> {
        let mut out = Vec::new();
        spawn_narrowed(&self.left, &state.0, action, &mut out);
        spawn_narrowed(&self.right, &state.1, action, &mut out);
        out
    }
}

/// Statelet over one state type shared by both operands. See [`combine_with`].
pub struct CombineWith<L: Statelet, R: Statelet, A, M> {
    name: &'static str,
    left: L,
    right: R,
    merge: M,
    actions: (L::Actions, R::Actions),
    _phantom: PhantomData<fn() -> A>,
}

/// Combine two statelets that reduce the same state type `S`.
///
/// Both reducers run on the same input state. `merge(base, left_result, right_result)` then
/// resolves the two full results into one; `base` is the input state, so the merge can tell
/// which fields each side actually wrote. An operand whose action does not narrow contributes
/// `base` unchanged.
///
/// Acceptor, spawner, and action bundles behave as in [`combine`].
///
/// ```
/// use strata_statelet::{Statelet, combine_with, create};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Body {
///     hp: i32,
///     armor: i32,
/// }
///
/// let wear = create("wear", |s: &Body, n: &i32| Body { armor: s.armor - n, ..s.clone() })
///     .with_actions(());
/// let bleed = create("bleed", |s: &Body, n: &i32| Body { hp: s.hp - n, ..s.clone() })
///     .with_actions(());
///
/// // Last writer wins per field: take the right result's field when it changed.
/// let body = combine_with::<i32, _, _, _>("body", wear, bleed, |base: &Body, l: Body, r: Body| Body {
///     hp: if r.hp != base.hp { r.hp } else { l.hp },
///     armor: if r.armor != base.armor { r.armor } else { l.armor },
/// });
///
/// let next = body.reduce(&Body { hp: 10, armor: 5 }, &2);
/// assert_eq!(next, Body { hp: 8, armor: 3 });
/// ```
pub fn combine_with<A, L, R, M>(
    name: &'static str,
    left: L,
    right: R,
    merge: M,
) -> CombineWith<L, R, A, M>
where
    L: Statelet,
    R: Statelet<State = L::State>,
    L::Actions: Clone,
    R::Actions: Clone,
    A: Narrow<L::Action> + Narrow<R::Action>,
    M: Fn(&L::State, L::State, L::State) -> L::State,
{
    let actions = (left.actions().clone(), right.actions().clone());
    CombineWith {
        name,
        left,
        right,
        merge,
        actions,
        _phantom: PhantomData,
    }
}

impl<L, R, A, M> Clone for CombineWith<L, R, A, M>
where
    L: Statelet + Clone,
    R: Statelet + Clone,
    L::Actions: Clone,
    R::Actions: Clone,
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            left: self.left.clone(),
            right: self.right.clone(),
            merge: self.merge.clone(),
            actions: self.actions.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<L, R, A, M> core::fmt::Debug for CombineWith<L, R, A, M>
where
    L: Statelet + core::fmt::Debug,
    R: Statelet + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombineWith")
            .field("name", &self.name)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

impl<L, R, A, M> Statelet for CombineWith<L, R, A, M>
where
    L: Statelet,
    R: Statelet<State = L::State>,
    L::State: Clone,
    A: Narrow<L::Action> + Narrow<R::Action>,
    M: Fn(&L::State, L::State, L::State) -> L::State,
{
    type State = L::State;
    type Action = A;
    type Actions = (L::Actions, R::Actions);

    fn name(&self) -> &'static str {
        self.name
    }

    fn actions(&self) -> &Self::Actions {
        &self.actions
    }

    fn reduce(&self, state: &Self::State, action: &A) -> Self::State {
        let l = reduce_narrowed(&self.left, state, action);
        let r = reduce_narrowed(&self.right, state, action);
        (self.merge)(state, l, r)
    }

    fn accept(&self, state: &Self::State, action: &A) -> bool {
        accept_narrowed(&self.left, state, action) && accept_narrowed(&self.right, state, action)
    }

    fn spawn(&self, state: &Self::State, action: &A) -> Vec<A> {
        let mut out = Vec::new();
        spawn_narrowed(&self.left, state, action, &mut out);
        spawn_narrowed(&self.right, state, action, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statelet::create;
    use alloc::vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Hp(i32);

    #[derive(Clone, Debug, PartialEq)]
    struct Pos(i32, i32);

    #[derive(Clone, Debug, PartialEq)]
    enum HitAction {
        Hurt(i32),
        Heal(i32),
    }

    #[derive(Clone, Debug, PartialEq)]
    enum PosAction {
        Translate(i32, i32),
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Character {
        Hit(HitAction),
        Pos(PosAction),
    }

    impl From<HitAction> for Character {
        fn from(a: HitAction) -> Self {
            Self::Hit(a)
        }
    }

    impl From<PosAction> for Character {
        fn from(a: PosAction) -> Self {
            Self::Pos(a)
        }
    }

    impl Narrow<HitAction> for Character {
        fn narrow(&self) -> Option<&HitAction> {
            match self {
                Self::Hit(a) => Some(a),
                Self::Pos(_) => None,
            }
        }
    }

    impl Narrow<PosAction> for Character {
        fn narrow(&self) -> Option<&PosAction> {
            match self {
                Self::Pos(a) => Some(a),
                Self::Hit(_) => None,
            }
        }
    }

    #[derive(Clone, Debug)]
    struct HitOps;

    impl HitOps {
        fn hurt(&self, n: i32) -> HitAction {
            HitAction::Hurt(n)
        }
    }

    #[derive(Clone, Debug)]
    struct PosOps;

    impl PosOps {
        fn translate(&self, dx: i32, dy: i32) -> PosAction {
            PosAction::Translate(dx, dy)
        }
    }

    fn hitable() -> impl Statelet<State = Hp, Action = HitAction, Actions = HitOps> + Clone {
        create("hitable", |s: &Hp, a: &HitAction| match a {
            HitAction::Hurt(n) => Hp(s.0 - n),
            HitAction::Heal(n) => Hp(s.0 + n),
        })
        // Dead characters cannot be hurt further.
        .acceptor(|s: &Hp, a: &HitAction| !matches!(a, HitAction::Hurt(_)) || s.0 > 0)
        // Every hurt spawns a small heal.
        .spawner(|_: &Hp, a: &HitAction| match a {
            HitAction::Hurt(_) => vec![HitAction::Heal(1)],
            HitAction::Heal(_) => Vec::new(),
        })
        .with_actions(HitOps)
    }

    fn positional() -> impl Statelet<State = Pos, Action = PosAction, Actions = PosOps> + Clone
    {
        create("positional", |s: &Pos, a: &PosAction| match a {
            PosAction::Translate(dx, dy) => Pos(s.0 + dx, s.1 + dy),
        })
        .spawner(|_: &Pos, a: &PosAction| match a {
            PosAction::Translate(0, 0) => Vec::new(),
            PosAction::Translate(..) => vec![PosAction::Translate(0, 0)],
        })
        .with_actions(PosOps)
    }

    #[test]
    fn reducer_updates_only_the_narrowed_slice() {
        let c = combine::<Character, _, _>("character", hitable(), positional());
        let s0 = (Hp(10), Pos(0, 0));
        assert_eq!(
            c.reduce(&s0, &Character::Hit(HitAction::Hurt(3))),
            (Hp(7), Pos(0, 0))
        );
        assert_eq!(
            c.reduce(&s0, &Character::Pos(PosAction::Translate(2, 5))),
            (Hp(10), Pos(2, 5))
        );
    }

    #[test]
    fn reducer_equals_slice_wise_operand_reducers() {
        let h = hitable();
        let p = positional();
        let c = combine::<Character, _, _>("character", hitable(), positional());
        let s0 = (Hp(4), Pos(1, 1));
        let a = HitAction::Hurt(2);
        assert_eq!(
            c.reduce(&s0, &Character::from(a.clone())),
            (h.reduce(&s0.0, &a), s0.1.clone())
        );
        let b = PosAction::Translate(-1, 3);
        assert_eq!(
            c.reduce(&s0, &Character::from(b.clone())),
            (s0.0.clone(), p.reduce(&s0.1, &b))
        );
    }

    #[test]
    fn acceptor_is_logical_and() {
        let c = combine::<Character, _, _>("character", hitable(), positional());
        let dead = (Hp(0), Pos(0, 0));
        assert!(!c.accept(&dead, &Character::Hit(HitAction::Hurt(1))));
        assert!(c.accept(&dead, &Character::Hit(HitAction::Heal(1))));
        assert!(c.accept(&dead, &Character::Pos(PosAction::Translate(1, 1))));
    }

    #[test]
    fn shared_action_type_reaches_both_operands() {
        let always = create("no", |s: &Hp, _: &HitAction| s.clone())
            .acceptor(|_: &Hp, _: &HitAction| false)
            .with_actions(());
        let c = combine::<HitAction, _, _>("pair", hitable(), always);
        assert!(!c.accept(&(Hp(10), Hp(10)), &HitAction::Heal(1)));

        let twice = combine::<HitAction, _, _>("twice", hitable(), hitable());
        assert_eq!(
            twice.reduce(&(Hp(10), Hp(20)), &HitAction::Hurt(5)),
            (Hp(5), Hp(15))
        );
    }

    #[test]
    fn spawner_concatenates_left_then_right() {
        let c = combine::<HitAction, _, _>("twice", hitable(), hitable());
        let spawned = c.spawn(&(Hp(10), Hp(20)), &HitAction::Hurt(5));
        assert_eq!(spawned, vec![HitAction::Heal(1), HitAction::Heal(1)]);

        let lifted = combine::<Character, _, _>("character", hitable(), positional());
        let s0 = (Hp(10), Pos(0, 0));
        assert_eq!(
            lifted.spawn(&s0, &Character::Hit(HitAction::Hurt(1))),
            vec![Character::Hit(HitAction::Heal(1))]
        );
        assert_eq!(
            lifted.spawn(&s0, &Character::Pos(PosAction::Translate(1, 0))),
            vec![Character::Pos(PosAction::Translate(0, 0))]
        );
    }

    #[test]
    fn spawner_order_follows_operand_order_with_distinct_outputs() {
        let tag = |label: i32| {
            create("tag", |s: &Hp, _: &i32| s.clone())
                .spawner(move |_: &Hp, _: &i32| vec![label])
                .with_actions(())
        };
        let c = combine::<i32, _, _>("order", tag(1), tag(2));
        assert_eq!(c.spawn(&(Hp(0), Hp(0)), &0), vec![1, 2]);
        let nested = combine::<i32, _, _>("nested", c, tag(3));
        assert_eq!(nested.spawn(&((Hp(0), Hp(0)), Hp(0)), &0), vec![1, 2, 3]);
    }

    #[test]
    fn actions_bundle_pairs_both_operands() {
        let c = combine::<Character, _, _>("character", hitable(), positional());
        let (hit, pos) = c.actions();
        assert_eq!(Character::from(hit.hurt(2)), Character::Hit(HitAction::Hurt(2)));
        assert_eq!(
            Character::from(pos.translate(1, 2)),
            Character::Pos(PosAction::Translate(1, 2))
        );
    }

    #[test]
    fn combine_names_and_merge_inherits() {
        let c = combine::<Character, _, _>("character", hitable(), positional());
        assert_eq!(c.name(), "character");
        let m = merge::<Character, _, _>(hitable(), positional());
        assert_eq!(m.name(), "hitable");
        assert_eq!(m.left().name(), "hitable");
        assert_eq!(m.right().name(), "positional");
    }

    #[test]
    fn merge_behaves_like_combine_apart_from_name() {
        let c = combine::<Character, _, _>("x", hitable(), positional());
        let m = merge::<Character, _, _>(hitable(), positional());
        let s0 = (Hp(3), Pos(2, 2));
        for a in [
            Character::Hit(HitAction::Hurt(1)),
            Character::Pos(PosAction::Translate(4, 4)),
        ] {
            assert_eq!(c.process(&s0, &a), m.process(&s0, &a));
            assert_eq!(c.accept(&s0, &a), m.accept(&s0, &a));
        }
    }

    #[test]
    fn combine_with_resolves_overlap_with_merge_function() {
        #[derive(Clone, Debug, PartialEq)]
        struct Both {
            a: i32,
            b: i32,
        }
        let set_a = create("a", |s: &Both, n: &i32| Both { a: *n, b: s.b }).with_actions(());
        let set_both = create("b", |_: &Both, n: &i32| Both { a: -n, b: *n }).with_actions(());
        let last_wins = |base: &Both, l: Both, r: Both| Both {
            a: if r.a != base.a { r.a } else { l.a },
            b: if r.b != base.b { r.b } else { l.b },
        };
        let c = combine_with::<i32, _, _, _>("overlap", set_a, set_both, last_wins);
        // Both write `a`; the right operand wins.
        assert_eq!(c.reduce(&Both { a: 0, b: 0 }, &5), Both { a: -5, b: 5 });
        assert!(c.accept(&Both { a: 0, b: 0 }, &5));
        assert!(c.spawn(&Both { a: 0, b: 0 }, &5).is_empty());

        // A clone is a full statelet and can be an operand elsewhere.
        let copy = c.clone();
        assert_eq!(copy.name(), "overlap");
        assert_eq!(copy.reduce(&Both { a: 1, b: 1 }, &2), Both { a: -2, b: 2 });
        let pair = combine::<i32, _, _>("pair", copy, c);
        assert_eq!(
            pair.reduce(&(Both { a: 0, b: 0 }, Both { a: 9, b: 9 }), &3),
            (Both { a: -3, b: 3 }, Both { a: -3, b: 3 })
        );
    }
}
