// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action model: tagged values, target descriptors, and action narrowing.
//!
//! ## Overview
//!
//! Statelets usually define their actions as a plain `enum` and match on it exhaustively.
//! [`Action`] is available for open tag spaces where a `{ kind, payload }` record is more convenient.
//!
//! [`Targeted`] attaches an optional target descriptor to an action; it is only meaningful to
//! [`array`](crate::array::array) statelets, where a missing target means "every element".
//!
//! [`Narrow`] describes how a composite action space contains the action space of one operand.
//! Every type narrows to itself, so operands that share one action type see every action.

/// A tagged action value: a discriminant plus a payload specific to that discriminant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Action<T, P = ()> {
    /// Discriminant from the statelet's tag space.
    pub kind: T,
    /// Value carried for this tag.
    pub payload: P,
}

impl<T, P> Action<T, P> {
    /// Create an action from a tag and a payload.
    pub const fn new(kind: T, payload: P) -> Self {
        Self { kind, payload }
    }
}

/// An action addressed to a subset of a collection.
///
/// `target: None` broadcasts the action to every element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Targeted<A, V> {
    /// The wrapped action.
    pub action: A,
    /// Target descriptor matched against each element; `None` addresses all elements.
    pub target: Option<V>,
}

impl<A, V> Targeted<A, V> {
    /// Wrap an action without a target (broadcast).
    pub const fn broadcast(action: A) -> Self {
        Self {
            action,
            target: None,
        }
    }

    /// True if this action has no target and applies to every element.
    pub const fn is_broadcast(&self) -> bool {
        self.target.is_none()
    }
}

impl<A, V> From<A> for Targeted<A, V> {
    fn from(action: A) -> Self {
        Self::broadcast(action)
    }
}

/// Attach a target descriptor to an action.
///
/// ```
/// use strata_statelet::action::target;
///
/// let t = target("heal", 11_u32);
/// assert_eq!(t.target, Some(11));
/// assert!(!t.is_broadcast());
/// ```
pub const fn target<A, V>(action: A, descriptor: V) -> Targeted<A, V> {
    Targeted {
        action,
        target: Some(descriptor),
    }
}

/// A composite action space that contains the actions of type `A`.
///
/// `narrow` returns the contained action when `self` belongs to `A`'s part of the space and
/// `None` otherwise. The `From<A>` supertrait lifts actions spawned by an operand back into the
/// composite space.
///
/// ```
/// use strata_statelet::action::Narrow;
///
/// #[derive(Debug, PartialEq)]
/// struct Hurt(i32);
///
/// enum Character {
///     Hurt(Hurt),
///     Block,
/// }
///
/// impl From<Hurt> for Character {
///     fn from(h: Hurt) -> Self {
///         Self::Hurt(h)
///     }
/// }
///
/// impl Narrow<Hurt> for Character {
///     fn narrow(&self) -> Option<&Hurt> {
///         match self {
///             Self::Hurt(h) => Some(h),
///             Self::Block => None,
///         }
///     }
/// }
///
/// assert_eq!(Narrow::<Hurt>::narrow(&Character::Hurt(Hurt(3))), Some(&Hurt(3)));
/// assert!(Narrow::<Hurt>::narrow(&Character::Block).is_none());
/// ```
pub trait Narrow<A>: From<A> {
    /// Returns the contained action of type `A`, if any.
    fn narrow(&self) -> Option<&A>;
}

impl<T> Narrow<T> for T {
    #[inline]
    fn narrow(&self) -> Option<&T> {
        Some(self)
    }
}
