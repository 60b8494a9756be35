// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams around a [`Dispatcher`](crate::Dispatcher): the store that observes committed state,
//! the interceptor that observes and filters actions, and the emitter that feeds actions back in.
//!
//! ## Overview
//!
//! - [`Store`] is told about the state once at construction and then once per drain, according
//!   to the dispatcher's [`NotifyPolicy`](crate::types::NotifyPolicy). Any `FnMut(&S)` is a store.
//! - [`Interceptor`] sees each externally dispatched action before it is queued and each applied
//!   action after it is reduced. [`NoInterceptor`] is the pass-through default.
//! - [`Emitter`] is handed to the interceptor once at construction. It queues actions in the
//!   dispatcher's inbox; [`Dispatcher::pump`](crate::Dispatcher::pump) drains them later.
//!   An emitter never dispatches synchronously, so it cannot re-enter a drain in progress.

use alloc::collections::VecDeque;
use alloc::rc::Weak;
use core::cell::RefCell;

use crate::error::EmitError;

/// Receiver of committed state.
///
/// Implemented for every `FnMut(&S)`. Annotate the closure argument (`|s: &State| ..`) so the
/// closure is general over the borrow.
pub trait Store<S> {
    /// Observe the committed state.
    fn update(&mut self, state: &S);
}

impl<S, F: FnMut(&S)> Store<S> for F {
    fn update(&mut self, state: &S) {
        self(state);
    }
}

/// Observer and filter of actions flowing through a dispatcher.
///
/// All methods have pass-through defaults.
pub trait Interceptor<S, A> {
    /// Receive the emitter for this dispatcher. Called once, after the initial store update.
    fn attach(&mut self, _emitter: Emitter<A>) {}

    /// Observe an externally dispatched action against the current state.
    ///
    /// Return the action to queue, a replacement, or `None` to drop it.
    /// Spawned actions never pass through here.
    fn on_dispatched(&mut self, _state: &S, action: A) -> Option<A> {
        Some(action)
    }

    /// Observe an accepted action and the state it was applied to, before the result is committed.
    fn on_reduced(&mut self, _state: &S, _action: &A) {}
}

/// Interceptor that passes everything through.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInterceptor;

impl<S, A> Interceptor<S, A> for NoInterceptor {}

pub(crate) type Inbox<A> = RefCell<VecDeque<A>>;

/// Handle that queues actions for a dispatcher. Cheap to clone.
pub struct Emitter<A> {
    inbox: Weak<Inbox<A>>,
}

impl<A> Emitter<A> {
    pub(crate) fn new(inbox: Weak<Inbox<A>>) -> Self {
        Self { inbox }
    }

    /// Queue `action` for the next [`pump`](crate::Dispatcher::pump).
    ///
    /// Fails with [`EmitError::Disconnected`] once the dispatcher has been dropped.
    pub fn emit(&self, action: A) -> Result<(), EmitError> {
        let inbox = self.inbox.upgrade().ok_or(EmitError::Disconnected)?;
        inbox.borrow_mut().push_back(action);
        Ok(())
    }

    /// Whether the dispatcher is still alive.
    pub fn is_connected(&self) -> bool {
        self.inbox.strong_count() > 0
    }
}

impl<A> Clone for Emitter<A> {
    fn clone(&self) -> Self {
        Self {
            inbox: self.inbox.clone(),
        }
    }
}

impl<A> core::fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Emitter")
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}
