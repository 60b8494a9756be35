// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Dispatcher`]: owns a state value and drains action cascades through a statelet.
//!
//! ## Drain
//!
//! [`Dispatcher::dispatch`] runs one drain:
//!
//! 1. The interceptor sees the action and may replace or drop it.
//! 2. The action is queued and the queue is drained from the front.
//! 3. Each popped action is gated by the acceptor against the current state. Rejected actions
//!    are discarded and the drain moves on.
//! 4. Accepted actions are reduced and spawned against the same pre-transition state. Spawned
//!    actions are placed at the head of the queue in spawn order, ahead of anything already
//!    queued, and the new state is committed.
//! 5. After the queue is empty the store is notified once, per [`NotifyPolicy`].
//!
//! Processing is depth-first: if `A` spawns `[B, C]` and `B` spawns `[D]`, the order is
//! `A, B, D, C`. Cascades are not bounded; a statelet whose spawns never settle never returns.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::RefCell;

use strata_statelet::Statelet;
use tracing::{debug, trace};

use crate::hooks::{Emitter, Inbox, Interceptor, NoInterceptor, Store};
use crate::types::{DispatchFlags, DispatchReport, NotifyPolicy};

/// Owner of one state value, driven by a statelet.
///
/// `dispatch` takes `&mut self`, so a drain cannot be re-entered. Interceptors that want to
/// originate actions queue them through their [`Emitter`]; call [`Dispatcher::pump`] to drain them.
pub struct Dispatcher<T: Statelet, St, I = NoInterceptor> {
    statelet: T,
    state: T::State,
    pending: VecDeque<T::Action>,
    inbox: Rc<Inbox<T::Action>>,
    store: St,
    interceptor: I,
    notify: NotifyPolicy,
}

impl<T, St> Dispatcher<T, St, NoInterceptor>
where
    T: Statelet,
    St: Store<T::State>,
{
    /// Create a dispatcher over `initial`.
    ///
    /// The store is updated once with the initial state before this returns.
    pub fn new(initial: T::State, statelet: T, store: St) -> Self {
        Self::with_interceptor(initial, statelet, store, NoInterceptor)
    }
}

impl<T, St, I> Dispatcher<T, St, I>
where
    T: Statelet,
    St: Store<T::State>,
    I: Interceptor<T::State, T::Action>,
{
    /// Create a dispatcher with an interceptor.
    ///
    /// The store is updated once with the initial state, then the interceptor receives its
    /// [`Emitter`] through [`Interceptor::attach`].
    pub fn with_interceptor(initial: T::State, statelet: T, store: St, interceptor: I) -> Self {
        let mut this = Self {
            statelet,
            state: initial,
            pending: VecDeque::new(),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            store,
            interceptor,
            notify: NotifyPolicy::default(),
        };
        this.store.update(&this.state);
        let emitter = this.emitter();
        this.interceptor.attach(emitter);
        debug!(statelet = this.statelet.name(), "dispatcher created");
        this
    }

    /// Dispatch one action and drain every action it spawns.
    pub fn dispatch(&mut self, action: T::Action) -> DispatchReport {
        let mut report = DispatchReport::default();
        let name = self.statelet.name();

        let Some(action) = self.interceptor.on_dispatched(&self.state, action) else {
            trace!(statelet = name, "action dropped by interceptor");
            report.flags |= DispatchFlags::DROPPED;
            return self.finish(report);
        };

        self.pending.push_back(action);
        while let Some(action) = self.pending.pop_front() {
            if !self.statelet.accept(&self.state, &action) {
                report.rejected += 1;
                report.flags |= DispatchFlags::REJECTED;
                trace!(statelet = name, "action rejected");
                continue;
            }

            let (next, spawned) = self.statelet.process(&self.state, &action);
            self.interceptor.on_reduced(&self.state, &action);
            let spawn_count = spawned.len();
            for follow_up in spawned.into_iter().rev() {
                self.pending.push_front(follow_up);
            }
            self.state = next;
            report.processed += 1;
            report.flags |= DispatchFlags::ACCEPTED;
            trace!(
                statelet = name,
                spawned = spawn_count,
                queued = self.pending.len(),
                "action applied"
            );
        }

        self.finish(report)
    }

    /// Dispatch every action queued through an [`Emitter`], oldest first.
    ///
    /// Actions emitted while pumping are drained by the same call.
    pub fn pump(&mut self) -> DispatchReport {
        let mut report = DispatchReport::default();
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            report.absorb(self.dispatch(action));
        }
        report
    }

    fn finish(&mut self, mut report: DispatchReport) -> DispatchReport {
        let notify = match self.notify {
            NotifyPolicy::OnAccepted => report.accepted(),
            NotifyPolicy::Always => true,
        };
        if notify {
            self.store.update(&self.state);
            report.flags |= DispatchFlags::NOTIFIED;
        }
        debug!(
            statelet = self.statelet.name(),
            processed = report.processed,
            rejected = report.rejected,
            notified = notify,
            "drain complete"
        );
        report
    }
}

impl<T: Statelet, St, I> Dispatcher<T, St, I> {
    /// The current committed state.
    pub fn state(&self) -> &T::State {
        &self.state
    }

    /// Consume the dispatcher and return its state.
    pub fn into_state(self) -> T::State {
        self.state
    }

    /// The statelet driving this dispatcher.
    pub fn statelet(&self) -> &T {
        &self.statelet
    }

    /// The statelet's action constructor bundle.
    pub fn actions(&self) -> &T::Actions {
        self.statelet.actions()
    }

    /// The store.
    pub fn store(&self) -> &St {
        &self.store
    }

    /// The interceptor.
    pub fn interceptor(&self) -> &I {
        &self.interceptor
    }

    /// Mutable access to the interceptor.
    pub fn interceptor_mut(&mut self) -> &mut I {
        &mut self.interceptor
    }

    /// A new emitter that queues into this dispatcher's inbox.
    pub fn emitter(&self) -> Emitter<T::Action> {
        Emitter::new(Rc::downgrade(&self.inbox))
    }

    /// Number of emitted actions waiting for [`Dispatcher::pump`].
    pub fn queued(&self) -> usize {
        self.inbox.borrow().len()
    }

    /// Current notification policy.
    pub fn notify_policy(&self) -> NotifyPolicy {
        self.notify
    }

    /// Set the notification policy for subsequent drains.
    pub fn set_notify_policy(&mut self, policy: NotifyPolicy) {
        self.notify = policy;
    }
}

impl<T: Statelet, St, I> core::fmt::Debug for Dispatcher<T, St, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("statelet", &self.statelet.name())
            .field("queued", &self.queued())
            .field("notify", &self.notify)
            .finish_non_exhaustive()
    }
}
