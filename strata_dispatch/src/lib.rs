// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Dispatch: drive a statelet over one owned state value.
//!
//! ## Overview
//!
//! A [`Dispatcher`] owns the current state, a statelet, a [`Store`] that observes committed
//! state, and an optional [`Interceptor`].
//! [`Dispatcher::dispatch`] gates, reduces, and spawns until the cascade settles, then notifies
//! the store once.
//!
//! - Acceptor rejection discards an action silently; the [`DispatchReport`] counts it.
//! - Spawned actions are processed depth-first, before anything queued earlier.
//! - With the default [`NotifyPolicy::OnAccepted`], a drain in which nothing was accepted leaves
//!   the store untouched. [`NotifyPolicy::Always`] notifies after every drain.
//! - Interceptors never dispatch synchronously. They queue through an [`Emitter`], and
//!   [`Dispatcher::pump`] drains the queue.
//!
//! ## Logging
//!
//! Drains are traced with [`tracing`]: one `trace` event per action and one `debug` summary per
//! drain, keyed by the statelet's name. Install any subscriber to see them.
//!
//! ## Example
//!
//! ```
//! use strata_dispatch::Dispatcher;
//! use strata_statelet::create;
//!
//! let counter = create("counter", |n: &i32, by: &i32| n + by)
//!     .acceptor(|_: &i32, by: &i32| *by != 0)
//!     .with_actions(());
//!
//! let mut seen = Vec::new();
//! let mut d = Dispatcher::new(0, counter, |n: &i32| seen.push(*n));
//! d.dispatch(5);
//! // Rejected: the store is not told.
//! d.dispatch(0);
//! d.dispatch(-2);
//! assert_eq!(*d.state(), 3);
//! drop(d);
//! assert_eq!(seen, [0, 5, 3]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature forwards to `tracing` and
//! `thiserror`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod error;
pub mod hooks;
pub mod types;

pub use dispatcher::Dispatcher;
pub use error::EmitError;
pub use hooks::{Emitter, Interceptor, NoInterceptor, Store};
pub use types::{DispatchFlags, DispatchReport, NotifyPolicy};
