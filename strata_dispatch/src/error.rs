// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the dispatch layer.
//!
//! Acceptor rejection is not an error: a rejected action is dropped and shows up only in the
//! [`DispatchReport`](crate::types::DispatchReport).

use thiserror::Error;

/// Failure to hand an externally originated action to a dispatcher.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EmitError {
    /// The dispatcher behind this emitter has been dropped.
    #[error("dispatcher has been dropped; action was not delivered")]
    Disconnected,
}
