// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for dispatch: notification policy and per-dispatch reports.

bitflags::bitflags! {
    /// What happened during one drain.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DispatchFlags: u8 {
        /// At least one action passed its acceptor and was applied.
        const ACCEPTED = 0b0000_0001;
        /// At least one action was discarded by its acceptor.
        const REJECTED = 0b0000_0010;
        /// The interceptor discarded the dispatched action before it was queued.
        const DROPPED  = 0b0000_0100;
        /// The store was notified at the end of the drain.
        const NOTIFIED = 0b0000_1000;
    }
}

impl Default for DispatchFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// When the store hears about a drain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotifyPolicy {
    /// Notify once per drain, only if at least one action was accepted.
    #[default]
    OnAccepted,
    /// Notify once per drain, even when every action was rejected or dropped.
    Always,
}

/// Summary of one [`dispatch`](crate::Dispatcher::dispatch) or [`pump`](crate::Dispatcher::pump).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Actions that passed their acceptor and were applied.
    pub processed: usize,
    /// Actions discarded by their acceptor.
    pub rejected: usize,
    /// Summary flags.
    pub flags: DispatchFlags,
}

impl DispatchReport {
    /// Whether any action was applied.
    pub fn accepted(&self) -> bool {
        self.flags.contains(DispatchFlags::ACCEPTED)
    }

    /// Whether the store was notified.
    pub fn notified(&self) -> bool {
        self.flags.contains(DispatchFlags::NOTIFIED)
    }

    /// Fold another report into this one.
    pub fn absorb(&mut self, other: Self) {
        self.processed += other.processed;
        self.rejected += other.rejected;
        self.flags |= other.flags;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_sums_counts_and_unions_flags() {
        let mut a = DispatchReport {
            processed: 2,
            rejected: 0,
            flags: DispatchFlags::ACCEPTED | DispatchFlags::NOTIFIED,
        };
        a.absorb(DispatchReport {
            processed: 0,
            rejected: 3,
            flags: DispatchFlags::REJECTED,
        });
        assert_eq!(a.processed, 2);
        assert_eq!(a.rejected, 3);
        assert!(a.accepted());
        assert!(a.notified());
        assert!(a.flags.contains(DispatchFlags::REJECTED));
    }

    #[test]
    fn defaults_are_empty_and_gated() {
        let r = DispatchReport::default();
        assert!(!r.accepted());
        assert!(!r.notified());
        assert_eq!(NotifyPolicy::default(), NotifyPolicy::OnAccepted);
    }
}
