// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch cascades and interceptors.
//!
//! A lethal hit spawns a death, and the death spawns a respawn; all of it runs inside one drain.
//! An interceptor records what gets reduced and queues a regeneration tick after every hit,
//! which `pump` delivers outside the drain that caused it.
//!
//! Run:
//! - `cargo run -p strata_demos --example dispatch_cascade`
//! - `RUST_LOG=strata_dispatch=trace cargo run -p strata_demos --example dispatch_cascade`

use strata_dispatch::{Dispatcher, Emitter, Interceptor, NotifyPolicy};
use strata_statelet::create;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
struct Vitals {
    hp: i32,
    deaths: u32,
}

#[derive(Clone, Debug, PartialEq)]
enum Life {
    Hurt(i32),
    Regen,
    Die,
    Respawn,
}

const MAX_HP: i32 = 10;

#[derive(Debug, Default)]
struct Regen {
    emitter: Option<Emitter<Life>>,
    log: Vec<Life>,
}

impl Interceptor<Vitals, Life> for Regen {
    fn attach(&mut self, emitter: Emitter<Life>) {
        self.emitter = Some(emitter);
    }

    fn on_dispatched(&mut self, _state: &Vitals, action: Life) -> Option<Life> {
        // Only hits and ticks come from outside.
        matches!(action, Life::Hurt(_) | Life::Regen).then_some(action)
    }

    fn on_reduced(&mut self, _state: &Vitals, action: &Life) {
        self.log.push(action.clone());
        if let (Life::Hurt(_), Some(emitter)) = (action, &self.emitter) {
            if let Err(err) = emitter.emit(Life::Regen) {
                eprintln!("regen tick lost: {err}");
            }
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let life = create("life", |s: &Vitals, a: &Life| match *a {
        Life::Hurt(n) => Vitals {
            hp: s.hp - n,
            ..*s
        },
        Life::Regen => Vitals {
            hp: (s.hp + 1).min(MAX_HP),
            ..*s
        },
        Life::Die => Vitals {
            hp: 0,
            deaths: s.deaths + 1,
        },
        Life::Respawn => Vitals {
            hp: MAX_HP,
            ..*s
        },
    })
    .acceptor(|s: &Vitals, a: &Life| match a {
        Life::Hurt(_) | Life::Die => s.hp > 0,
        Life::Regen => s.hp > 0 && s.hp < MAX_HP,
        Life::Respawn => true,
    })
    .spawner(|s: &Vitals, a: &Life| match *a {
        Life::Hurt(n) if n >= s.hp => vec![Life::Die],
        Life::Die => vec![Life::Respawn],
        _ => Vec::new(),
    })
    .with_actions(());

    let mut d = Dispatcher::with_interceptor(
        Vitals {
            hp: MAX_HP,
            deaths: 0,
        },
        life,
        |s: &Vitals| println!("store: {s:?}"),
        Regen::default(),
    );

    let report = d.dispatch(Life::Hurt(4));
    println!("hurt(4): {report:?}, {} tick(s) queued", d.queued());
    let report = d.pump();
    println!("pump: {report:?}");

    // Lethal: Hurt, Die, Respawn in one drain, one store update.
    let report = d.dispatch(Life::Hurt(20));
    println!("hurt(20): processed {}", report.processed);

    // The queued tick is rejected at full hp; make the store hear about it anyway.
    d.set_notify_policy(NotifyPolicy::Always);
    let report = d.pump();
    println!("pump at full hp: rejected {}", report.rejected);

    // Spawned-only actions are dropped when dispatched from outside.
    let report = d.dispatch(Life::Respawn);
    println!("outside respawn: {:?}", report.flags);

    println!("reduced: {:?}", d.interceptor().log);
}
