// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Array targeting.
//!
//! Lifts a character statelet over a list, adds three characters, removes one by descriptor,
//! and moves only the character whose hp matches the target.
//! The store prints the list after every drain.
//!
//! Run:
//! - `cargo run -p strata_demos --example array_targeting`
//! - `RUST_LOG=strata_dispatch=trace cargo run -p strata_demos --example array_targeting`

use kurbo::Point;
use strata_dispatch::Dispatcher;
use strata_statelet::{Narrow, array, combine, create, target};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
struct Vitals {
    hp: i32,
}

#[derive(Clone, Debug, PartialEq)]
struct Positional {
    pos: Point,
}

type Character = (Vitals, Positional);

#[derive(Clone, Debug)]
struct Hurt(i32);

#[derive(Clone, Debug)]
struct MoveTo(Point);

#[derive(Clone, Debug)]
enum Act {
    Hurt(Hurt),
    Move(MoveTo),
}

impl From<Hurt> for Act {
    fn from(a: Hurt) -> Self {
        Self::Hurt(a)
    }
}

impl From<MoveTo> for Act {
    fn from(a: MoveTo) -> Self {
        Self::Move(a)
    }
}

impl Narrow<Hurt> for Act {
    fn narrow(&self) -> Option<&Hurt> {
        match self {
            Self::Hurt(a) => Some(a),
            Self::Move(_) => None,
        }
    }
}

impl Narrow<MoveTo> for Act {
    fn narrow(&self) -> Option<&MoveTo> {
        match self {
            Self::Move(a) => Some(a),
            Self::Hurt(_) => None,
        }
    }
}

fn character(hp: i32) -> Character {
    (
        Vitals { hp },
        Positional {
            pos: Point::new(0.0, 1.0),
        },
    )
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let hitable = create("hitable", |s: &Vitals, a: &Hurt| Vitals { hp: s.hp - a.0 })
        .acceptor(|s: &Vitals, _: &Hurt| s.hp > 0)
        .with_actions(());
    let positional =
        create("positional", |_: &Positional, a: &MoveTo| Positional { pos: a.0 }).with_actions(());
    let character_statelet = combine::<Act, _, _>("character", hitable, positional);

    // Characters are told apart by hp in this demo.
    let list = array(
        "characterList",
        character_statelet,
        |s: &Character, hp: &i32| s.0.hp == *hp,
    );

    let mut d = Dispatcher::new(Vec::new(), list, |s: &Vec<Character>| {
        let summary: Vec<_> = s.iter().map(|(v, p)| (v.hp, p.pos)).collect();
        println!("state {summary:?}");
    });

    for hp in [10, 11, 100] {
        let a = d.actions().add(character(hp));
        d.dispatch(a);
    }
    let a = d.actions().remove(11);
    d.dispatch(a);

    let report = d.dispatch(target(Act::from(MoveTo(Point::new(10.0, 10.0))), 100).into());
    println!("targeted move: {report:?}");

    // An acceptor that fails on any element rejects the whole broadcast.
    let a = d.actions().broadcast(Hurt(10).into());
    d.dispatch(a);
    let a = d.actions().broadcast(Hurt(1).into());
    let report = d.dispatch(a);
    println!("broadcast after a character hit zero: rejected {}", report.rejected);
}
