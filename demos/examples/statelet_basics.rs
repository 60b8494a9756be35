// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Statelet basics.
//!
//! Builds a character out of blockable, hitable, and positional statelets, then a villain that
//! carries a minion of the same kind in an embedded slot. One translate moves both.
//!
//! Run:
//! - `cargo run -p strata_demos --example statelet_basics`

use kurbo::{Point, Vec2};
use strata_statelet::{Narrow, Statelet, combine, create, embed};

#[derive(Clone, Debug, PartialEq)]
struct Shield {
    block: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct Vitals {
    hp: i32,
}

#[derive(Clone, Debug, PartialEq)]
struct Positional {
    pos: Point,
}

type Character = (Shield, (Vitals, Positional));

#[derive(Clone, Debug, PartialEq)]
struct Villain {
    minion1: Character,
}

#[derive(Clone, Debug)]
enum Toggle {
    Toggle,
}

#[derive(Clone, Debug)]
enum Hit {
    Hurt(i32),
    Heal(i32),
}

#[derive(Clone, Debug)]
enum Nav {
    Move(Point),
    Translate(Vec2),
}

#[derive(Clone, Debug)]
struct NavOps;

impl NavOps {
    fn move_to(&self, x: f64, y: f64) -> Nav {
        Nav::Move(Point::new(x, y))
    }

    fn translate(&self, dx: f64, dy: f64) -> Nav {
        Nav::Translate(Vec2::new(dx, dy))
    }
}

#[derive(Clone, Debug)]
struct HitOps;

impl HitOps {
    fn hurt(&self, n: i32) -> Hit {
        Hit::Hurt(n)
    }

    fn heal(&self, n: i32) -> Hit {
        Hit::Heal(n)
    }
}

/// Every action a character understands.
#[derive(Clone, Debug)]
enum Act {
    Toggle(Toggle),
    Hit(Hit),
    Nav(Nav),
}

impl From<Toggle> for Act {
    fn from(a: Toggle) -> Self {
        Self::Toggle(a)
    }
}

impl From<Hit> for Act {
    fn from(a: Hit) -> Self {
        Self::Hit(a)
    }
}

impl From<Nav> for Act {
    fn from(a: Nav) -> Self {
        Self::Nav(a)
    }
}

impl Narrow<Toggle> for Act {
    fn narrow(&self) -> Option<&Toggle> {
        match self {
            Self::Toggle(a) => Some(a),
            _ => None,
        }
    }
}

impl Narrow<Hit> for Act {
    fn narrow(&self) -> Option<&Hit> {
        match self {
            Self::Hit(a) => Some(a),
            _ => None,
        }
    }
}

impl Narrow<Nav> for Act {
    fn narrow(&self) -> Option<&Nav> {
        match self {
            Self::Nav(a) => Some(a),
            _ => None,
        }
    }
}

fn main() {
    let positional = create("positional", |s: &Positional, a: &Nav| match *a {
        Nav::Move(p) => Positional { pos: p },
        Nav::Translate(v) => Positional { pos: s.pos + v },
    })
    .with_actions(NavOps);

    let hitable = create("hitable", |s: &Vitals, a: &Hit| match *a {
        Hit::Hurt(n) => Vitals { hp: s.hp - n },
        Hit::Heal(n) => Vitals { hp: s.hp + n },
    })
    .with_actions(HitOps);

    let blockable =
        create("blockable", |_: &Shield, _: &Toggle| Shield { block: true }).with_actions(());

    let character = combine::<Act, _, _>(
        "character",
        blockable,
        combine::<Act, _, _>("squash", hitable, positional),
    );
    let villain = combine::<Act, _, _>(
        "villain",
        &character,
        embed(
            "minion1",
            &character,
            |s| Villain { minion1: s },
            |w: &Villain| &w.minion1,
        ),
    );

    let v0 = villain.instance((
        (
            Shield { block: true },
            (Vitals { hp: 20 }, Positional { pos: Point::ZERO }),
        ),
        Villain {
            minion1: (
                Shield { block: true },
                (
                    Vitals { hp: 20 },
                    Positional {
                        pos: Point::new(0.0, 10.0),
                    },
                ),
            ),
        },
    ));
    println!("{}: {v0:#?}", villain.name());

    // Bundles nest the same way the statelets do.
    let (_, (hit_ops, nav_ops)) = character.actions();
    let (v1, spawned) = villain.process(&v0, &nav_ops.translate(33.0, 33.0).into());
    println!("after translate(33, 33): {v1:#?}");
    assert!(spawned.is_empty());

    let v2 = villain.reduce(&v1, &hit_ops.hurt(5).into());
    println!(
        "after hurt(5): hp {} / minion hp {}",
        v2.0.1.0.hp,
        v2.1.minion1.1.0.hp
    );

    let v2 = villain.reduce(&v2, &hit_ops.heal(2).into());
    println!("after heal(2): hp {}", v2.0.1.0.hp);

    // Toggles only touch the shield slices.
    let v2 = villain.reduce(&v2, &Toggle::Toggle.into());
    println!("after toggle: block {}", v2.0.0.block);

    let v3 = villain.reduce(&v2, &nav_ops.move_to(-1.0, -1.0).into());
    println!(
        "after move(-1, -1): {:?} / minion {:?}",
        v3.0.1.1.pos,
        v3.1.minion1.1.1.pos
    );
}
