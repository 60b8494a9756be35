// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use strata_dispatch::Dispatcher;
use strata_statelet::{Narrow, Statelet, array, combine, create};

/// Counts down: each accepted step spawns the next one until zero.
fn countdown() -> impl Statelet<State = u64, Action = u32, Actions = ()> {
    create("countdown", |n: &u64, _: &u32| n + 1)
        .spawner(|_: &u64, left: &u32| if *left > 0 { vec![left - 1] } else { Vec::new() })
        .with_actions(())
}

/// Fans out: each step spawns two children until the depth runs out.
fn fanout() -> impl Statelet<State = u64, Action = u32, Actions = ()> {
    create("fanout", |n: &u64, _: &u32| n + 1)
        .spawner(|_: &u64, depth: &u32| {
            if *depth > 0 {
                vec![depth - 1, depth - 1]
            } else {
                Vec::new()
            }
        })
        .with_actions(())
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    for &n in &[64_u32, 1024, 16384] {
        group.throughput(Throughput::Elements(u64::from(n) + 1));
        group.bench_function(format!("chain_n{}", n), |b| {
            b.iter_batched(
                || Dispatcher::new(0_u64, countdown(), |_: &u64| {}),
                |mut d| {
                    let report = d.dispatch(n);
                    black_box(report.processed);
                },
                BatchSize::SmallInput,
            )
        });
    }
    for &depth in &[6_u32, 10, 14] {
        group.throughput(Throughput::Elements((1_u64 << (depth + 1)) - 1));
        group.bench_function(format!("fanout_depth{}", depth), |b| {
            b.iter_batched(
                || Dispatcher::new(0_u64, fanout(), |_: &u64| {}),
                |mut d| {
                    let report = d.dispatch(depth);
                    black_box(report.processed);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

#[derive(Clone, Debug)]
struct Unit {
    id: u32,
    hp: i32,
}

fn bench_array(c: &mut Criterion) {
    let hitable = create("hitable", |s: &Unit, n: &i32| Unit {
        id: s.id,
        hp: s.hp - n,
    })
    .acceptor(|s: &Unit, _: &i32| s.hp > 0)
    .with_actions(());
    let units = array("units", hitable, |s: &Unit, id: &u32| s.id == *id);

    let mut group = c.benchmark_group("array");
    for &n in &[16_u32, 256, 4096] {
        let initial: Vec<Unit> = (0..n).map(|id| Unit { id, hp: 100 }).collect();
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("broadcast_n{}", n), |b| {
            let action = units.actions().broadcast(1);
            b.iter(|| black_box(units.process(black_box(&initial), &action)));
        });
        group.bench_function(format!("target_n{}", n), |b| {
            let action = units.actions().target(1, n / 2);
            b.iter(|| black_box(units.process(black_box(&initial), &action)));
        });
        group.bench_function(format!("add_remove_n{}", n), |b| {
            let ops = units.actions();
            b.iter_batched(
                || initial.clone(),
                |s| {
                    let s = units.reduce(&s, &ops.add(Unit { id: n, hp: 1 }));
                    black_box(units.reduce(&s, &ops.remove(n)))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

#[derive(Clone, Debug)]
struct Add(i32);

#[derive(Clone, Debug)]
struct Sub(i32);

#[derive(Clone, Debug)]
enum Act {
    Add(Add),
    Sub(Sub),
}

impl From<Add> for Act {
    fn from(a: Add) -> Self {
        Self::Add(a)
    }
}

impl From<Sub> for Act {
    fn from(a: Sub) -> Self {
        Self::Sub(a)
    }
}

impl Narrow<Add> for Act {
    fn narrow(&self) -> Option<&Add> {
        match self {
            Self::Add(a) => Some(a),
            Self::Sub(_) => None,
        }
    }
}

impl Narrow<Sub> for Act {
    fn narrow(&self) -> Option<&Sub> {
        match self {
            Self::Sub(a) => Some(a),
            Self::Add(_) => None,
        }
    }
}

fn bench_combine(c: &mut Criterion) {
    let left = create("left", |s: &i64, a: &Add| s + i64::from(a.0)).with_actions(());
    let right = create("right", |s: &i64, a: &Sub| s - i64::from(a.0)).with_actions(());
    let pair = combine::<Act, _, _>("pair", &left, &right);
    let nested = combine::<Act, _, _>("nested", &pair, &pair);

    let mut group = c.benchmark_group("combine");
    group.bench_function("pair_reduce", |b| {
        let s = (0_i64, 0_i64);
        let a = Act::Add(Add(3));
        b.iter(|| black_box(pair.process(black_box(&s), &a)));
    });
    group.bench_function("nested_reduce", |b| {
        let s = ((0_i64, 0_i64), (0_i64, 0_i64));
        let a = Act::Add(Add(3));
        b.iter(|| black_box(nested.process(black_box(&s), &a)));
    });
    group.finish();
}

criterion_group!(benches, bench_cascade, bench_array, bench_combine);
criterion_main!(benches);
