//! Benchmarks for pattern-term tree construction and position ordering
//!
//! Measures performance of:
//! - Building trees for wide and deeply nested clauses
//! - Sorting positions by term and ancestry

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use pattern_term_tree::ir::atom::{AtomType, Handle};
use pattern_term_tree::ir::atom_space::AtomSpace;
use pattern_term_tree::ir::builder::PatternTermBuilder;
use pattern_term_tree::ir::pattern_term::TermPosition;
use pattern_term_tree::ir::variables::Variables;

// ============================================================================
// Sample patterns
// ============================================================================

/// `(And (Evaluation $v0 c0) (Evaluation $v1 c1) ...)`, cycling through four variables.
fn wide_clause(space: &AtomSpace, width: usize) -> (Handle, Variables) {
    let vars: Vec<Handle> = (0..4).map(|i| space.add_node(AtomType::Variable, &format!("$v{}", i))).collect();
    let conjuncts: Vec<Handle> = (0..width)
        .map(|i| {
            let concept = space.add_node(AtomType::Concept, &format!("c{}", i));
            space.add_link(AtomType::Evaluation, [vars[i % vars.len()].clone(), concept])
        })
        .collect();
    (space.add_link(AtomType::And, conjuncts), vars.into_iter().collect())
}

/// `(List (List ... (List $x)))`, `depth` levels deep.
fn deep_clause(space: &AtomSpace, depth: usize) -> (Handle, Variables) {
    let x = space.add_node(AtomType::Variable, "$x");
    let mut clause = x.clone();
    for _ in 0..depth {
        clause = space.add_link(AtomType::List, [clause]);
    }
    (clause, [x].into_iter().collect())
}

// ============================================================================
// Benchmark: Tree Construction
// ============================================================================

fn bench_tree_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_construction");
    let space = AtomSpace::new();

    for width in [10, 100, 1000] {
        let (clause, vars) = wide_clause(&space, width);
        group.bench_with_input(BenchmarkId::new("wide", width), &width, |b, _| {
            b.iter(|| {
                let mut builder = PatternTermBuilder::new(vars.clone());
                builder.build_root(&clause);
                black_box(builder.finish())
            })
        });
    }

    for depth in [10, 100, 1000] {
        let (clause, vars) = deep_clause(&space, depth);
        group.bench_with_input(BenchmarkId::new("deep", depth), &depth, |b, _| {
            b.iter(|| {
                let mut builder = PatternTermBuilder::new(vars.clone());
                builder.build_root(&clause);
                black_box(builder.finish())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Position Ordering
// ============================================================================

fn bench_position_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_ordering");
    let space = AtomSpace::new();

    let (clause, vars) = wide_clause(&space, 1000);
    let mut builder = PatternTermBuilder::new(vars);
    builder.build_root(&clause);
    let tree = builder.finish();

    group.bench_function("sort_wide", |b| {
        b.iter(|| {
            let mut positions: Vec<TermPosition> = tree.terms().iter().cloned().map(TermPosition).collect();
            positions.sort();
            black_box(positions)
        })
    });

    let (clause, vars) = deep_clause(&space, 200);
    let mut builder = PatternTermBuilder::new(vars);
    builder.build_root(&clause);
    let deep_tree = builder.finish();
    let leaf = deep_tree.terms().last().cloned().unwrap_or_default();

    group.bench_function("cmp_against_all_deep", |b| {
        b.iter(|| {
            for ptm in deep_tree.terms() {
                black_box(leaf.position_cmp(ptm));
            }
        })
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2));
    targets =
        bench_tree_construction,
        bench_position_ordering
}

criterion_main!(benches);
