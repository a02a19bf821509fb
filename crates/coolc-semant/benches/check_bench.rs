//! Semantic analysis benchmarks.
//!
//! Measures hierarchy construction and full checking on generated programs
//! of growing size.

use coolc_ast::{AstBuilder, Program};
use coolc_semant::{CheckerOptions, ClassTree, ErrorReporter, analyze};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// `C0 inherits Object`, `C1 inherits C0`, ... each with an attribute and a
/// method that calls up the chain.
fn chain_program(classes: usize) -> Program {
    let mut b = AstBuilder::new("chain.cl");
    for i in 0..classes {
        let name = format!("C{i}");
        let parent = if i == 0 {
            "Object".to_string()
        } else {
            format!("C{}", i - 1)
        };
        let attr = b.attribute(&format!("a{i}"), "Int", None);
        let body = if i == 0 {
            b.int(0)
        } else {
            let x = b.object(&format!("a{i}"));
            let up = b.self_dispatch("get0", Vec::new());
            b.plus(x, up)
        };
        let method = b.method(&format!("get{i}"), &[], "Int", body);
        b.class(&name, &parent, vec![attr, method]);
    }
    b.finish()
}

/// `classes` siblings under one base, joined pairwise by a conditional chain
/// in `Main`.
fn wide_program(classes: usize) -> Program {
    let mut b = AstBuilder::new("wide.cl");
    b.class("Base", "Object", Vec::new());
    for i in 0..classes {
        b.class(&format!("W{i}"), "Base", Vec::new());
    }
    let mut body = b.new_object("W0");
    for i in 1..classes {
        let pred = b.bool(i % 2 == 0);
        let other = b.new_object(&format!("W{i}"));
        body = b.cond(pred, body, other);
    }
    let main = b.method("main", &[], "Base", body);
    b.class("Main", "Object", vec![main]);
    b.finish()
}

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy_build");
    for size in [16, 128, 1024] {
        let program = chain_program(size);
        group.bench_with_input(BenchmarkId::new("chain", size), &program, |b, program| {
            b.iter(|| {
                let mut reporter = ErrorReporter::new();
                let tree = ClassTree::build(program, &mut reporter);
                black_box(tree.is_ok())
            })
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let options = CheckerOptions::default();
    for size in [16, 128, 400] {
        let chain = chain_program(size);
        group.bench_with_input(BenchmarkId::new("chain", size), &chain, |b, program| {
            b.iter(|| {
                let analysis = analyze(program, &options);
                black_box(analysis.diagnostics.iter().len())
            })
        });

        let wide = wide_program(size);
        group.bench_with_input(BenchmarkId::new("wide", size), &wide, |b, program| {
            b.iter(|| {
                let analysis = analyze(program, &options);
                black_box(analysis.types.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hierarchy, bench_analyze);
criterion_main!(benches);
