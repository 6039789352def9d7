use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use leaf_core::resolver::resolve_slot;
use leaf_core::{Group, Leaf, LeafConfig, MemoryDom, PageOptions};

const PAGE_COUNTS: &[usize] = &[16, 64, 256];
const MAX_LEVEL: u32 = 1 << 20;

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_append");
    for &count in PAGE_COUNTS {
        let names: Vec<String> = (0..count).map(|i| format!("page-{i}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &names, |b, names| {
            b.iter(|| {
                let mut slots = Group::default();
                for name in names {
                    black_box(resolve_slot(&mut slots, "root", name, None, None, MAX_LEVEL).ok());
                }
                slots
            });
        });
    }
    group.finish();
}

// Every insertion asks for slot 0, so each one displaces the current front page.
fn bench_front_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_front");
    for &count in PAGE_COUNTS {
        let names: Vec<String> = (0..count).map(|i| format!("page-{i}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &names, |b, names| {
            b.iter(|| {
                let mut slots = Group::default();
                for name in names {
                    black_box(resolve_slot(&mut slots, "root", name, Some(0), None, MAX_LEVEL).ok());
                }
                slots
            });
        });
    }
    group.finish();
}

fn bench_registry_churn(c: &mut Criterion) {
    c.bench_function("registry_tear_tape_cycle", |b| {
        let mut dom = MemoryDom::new();
        dom.add_view("root", 1);
        dom.add_view("alt", 2);
        let mut leaf = match Leaf::booted(dom, LeafConfig::new().with_max_level(MAX_LEVEL)) {
            Ok(leaf) => leaf,
            Err(err) => panic!("boot failed: {err}"),
        };
        for i in 0..32 {
            let _ = leaf.page(PageOptions::new(format!("page-{i}")));
        }
        let mut turn = 0usize;
        b.iter(|| {
            let name = format!("page-{}", turn % 32);
            let target = if turn % 2 == 0 { "alt" } else { "root" };
            turn += 1;
            black_box(leaf.transfer(&name, target).is_ok())
        });
    });
}

criterion_group!(
    benches,
    bench_append,
    bench_front_insertion,
    bench_registry_churn
);
criterion_main!(benches);
