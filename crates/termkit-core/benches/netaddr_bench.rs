//! Criterion benchmarks for the IPv4 addressing helpers.
//!
//! Validation runs on every prompt keystroke-to-enter cycle and over whole
//! route lists, so the grammar functions should stay allocation-light.
//!
//! Run with:
//! ```bash
//! cargo bench --package termkit-core --bench netaddr_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use termkit_core::{
    is_ip_in_network, is_ipv4, is_ipv4_route_list, netmask_to_prefix, prefix_to_netmask,
};

fn build_route_list(n: usize) -> String {
    (0..n)
        .map(|i| format!("10.{}.{}.0/24 via 192.168.0.1", i / 256, i % 256))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    group.bench_function("is_ipv4_valid", |b| {
        b.iter(|| is_ipv4(black_box("192.168.131.254")))
    });
    group.bench_function("is_ipv4_invalid", |b| {
        b.iter(|| is_ipv4(black_box("192.168.131.256")))
    });
    group.finish();
}

fn bench_netmask(c: &mut Criterion) {
    let mut group = c.benchmark_group("netmask");
    group.bench_function("prefix_to_netmask", |b| {
        b.iter(|| prefix_to_netmask(black_box(22)))
    });
    group.bench_function("netmask_to_prefix", |b| {
        b.iter(|| netmask_to_prefix(black_box("255.255.252.0")))
    });
    group.bench_function("is_ip_in_network", |b| {
        b.iter(|| is_ip_in_network(black_box("192.168.128.0/22"), black_box("192.168.131.1")))
    });
    group.finish();
}

fn bench_route_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_list");
    for n in [1usize, 16, 256] {
        let list = build_route_list(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &list, |b, list| {
            b.iter(|| is_ipv4_route_list(black_box(list)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validation, bench_netmask, bench_route_list);
criterion_main!(benches);
