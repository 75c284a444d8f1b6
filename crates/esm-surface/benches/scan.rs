//! Scanner benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const SAMPLE_SOURCE: &str = r#"
// Sample module for benchmarking
import fs from 'node:fs';
import { join, resolve } from 'node:path';
import config from './config.json' assert { type: 'json' };
import './side-effects.js';

const cache = new Map();

export async function load(name) {
    if (cache.has(name)) return cache.get(name);
    const mod = await import(`./plugins/${name}.js`);
    cache.set(name, mod);
    return mod;
}

export class Registry {
    constructor() {
        this.entries = [];
    }

    register(entry) {
        const pattern = /^[a-z][a-z0-9-]*$/;
        if (!pattern.test(entry.name)) throw new Error('bad name');
        this.entries.push(entry);
    }
}

const scaled = config.weight / 2 / 3;
const banner = `registry ${cache.size} of ${scaled}`;

export const VERSION = '1.0.0';
export default load;
export { cache as registryCache };
export * from './helpers.js';
"#;

const FACADE_SOURCE: &str = r#"
import './polyfill.js';
export * from './core.js';
export { render, hydrate } from './dom.js';
export { default as Component } from './component.js';
"#;

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    group.throughput(Throughput::Bytes(SAMPLE_SOURCE.len() as u64));
    group.bench_function("mixed_module", |b| {
        b.iter(|| esm_surface::parse(black_box(SAMPLE_SOURCE)).unwrap());
    });

    group.throughput(Throughput::Bytes(FACADE_SOURCE.len() as u64));
    group.bench_function("facade_module", |b| {
        b.iter(|| esm_surface::parse(black_box(FACADE_SOURCE)).unwrap());
    });

    // A large synthetic module dominated by plain statements, to
    // exercise the dispatch loop rather than the recognizers.
    let large: String = (0..2000)
        .map(|i| format!("const value{i} = compute({i}) / {};\n", i + 1))
        .collect();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large_module", |b| {
        b.iter(|| esm_surface::parse(black_box(&large)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
