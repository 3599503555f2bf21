//! # Node Client Benchmarks
//!
//! ```bash
//! cargo bench --package ccd-tests --bench client_benchmarks
//! cargo bench --package ccd-tests --bench client_benchmarks -- translation
//! ```
//!
//! | Group | Measures |
//! |-------|----------|
//! | translation | wire reply to domain value |
//! | search | binary search over finalized heights |
//! | sync | catch-up throughput of the finalized block stream |

use std::sync::Arc;

use ccd_node_client::translation::consensus;
use ccd_node_client::wire::consensus::{BlockInfo, ConsensusInfo};
use ccd_node_client::wire::Bytes;
use ccd_node_client::{BlockSynchronizer, MockChain};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::StreamExt;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

fn wire_block_info(height: u64) -> BlockInfo {
    BlockInfo {
        hash: Some(Bytes(vec![0xab; 32])),
        height: Some(height),
        parent_block: Some(Bytes(vec![0xaa; 32])),
        last_finalized_block: Some(Bytes(vec![0xaa; 32])),
        genesis_index: Some(0),
        era_block_height: Some(height),
        slot_number: Some(height),
        slot_time: Some(1_700_000_000_000),
        finalized: true,
        transactions_energy_cost: Some(0),
        state_hash: Some(Bytes(vec![0xee; 32])),
        protocol_version: 6,
        ..Default::default()
    }
}

fn wire_consensus_info() -> ConsensusInfo {
    ConsensusInfo {
        best_block: Some(Bytes(vec![1; 32])),
        genesis_block: Some(Bytes(vec![0; 32])),
        genesis_time: Some(0),
        last_finalized_block: Some(Bytes(vec![1; 32])),
        best_block_height: Some(1_000),
        last_finalized_block_height: Some(1_000),
        protocol_version: 6,
        genesis_index: Some(0),
        current_era_genesis_block: Some(Bytes(vec![0; 32])),
        current_era_genesis_time: Some(0),
        ..Default::default()
    }
}

fn bench_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("translation");
    let block = wire_block_info(42);
    group.bench_function("block_info", |b| {
        b.iter(|| consensus::block_info(black_box(block.clone())))
    });
    let info = wire_consensus_info();
    group.bench_function("consensus_status", |b| {
        b.iter(|| consensus::consensus_status(black_box(info.clone())))
    });
    let json = serde_json::to_value(&block).unwrap_or_default();
    group.bench_function("block_info_from_json", |b| {
        b.iter(|| {
            serde_json::from_value::<BlockInfo>(black_box(json.clone()))
                .ok()
                .map(consensus::block_info)
        })
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("search");
    for height in [1_000u64, 100_000, 10_000_000] {
        let synchronizer = BlockSynchronizer::new(Arc::new(MockChain::with_height(height)));
        let target = height / 3;
        group.bench_with_input(BenchmarkId::new("find_earliest", height), &target, |b, &target| {
            b.iter(|| {
                rt.block_on(synchronizer.find_earliest_finalized(0, None, |block| async move {
                    Ok((block.height >= target).then_some(block.height))
                }))
            })
        });
    }
    group.finish();
}

fn bench_sync(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("sync");
    for count in [100u64, 1_000] {
        let synchronizer = BlockSynchronizer::new(Arc::new(MockChain::with_height(count)));
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("catch_up", count), &count, |b, &count| {
            b.iter(|| {
                rt.block_on(async {
                    synchronizer
                        .finalized_blocks_from(1, Some(count), CancellationToken::new())
                        .count()
                        .await
                })
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_translation, bench_search, bench_sync);
criterion_main!(benches);
