use criterion::{criterion_group, criterion_main, Criterion, black_box};

use saplanting::felling::{find_connected_log_cluster, FellingConfig, SpeciesKey};
use saplanting::world::block::{keys, names};
use saplanting::world::{BlockGrid, BlockState};

use glam::IVec3;

const OAK: &str = "minecraft:oak_log";

/// Trunk of `height` logs with natural leaves on top
fn column(height: i32) -> BlockGrid {
    let mut grid = BlockGrid::new();
    for y in 1..=height {
        grid.set_block(IVec3::new(0, y, 0), OAK, 0);
    }
    grid.set_block_with_state(
        IVec3::new(0, height + 1, 0),
        names::LEAVES,
        0,
        BlockState::new().with(keys::PERSISTENT_BIT, false),
    );
    grid
}

/// Solid `size`³ cube of logs, the worst case for a capped search
fn cube(size: i32) -> BlockGrid {
    let mut grid = BlockGrid::new();
    for x in -size / 2..size / 2 {
        for y in 1..=size {
            for z in -size / 2..size / 2 {
                grid.set_block(IVec3::new(x, y, z), OAK, 0);
            }
        }
    }
    grid
}

fn bench_column_32(c: &mut Criterion) {
    let grid = column(32);
    let species = SpeciesKey::from_block(OAK, None);
    let config = FellingConfig::default();

    c.bench_function("chain_fell_column_32", |b| {
        b.iter(|| find_connected_log_cluster(black_box(IVec3::ZERO), &species, &config, &grid));
    });
}

fn bench_cube_capped(c: &mut Criterion) {
    let grid = cube(16);
    let species = SpeciesKey::from_block(OAK, None);
    let config = FellingConfig { require_natural_proof: false, ..FellingConfig::default() };

    c.bench_function("chain_fell_cube_16_cap_255", |b| {
        b.iter(|| find_connected_log_cluster(black_box(IVec3::ZERO), &species, &config, &grid));
    });
}

fn bench_cube_declined(c: &mut Criterion) {
    let grid = cube(16);
    let species = SpeciesKey::from_block(OAK, None);
    let config = FellingConfig::default();

    c.bench_function("chain_fell_cube_16_no_leaves", |b| {
        b.iter(|| find_connected_log_cluster(black_box(IVec3::ZERO), &species, &config, &grid));
    });
}

criterion_group!(benches, bench_column_32, bench_cube_capped, bench_cube_declined);
criterion_main!(benches);
