use criterion::{criterion_group, criterion_main, Criterion};
use evpathfinder_lib::{find_route, plan_route, RoadGraph, RouteRequest, VehicleConfig};
use once_cell::sync::Lazy;
use std::hint::black_box;

const GRID_SIZE: usize = 24;

/// Square grid with chargers on every other diagonal.
fn grid() -> RoadGraph {
    let name = |row: usize, col: usize| format!("r{row}c{col}");
    let mut builder = RoadGraph::builder();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let power = if (row + col) % 2 == 0 { 90.0 } else { 0.0 };
            builder = builder.node(name(row, col), power);
        }
    }
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let duration = (4 + (row * 11 + col * 5) % 7) as f64;
            let consumption = (1 + (row * 3 + col * 7) % 3) as f64;
            if col + 1 < GRID_SIZE {
                builder = builder
                    .edge(name(row, col), name(row, col + 1), duration, consumption)
                    .edge(name(row, col + 1), name(row, col), duration + 1.0, consumption);
            }
            if row + 1 < GRID_SIZE {
                builder = builder
                    .edge(name(row, col), name(row + 1, col), duration, consumption)
                    .edge(name(row + 1, col), name(row, col), duration + 1.0, consumption);
            }
        }
    }
    builder.build()
}

static GRID: Lazy<RoadGraph> = Lazy::new(grid);
static CORNER_TO_CORNER: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new(
        "r0c0",
        format!("r{last}c{last}", last = GRID_SIZE - 1),
        VehicleConfig::new(12.0, 9.0, 2.0),
    )
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRID;

    c.bench_function("ev_grid_corner_to_corner", |b| {
        let request = &*CORNER_TO_CORNER;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box((plan.hop_count(), plan.charging_stops()))
        });
    });

    c.bench_function("ev_grid_large_battery", |b| {
        let vehicle = VehicleConfig::new(500.0, 500.0, 0.0);
        b.iter(|| {
            let route = find_route(graph, "r0c0", "r12c17", &vehicle).expect("search runs");
            black_box(route.len())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
