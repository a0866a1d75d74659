//! skirmish — a small tactical map driven through the route engine.
//!
//! Four movers path across a 12×8 square map with a breached wall, a keep
//! with a closed door and a marsh.  Searches are queued and resolved by
//! running scheduling quanta the way a host event loop would; one is
//! cancelled before it starts.  The door is then opened, the cache
//! invalidated, and a bounded blocking search reaches the keep.
//!
//! Set `RUST_LOG=route_schedule=debug` to watch the quanta.

mod map;

use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use route_core::{Cell, EngineConfig, Mover, Waypoint};
use route_engine::{EngineBuilder, PathTicket, Route, SearchOptions};
use route_graph::DoorState;

use map::{Marsh, grid, walls};

// ── Configuration ─────────────────────────────────────────────────────────────

// Partial settings; everything else takes its default.
const CONFIG_JSON: &str = r#"{
    "diagonal_rule": "alternating",
    "steps_per_slice": 10
}"#;

const BLOCKING_RANGE: f64 = 120.0;

// ── Output helpers ────────────────────────────────────────────────────────────

fn describe(route: &Route) -> String {
    let hops: Vec<String> = route.waypoints.iter().map(|w| w.to_string()).collect();
    format!("{} ft via {}", route.cost, hops.join(" → "))
}

fn report(name: &str, ticket: &PathTicket) {
    if ticket.is_cancelled() {
        println!("  {name:<8} cancelled");
        return;
    }
    match ticket.try_take() {
        Some(Ok(Some(route))) => println!("  {name:<8} {}", describe(&route)),
        Some(Ok(None)) => println!("  {name:<8} no path"),
        Some(Err(e)) => println!("  {name:<8} failed: {e}"),
        None => println!("  {name:<8} still pending"),
    }
}

fn cell(x: i32, y: i32) -> Waypoint {
    Waypoint::Cell(Cell::new(x, y))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config: EngineConfig = serde_json::from_str(CONFIG_JSON)?;
    println!("=== skirmish — route engine demo ===");
    println!(
        "Map: {}×{} cells  |  diagonals: {}  |  {} steps/slice, {} ms quanta",
        map::COLUMNS,
        map::ROWS,
        config.diagonal_rule,
        config.steps_per_slice,
        config.quantum_budget_ms,
    );
    println!();

    let mut engine = EngineBuilder::new(config, grid())
        .walls(walls(DoorState::Closed)?)
        .terrain(Marsh)
        .build()?;

    // 1. Queue the searches.
    let scout = engine.submit_search(cell(0, 0), cell(10, 1), SearchOptions::default())?;
    let ogre = engine.submit_search(
        cell(1, 1),
        cell(7, 2),
        SearchOptions::for_mover(Mover::sized(2.0, 2.0)),
    )?;
    let runner = engine.submit_search(cell(0, 7), cell(5, 7), SearchOptions::default())?;
    let wader = engine.submit_search(
        cell(0, 7),
        cell(5, 7),
        SearchOptions::default().ignore_terrain(true),
    )?;
    let decoy = engine.submit_search(cell(11, 7), cell(0, 0), SearchOptions::default())?;
    engine.cancel_search(&decoy);

    // 2. Drive the queue like a host event loop.
    let started = Instant::now();
    let mut quanta = 0;
    let mut steps = 0;
    while engine.wants_quantum() {
        let r = engine.run_quantum();
        quanta += 1;
        steps += r.steps;
    }
    println!(
        "Queue drained: {quanta} quanta, {steps} steps, {:.2} ms",
        started.elapsed().as_secs_f64() * 1_000.0
    );
    report("scout", &scout);
    report("ogre", &ogre);
    report("runner", &runner);
    report("wader", &wader);
    report("decoy", &decoy);
    println!();

    // 3. Open the keep door and search again, blocking.
    engine.set_walls(walls(DoorState::Open)?);
    tracing::info!("keep door opened");
    println!(
        "Door opened: {} level(s), cache rebuilt ({} nodes)",
        engine.cache().levels().level_count(),
        engine.cache().node_count()
    );
    let bounded = SearchOptions::default().max_distance(BLOCKING_RANGE);
    match engine.await_search_blocking(cell(0, 0), cell(10, 1), bounded)? {
        Some(route) => println!("  scout    {}", describe(&route)),
        None => println!("  scout    out of range ({BLOCKING_RANGE} ft)"),
    }
    let short = SearchOptions::default().max_distance(30.0);
    if engine.await_search_blocking(cell(0, 0), cell(10, 1), short)?.is_none() {
        println!("  scout    cannot make it within 30 ft");
    }

    Ok(())
}
