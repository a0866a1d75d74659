//! CSV wall loader.
//!
//! # CSV format
//!
//! One row per wall segment, world (pixel) coordinates:
//!
//! ```csv
//! ax,ay,bx,by,bottom,top,door
//! 200,0,200,400,,,none
//! 0,300,100,300,0,10,closed
//! 100,300,200,300,,,open
//! ```
//!
//! | Column         | Meaning                                         |
//! |----------------|-------------------------------------------------|
//! | `bottom`/`top` | Vertical extent; empty means unbounded           |
//! | `door`         | `none`, `closed` or `open` (empty = `none`)      |
//!
//! Every loaded wall blocks movement unless it is an open door.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use route_core::WorldPoint;

use crate::{DoorState, GraphError, GraphResult, Wall};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WallRecord {
    ax:     f64,
    ay:     f64,
    bx:     f64,
    by:     f64,
    bottom: Option<f64>,
    top:    Option<f64>,
    door:   Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load walls from a CSV file.
pub fn load_walls_csv(path: &Path) -> GraphResult<Vec<Wall>> {
    let file = std::fs::File::open(path)?;
    load_walls_reader(file)
}

/// Like [`load_walls_csv`] but accepts any `Read` source.
pub fn load_walls_reader<R: Read>(reader: R) -> GraphResult<Vec<Wall>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut walls = Vec::new();

    for (line, result) in csv_reader.deserialize::<WallRecord>().enumerate() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        let door = parse_door(row.door.as_deref().unwrap_or(""))
            .map_err(|msg| GraphError::Parse(format!("row {}: {msg}", line + 1)))?;
        let bottom = row.bottom.unwrap_or(f64::NEG_INFINITY);
        let top = row.top.unwrap_or(f64::INFINITY);
        if bottom > top {
            return Err(GraphError::Parse(format!(
                "row {}: bottom {bottom} is above top {top}",
                line + 1
            )));
        }
        walls.push(
            Wall::new(WorldPoint::new(row.ax, row.ay), WorldPoint::new(row.bx, row.by))
                .with_height(bottom, top)
                .with_door(door),
        );
    }

    tracing::debug!(walls = walls.len(), "loaded wall set");
    Ok(walls)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_door(s: &str) -> Result<DoorState, String> {
    match s.trim() {
        "" | "none" => Ok(DoorState::None),
        "closed" => Ok(DoorState::Closed),
        "open" => Ok(DoorState::Open),
        other => Err(format!(
            "invalid door state {other:?}: expected \"none\", \"closed\" or \"open\""
        )),
    }
}
