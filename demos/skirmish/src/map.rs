//! The skirmish battlefield: a 12×8 square map with a ruined wall, a keep
//! door and a marsh.

use std::io::Cursor;

use route_core::{Mover, WorldPoint};
use route_graph::{
    DoorState, OracleError, SquareGrid, TerrainMeasurement, TerrainOracle, Wall, WallIndex,
    load_walls_reader,
};

pub const COLUMNS:        i32 = 12;
pub const ROWS:           i32 = 8;
pub const CELL_PX:        f64 = 100.0;
pub const UNITS_PER_CELL: f64 = 5.0;

// A north–south wall on x = 600 with a breach at row 6, and the keep's
// west wall on x = 900 whose only opening is a door at row 2.
const WALLS_CSV: &str = "\
ax,ay,bx,by,bottom,top,door\n\
600,0,600,600,,,none\n\
600,700,600,800,,,none\n\
900,0,900,200,,,none\n\
900,200,900,300,,,closed\n\
900,300,900,800,,,none\n\
";

pub fn grid() -> SquareGrid {
    SquareGrid::new(COLUMNS, ROWS, CELL_PX, UNITS_PER_CELL)
}

/// Walls with the keep door in `door` state.
pub fn walls(door: DoorState) -> anyhow::Result<WallIndex> {
    let walls = load_walls_reader(Cursor::new(WALLS_CSV))?
        .into_iter()
        .map(|w| if w.door == DoorState::None { w } else { w.with_door(door) })
        .collect::<Vec<Wall>>();
    Ok(WallIndex::new(walls))
}

/// Marsh on columns 2–4, rows 3–7: every cell entered there counts double.
pub struct Marsh;

impl Marsh {
    fn contains(p: WorldPoint) -> bool {
        (200.0..500.0).contains(&p.x) && (300.0..800.0).contains(&p.y)
    }
}

impl TerrainOracle for Marsh {
    fn measure(
        &self,
        from: WorldPoint,
        to: WorldPoint,
        _mover: &Mover,
        _no_diagonals: bool,
    ) -> Result<TerrainMeasurement, OracleError> {
        let cells = ((to.x - from.x).abs().max((to.y - from.y).abs()) / CELL_PX).round();
        let factor = if Self::contains(to) { 2.0 } else { 1.0 };
        Ok(TerrainMeasurement::new(cells * factor * UNITS_PER_CELL))
    }
}
