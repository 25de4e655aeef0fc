/// LevelState: everything the clock loop owns for one level.
///
/// Rebuilt from scratch at every level start; nothing here survives a
/// level transition. Only the clock-tick thread ever touches it.

use crate::domain::geometry::Geometry;
use crate::domain::level::LevelParameters;
use crate::domain::motion::PlayerMotion;
use crate::domain::viewport::Viewport;

/// Lattice tile every level starts on.
pub const START_TILE: (i32, i32) = (1, 1);

#[derive(Clone, Debug)]
pub struct LevelState {
    pub params: LevelParameters,
    pub geom: Geometry,
    pub player: PlayerMotion,
    pub viewport: Viewport,
    /// Set once the player stands on an open exit; further steps are no-ops.
    pub cleared: bool,
}

impl LevelState {
    pub fn new(params: LevelParameters, geom: Geometry) -> Self {
        LevelState {
            params,
            geom,
            player: PlayerMotion::at_tile(START_TILE.0, START_TILE.1, &geom),
            viewport: Viewport::new(geom, &params),
            cleared: false,
        }
    }
}
