//! Neighbourhood walked by the chain-fell search

use glam::IVec3;

/// Offsets expanded from each log: the eight cells around it at the same
/// height and the nine cells one level up. Never downward.
pub const FELLING_NEIGHBORS: [IVec3; 17] = [
    IVec3::new(1, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(0, 1, 1),
    IVec3::new(-1, 0, -1),
    IVec3::new(1, 0, -1),
    IVec3::new(1, 0, 1),
    IVec3::new(-1, 0, 1),
    IVec3::new(0, 1, -1),
    IVec3::new(1, 1, 0),
    IVec3::new(1, 1, -1),
    IVec3::new(-1, 1, 1),
    IVec3::new(-1, 1, -1),
    IVec3::new(1, 1, 1),
];

/// Neighbour positions of `pos` in expansion order
pub fn felling_neighbors(pos: IVec3) -> impl Iterator<Item = IVec3> {
    FELLING_NEIGHBORS.iter().map(move |offset| pos + *offset)
}
