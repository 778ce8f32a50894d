use lane_core::GridCell;

/// Euclidean distance between two cells, in cells.
#[inline]
pub fn euclidean(a: GridCell, b: GridCell) -> f64 {
    f64::from(a.x - b.x).hypot(f64::from(a.z - b.z))
}

/// Cost of one step between neighbouring cells: 1 straight, √2 diagonal.
#[inline]
pub fn step_cost(from: GridCell, to: GridCell) -> f64 {
    if from.is_diagonal_to(to) {
        std::f64::consts::SQRT_2
    } else {
        1.0
    }
}
