use serde::{Deserialize, Serialize};

/// Tiling that decides which cells are geometrically adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Square cells with the eight Moore neighbors.
    #[default]
    Rectangle,
    /// Hexagons in axial layout, six neighbors.
    Hexagon,
    /// Alternating up/down triangles, twelve neighbors.
    Triangle,
    /// Sheared squares, eight neighbors.
    Rhombus,
    /// Alternating pentagons, seven neighbors.
    Pentagon,
}

/// Filter narrowing a shape's offsets to the ones a rule consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NeighborhoodKind {
    /// Every offset the shape produces.
    #[default]
    Extended,
    /// Only offsets one orthogonal step away.
    Orthogonal,
}

/// What happens when a neighbor falls outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Wrap around to the opposite side.
    Toroidal,
    /// Reflect back into the grid.
    #[default]
    Mirror,
    /// Grow the grid to include the position.
    Infinite,
}

/// Simulation family. Fixes the state set a grid may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Conway,
    GeneralizedConway,
    Fire,
    Percolation,
    Segregation,
    WaTor,
    Sugarscape,
}
