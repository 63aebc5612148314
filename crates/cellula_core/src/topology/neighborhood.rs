pub use cellula_data::NeighborhoodKind;
use cellula_data::Offset;

pub trait NeighborhoodLogic {
    /// Whether the filter keeps this offset.
    fn admits(&self, offset: Offset) -> bool;

    /// Filters a shape's offsets, preserving their order.
    fn select(&self, offsets: &[Offset]) -> Vec<Offset> {
        offsets.iter().copied().filter(|o| self.admits(*o)).collect()
    }

    /// Resolves a configuration name. Unknown names fall back to `Extended`.
    fn from_name(name: &str) -> Self;
}

impl NeighborhoodLogic for NeighborhoodKind {
    #[inline]
    fn admits(&self, (dr, dc): Offset) -> bool {
        match self {
            NeighborhoodKind::Extended => true,
            NeighborhoodKind::Orthogonal => dr.abs() + dc.abs() == 1,
        }
    }

    fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "extended" | "moore" | "all" | "complete" => NeighborhoodKind::Extended,
            "orthogonal" | "cardinal" | "von_neumann" | "vonneumann" => {
                NeighborhoodKind::Orthogonal
            }
            other => {
                tracing::warn!(neighborhood = other, "Unknown neighborhood, using extended");
                NeighborhoodKind::Extended
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::shape::{ShapeKind, ShapeLogic};

    #[test]
    fn test_extended_passes_through() {
        let offsets = ShapeKind::Rectangle.neighbor_offsets(0, 0);
        assert_eq!(NeighborhoodKind::Extended.select(offsets), offsets.to_vec());
    }

    #[test]
    fn test_orthogonal_on_rectangle() {
        let offsets = ShapeKind::Rectangle.neighbor_offsets(0, 0);
        assert_eq!(
            NeighborhoodKind::Orthogonal.select(offsets),
            vec![(-1, 0), (0, -1), (0, 1), (1, 0)]
        );
    }

    #[test]
    fn test_orthogonal_on_triangle_keeps_unit_steps() {
        let up = NeighborhoodKind::Orthogonal.select(ShapeKind::Triangle.neighbor_offsets(0, 0));
        assert_eq!(up, vec![(-1, 0), (0, -1), (0, 1), (1, 0)]);
        let down =
            NeighborhoodKind::Orthogonal.select(ShapeKind::Triangle.neighbor_offsets(0, 1));
        assert_eq!(down, vec![(-1, 0), (0, -1), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_orthogonal_on_pentagon_drops_missing_side() {
        let even = NeighborhoodKind::Orthogonal.select(ShapeKind::Pentagon.neighbor_offsets(0, 0));
        assert_eq!(even, vec![(-1, 0), (0, -1), (0, 1)]);
        let odd = NeighborhoodKind::Orthogonal.select(ShapeKind::Pentagon.neighbor_offsets(1, 0));
        assert_eq!(odd, vec![(0, -1), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_unknown_neighborhood_falls_back() {
        assert_eq!(
            NeighborhoodKind::from_name("Von_Neumann"),
            NeighborhoodKind::Orthogonal
        );
        assert_eq!(
            NeighborhoodKind::from_name("hexagonal"),
            NeighborhoodKind::Extended
        );
    }
}
