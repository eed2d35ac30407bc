//! Vehicle placement types.

/// The label of the distinguished vehicle whose escape defines the goal.
pub const EXIT_LABEL: u32 = 1;

/// Axis a vehicle slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Parse the single-character form used by puzzle files
    pub fn from_symbol(symbol: char) -> Option<Orientation> {
        match symbol {
            'h' => Some(Orientation::Horizontal),
            'v' => Some(Orientation::Vertical),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

/// A vehicle on the grid. Immutable once constructed; a move produces a
/// relocated copy rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vehicle {
    pub label: u32,
    pub orientation: Orientation,
    pub length: usize,
    /// Column of the topmost/leftmost occupied cell
    pub x: usize,
    /// Row of the topmost/leftmost occupied cell
    pub y: usize,
}

impl Vehicle {
    pub fn new(label: u32, orientation: Orientation, length: usize, x: usize, y: usize) -> Self {
        Self {
            label,
            orientation,
            length,
            x,
            y,
        }
    }

    /// Occupied cells as `(x, y)` pairs, in axis order from the anchor
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let Vehicle {
            orientation, x, y, ..
        } = *self;
        (0..self.length).map(move |i| match orientation {
            Orientation::Horizontal => (x + i, y),
            Orientation::Vertical => (x, y + i),
        })
    }

    /// Copy of this vehicle relocated to a new anchor cell
    pub fn moved_to(&self, x: usize, y: usize) -> Vehicle {
        Vehicle { x, y, ..*self }
    }

    pub fn is_exit(&self) -> bool {
        self.label == EXIT_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_symbols() {
        assert_eq!(Orientation::from_symbol('h'), Some(Orientation::Horizontal));
        assert_eq!(Orientation::from_symbol('v'), Some(Orientation::Vertical));
        assert_eq!(Orientation::from_symbol('x'), None);
        assert_eq!(Orientation::Horizontal.symbol(), 'h');
        assert_eq!(Orientation::Vertical.symbol(), 'v');
    }

    #[test]
    fn test_cells_follow_orientation() {
        let horizontal = Vehicle::new(1, Orientation::Horizontal, 3, 2, 4);
        assert_eq!(
            horizontal.cells().collect::<Vec<_>>(),
            vec![(2, 4), (3, 4), (4, 4)]
        );

        let vertical = Vehicle::new(2, Orientation::Vertical, 2, 0, 1);
        assert_eq!(vertical.cells().collect::<Vec<_>>(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_moved_to_keeps_shape() {
        let vehicle = Vehicle::new(3, Orientation::Vertical, 2, 1, 1);
        let moved = vehicle.moved_to(1, 3);
        assert_eq!(moved.label, 3);
        assert_eq!(moved.length, 2);
        assert_eq!(moved.orientation, Orientation::Vertical);
        assert_eq!((moved.x, moved.y), (1, 3));
        // the source vehicle is untouched
        assert_eq!((vehicle.x, vehicle.y), (1, 1));
    }
}
