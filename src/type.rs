/// The discriminating axis of a k-d tree level.
///
/// The root splits on `X`, its children on `Y`, and so on, alternating by depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The axis used at the given tree depth (`depth mod 2`).
    #[inline]
    pub fn from_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// The axis used by the next level down.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Pick the value on this axis out of an `(x, y)` pair.
    #[inline]
    pub fn select<T>(self, x: T, y: T) -> T {
        match self {
            Axis::X => x,
            Axis::Y => y,
        }
    }
}
