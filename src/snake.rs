use Direction::*;

pub const DIRECTIONS: [Direction; 4] = [Up, Down, Left, Right];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Row and column delta of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// A cell on the board, addressed by row and column. Signed so that a head
/// which has left the board is still representable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Coord { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Coord { row: self.row + dr, col: self.col + dc }
    }
}

/// One cell of the snake body together with the heading it had when it was
/// at the front. Segments never compare against targets directly, go through
/// `coord` (or `Coord::from`) instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Segment {
    pub coord: Coord,
    pub direction: Direction,
}

impl Segment {
    pub fn new(coord: Coord, direction: Direction) -> Self {
        Segment { coord, direction }
    }

    /// The cell this segment entered from, i.e. one step against its heading.
    pub fn behind(&self) -> Segment {
        Segment { coord: self.coord.step(self.direction.opposite()), direction: self.direction }
    }
}

impl From<Segment> for Coord {
    fn from(segment: Segment) -> Self {
        segment.coord
    }
}

impl From<&Segment> for Coord {
    fn from(segment: &Segment) -> Self {
        segment.coord
    }
}
