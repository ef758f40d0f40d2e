use crate::coords::Vec2;

/// 2D cursor with a heading, stepped with relative turn + move commands.
///
/// Values are immutable: [`moved`](Self::moved) returns the next state, so a
/// sequence of steps reads as a chain and intermediate states stay inspectable.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Turtle {
    pub pos: Vec2,
    /// Degrees, 0 = +X, 90 = +Y.
    pub heading: f32,
}

impl Turtle {
    /// Turtle at `pos` facing +X.
    #[inline]
    pub const fn new(pos: Vec2) -> Self {
        Self { pos, heading: 0.0 }
    }

    #[inline]
    pub const fn with_heading(pos: Vec2, heading: f32) -> Self {
        Self { pos, heading }
    }

    /// Turns by `turn` degrees, then advances `distance` along the new heading.
    ///
    /// A negative distance steps backwards without turning around.
    #[inline]
    #[must_use]
    pub fn moved(self, turn: f32, distance: f32) -> Turtle {
        let heading = self.heading + turn;
        Turtle {
            pos: self.pos + Vec2::from_degrees(heading) * distance,
            heading,
        }
    }

    /// Same heading, new position.
    #[inline]
    #[must_use]
    pub fn at(self, pos: Vec2) -> Turtle {
        Turtle { pos, ..self }
    }
}
