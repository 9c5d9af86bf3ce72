//! Screen geometry and hit testing.
//!
//! Every hit test in the workspace (button hover, click routing, drop target
//! resolution, exclusion zones) goes through [`Rect::contains`] so rendering
//! and input agree on what "inside" means.

use std::ops::Mul;

use crate::math::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    pub fn cast<U: From<T>>(self) -> Size<U> {
        Size {
            width: U::from(self.width),
            height: U::from(self.height),
        }
    }
}

impl<T: Mul + Copy> Mul<T> for Size<T> {
    type Output = Size<<T as Mul>::Output>;

    fn mul(self, rhs: T) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos<T> {
    pub x: T,
    pub y: T,
}

impl<T> Pos<T> {
    pub fn new(x: T, y: T) -> Self {
        Pos { x, y }
    }
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(pos: Pos<T>, size: Size<T>) -> Self {
        Rect {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }
}

impl<T: Copy> Rect<T> {
    pub fn position(&self) -> Pos<T> {
        Pos::new(self.x, self.y)
    }

    pub fn size(&self) -> Size<T> {
        Size::new(self.width, self.height)
    }
}

/// Integer screen rectangles, the unit the host lays widgets out in.
impl Rect<i32> {
    pub const ZERO: Rect<i32> = Rect::new(0, 0, 0, 0);

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Half-open hit test: the left and top edges are inside, the right and
    /// bottom edges belong to the neighbour.
    ///
    /// Empty rectangles contain nothing.
    pub fn contains(&self, point: Vec2) -> bool {
        !self.is_empty()
            && point.x >= self.x as f32
            && point.x < self.right() as f32
            && point.y >= self.y as f32
            && point.y < self.bottom() as f32
    }

    /// Integer variant of [`Rect::contains`].
    pub fn contains_pos(&self, pos: Pos<i32>) -> bool {
        !self.is_empty()
            && pos.x >= self.x
            && pos.x < self.right()
            && pos.y >= self.y
            && pos.y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect<i32>) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest rectangle enclosing both. Empty inputs are ignored.
    pub fn union(&self, other: &Rect<i32>) -> Rect<i32> {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect<i32> {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}
