/// Vector types used for pointer positions.
///
/// This re-exports the [`glam`] types the rest of the workspace needs. Pointer
/// coordinates arrive from the host as floating point values; screen
/// rectangles stay integral (see [`crate::geometry::Rect`]).
///
/// ```
/// use folio_core::math::Vec2;
///
/// let pointer = Vec2::new(10.5, 20.0);
/// assert_eq!(pointer.floor(), Vec2::new(10.0, 20.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub use glam::{IVec2, Vec2};
