//! 2D vector and point algebra. Pure values, no state.

pub mod point;
pub mod vector;

pub use point::Point2D;
pub use vector::Vector2D;
