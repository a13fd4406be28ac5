//! Coordinate transforms between the rink and the drawing surface.

pub mod rink;
