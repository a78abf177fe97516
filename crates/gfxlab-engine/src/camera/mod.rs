//! View and projection helpers: projections, an arcball for object
//! inspection and damped orbit controls for scene navigation.

mod arcball;
mod orbit;
mod projection;

pub use arcball::Arcball;
pub use orbit::OrbitControls;
pub use projection::Projection;
