pub mod contour;
pub mod morph;

pub use contour::*;
pub use morph::*;
