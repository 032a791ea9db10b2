mod roots;
mod primitives;
mod point;
mod curve;
mod contour;

pub use self::roots::*;
pub use self::primitives::*;
pub use self::point::*;
pub use self::curve::*;
pub use self::contour::*;
