mod coverage;
mod sdf;
mod composite;

pub use self::coverage::*;
pub use self::sdf::*;
pub use self::composite::*;
