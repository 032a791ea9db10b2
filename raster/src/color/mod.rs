mod transfer;
mod space;

pub use self::transfer::*;
pub use self::space::*;
