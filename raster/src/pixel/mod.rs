mod pixmap;
mod sdf8;
mod scrgba16;

pub use self::pixmap::*;
pub use self::sdf8::*;
pub use self::scrgba16::*;
