mod png;

pub use self::png::*;
