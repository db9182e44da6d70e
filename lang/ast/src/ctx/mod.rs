pub mod def;
pub mod levels;
pub mod values;

pub use def::*;
pub use levels::*;
