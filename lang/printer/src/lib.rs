pub use pretty::DocAllocator;
pub use pretty::termcolor;

pub mod theme;
pub mod tokens;
pub mod types;
pub mod util;

pub use types::*;
