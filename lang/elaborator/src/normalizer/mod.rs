pub mod whnf;

pub use whnf::*;
