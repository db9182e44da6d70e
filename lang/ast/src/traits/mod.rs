pub mod has_span;
pub mod occurs;
pub mod shift;
pub mod subst;

pub use has_span::*;
pub use occurs::*;
pub use shift::*;
pub use subst::*;
