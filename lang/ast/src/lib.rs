pub mod ctx;
pub mod decls;
pub mod exp;
pub mod ident;
pub mod traits;

pub use decls::*;
pub use exp::*;
pub use ident::*;
pub use traits::*;

pub use fxhash::FxHashMap as HashMap;
pub use fxhash::FxHashSet as HashSet;
