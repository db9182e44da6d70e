pub mod conversion_checking;
pub mod normalizer;
pub mod result;
pub mod typechecker;
pub mod unifier;

pub use result::{TcResult, TypeError};
pub use typechecker::decls::check_module;
pub use typechecker::type_info_table::TypeInfoTable;
