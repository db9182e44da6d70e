use crate::VarBind;

use super::GenericCtx;
use super::values::Binder;

/// A context that only tracks the binding structure, not the types bound.
/// This is the context threaded through substitution.
pub type LevelCtx = GenericCtx<()>;

impl LevelCtx {
    /// A context of `len` anonymous binders.
    pub fn nameless(len: usize) -> Self {
        LevelCtx::from(
            (0..len).map(|_| Binder { name: VarBind::wildcard(), content: () }).collect::<Vec<_>>(),
        )
    }
}

impl From<Vec<VarBind>> for LevelCtx {
    fn from(value: Vec<VarBind>) -> Self {
        LevelCtx {
            bound: value.into_iter().map(|name| Binder { name, content: () }).collect(),
        }
    }
}
