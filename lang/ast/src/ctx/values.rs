//! Variable context
//!
//! Tracks locally bound variables

use crate::VarBind;
use crate::exp::Exp;
use crate::traits::{Shift, ShiftRange};

use super::{GenericCtx, LevelCtx};

/// Context mapping each bound variable to its type. Every entry is
/// well-scoped in the full context, including its own variable and all later
/// ones.
pub type TypeCtx = GenericCtx<Box<Exp>>;

impl TypeCtx {
    pub fn levels(&self) -> LevelCtx {
        let bound =
            self.bound.iter().map(|b| Binder { name: b.name.clone(), content: () }).collect();
        LevelCtx { bound }
    }

    pub fn map_failable<E, F>(&self, f: F) -> Result<Self, E>
    where
        F: Fn(&Exp) -> Result<Box<Exp>, E>,
    {
        let bound: Result<_, E> = self
            .bound
            .iter()
            .map(|b| Ok(Binder { name: b.name.clone(), content: f(&b.content)? }))
            .collect();

        Ok(Self { bound: bound? })
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Binder<T> {
    pub name: VarBind,
    pub content: T,
}

impl<T: Shift> Shift for Binder<T> {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.content.shift_in_range(range, by);
    }
}
