use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::{Ident, Lvl};
use crate::traits::*;

use super::Exp;

/// A reference to a top-level definition.
///
/// Whether the name can be unfolded is decided by the global signature;
/// the occurrence itself is just the name.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Global {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub name: Ident,
}

impl HasSpan for Global {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Global> for Exp {
    fn from(val: Global) -> Self {
        Exp::Global(val)
    }
}

impl Shift for Global {
    fn shift_in_range<R: ShiftRange>(&mut self, _range: &R, _by: isize) {}
}

impl Occurs for Global {
    fn occurs<F: Fn(Lvl) -> bool>(&self, _ctx: &mut LevelCtx, _f: &F) -> bool {
        false
    }
}

impl Substitutable for Global {
    type Target = Global;
    fn subst<S: Substitution>(&self, _ctx: &mut LevelCtx, _by: &S) -> Self::Target {
        self.clone()
    }
}

impl Print for Global {
    fn print_prec<'a>(
        &'a self,
        _cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc.text(&self.name.id)
    }
}
