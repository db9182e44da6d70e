use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::tokens::TYPE;
use minipi_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::Lvl;
use crate::traits::*;

use super::Exp;

/// The universe of types. There is no universe hierarchy: `Type` is typed by
/// itself.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct TypeUniv {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
}

impl TypeUniv {
    pub fn new() -> Self {
        TypeUniv { span: None }
    }
}

impl Default for TypeUniv {
    fn default() -> Self {
        Self::new()
    }
}

impl HasSpan for TypeUniv {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<TypeUniv> for Exp {
    fn from(val: TypeUniv) -> Self {
        Exp::TypeUniv(val)
    }
}

impl Shift for TypeUniv {
    fn shift_in_range<R: ShiftRange>(&mut self, _range: &R, _by: isize) {}
}

impl Occurs for TypeUniv {
    fn occurs<F: Fn(Lvl) -> bool>(&self, _ctx: &mut LevelCtx, _f: &F) -> bool {
        false
    }
}

impl Substitutable for TypeUniv {
    type Target = TypeUniv;
    fn subst<S: Substitution>(&self, _ctx: &mut LevelCtx, _by: &S) -> Self::Target {
        self.clone()
    }
}

impl Print for TypeUniv {
    fn print_prec<'a>(
        &'a self,
        _cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc.typ(TYPE)
    }
}
