use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::tokens::{PRINTME, TRUSTME};
use minipi_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::Lvl;
use crate::traits::*;

use super::Exp;

/// Whether a hole is an admitted obligation or an open goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoleKind {
    /// `TRUSTME`: accepted at any type without proof.
    Admitted,
    /// `PRINTME`: reported as an unmet obligation together with the local
    /// context and the goal.
    Goal,
}

#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Hole {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub kind: HoleKind,
}

impl HasSpan for Hole {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Hole> for Exp {
    fn from(val: Hole) -> Self {
        Exp::Hole(val)
    }
}

impl Shift for Hole {
    fn shift_in_range<R: ShiftRange>(&mut self, _range: &R, _by: isize) {}
}

impl Occurs for Hole {
    fn occurs<F: Fn(Lvl) -> bool>(&self, _ctx: &mut LevelCtx, _f: &F) -> bool {
        false
    }
}

impl Substitutable for Hole {
    type Target = Hole;
    fn subst<S: Substitution>(&self, _ctx: &mut LevelCtx, _by: &S) -> Self::Target {
        self.clone()
    }
}

impl Print for Hole {
    fn print_prec<'a>(
        &'a self,
        _cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        match self.kind {
            HoleKind::Admitted => alloc.keyword(TRUSTME),
            HoleKind::Goal => alloc.keyword(PRINTME),
        }
    }
}
