use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::tokens::COLON;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::Lvl;
use crate::traits::*;

use super::Exp;

/// Type ascription `(e : T)`. Erased by weak-head normalization.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Anno {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub exp: Box<Exp>,
    pub typ: Box<Exp>,
}

impl HasSpan for Anno {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Anno> for Exp {
    fn from(val: Anno) -> Self {
        Exp::Anno(val)
    }
}

impl Shift for Anno {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.exp.shift_in_range(range, by);
        self.typ.shift_in_range(range, by);
    }
}

impl Occurs for Anno {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let Anno { exp, typ, .. } = self;
        exp.occurs(ctx, f) || typ.occurs(ctx, f)
    }
}

impl Substitutable for Anno {
    type Target = Anno;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let Anno { span, exp, typ } = self;
        Anno { span: *span, exp: exp.subst(ctx, by), typ: typ.subst(ctx, by) }
    }
}

impl Print for Anno {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let Anno { exp, typ, .. } = self;
        exp.print(cfg, alloc)
            .append(alloc.space())
            .append(COLON)
            .append(alloc.space())
            .append(typ.print(cfg, alloc))
            .parens()
            .group()
    }
}
