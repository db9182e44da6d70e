use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::util::ParensIfExt;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::Lvl;
use crate::traits::*;

use super::Exp;

/// Application of a function to a single argument.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct App {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub fun: Box<Exp>,
    pub arg: Box<Exp>,
}

impl HasSpan for App {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<App> for Exp {
    fn from(val: App) -> Self {
        Exp::App(val)
    }
}

impl Shift for App {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.fun.shift_in_range(range, by);
        self.arg.shift_in_range(range, by);
    }
}

impl Occurs for App {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let App { fun, arg, .. } = self;
        fun.occurs(ctx, f) || arg.occurs(ctx, f)
    }
}

impl Substitutable for App {
    type Target = App;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let App { span, fun, arg } = self;
        App { span: *span, fun: fun.subst(ctx, by), arg: arg.subst(ctx, by) }
    }
}

impl Print for App {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let App { fun, arg, .. } = self;
        fun.print_prec(cfg, alloc, Precedence::App)
            .append(alloc.space())
            .append(arg.print_prec(cfg, alloc, Precedence::Atom))
            .group()
            .parens_if(prec > Precedence::App)
    }
}
