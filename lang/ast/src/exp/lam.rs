use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::tokens::{BACKSLASH, DOT};
use minipi_printer::util::ParensIfExt;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::values::Binder;
use crate::ctx::{BindContext, LevelCtx};
use crate::ident::{Lvl, VarBind};
use crate::traits::*;

use super::Exp;

/// A function `\x. body`; the body lives under the binder for `x`.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Lam {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub param: VarBind,
    pub body: Box<Exp>,
}

impl HasSpan for Lam {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Lam> for Exp {
    fn from(val: Lam) -> Self {
        Exp::Lam(val)
    }
}

impl Shift for Lam {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.body.shift_in_range(&range.clone().shift(1), by);
    }
}

impl Occurs for Lam {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let Lam { param, body, .. } = self;
        ctx.bind_single(Binder { name: param.clone(), content: () }, |ctx| body.occurs(ctx, f))
    }
}

impl Substitutable for Lam {
    type Target = Lam;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let Lam { span, param, body } = self;
        let body = ctx.bind_single(Binder { name: param.clone(), content: () }, |ctx| {
            let mut by = (*by).clone();
            by.shift(1);
            body.subst(ctx, &by)
        });
        Lam { span: *span, param: param.clone(), body }
    }
}

impl Print for Lam {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Lam { param, body, .. } = self;
        alloc
            .text(BACKSLASH)
            .append(param.print(cfg, alloc))
            .append(DOT)
            .append(alloc.space())
            .append(body.print(cfg, alloc))
            .group()
            .parens_if(prec > Precedence::Exp)
    }
}
