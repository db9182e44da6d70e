use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::tokens::{EQUALS, IN, LET};
use minipi_printer::util::ParensIfExt;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::values::Binder;
use crate::ctx::{BindContext, LevelCtx};
use crate::ident::{Lvl, VarBind};
use crate::traits::*;

use super::Exp;

/// A local definition `let x = e in body`; the body lives under the binder
/// for `x`. Checking substitutes the bound term eagerly, so `x` is
/// definitionally transparent.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct LocalLet {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub name: VarBind,
    pub bound: Box<Exp>,
    pub body: Box<Exp>,
}

impl HasSpan for LocalLet {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<LocalLet> for Exp {
    fn from(val: LocalLet) -> Self {
        Exp::LocalLet(val)
    }
}

impl Shift for LocalLet {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.bound.shift_in_range(range, by);
        self.body.shift_in_range(&range.clone().shift(1), by);
    }
}

impl Occurs for LocalLet {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let LocalLet { name, bound, body, .. } = self;
        bound.occurs(ctx, f)
            || ctx
                .bind_single(Binder { name: name.clone(), content: () }, |ctx| body.occurs(ctx, f))
    }
}

impl Substitutable for LocalLet {
    type Target = LocalLet;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let LocalLet { span, name, bound, body } = self;
        let bound = bound.subst(ctx, by);
        let body = ctx.bind_single(Binder { name: name.clone(), content: () }, |ctx| {
            let mut by = (*by).clone();
            by.shift(1);
            body.subst(ctx, &by)
        });
        LocalLet { span: *span, name: name.clone(), bound, body }
    }
}

impl Print for LocalLet {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let LocalLet { name, bound, body, .. } = self;
        alloc
            .keyword(LET)
            .append(alloc.space())
            .append(name.print(cfg, alloc))
            .append(alloc.space())
            .append(EQUALS)
            .append(alloc.space())
            .append(bound.print(cfg, alloc))
            .append(alloc.space())
            .append(alloc.keyword(IN))
            .append(alloc.line())
            .append(body.print(cfg, alloc))
            .group()
            .parens_if(prec > Precedence::Exp)
    }
}
