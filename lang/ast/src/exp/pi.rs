use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::tokens::{ARROW, COLON};
use minipi_printer::util::ParensIfExt;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::values::Binder;
use crate::ctx::{BindContext, LevelCtx};
use crate::ident::{Lvl, VarBind};
use crate::traits::*;

use super::Exp;

/// A dependent function type `(x : A) -> B`; the codomain lives under the
/// binder for `x`.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Pi {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub param: VarBind,
    pub domain: Box<Exp>,
    pub codomain: Box<Exp>,
}

impl HasSpan for Pi {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Pi> for Exp {
    fn from(val: Pi) -> Self {
        Exp::Pi(val)
    }
}

impl Shift for Pi {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.domain.shift_in_range(range, by);
        self.codomain.shift_in_range(&range.clone().shift(1), by);
    }
}

impl Occurs for Pi {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let Pi { param, domain, codomain, .. } = self;
        domain.occurs(ctx, f)
            || ctx.bind_single(Binder { name: param.clone(), content: () }, |ctx| {
                codomain.occurs(ctx, f)
            })
    }
}

impl Substitutable for Pi {
    type Target = Pi;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let Pi { span, param, domain, codomain } = self;
        let domain = domain.subst(ctx, by);
        let codomain = ctx.bind_single(Binder { name: param.clone(), content: () }, |ctx| {
            let mut by = (*by).clone();
            by.shift(1);
            codomain.subst(ctx, &by)
        });
        Pi { span: *span, param: param.clone(), domain, codomain }
    }
}

impl Print for Pi {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Pi { param, domain, codomain, .. } = self;
        let domain_doc = if param.id == "_" {
            domain.print_prec(cfg, alloc, Precedence::App)
        } else {
            param
                .print(cfg, alloc)
                .append(alloc.space())
                .append(COLON)
                .append(alloc.space())
                .append(domain.print(cfg, alloc))
                .parens()
        };
        domain_doc
            .append(alloc.space())
            .append(ARROW)
            .append(alloc.space())
            .append(codomain.print_prec(cfg, alloc, Precedence::Ops))
            .group()
            .parens_if(prec > Precedence::Ops)
    }
}
