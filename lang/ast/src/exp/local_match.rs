use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::tokens::MATCH;
use minipi_printer::util::ParensIfExt;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::Lvl;
use crate::traits::*;

use super::{Case, Exp, print_cases};

/// A pattern match `match e { p => b, ... }`. Each case body lives under the
/// binders of its pattern.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct LocalMatch {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub on_exp: Box<Exp>,
    pub cases: Vec<Case>,
}

impl HasSpan for LocalMatch {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<LocalMatch> for Exp {
    fn from(val: LocalMatch) -> Self {
        Exp::LocalMatch(val)
    }
}

impl Shift for LocalMatch {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.on_exp.shift_in_range(range, by);
        self.cases.shift_in_range(range, by);
    }
}

impl Occurs for LocalMatch {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let LocalMatch { on_exp, cases, .. } = self;
        on_exp.occurs(ctx, f) || cases.occurs(ctx, f)
    }
}

impl Substitutable for LocalMatch {
    type Target = LocalMatch;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let LocalMatch { span, on_exp, cases } = self;
        LocalMatch { span: *span, on_exp: on_exp.subst(ctx, by), cases: cases.subst(ctx, by) }
    }
}

impl Print for LocalMatch {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let LocalMatch { on_exp, cases, .. } = self;
        alloc
            .keyword(MATCH)
            .append(alloc.space())
            .append(on_exp.print_prec(cfg, alloc, Precedence::App))
            .append(alloc.space())
            .append(print_cases(cases, cfg, alloc))
            .parens_if(prec > Precedence::Exp)
    }
}
