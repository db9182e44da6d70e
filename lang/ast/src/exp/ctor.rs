use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::{Ident, Lvl};
use crate::traits::*;

use super::{Args, Exp};

/// A data constructor applied to its arguments, e.g. `S(Z)`.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Ctor {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub name: Ident,
    pub args: Args,
}

impl HasSpan for Ctor {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Ctor> for Exp {
    fn from(val: Ctor) -> Self {
        Exp::Ctor(val)
    }
}

impl Shift for Ctor {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.args.shift_in_range(range, by);
    }
}

impl Occurs for Ctor {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        self.args.occurs(ctx, f)
    }
}

impl Substitutable for Ctor {
    type Target = Ctor;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let Ctor { span, name, args } = self;
        Ctor { span: *span, name: name.clone(), args: args.subst(ctx, by) }
    }
}

impl Print for Ctor {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let Ctor { name, args, .. } = self;
        let head = alloc.ctor(&name.id);
        if args.is_empty() {
            head
        } else {
            head.append(args.print(cfg, alloc).parens())
        }
    }
}
