use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::{Ident, Lvl};
use crate::traits::*;

use super::{Args, Exp};

/// A type constructor applied to its parameters, e.g. `Vec(Nat, n)`.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct TypCtor {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub name: Ident,
    pub args: Args,
}

impl TypCtor {
    pub fn to_exp(&self) -> Exp {
        Exp::TypCtor(self.clone())
    }
}

impl HasSpan for TypCtor {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<TypCtor> for Exp {
    fn from(val: TypCtor) -> Self {
        Exp::TypCtor(val)
    }
}

impl Shift for TypCtor {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.args.shift_in_range(range, by);
    }
}

impl Occurs for TypCtor {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        self.args.occurs(ctx, f)
    }
}

impl Substitutable for TypCtor {
    type Target = TypCtor;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let TypCtor { span, name, args } = self;
        TypCtor { span: *span, name: name.clone(), args: args.subst(ctx, by) }
    }
}

impl Print for TypCtor {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let TypCtor { name, args, .. } = self;
        let head = alloc.typ(&name.id);
        if args.is_empty() {
            head
        } else {
            head.append(args.print(cfg, alloc).parens())
        }
    }
}
