use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::{Idx, Lvl, VarBound};
use crate::traits::*;

use super::Exp;

/// A bound variable occurrence. The variable is represented
/// using a de Bruijn index, but we keep the information
/// about the name that was originally annotated in the program.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Variable {
    /// Source code location
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    /// The de Bruijn index that is used to represent the
    /// binding structure of terms.
    pub idx: Idx,
    /// The name that was originally annotated in the program.
    /// We do not use this information for tracking the binding
    /// structure, but only for prettyprinting code.
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub name: VarBound,
}

impl HasSpan for Variable {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Variable> for Exp {
    fn from(val: Variable) -> Self {
        Exp::Variable(val)
    }
}

impl Shift for Variable {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.idx.shift_in_range(range, by);
    }
}

impl Occurs for Variable {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        f(ctx.idx_to_lvl(self.idx))
    }
}

impl Substitutable for Variable {
    type Target = Box<Exp>;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let Variable { span, idx, name } = self;
        match by.get_subst(ctx, ctx.idx_to_lvl(*idx)) {
            Some(exp) => exp,
            None => Box::new(Exp::Variable(Variable {
                span: *span,
                idx: *idx,
                name: name.clone(),
            })),
        }
    }
}

impl Print for Variable {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let Variable { name, idx, .. } = self;
        if cfg.de_bruijn {
            alloc.text(format!("{name}@{idx}"))
        } else if name.id.is_empty() {
            alloc.text(format!("@{idx}"))
        } else {
            alloc.text(&name.id)
        }
    }
}
