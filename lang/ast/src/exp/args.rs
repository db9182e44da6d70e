use derivative::Derivative;
use minipi_printer::{Alloc, Builder, DocAllocator, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::Lvl;
use crate::traits::*;

use super::Exp;

/// An ordered argument list for a type or data constructor.
#[derive(Debug, Clone, Default, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Args {
    pub args: Vec<Box<Exp>>,
}

impl Args {
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Box<Exp>> {
        self.args.iter()
    }
}

impl From<Vec<Box<Exp>>> for Args {
    fn from(args: Vec<Box<Exp>>) -> Self {
        Args { args }
    }
}

impl Shift for Args {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.args.shift_in_range(range, by);
    }
}

impl Occurs for Args {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        self.args.occurs(ctx, f)
    }
}

impl Substitutable for Args {
    type Target = Args;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        Args { args: self.args.subst(ctx, by) }
    }
}

impl Print for Args {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let sep = alloc.text(",").append(alloc.space());
        alloc.intersperse(self.args.iter().map(|arg| arg.print(cfg, alloc)), sep)
    }
}
