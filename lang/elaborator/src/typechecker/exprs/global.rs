use minipi_ast::*;

use crate::result::TcResult;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_by_infer};

impl CheckInfer for Global {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        check_by_infer(self, ctx, t)
    }

    /// The type of a global is recorded in the signature, either as part of
    /// its definition or as a declared hint. The latter makes recursive
    /// definitions possible: while the body of `f` is checked, `f` itself is
    /// only a hint.
    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        let mut typ = ctx.info.lookup_global_typ(&self.name)?;
        // Global types are closed; weaken them into the current scope.
        typ.shift(ctx.len() as isize);
        Ok(typ)
    }
}
