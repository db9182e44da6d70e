use minipi_ast::*;

use crate::result::TcResult;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_by_infer};

impl CheckInfer for Variable {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        check_by_infer(self, ctx, t)
    }

    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Ok(ctx.lookup(self.idx))
    }
}
