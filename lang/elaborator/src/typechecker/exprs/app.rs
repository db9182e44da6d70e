use minipi_ast::*;

use crate::normalizer::Whnf;
use crate::result::TcResult;

use super::super::ctx::Ctx;
use super::super::util::expect_pi;
use super::{CheckInfer, check_by_infer};

impl CheckInfer for App {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        check_by_infer(self, ctx, t)
    }

    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        let App { fun, arg, .. } = self;
        let fun_typ = fun.infer(ctx)?.whnf(&ctx.info, &ctx.levels())?;
        let pi = expect_pi(&fun_typ)?;
        arg.check(ctx, &pi.domain)?;
        Ok(instantiate(&ctx.levels(), &pi.codomain, arg))
    }
}
