use minipi_ast::*;

use crate::result::{TcResult, TypeError};

use super::super::ctx::Ctx;
use super::CheckInfer;

impl CheckInfer for LocalLet {
    /// The bound term is substituted into the body before checking, making
    /// the binding definitionally transparent. This mirrors the `let` rule
    /// of the normalizer.
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        let LocalLet { bound, body, .. } = self;
        let body = instantiate(&ctx.levels(), body, bound);
        body.check(ctx, t)
    }

    fn infer(&self, _ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Err(TypeError::must_annotate(&self.clone().into()))
    }
}
