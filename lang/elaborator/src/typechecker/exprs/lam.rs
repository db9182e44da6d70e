use minipi_ast::ctx::BindContext;
use minipi_ast::ctx::values::Binder;
use minipi_ast::*;

use crate::result::{TcResult, TypeError};

use super::super::ctx::Ctx;
use super::super::util::expect_pi;
use super::CheckInfer;

impl CheckInfer for Lam {
    /// A lambda checks against a dependent function type; its body is
    /// checked against the codomain under the extended context.
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        let Lam { param, body, .. } = self;
        let pi = expect_pi(t)?;
        ctx.bind_single(Binder { name: param.clone(), content: pi.domain.clone() }, |ctx| {
            body.check(ctx, &pi.codomain)
        })
    }

    fn infer(&self, _ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Err(TypeError::must_annotate(&self.clone().into()))
    }
}
