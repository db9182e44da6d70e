use minipi_ast::ctx::BindContext;
use minipi_ast::ctx::values::Binder;
use minipi_ast::*;

use crate::result::TcResult;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_by_infer};

impl CheckInfer for Pi {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        check_by_infer(self, ctx, t)
    }

    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        let Pi { param, domain, codomain, .. } = self;
        let univ = Exp::TypeUniv(TypeUniv::new());
        domain.check(ctx, &univ)?;
        ctx.bind_single(Binder { name: param.clone(), content: domain.clone() }, |ctx| {
            codomain.check(ctx, &univ)
        })?;
        Ok(Box::new(TypeUniv::new().into()))
    }
}
