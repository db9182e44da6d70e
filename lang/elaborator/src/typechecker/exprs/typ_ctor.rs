use minipi_ast::*;

use crate::result::TcResult;

use super::super::ctx::Ctx;
use super::super::telescope::check_args;
use super::{CheckInfer, check_by_infer};

impl CheckInfer for TypCtor {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        check_by_infer(self, ctx, t)
    }

    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        let TypCtor { span, name, args } = self;
        let data = ctx.info.lookup_tyctor(name)?;
        let params = data.params.clone();
        check_args(args, name, ctx, &params, *span)?;
        Ok(Box::new(TypeUniv::new().into()))
    }
}
