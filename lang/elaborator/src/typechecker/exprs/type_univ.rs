use minipi_ast::*;

use crate::result::TcResult;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_by_infer};

impl CheckInfer for TypeUniv {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        check_by_infer(self, ctx, t)
    }

    /// The universe is typed by itself; there is no universe hierarchy.
    fn infer(&self, _ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Ok(Box::new(TypeUniv::new().into()))
    }
}
