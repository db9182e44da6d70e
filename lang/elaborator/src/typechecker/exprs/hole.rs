use minipi_ast::*;
use minipi_miette_util::ToMiette;
use minipi_printer::Print;

use crate::result::{TcResult, TypeError};

use super::super::ctx::Ctx;
use super::CheckInfer;

impl CheckInfer for Hole {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        match self.kind {
            // An admitted obligation is accepted at any type.
            HoleKind::Admitted => Ok(()),
            // An open goal reports the local context and the expected type.
            HoleKind::Goal => Err(Box::new(TypeError::UnmetObligation {
                goal: t.print_to_string(None),
                ctx: ctx.print_to_string(None),
                span: self.span.to_miette(),
            })),
        }
    }

    fn infer(&self, _ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Err(TypeError::must_annotate(&self.clone().into()))
    }
}
