use minipi_ast::*;

use crate::result::{TcResult, TypeError};

use super::super::ctx::Ctx;
use super::super::telescope::{check_args, instantiate_params};
use super::super::util::expect_typ_app;
use super::CheckInfer;

impl CheckInfer for Ctor {
    /// A constructor checks against an application of the data type that
    /// declares it. The constructor telescope is instantiated with the type
    /// parameters before the arguments are checked.
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        let Ctor { span, name, args } = self;
        let typ_app = expect_typ_app(t)?;
        let scoped = ctx.info.lookup_ctor_in(name, &typ_app.name)?;
        let tele = instantiate_params(&scoped.data_params, &typ_app.args, &scoped.ctor.params);
        check_args(args, name, ctx, &tele, *span)?;
        Ok(())
    }

    /// Constructors can only be inferred when the name uniquely determines a
    /// data type without parameters; everything else needs an annotation.
    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        let Ctor { span, name, args } = self;
        let scoped = ctx.info.lookup_ctor_unique(name)?;
        if !scoped.data_params.is_empty() {
            return Err(TypeError::must_annotate(&self.clone().into()));
        }
        check_args(args, name, ctx, &scoped.ctor.params, *span)?;
        Ok(Box::new(Exp::TypCtor(TypCtor {
            span: *span,
            name: scoped.ctor.typ_name.clone(),
            args: Args::default(),
        })))
    }
}
