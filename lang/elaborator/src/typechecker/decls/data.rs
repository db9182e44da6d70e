//! Checking the well-formedness of toplevel data type declarations

use std::rc::Rc;

use log::trace;
use minipi_miette_util::ToMiette;

use minipi_ast::*;

use crate::result::{TcResult, TypeError};
use crate::typechecker::ctx::Ctx;
use crate::typechecker::telescope::InferTelescope;
use crate::typechecker::type_info_table::{TyCtorMeta, TypeInfoTable};

use super::CheckToplevel;

impl CheckToplevel for Data {
    type Output = Data;

    fn check_wf(&self, info: &mut TypeInfoTable) -> TcResult<Data> {
        trace!("Checking well-formedness of data type: {}", self.name);

        let Data { span, name, params, ctors } = self;

        if info.has_tyctor(name) {
            return Err(Box::new(TypeError::DuplicateBinding {
                name: name.id.clone(),
                span: span.to_miette(),
            }));
        }

        // The parameter telescope of a data type binds variables only;
        // equations may occur in constructor telescopes.
        if params.params.iter().any(|param| matches!(param, Param::Def { .. })) {
            return Err(TypeError::impossible(
                "Data type parameters must not contain equations",
                *span,
            ));
        }

        let mut ctor_names: HashSet<Ident> = HashSet::default();
        for ctor in ctors {
            if !ctor_names.insert(ctor.name.clone()) {
                return Err(Box::new(TypeError::DuplicateCtor {
                    name: ctor.name.id.clone(),
                    typ_name: name.id.clone(),
                    span: ctor.span.to_miette(),
                }));
            }
        }

        // The data type itself is in scope while its constructors are
        // checked, permitting recursive occurrences.
        let mut info_rec = info.clone();
        info_rec.insert_tyctor(
            name.clone(),
            TyCtorMeta {
                params: params.clone(),
                ctors: ctors.iter().map(|ctor| ctor.name.clone()).collect(),
            },
        );
        let mut ctx = Ctx::new(Rc::new(info_rec));

        params.infer_telescope(&mut ctx, |ctx| {
            for ctor in ctors {
                check_ctor_wf(ctor, ctx)?;
            }
            Ok(())
        })?;

        info.insert_data(self);
        Ok(self.clone())
    }
}

/// Check a constructor declaration under the data type's parameters.
fn check_ctor_wf(ctor: &CtorDef, ctx: &mut Ctx) -> TcResult {
    trace!("Checking well-formedness of constructor: {}", ctor.name);

    ctor.params.infer_telescope(ctx, |_ctx| Ok(()))
}
