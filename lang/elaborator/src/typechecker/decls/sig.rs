//! Checking toplevel type declarations

use std::rc::Rc;

use log::trace;
use minipi_miette_util::ToMiette;

use minipi_ast::*;

use crate::result::{TcResult, TypeError};
use crate::typechecker::ctx::Ctx;
use crate::typechecker::exprs::CheckInfer;
use crate::typechecker::type_info_table::TypeInfoTable;

use super::CheckToplevel;

impl CheckToplevel for Sig {
    type Output = Sig;

    fn check_wf(&self, info: &mut TypeInfoTable) -> TcResult<Sig> {
        trace!("Checking well-formedness of type declaration: {}", self.name);

        let Sig { span, name, typ } = self;

        if info.has_global(name) || info.has_hint(name) {
            return Err(Box::new(TypeError::DuplicateBinding {
                name: name.id.clone(),
                span: span.to_miette(),
            }));
        }

        let mut ctx = Ctx::new(Rc::new(info.clone()));
        let univ = Exp::TypeUniv(TypeUniv::new());
        typ.check(&mut ctx, &univ)?;

        info.insert_hint(name.clone(), typ.clone());
        Ok(self.clone())
    }
}
