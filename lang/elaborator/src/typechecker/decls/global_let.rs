//! Checking the well-formedness of toplevel definitions

use std::rc::Rc;

use log::trace;
use minipi_miette_util::ToMiette;

use minipi_ast::*;

use crate::result::{TcResult, TypeError};
use crate::typechecker::ctx::Ctx;
use crate::typechecker::exprs::CheckInfer;
use crate::typechecker::type_info_table::{LetMeta, TypeInfoTable};

use super::CheckToplevel;

impl CheckToplevel for Let {
    /// Besides the checked definition, the output carries the type
    /// declaration to insert in front of it when the type was inferred.
    type Output = (Option<Sig>, Let);

    fn check_wf(&self, info: &mut TypeInfoTable) -> TcResult<Self::Output> {
        trace!("Checking well-formedness of global let: {}", self.name);

        let Let { span, name, typ, body } = self;

        if info.has_global(name) {
            return Err(Box::new(TypeError::DuplicateBinding {
                name: name.id.clone(),
                span: span.to_miette(),
            }));
        }

        let mut ctx = Ctx::new(Rc::new(info.clone()));

        // The type comes from an inline annotation, from an earlier
        // declaration, or from inference, in that order of preference.
        let (typ, inferred_sig) = match typ {
            Some(typ) => {
                let univ = Exp::TypeUniv(TypeUniv::new());
                typ.check(&mut ctx, &univ)?;
                body.check(&mut ctx, typ)?;
                (typ.clone(), None)
            }
            None => match info.lookup_hint(name) {
                Some(hint) => {
                    let hint = Box::new(hint.clone());
                    body.check(&mut ctx, &hint)?;
                    (hint, None)
                }
                None => {
                    let typ = body.infer(&mut ctx)?;
                    let sig = Sig { span: *span, name: name.clone(), typ: typ.clone() };
                    (typ, Some(sig))
                }
            },
        };

        info.insert_let(name.clone(), LetMeta { typ, body: Some(body.clone()) });
        Ok((inferred_sig, self.clone()))
    }
}
