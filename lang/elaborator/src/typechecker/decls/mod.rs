mod data;
mod global_let;
mod sig;

use minipi_ast::*;

use crate::result::TcResult;

use super::type_info_table::TypeInfoTable;

/// Check all declarations of a module in order. The global signature grows
/// monotonically; every declaration is checked against a snapshot containing
/// the declarations before it.
///
/// The returned module is the input with a type declaration inserted in
/// front of every definition whose type had to be inferred, so that every
/// definition is preceded by its declaration.
pub fn check_module(module: &Module) -> TcResult<Module> {
    let mut info = TypeInfoTable::default();
    let mut decls = Vec::with_capacity(module.decls.len());

    for decl in &module.decls {
        match decl {
            Decl::Data(data) => {
                let data = data.check_wf(&mut info)?;
                decls.push(Decl::Data(data));
            }
            Decl::Sig(sig) => {
                let sig = sig.check_wf(&mut info)?;
                decls.push(Decl::Sig(sig));
            }
            Decl::Let(tl_let) => {
                let (inferred_sig, tl_let) = tl_let.check_wf(&mut info)?;
                if let Some(sig) = inferred_sig {
                    decls.push(Decl::Sig(sig));
                }
                decls.push(Decl::Let(tl_let));
            }
        }
    }

    Ok(Module { decls })
}

/// Check a single toplevel declaration and record it in the signature.
pub trait CheckToplevel: Sized {
    type Output;

    fn check_wf(&self, info: &mut TypeInfoTable) -> TcResult<Self::Output>;
}
