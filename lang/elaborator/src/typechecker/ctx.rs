//! Variable context
//!
//! Tracks locally bound variables

use std::rc::Rc;

use minipi_ast::ctx::values::TypeCtx;
use minipi_ast::ctx::{BindContext, GenericCtx, LevelCtx};
use minipi_ast::*;
use minipi_printer::{Alloc, Builder, Print, PrintCfg};

use crate::result::TcResult;
use crate::unifier::Refinement;

use super::type_info_table::TypeInfoTable;

#[derive(Debug, Clone)]
pub struct Ctx {
    /// Typing of bound variables
    pub vars: TypeCtx,
    /// Global lookup table for declarations. A snapshot of everything
    /// declared before the entry currently being checked.
    pub info: Rc<TypeInfoTable>,
}

impl Ctx {
    pub fn new(info: Rc<TypeInfoTable>) -> Self {
        Self { vars: TypeCtx::empty(), info }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The type of a bound variable. Valid in the full current context.
    pub fn lookup<V: Into<Var> + std::fmt::Debug>(&self, idx: V) -> Box<Exp> {
        self.vars.lookup(idx).content
    }

    pub fn levels(&self) -> LevelCtx {
        self.vars.levels()
    }

    /// Run `f` on a copy of the context. Used for checking case branches,
    /// which refine their own copy of the context and must not leak the
    /// refinement to their neighbours.
    pub fn fork<T, F: FnOnce(&mut Ctx) -> T>(&mut self, f: F) -> T {
        let mut inner_ctx = Ctx { vars: self.vars.clone(), info: self.info.clone() };
        f(&mut inner_ctx)
    }
}

impl BindContext for Ctx {
    type Content = Box<Exp>;

    fn ctx_mut(&mut self) -> &mut GenericCtx<Box<Exp>> {
        &mut self.vars
    }
}

pub trait ContextRefineExt: Sized {
    /// Apply a refinement to every binding in the context.
    fn refine(&mut self, refinement: &Refinement) -> TcResult;
}

impl ContextRefineExt for Ctx {
    fn refine(&mut self, refinement: &Refinement) -> TcResult {
        let levels = self.levels();
        self.vars = self.vars.map_failable::<Box<crate::result::TypeError>, _>(|exp| {
            let exp = Box::new(exp.clone()).subst(&mut levels.clone(), refinement);
            Ok(exp)
        })?;
        Ok(())
    }
}

impl Print for Ctx {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.vars.print(cfg, alloc)
    }
}
