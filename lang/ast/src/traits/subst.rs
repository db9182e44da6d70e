use std::fmt::Debug;

use crate::ctx::values::Binder;
use crate::ctx::{BindContext, LevelCtx};
use crate::exp::{Exp, Variable};
use crate::{Idx, Lvl, VarBind, VarBound};

use super::shift::{Shift, ShiftRange, shift_and_clone};

/// # Substitutions as Context Morphisms
///
/// A substitution `θ` is a context morphism
/// ```txt
/// θ : Γ ⇒ Δ
/// ```
/// which has a domain `Γ` and a codomain `Δ`.
///
/// The domain is represented using de Bruijn levels, which allows for
/// automatic weakening: a substitution valid in `Γ₁` is also valid in the
/// extended context `Γ₁, Γ₂`.
///
/// The expressions of the substitution have variables which are encoded as
/// de Bruijn indices relative to the codomain `Δ`. So if we want to apply the
/// substitution under a binder we have to shift the expressions contained in
/// it (this is what the `Shift` supertrait is for).
pub trait Substitution: Shift + Clone + Debug {
    fn get_subst(&self, ctx: &LevelCtx, lvl: Lvl) -> Option<Box<Exp>>;
}

/// An assignment is the simplest form of a substitution which provides just
/// one mapping from a variable (represented by a de Bruijn level) to an expression.
#[derive(Clone, Debug)]
pub struct Assign {
    pub lvl: Lvl,
    pub exp: Box<Exp>,
}

impl Shift for Assign {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.exp.shift_in_range(range, by);
    }
}

impl Substitution for Assign {
    fn get_subst(&self, _ctx: &LevelCtx, lvl: Lvl) -> Option<Box<Exp>> {
        if self.lvl == lvl { Some(self.exp.clone()) } else { None }
    }
}

impl Substitution for Vec<Assign> {
    fn get_subst(&self, ctx: &LevelCtx, lvl: Lvl) -> Option<Box<Exp>> {
        self.iter().find_map(|assign| assign.get_subst(ctx, lvl))
    }
}

/// A list of terms substituted for the first `len` levels of the context.
impl Substitution for Vec<Box<Exp>> {
    fn get_subst(&self, _ctx: &LevelCtx, lvl: Lvl) -> Option<Box<Exp>> {
        self.get(lvl.0).cloned()
    }
}

// Substitutable
//
//

/// A trait for all entities to which we can apply a substitution.
/// Every syntax node should implement this trait.
/// The result type of applying a substitution is parameterized, because substituting for
/// a variable does not, in general, yield another variable.
pub trait Substitutable: Sized {
    type Target;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target;
}

impl<T: Substitutable> Substitutable for Option<T> {
    type Target = Option<T::Target>;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        self.as_ref().map(|x| x.subst(ctx, by))
    }
}

impl<T: Substitutable> Substitutable for Vec<T> {
    type Target = Vec<T::Target>;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        self.iter().map(|x| x.subst(ctx, by)).collect()
    }
}

impl<T: Substitutable> Substitutable for Box<T> {
    type Target = Box<T::Target>;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        Box::new((**self).subst(ctx, by))
    }
}

// Instantiation of binders
//
//

/// Open a binder: replace the bound variable of `body` by `arg` and
/// strengthen the result back into the scope of `ctx`.
pub fn instantiate(ctx: &LevelCtx, body: &Exp, arg: &Exp) -> Box<Exp> {
    let args = [Box::new(arg.clone())];
    instantiate_many(ctx, body, &args)
}

/// Open a multi-binder: `body` lives under `args.len()` binders, the first
/// argument being substituted for the outermost binder.
pub fn instantiate_many(ctx: &LevelCtx, body: &Exp, args: &[Box<Exp>]) -> Box<Exp> {
    let k = args.len();
    let mut ctx = ctx.clone();
    let n = ctx.len();
    let assigns: Vec<Assign> = args
        .iter()
        .enumerate()
        .map(|(i, arg)| Assign { lvl: Lvl(n + i), exp: shift_and_clone(arg, k as isize) })
        .collect();
    let binders = (0..k).map(|_| Binder { name: VarBind::wildcard(), content: () });
    ctx.bind_iter(binders, |ctx| {
        let mut out = Box::new(body.clone()).subst(ctx, &assigns);
        out.shift(-(k as isize));
        out
    })
}

/// Build the variable occurrence for a given level in the current context.
pub fn var_for_lvl(ctx: &LevelCtx, lvl: Lvl, name: &VarBind) -> Box<Exp> {
    Box::new(Exp::Variable(Variable {
        span: None,
        idx: ctx.lvl_to_idx(lvl),
        name: VarBound::from_string(&name.id),
    }))
}

/// Build the variable occurrence for the innermost binder.
pub fn var_here(name: &VarBind) -> Box<Exp> {
    Box::new(Exp::Variable(Variable {
        span: None,
        idx: Idx(0),
        name: VarBound::from_string(&name.id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exp::{App, Lam};

    fn var(idx: usize) -> Box<Exp> {
        Box::new(Exp::Variable(Variable {
            span: None,
            idx: Idx(idx),
            name: VarBound::from_string("x"),
        }))
    }

    #[test]
    fn instantiate_replaces_bound_var() {
        // (\y. y) instantiated with x@0 in a context of length 1
        let ctx = LevelCtx::nameless(1);
        let body = var(0);
        let out = instantiate(&ctx, &body, &var(0));
        assert_eq!(out, var(0));
    }

    #[test]
    fn instantiate_strengthens_free_vars() {
        // body = x@1 under one binder; instantiating the binder drops the index
        let ctx = LevelCtx::nameless(1);
        let body = var(1);
        let out = instantiate(&ctx, &body, &var(0));
        assert_eq!(out, var(0));
    }

    #[test]
    fn instantiate_under_inner_binder() {
        // body = \z. b@1 (the instantiated binder seen from under z)
        let ctx = LevelCtx::nameless(0);
        let body = Exp::Lam(Lam {
            span: None,
            param: VarBind::from_string("z"),
            body: var(1),
        });
        let arg = Exp::Lam(Lam { span: None, param: VarBind::from_string("w"), body: var(0) });
        let out = instantiate(&ctx, &body, &arg);
        // the argument is closed, so it is inserted unchanged under z
        let expected = Box::new(Exp::Lam(Lam {
            span: None,
            param: VarBind::from_string("z"),
            body: Box::new(arg),
        }));
        assert_eq!(out, expected);
    }

    #[test]
    fn instantiate_many_orders_args_outermost_first() {
        // body = f@1 applied to s@0 under two binders [f, s]
        let ctx = LevelCtx::nameless(0);
        let body = Exp::App(App { span: None, fun: var(1), arg: var(0) });
        let f = Exp::Lam(Lam { span: None, param: VarBind::from_string("x"), body: var(0) });
        let args = vec![Box::new(f.clone()), Box::new(Exp::App(App {
            span: None,
            fun: Box::new(f.clone()),
            arg: Box::new(f.clone()),
        }))];
        let out = instantiate_many(&ctx, &body, &args);
        let expected = Box::new(Exp::App(App {
            span: None,
            fun: args[0].clone(),
            arg: args[1].clone(),
        }));
        assert_eq!(out, expected);
    }
}
