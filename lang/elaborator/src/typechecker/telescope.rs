//! Checking and instantiating telescopes
//!
//! A telescope serves two purposes: as a binding form it brings parameters
//! into scope (`infer_telescope`), and as an argument specification it
//! prescribes how an argument list is checked (`check_args`).

use minipi_ast::ctx::values::Binder;
use minipi_ast::ctx::{BindContext, LevelCtx};
use minipi_ast::*;
use minipi_miette_util::ToMiette;
use minipi_miette_util::codespan::Span;

use crate::conversion_checking::convert;
use crate::result::{TcResult, TypeError};

use super::ctx::Ctx;
use super::exprs::CheckInfer;

pub trait InferTelescope {
    /// Check that the telescope is well-formed and run `f` with all of its
    /// variables bound.
    fn infer_telescope<T, F: FnOnce(&mut Ctx) -> TcResult<T>>(
        &self,
        ctx: &mut Ctx,
        f: F,
    ) -> TcResult<T>;
}

impl InferTelescope for Telescope {
    fn infer_telescope<T, F: FnOnce(&mut Ctx) -> TcResult<T>>(
        &self,
        ctx: &mut Ctx,
        f: F,
    ) -> TcResult<T> {
        infer_params(ctx, &self.params, f)
    }
}

fn infer_params<T, F: FnOnce(&mut Ctx) -> TcResult<T>>(
    ctx: &mut Ctx,
    params: &[Param],
    f: F,
) -> TcResult<T> {
    let Some((head, tail)) = params.split_first() else {
        return f(ctx);
    };
    match head {
        Param::Decl { name, typ } => {
            let univ = Exp::TypeUniv(TypeUniv::new());
            typ.check(ctx, &univ)?;
            ctx.bind_single(Binder { name: name.clone(), content: typ.clone() }, |ctx| {
                infer_params(ctx, tail, f)
            })
        }
        Param::Def { var, body } => {
            let Exp::Variable(v) = &**var else {
                return Err(TypeError::impossible(
                    "Equation in a source telescope must constrain a variable",
                    var.span(),
                ));
            };
            let typ = ctx.lookup(v.idx);
            body.check(ctx, &typ)?;
            infer_params(ctx, tail, f)
        }
    }
}

/// Check an argument list against a telescope.
///
/// Each `Decl` entry consumes and checks one argument and is substituted
/// through the remainder of the telescope; each `Def` entry is an equation
/// that must hold definitionally under the arguments consumed so far.
/// Returns the checked arguments, which form a substitution for the
/// telescope's variables.
pub fn check_args(
    args: &Args,
    name: &Ident,
    ctx: &mut Ctx,
    tele: &Telescope,
    span: Option<Span>,
) -> TcResult<Vec<Box<Exp>>> {
    if args.len() != tele.bindings() {
        return Err(Box::new(TypeError::ArgLenMismatch {
            name: name.id.clone(),
            expected: tele.bindings(),
            actual: args.len(),
            span: span.to_miette(),
        }));
    }

    let mut out = Vec::with_capacity(args.len());
    let mut params: Vec<Param> = tele.params.clone();
    let mut args_iter = args.iter();

    while !params.is_empty() {
        match params.remove(0) {
            Param::Decl { typ, .. } => {
                let arg = args_iter.next().expect("arity was checked above");
                arg.check(ctx, &typ)?;
                params = open_params(&ctx.levels(), params, arg);
                out.push(arg.clone());
            }
            Param::Def { var, body } => {
                convert(&ctx.levels(), &ctx.info, &var, &body)?;
            }
        }
    }

    Ok(out)
}

/// Substitute `arg` for the binder a telescope tail lives under, bringing the
/// tail back into the current scope.
fn open_params(levels: &LevelCtx, params: Vec<Param>, arg: &Exp) -> Vec<Param> {
    let mut levels = levels.clone();
    levels.bind_single(Binder { name: VarBind::wildcard(), content: () }, |levels| {
        let assign =
            Assign { lvl: Lvl(levels.len() - 1), exp: shift_and_clone(&Box::new(arg.clone()), 1) };
        let mut tele = Telescope { params }.subst(levels, &assign);
        tele.shift(-1);
        tele.params
    })
}

/// Instantiate the data type parameters inside a constructor telescope.
/// The resulting telescope is well-scoped wherever `args` are.
pub fn instantiate_params(data_params: &Telescope, args: &Args, ctor_params: &Telescope) -> Telescope {
    debug_assert_eq!(data_params.bindings(), args.len());
    let mut levels = LevelCtx::nameless(data_params.bindings());
    let by: Vec<Box<Exp>> = args.args.clone();
    ctor_params.subst(&mut levels, &by)
}
