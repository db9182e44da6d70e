pub mod anno;
pub mod app;
pub mod ctor;
pub mod equality;
pub mod global;
pub mod hole;
pub mod lam;
pub mod local_let;
pub mod local_match;
pub mod pi;
pub mod typ_ctor;
pub mod type_univ;
pub mod variable;

use log::trace;

use minipi_ast::*;
use minipi_printer::Print;

use crate::conversion_checking::convert;
use crate::normalizer::Whnf;
use crate::result::TcResult;

use super::ctx::Ctx;

/// The CheckInfer trait for bidirectional type checking.
/// Expressions which implement this trait provide both a `check` function
/// to typecheck the expression against an expected type and a `infer`
/// function to infer a type for the given expression.
pub trait CheckInfer: Sized {
    /// Checks whether the expression has the given expected type. For checking we use
    /// the following syntax:
    /// ```text
    ///            P, Γ ⊢ e ⇐ τ
    /// ```
    /// - P: The program context of toplevel declarations.
    /// - Γ: The context of locally bound variables.
    /// - τ: The type we check against; it is weak-head normalized before the
    ///   shape of `e` is inspected.
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult;

    /// Tries to infer a type for the given expression. For inference we use the
    /// following syntax:
    /// ```text
    ///            P, Γ ⊢ e ⇒ τ
    /// ```
    ///  - P: The program context of toplevel declarations.
    ///  - Γ: The context of locally bound variables.
    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>>;
}

impl CheckInfer for Exp {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        trace!("{} |- {} <= {}", ctx.print_trace(), self.print_trace(), t.print_trace());
        let t = t.whnf(&ctx.info, &ctx.levels())?;
        match self {
            Exp::Variable(e) => e.check(ctx, &t),
            Exp::Global(e) => e.check(ctx, &t),
            Exp::TypeUniv(e) => e.check(ctx, &t),
            Exp::Pi(e) => e.check(ctx, &t),
            Exp::Lam(e) => e.check(ctx, &t),
            Exp::App(e) => e.check(ctx, &t),
            Exp::Anno(e) => e.check(ctx, &t),
            Exp::LocalLet(e) => e.check(ctx, &t),
            Exp::TypCtor(e) => e.check(ctx, &t),
            Exp::Ctor(e) => e.check(ctx, &t),
            Exp::TypeEq(e) => e.check(ctx, &t),
            Exp::Refl(e) => e.check(ctx, &t),
            Exp::Rewrite(e) => e.check(ctx, &t),
            Exp::Absurd(e) => e.check(ctx, &t),
            Exp::Hole(e) => e.check(ctx, &t),
            Exp::LocalMatch(e) => e.check(ctx, &t),
        }
    }

    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        let res = match self {
            Exp::Variable(e) => e.infer(ctx),
            Exp::Global(e) => e.infer(ctx),
            Exp::TypeUniv(e) => e.infer(ctx),
            Exp::Pi(e) => e.infer(ctx),
            Exp::Lam(e) => e.infer(ctx),
            Exp::App(e) => e.infer(ctx),
            Exp::Anno(e) => e.infer(ctx),
            Exp::LocalLet(e) => e.infer(ctx),
            Exp::TypCtor(e) => e.infer(ctx),
            Exp::Ctor(e) => e.infer(ctx),
            Exp::TypeEq(e) => e.infer(ctx),
            Exp::Refl(e) => e.infer(ctx),
            Exp::Rewrite(e) => e.infer(ctx),
            Exp::Absurd(e) => e.infer(ctx),
            Exp::Hole(e) => e.infer(ctx),
            Exp::LocalMatch(e) => e.infer(ctx),
        };
        trace!(
            "{} |- {} => {}",
            ctx.print_trace(),
            self.print_trace(),
            res.as_ref().map(|typ| typ.print_trace()).unwrap_or_else(|_| "<error>".to_owned())
        );
        res
    }
}

/// The fallback checking rule: infer a type and compare it with the expected
/// one. Used by every expression which is not a checking-mode introduction
/// form.
pub(super) fn check_by_infer<T: CheckInfer>(exp: &T, ctx: &mut Ctx, t: &Exp) -> TcResult {
    let inferred = exp.infer(ctx)?;
    convert(&ctx.levels(), &ctx.info, &inferred, t)
}
