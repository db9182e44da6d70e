use minipi_ast::*;

use crate::conversion_checking::convert;
use crate::normalizer::Whnf;
use crate::result::{TcResult, TypeError};
use crate::unifier::{Verdict, join, unify};

use super::super::ctx::{Ctx, ContextRefineExt};
use super::super::util::expect_eq;
use super::{CheckInfer, check_by_infer};

// TypeEq
//
//

impl CheckInfer for TypeEq {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        check_by_infer(self, ctx, t)
    }

    /// Equality is heterogeneous only on the surface: the type of the left
    /// side is inferred and the right side is checked against it.
    fn infer(&self, ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        let TypeEq { lhs, rhs, .. } = self;
        let typ = lhs.infer(ctx)?;
        rhs.check(ctx, &typ)?;
        Ok(Box::new(TypeUniv::new().into()))
    }
}

// Refl
//
//

impl CheckInfer for Refl {
    /// `Refl` proves `a = b` precisely when `a` and `b` are definitionally
    /// equal.
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        let eq = expect_eq(t)?;
        convert(&ctx.levels(), &ctx.info, &eq.lhs, &eq.rhs)
    }

    fn infer(&self, _ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Err(TypeError::must_annotate(&self.clone().into()))
    }
}

// Rewrite
//
//

impl CheckInfer for Rewrite {
    /// `subst body by proof`: the equality borne by `proof` is turned into a
    /// refinement which is applied to both the goal and the context before
    /// the body is checked. Unifying the proof itself with `Refl` lets an
    /// equality hypothesis disappear from the context at the same time.
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        let Rewrite { body, proof, .. } = self;
        let proof_typ = proof.infer(ctx)?.whnf(&ctx.info, &ctx.levels())?;
        let eq = expect_eq(&proof_typ)?;

        let levels = ctx.levels();
        let Verdict::Solved(r1) = unify(&levels, &ctx.info, &eq.lhs, &eq.rhs)? else {
            return Err(TypeError::cannot_unify(&eq.lhs, &eq.rhs));
        };
        let refl = Exp::Refl(Refl { span: None });
        let Verdict::Solved(r2) = unify(&levels, &ctx.info, proof, &refl)? else {
            return Err(TypeError::cannot_unify(proof, &refl));
        };
        let refinement = join(&levels, &ctx.info, r1, r2)?;

        ctx.fork(|ctx| {
            ctx.refine(&refinement)?;
            let goal = Box::new(t.clone()).subst(&mut ctx.levels(), &refinement);
            body.check(ctx, &goal)
        })
    }

    fn infer(&self, _ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Err(TypeError::must_annotate(&self.clone().into()))
    }
}

// Absurd
//
//

impl CheckInfer for Absurd {
    /// `contra proof` inhabits any type provided the proof's equality relates
    /// applications of two distinct data constructors. The constructor
    /// arguments are irrelevant.
    fn check(&self, ctx: &mut Ctx, _t: &Exp) -> TcResult {
        let Absurd { proof, .. } = self;
        let proof_typ = proof.infer(ctx)?.whnf(&ctx.info, &ctx.levels())?;
        let eq = expect_eq(&proof_typ)?;
        let lhs = eq.lhs.whnf(&ctx.info, &ctx.levels())?;
        let rhs = eq.rhs.whnf(&ctx.info, &ctx.levels())?;
        match (&*lhs, &*rhs) {
            (Exp::Ctor(c1), Exp::Ctor(c2)) if c1.name != c2.name => Ok(()),
            (_, _) => Err(TypeError::not_contradictory(&proof_typ)),
        }
    }

    fn infer(&self, _ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Err(TypeError::must_annotate(&self.clone().into()))
    }
}
