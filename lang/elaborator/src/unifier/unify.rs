//! First-order unification producing refinements
//!
//! `unify` equates two terms up to weak-head normalization and returns a
//! [Refinement]: an idempotent map from variables of the caller's context to
//! terms. The unifier is deliberately conservative: a neutral elimination
//! could still reduce once a refinement is applied, so equations involving
//! one yield no information instead of failing.

use minipi_ast::ctx::values::Binder;
use minipi_ast::ctx::{BindContext, GenericCtx, LevelCtx};
use minipi_ast::*;
use minipi_printer::{Alloc, Builder, DocAllocator, Print, PrintCfg};

use crate::normalizer::Whnf;
use crate::result::{TcResult, TypeError};
use crate::typechecker::type_info_table::TypeInfoTable;

use Verdict::{Refuted, Solved};

/// The outcome of solving an equation. `Solved` carries whatever the solver
/// accumulated (a refinement at the top level, nothing for sub-equations);
/// `Refuted` means the two sides are headed by distinct constructors and can
/// never be made equal, no matter what is substituted.
#[derive(Debug)]
pub enum Verdict<S = ()> {
    Solved(S),
    Refuted,
}

/// A partial map from variables to terms.
///
/// Invariants: a mapped variable does not occur in its own image, and every
/// image is normal with respect to the other entries. Both are maintained by
/// `add_assignment`, which is also how two refinements are joined.
#[derive(Debug, Clone)]
pub struct Refinement {
    map: HashMap<Lvl, Box<Exp>>,
}

impl Refinement {
    pub fn empty() -> Self {
        Self { map: HashMap::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, lvl: Lvl) -> Option<&Exp> {
        self.map.get(&lvl).map(|exp| &**exp)
    }
}

impl Shift for Refinement {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.map.iter_mut().for_each(|(_, exp)| exp.shift_in_range(range, by));
    }
}

impl Substitutable for Refinement {
    type Target = Refinement;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self {
        let map = self
            .map
            .iter()
            .map(|(entry_lvl, entry_val)| (*entry_lvl, entry_val.subst(ctx, by)))
            .collect();
        Self { map }
    }
}

impl Substitution for Refinement {
    fn get_subst(&self, _ctx: &LevelCtx, lvl: Lvl) -> Option<Box<Exp>> {
        self.map.get(&lvl).cloned()
    }
}

impl Print for Refinement {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let mut keys: Vec<_> = self.map.keys().collect();
        keys.sort();
        let exps = keys.into_iter().map(|key| {
            alloc.text(format!("{key}")).append(" := ").append(self.map[key].print(cfg, alloc))
        });
        alloc.intersperse(exps, ",").enclose("{", "}")
    }
}

/// Produce a refinement that makes `lhs` and `rhs` equal. `Refuted` means the
/// two sides are headed by distinct constructors; a genuinely undecidable
/// equation is an error.
pub fn unify(
    ctx: &LevelCtx,
    info: &TypeInfoTable,
    lhs: &Exp,
    rhs: &Exp,
) -> TcResult<Verdict<Refinement>> {
    let mut unifier = Unifier::new(ctx.clone(), info);
    match unifier.unify_exp(lhs, rhs)? {
        Solved(()) => Ok(Solved(unifier.unif)),
        Refuted => Ok(Refuted),
    }
}

/// Join two refinements into one, or fail when their union would be
/// contradictory or cyclic.
pub fn join(
    ctx: &LevelCtx,
    info: &TypeInfoTable,
    lhs: Refinement,
    rhs: Refinement,
) -> TcResult<Refinement> {
    let mut unifier = Unifier { ctx: ctx.clone(), base: ctx.len(), info, unif: lhs };
    for (lvl, exp) in rhs.map {
        unifier.add_assignment(lvl, exp)?;
    }
    Ok(unifier.unif)
}

struct Unifier<'a> {
    /// The current context; extended while unifying under binders.
    ctx: LevelCtx,
    /// The size of the context the unifier was called in. Only variables
    /// below this level can be refined.
    base: usize,
    info: &'a TypeInfoTable,
    /// Partial solution that we have computed from solving previous equations.
    unif: Refinement,
}

impl BindContext for Unifier<'_> {
    type Content = ();

    fn ctx_mut(&mut self) -> &mut GenericCtx<()> {
        &mut self.ctx
    }
}

impl<'a> Unifier<'a> {
    fn new(ctx: LevelCtx, info: &'a TypeInfoTable) -> Self {
        let base = ctx.len();
        Self { ctx, base, info, unif: Refinement::empty() }
    }

    fn unify_exp(&mut self, lhs: &Exp, rhs: &Exp) -> TcResult<Verdict> {
        let lhs = lhs.whnf(self.info, &self.ctx)?;
        let rhs = rhs.whnf(self.info, &self.ctx)?;
        if lhs == rhs {
            return Ok(Solved(()));
        }
        match (&*lhs, &*rhs) {
            (Exp::Variable(var), _) => self.try_assign(var, &rhs),
            (_, Exp::Variable(var)) => self.try_assign(var, &lhs),
            (Exp::Ctor(c1), Exp::Ctor(c2)) if c1.name == c2.name => {
                self.unify_args(&c1.args, &c2.args, &lhs, &rhs)
            }
            // Distinct constructors can never become equal; the equation is
            // refutable rather than unsolvable.
            (Exp::Ctor(_), Exp::Ctor(_)) => Ok(Refuted),
            (Exp::TypCtor(t1), Exp::TypCtor(t2)) if t1.name == t2.name => {
                self.unify_args(&t1.args, &t2.args, &lhs, &rhs)
            }
            (Exp::TypCtor(_), Exp::TypCtor(_)) => Ok(Refuted),
            (Exp::Lam(l1), Exp::Lam(l2)) => self.unify_under(&l1.param, &l1.body, &l2.body),
            (Exp::Pi(p1), Exp::Pi(p2)) => {
                match self.unify_exp(&p1.domain, &p2.domain)? {
                    Solved(()) => self.unify_under(&p1.param, &p1.codomain, &p2.codomain),
                    Refuted => Ok(Refuted),
                }
            }
            (Exp::TypeEq(e1), Exp::TypeEq(e2)) => {
                match self.unify_exp(&e1.lhs, &e2.lhs)? {
                    Solved(()) => self.unify_exp(&e1.rhs, &e2.rhs),
                    Refuted => Ok(Refuted),
                }
            }
            // A neutral elimination could still reduce under a refinement;
            // we cannot commit to anything for these.
            _ if is_ambiguous(&lhs) || is_ambiguous(&rhs) => Ok(Solved(())),
            (_, _) => Err(TypeError::cannot_unify(&lhs, &rhs)),
        }
    }

    fn unify_args(&mut self, lhs: &Args, rhs: &Args, l: &Exp, r: &Exp) -> TcResult<Verdict> {
        if lhs.len() != rhs.len() {
            return Err(TypeError::cannot_unify(l, r));
        }
        for (a, b) in lhs.iter().zip(rhs.iter()) {
            match self.unify_exp(a, b)? {
                Solved(()) => (),
                Refuted => return Ok(Refuted),
            }
        }
        Ok(Solved(()))
    }

    fn unify_under(&mut self, param: &VarBind, lhs: &Exp, rhs: &Exp) -> TcResult<Verdict> {
        self.bind_single(Binder { name: param.clone(), content: () }, |this| {
            this.unify_exp(lhs, rhs)
        })
    }

    /// `Var(y) ~ t` refines `y` only when both sides strengthen out of the
    /// binders entered during unification and `y` does not occur in `t`.
    /// Otherwise the equation yields no information.
    fn try_assign(&mut self, var: &Variable, exp: &Exp) -> TcResult<Verdict> {
        let depth = self.ctx.len() - self.base;
        let lvl = self.ctx.idx_to_lvl(var.idx);
        if lvl.0 >= self.base {
            return Ok(Solved(()));
        }
        if occurs_between(&mut self.ctx, self.base, exp) {
            return Ok(Solved(()));
        }
        let exp = shift_and_clone(&Box::new(exp.clone()), -(depth as isize));
        let mut outer = LevelCtx::nameless(self.base);
        if occurs_var(&mut outer, lvl, &exp) {
            return Ok(Solved(()));
        }
        self.add_assignment(lvl, exp)?;
        Ok(Solved(()))
    }

    /// Insert `lvl ↦ exp` while keeping the refinement idempotent. On a
    /// collision the two candidate images are unified in the caller's scope.
    fn add_assignment(&mut self, lvl: Lvl, exp: Box<Exp>) -> TcResult {
        let mut outer = LevelCtx::nameless(self.base);
        let exp = exp.subst(&mut outer, &self.unif);
        if let Exp::Variable(var) = &*exp {
            if outer.idx_to_lvl(var.idx) == lvl {
                return Ok(());
            }
        }
        if occurs_var(&mut outer, lvl, &exp) {
            return Err(TypeError::occurs_check_failed(lvl, &exp));
        }
        let assign = Assign { lvl, exp: exp.clone() };
        self.unif = self.unif.subst(&mut outer, &assign);
        match self.unif.map.get(&lvl) {
            Some(other_exp) => {
                let other_exp = other_exp.clone();
                match self.unify_outer(&exp, &other_exp)? {
                    Solved(()) => Ok(()),
                    Refuted => Err(TypeError::cannot_unify(&exp, &other_exp)),
                }
            }
            None => {
                self.unif.map.insert(lvl, exp);
                Ok(())
            }
        }
    }

    fn unify_outer(&mut self, lhs: &Exp, rhs: &Exp) -> TcResult<Verdict> {
        let saved = std::mem::replace(&mut self.ctx, LevelCtx::nameless(self.base));
        let res = self.unify_exp(lhs, rhs);
        self.ctx = saved;
        res
    }
}

/// A neutral elimination whose result could change once a refinement is
/// substituted into it.
fn is_ambiguous(exp: &Exp) -> bool {
    matches!(exp, Exp::App(_) | Exp::LocalMatch(_) | Exp::Rewrite(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> TypeInfoTable {
        TypeInfoTable::default()
    }

    fn ident(id: &str) -> Ident {
        Ident::from_string(id)
    }

    fn var(idx: usize) -> Box<Exp> {
        Box::new(Exp::Variable(Variable {
            span: None,
            idx: Idx(idx),
            name: VarBound::from_string("x"),
        }))
    }

    fn ctor(name: &str, args: Vec<Box<Exp>>) -> Box<Exp> {
        Box::new(Exp::Ctor(Ctor { span: None, name: ident(name), args: Args::from(args) }))
    }

    fn unify_solved(ctx: &LevelCtx, lhs: &Exp, rhs: &Exp) -> Refinement {
        match unify(ctx, &info(), lhs, rhs).unwrap() {
            Solved(refinement) => refinement,
            Refuted => panic!("expected the sides to unify"),
        }
    }

    #[test]
    fn unify_alpha_equal_is_empty() {
        let ctx = LevelCtx::nameless(1);
        let r = unify_solved(&ctx, &var(0), &var(0));
        assert!(r.is_empty());
    }

    #[test]
    fn unify_var_with_term() {
        let ctx = LevelCtx::nameless(1);
        let r = unify_solved(&ctx, &var(0), &ctor("Z", vec![]));
        assert_eq!(r.get(Lvl(0)), Some(&*ctor("Z", vec![])));
    }

    #[test]
    fn unify_congruence_under_ctor() {
        let ctx = LevelCtx::nameless(1);
        let lhs = ctor("S", vec![var(0)]);
        let rhs = ctor("S", vec![ctor("Z", vec![])]);
        let r = unify_solved(&ctx, &lhs, &rhs);
        assert_eq!(r.get(Lvl(0)), Some(&*ctor("Z", vec![])));
    }

    #[test]
    fn unify_distinct_ctors_is_refuted() {
        let ctx = LevelCtx::empty();
        let lhs = ctor("Z", vec![]);
        let rhs = ctor("S", vec![ctor("Z", vec![])]);
        assert!(matches!(unify(&ctx, &info(), &lhs, &rhs).unwrap(), Refuted));
    }

    #[test]
    fn unify_nested_ctor_mismatch_is_refuted() {
        let ctx = LevelCtx::empty();
        let lhs = ctor("S", vec![ctor("Z", vec![])]);
        let rhs = ctor("S", vec![ctor("S", vec![ctor("Z", vec![])])]);
        assert!(matches!(unify(&ctx, &info(), &lhs, &rhs).unwrap(), Refuted));
    }

    #[test]
    fn occurs_check_skips_cyclic_assignment() {
        // x ~ S(x) yields no information instead of a cyclic refinement
        let ctx = LevelCtx::nameless(1);
        let r = unify_solved(&ctx, &var(0), &ctor("S", vec![var(0)]));
        assert!(r.is_empty());
    }

    #[test]
    fn ambiguous_neutral_yields_no_information() {
        let ctx = LevelCtx::nameless(2);
        let app = Box::new(Exp::App(App { span: None, fun: var(0), arg: var(1) }));
        let r = unify_solved(&ctx, &app, &ctor("Z", vec![]));
        assert!(r.is_empty());
    }

    #[test]
    fn join_of_agreeing_refinements() {
        let ctx = LevelCtx::nameless(2);
        let r1 = unify_solved(&ctx, &var(0), &ctor("Z", vec![]));
        let r2 = unify_solved(&ctx, &var(1), &ctor("Z", vec![]));
        let joined = join(&ctx, &info(), r1, r2).unwrap();
        assert_eq!(joined.get(Lvl(0)), Some(&*ctor("Z", vec![])));
        assert_eq!(joined.get(Lvl(1)), Some(&*ctor("Z", vec![])));
    }

    #[test]
    fn join_of_contradictory_refinements_fails() {
        let ctx = LevelCtx::nameless(1);
        let r1 = unify_solved(&ctx, &var(0), &ctor("Z", vec![]));
        let r2 = unify_solved(&ctx, &var(0), &ctor("S", vec![ctor("Z", vec![])]));
        assert!(join(&ctx, &info(), r1, r2).is_err());
    }

    #[test]
    fn refinement_applies_to_both_sides() {
        let ctx = LevelCtx::nameless(1);
        let lhs = ctor("S", vec![var(0)]);
        let rhs = ctor("S", vec![ctor("Z", vec![])]);
        let r = unify_solved(&ctx, &lhs, &rhs);
        let mut levels = ctx.clone();
        let lhs_refined = lhs.subst(&mut levels, &r);
        let rhs_refined = rhs.subst(&mut levels, &r);
        assert_eq!(lhs_refined, rhs_refined);
    }
}
