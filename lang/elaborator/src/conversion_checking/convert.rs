use minipi_ast::ctx::values::Binder;
use minipi_ast::ctx::{BindContext, GenericCtx, LevelCtx};
use minipi_ast::*;

use crate::normalizer::Whnf;
use crate::result::{TcResult, TypeError};
use crate::typechecker::type_info_table::TypeInfoTable;

/// Check that `lhs` and `rhs` are definitionally equal.
pub fn convert(ctx: &LevelCtx, info: &TypeInfoTable, lhs: &Exp, rhs: &Exp) -> TcResult {
    let mut converter = Converter { ctx: ctx.clone(), info };
    converter.convert_exp(lhs, rhs)
}

struct Converter<'a> {
    ctx: LevelCtx,
    info: &'a TypeInfoTable,
}

impl BindContext for Converter<'_> {
    type Content = ();

    fn ctx_mut(&mut self) -> &mut GenericCtx<()> {
        &mut self.ctx
    }
}

impl Converter<'_> {
    fn convert_exp(&mut self, lhs: &Exp, rhs: &Exp) -> TcResult {
        let lhs = lhs.whnf(self.info, &self.ctx)?;
        let rhs = rhs.whnf(self.info, &self.ctx)?;
        // Spans and binder names are ignored by `Eq`, so this test is
        // α-equivalence of the weak-head normal forms.
        if lhs == rhs {
            return Ok(());
        }
        match (&*lhs, &*rhs) {
            (Exp::Variable(v1), Exp::Variable(v2)) if v1.idx == v2.idx => Ok(()),
            (Exp::Global(g1), Exp::Global(g2)) if g1.name == g2.name => Ok(()),
            (Exp::Pi(p1), Exp::Pi(p2)) => {
                self.convert_exp(&p1.domain, &p2.domain)?;
                self.convert_under(&p1.param, &p1.codomain, &p2.codomain)
            }
            (Exp::Lam(l1), Exp::Lam(l2)) => self.convert_under(&l1.param, &l1.body, &l2.body),
            (Exp::App(a1), Exp::App(a2)) => {
                self.convert_exp(&a1.fun, &a2.fun)?;
                self.convert_exp(&a1.arg, &a2.arg)
            }
            (Exp::TypCtor(t1), Exp::TypCtor(t2)) if t1.name == t2.name => {
                self.convert_args(&t1.args, &t2.args, &lhs, &rhs)
            }
            (Exp::Ctor(c1), Exp::Ctor(c2)) if c1.name == c2.name => {
                self.convert_args(&c1.args, &c2.args, &lhs, &rhs)
            }
            (Exp::TypeEq(e1), Exp::TypeEq(e2)) => {
                self.convert_exp(&e1.lhs, &e2.lhs)?;
                self.convert_exp(&e1.rhs, &e2.rhs)
            }
            (Exp::Rewrite(r1), Exp::Rewrite(r2)) => {
                self.convert_exp(&r1.body, &r2.body)?;
                self.convert_exp(&r1.proof, &r2.proof)
            }
            (Exp::Absurd(a1), Exp::Absurd(a2)) => self.convert_exp(&a1.proof, &a2.proof),
            (Exp::LocalMatch(m1), Exp::LocalMatch(m2)) => {
                self.convert_exp(&m1.on_exp, &m2.on_exp)?;
                self.convert_cases(&m1.cases, &m2.cases, &lhs, &rhs)
            }
            (_, _) => Err(TypeError::not_eq(&lhs, &rhs)),
        }
    }

    fn convert_under(&mut self, param: &VarBind, lhs: &Exp, rhs: &Exp) -> TcResult {
        self.bind_single(Binder { name: param.clone(), content: () }, |this| {
            this.convert_exp(lhs, rhs)
        })
    }

    fn convert_args(&mut self, lhs: &Args, rhs: &Args, l: &Exp, r: &Exp) -> TcResult {
        if lhs.len() != rhs.len() {
            return Err(TypeError::not_eq(l, r));
        }
        for (a, b) in lhs.iter().zip(rhs.iter()) {
            self.convert_exp(a, b)?;
        }
        Ok(())
    }

    /// Case lists are compared in the order they were written; no attempt is
    /// made to reorder branches.
    fn convert_cases(&mut self, lhs: &[Case], rhs: &[Case], l: &Exp, r: &Exp) -> TcResult {
        if lhs.len() != rhs.len() {
            return Err(TypeError::not_eq(l, r));
        }
        for (c1, c2) in lhs.iter().zip(rhs.iter()) {
            if c1.pattern != c2.pattern {
                return Err(TypeError::not_eq(l, r));
            }
            let size = c1.pattern.size();
            let binders = (0..size).map(|_| Binder { name: VarBind::wildcard(), content: () });
            self.bind_iter(binders, |this| this.convert_exp(&c1.body, &c2.body))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> TypeInfoTable {
        TypeInfoTable::default()
    }

    fn var(idx: usize) -> Box<Exp> {
        Box::new(Exp::Variable(Variable {
            span: None,
            idx: Idx(idx),
            name: VarBound::from_string("x"),
        }))
    }

    fn lam(param: &str, body: Box<Exp>) -> Box<Exp> {
        Box::new(Exp::Lam(Lam { span: None, param: VarBind::from_string(param), body }))
    }

    #[test]
    fn alpha_equivalent_lambdas_convert() {
        let ctx = LevelCtx::empty();
        let lhs = lam("x", var(0));
        let rhs = lam("y", var(0));
        assert!(convert(&ctx, &info(), &lhs, &rhs).is_ok());
    }

    #[test]
    fn convert_reduces_redexes() {
        // (\x. x) applied under conversion: (\x. x) Z ≡ Z
        let ctx = LevelCtx::empty();
        let z = Box::new(Exp::Ctor(Ctor {
            span: None,
            name: Ident::from_string("Z"),
            args: Args::default(),
        }));
        let lhs = Box::new(Exp::App(App { span: None, fun: lam("x", var(0)), arg: z.clone() }));
        assert!(convert(&ctx, &info(), &lhs, &z).is_ok());
    }

    #[test]
    fn distinct_variables_do_not_convert() {
        let ctx = LevelCtx::nameless(2);
        assert!(convert(&ctx, &info(), &var(0), &var(1)).is_err());
    }

    #[test]
    fn conversion_is_symmetric_in_failure() {
        let ctx = LevelCtx::nameless(2);
        assert!(convert(&ctx, &info(), &var(1), &var(0)).is_err());
    }
}
