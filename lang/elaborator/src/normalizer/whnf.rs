//! Weak-head normalization
//!
//! Reduction stops as soon as the head of the term is no longer a redex;
//! arguments and binder bodies are left untouched. Definitions are unfolded
//! through the global signature, which is why normalization is fallible: a
//! stuck pattern match on a constructor is a broken invariant.

use minipi_ast::ctx::LevelCtx;
use minipi_ast::*;
use minipi_printer::Print;

use crate::result::{TcResult, TypeError};
use crate::typechecker::type_info_table::TypeInfoTable;

/// Expressions which can be reduced to weak head normal form.
pub trait Whnf {
    /// Compute the weak head normal form in the scope described by `ctx`.
    /// The result is well-scoped in the same context.
    fn whnf(&self, info: &TypeInfoTable, ctx: &LevelCtx) -> TcResult<Box<Exp>>;
}

impl Whnf for Exp {
    fn whnf(&self, info: &TypeInfoTable, ctx: &LevelCtx) -> TcResult<Box<Exp>> {
        match self {
            // δ: unfold definitions; names without a body are neutral
            Exp::Global(Global { name, .. }) => match info.def_body(name) {
                Some(body) => body.clone().whnf(info, ctx),
                None => Ok(Box::new(self.clone())),
            },
            // β
            Exp::App(App { span, fun, arg }) => {
                let fun = fun.whnf(info, ctx)?;
                match &*fun {
                    Exp::Lam(Lam { body, .. }) => instantiate(ctx, body, arg).whnf(info, ctx),
                    _ => Ok(Box::new(Exp::App(App { span: *span, fun, arg: arg.clone() }))),
                }
            }
            Exp::Anno(Anno { exp, .. }) => exp.whnf(info, ctx),
            Exp::LocalLet(LocalLet { bound, body, .. }) => {
                instantiate(ctx, body, bound).whnf(info, ctx)
            }
            Exp::LocalMatch(LocalMatch { span, on_exp, cases }) => {
                let on_exp = on_exp.whnf(info, ctx)?;
                if !matches!(&*on_exp, Exp::Ctor(_)) {
                    return Ok(Box::new(Exp::LocalMatch(LocalMatch {
                        span: *span,
                        on_exp,
                        cases: cases.clone(),
                    })));
                }
                for case in cases {
                    if let Some(args) = pattern_matches(info, ctx, &case.pattern, &on_exp)? {
                        return instantiate_many(ctx, &case.body, &args).whnf(info, ctx);
                    }
                }
                Err(TypeError::impossible(
                    format!("No matching branch for {}", on_exp.print_to_string(None)),
                    *span,
                ))
            }
            Exp::Rewrite(Rewrite { span, body, proof }) => {
                let proof = proof.whnf(info, ctx)?;
                match &*proof {
                    Exp::Refl(_) => body.whnf(info, ctx),
                    _ => Ok(Box::new(Exp::Rewrite(Rewrite {
                        span: *span,
                        body: body.clone(),
                        proof,
                    }))),
                }
            }
            // An open goal reduces to the unit value, so that programs with
            // unfinished proofs can still be run through the normalizer.
            Exp::Hole(Hole { span, kind: HoleKind::Goal }) => Ok(Box::new(Exp::Ctor(Ctor {
                span: *span,
                name: Ident::from_string("()"),
                args: Args::default(),
            }))),
            _ => Ok(Box::new(self.clone())),
        }
    }
}

/// Match a pattern against a value, producing the terms bound by the
/// pattern's variables in binding order. Constructor arguments are
/// head-normalized on demand as the pattern descends into them.
pub fn pattern_matches(
    info: &TypeInfoTable,
    ctx: &LevelCtx,
    pattern: &Pattern,
    exp: &Exp,
) -> TcResult<Option<Vec<Box<Exp>>>> {
    match pattern {
        Pattern::Var { .. } => Ok(Some(vec![Box::new(exp.clone())])),
        Pattern::Ctor { name, params, .. } => {
            let exp = exp.whnf(info, ctx)?;
            let Exp::Ctor(Ctor { name: ctor_name, args, .. }) = &*exp else {
                return Ok(None);
            };
            if name != ctor_name || params.len() != args.len() {
                return Ok(None);
            }
            let mut out = Vec::new();
            for (param, arg) in params.iter().zip(args.iter()) {
                match pattern_matches(info, ctx, param, arg)? {
                    Some(args) => out.extend(args),
                    None => return Ok(None),
                }
            }
            Ok(Some(out))
        }
    }
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

    fn ctor(name: &str, args: Vec<Box<Exp>>) -> Box<Exp> {
        Box::new(Exp::Ctor(Ctor { span: None, name: ident(name), args: Args::from(args) }))
    }

    fn lam(param: &str, body: Box<Exp>) -> Box<Exp> {
        Box::new(Exp::Lam(Lam { span: None, param: VarBind::from_string(param), body }))
    }

    fn var(idx: usize) -> Box<Exp> {
        Box::new(Exp::Variable(Variable {
            span: None,
            idx: Idx(idx),
            name: VarBound::from_string("x"),
        }))
    }

    fn app(fun: Box<Exp>, arg: Box<Exp>) -> Box<Exp> {
        Box::new(Exp::App(App { span: None, fun, arg }))
    }

    #[test]
    fn beta_reduction() {
        let exp = app(lam("x", var(0)), ctor("Z", vec![]));
        let nf = exp.whnf(&info(), &LevelCtx::empty()).unwrap();
        assert_eq!(nf, ctor("Z", vec![]));
    }

    #[test]
    fn anno_is_erased() {
        let exp = Exp::Anno(Anno {
            span: None,
            exp: ctor("Z", vec![]),
            typ: Box::new(Exp::TypCtor(TypCtor {
                span: None,
                name: ident("Nat"),
                args: Args::default(),
            })),
        });
        let nf = exp.whnf(&info(), &LevelCtx::empty()).unwrap();
        assert_eq!(nf, ctor("Z", vec![]));
    }

    #[test]
    fn local_let_is_inlined() {
        let exp = Exp::LocalLet(LocalLet {
            span: None,
            name: VarBind::from_string("n"),
            bound: ctor("Z", vec![]),
            body: ctor("S", vec![var(0)]),
        });
        let nf = exp.whnf(&info(), &LevelCtx::empty()).unwrap();
        assert_eq!(nf, ctor("S", vec![ctor("Z", vec![])]));
    }

    #[test]
    fn match_reduces_first_matching_branch() {
        let scrut = ctor("S", vec![ctor("Z", vec![])]);
        let cases = vec![
            Case {
                span: None,
                pattern: Pattern::Ctor { span: None, name: ident("Z"), params: vec![] },
                body: ctor("Z", vec![]),
            },
            Case {
                span: None,
                pattern: Pattern::Ctor {
                    span: None,
                    name: ident("S"),
                    params: vec![Pattern::Var { span: None, name: VarBind::from_string("k") }],
                },
                body: var(0),
            },
        ];
        let exp = Exp::LocalMatch(LocalMatch { span: None, on_exp: scrut, cases });
        let nf = exp.whnf(&info(), &LevelCtx::empty()).unwrap();
        assert_eq!(nf, ctor("Z", vec![]));
    }

    #[test]
    fn match_on_neutral_scrutinee_is_stuck() {
        let ctx = LevelCtx::nameless(1);
        let cases = vec![Case {
            span: None,
            pattern: Pattern::Var { span: None, name: VarBind::from_string("k") },
            body: var(0),
        }];
        let exp = Exp::LocalMatch(LocalMatch { span: None, on_exp: var(0), cases });
        let nf = exp.whnf(&info(), &ctx).unwrap();
        assert!(matches!(&*nf, Exp::LocalMatch(_)));
    }

    #[test]
    fn rewrite_by_refl_reduces() {
        let exp = Exp::Rewrite(Rewrite {
            span: None,
            body: ctor("Z", vec![]),
            proof: Box::new(Exp::Refl(Refl { span: None })),
        });
        let nf = exp.whnf(&info(), &LevelCtx::empty()).unwrap();
        assert_eq!(nf, ctor("Z", vec![]));
    }

    #[test]
    fn whnf_is_idempotent() {
        let exp = app(lam("x", ctor("S", vec![var(0)])), ctor("Z", vec![]));
        let nf = exp.whnf(&info(), &LevelCtx::empty()).unwrap();
        let nf2 = nf.whnf(&info(), &LevelCtx::empty()).unwrap();
        assert_eq!(nf, nf2);
    }

    #[test]
    fn whnf_does_not_reduce_under_binders() {
        let exp = lam("x", app(lam("y", var(0)), var(0)));
        let nf = exp.whnf(&info(), &LevelCtx::empty()).unwrap();
        assert_eq!(nf, exp);
    }
}
