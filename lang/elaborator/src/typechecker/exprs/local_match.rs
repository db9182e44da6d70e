//! Checking pattern matches
//!
//! Every case is checked in a fork of the context: the pattern is elaborated
//! into bindings and a term, the scrutinee is unified with that term, and the
//! resulting refinement narrows both the context and the goal before the body
//! is checked.

use log::trace;

use minipi_ast::ctx::values::Binder;
use minipi_ast::ctx::{BindContext, LevelCtx};
use minipi_ast::*;
use minipi_miette_util::ToMiette;
use minipi_printer::Print;

use crate::normalizer::Whnf;
use crate::result::{TcResult, TypeError};
use crate::unifier::{Verdict, unify};

use super::super::ctx::{Ctx, ContextRefineExt};
use super::super::telescope::instantiate_params;
use super::super::util::expect_typ_app;
use super::CheckInfer;

impl CheckInfer for LocalMatch {
    fn check(&self, ctx: &mut Ctx, t: &Exp) -> TcResult {
        let LocalMatch { span, on_exp, cases } = self;

        // Compute the type of the expression we are pattern matching on.
        // This should always be a type constructor for a data type.
        let on_exp_typ = on_exp.infer(ctx)?.whnf(&ctx.info, &ctx.levels())?;
        let typ_app = expect_typ_app(&on_exp_typ)?;

        check_exhaustiveness(ctx, &typ_app.name, cases, span)?;

        // The scrutinee is normalized once; each branch unifies it with the
        // term its pattern stands for.
        let scrut = on_exp.whnf(&ctx.info, &ctx.levels())?;

        for case in cases {
            trace!("Checking case for pattern: {}", case.pattern.print_trace());

            ctx.fork(|ctx| {
                let scrut_typ = Exp::TypCtor(typ_app.clone());
                declare_pat(
                    ctx,
                    &case.pattern,
                    &scrut_typ,
                    Box::new(|ctx, pat_exp| {
                        let size = case.pattern.size();
                        let scrut = shift_and_clone(&scrut, size as isize);
                        // `Refuted` proves this case can never match the
                        // scrutinee; the unreachable body is not checked.
                        let Verdict::Solved(refinement) =
                            unify(&ctx.levels(), &ctx.info, &scrut, &pat_exp)?
                        else {
                            return Ok(());
                        };

                        let goal = shift_and_clone(&Box::new(t.clone()), size as isize);
                        let goal = goal.subst(&mut ctx.levels(), &refinement);
                        ctx.refine(&refinement)?;

                        case.body.check(ctx, &goal)
                    }),
                )
            })?;
        }

        Ok(())
    }

    fn infer(&self, _ctx: &mut Ctx) -> TcResult<Box<Exp>> {
        Err(TypeError::must_annotate(&self.clone().into()))
    }
}

/// Check whether the pattern match covers the constructors of the scrutinee's
/// data type. A variable pattern covers everything; otherwise there must be
/// exactly one case per declared constructor.
fn check_exhaustiveness(
    ctx: &Ctx,
    typ_name: &Ident,
    cases: &[Case],
    span: &Option<minipi_miette_util::codespan::Span>,
) -> TcResult {
    if cases.iter().any(|case| matches!(case.pattern, Pattern::Var { .. })) {
        return Ok(());
    }

    let data = ctx.info.lookup_tyctor(typ_name)?;
    let ctors_expected: HashSet<Ident> = data.ctors.iter().cloned().collect();
    let mut ctors_actual: HashSet<Ident> = HashSet::default();
    let mut ctors_duplicate: HashSet<Ident> = HashSet::default();

    for case in cases {
        let Pattern::Ctor { name, .. } = &case.pattern else {
            continue;
        };
        if ctors_actual.contains(name) {
            ctors_duplicate.insert(name.clone());
        }
        ctors_actual.insert(name.clone());
    }

    let ctors_missing: HashSet<_> = ctors_expected.difference(&ctors_actual).collect();
    let ctors_undeclared: HashSet<_> = ctors_actual.difference(&ctors_expected).collect();

    if !ctors_missing.is_empty() || !ctors_undeclared.is_empty() || !ctors_duplicate.is_empty() {
        return Err(TypeError::invalid_match(
            ctors_missing.into_iter().map(|name| name.id.clone()).collect(),
            ctors_undeclared.into_iter().map(|name| name.id.clone()).collect(),
            ctors_duplicate.into_iter().map(|name| name.id).collect(),
            span,
        ));
    }
    Ok(())
}

/// Continuation invoked once a pattern's variables have been bound. The
/// continuations are boxed because pattern elaboration recurses through
/// nested closures, which would otherwise not monomorphize.
type PatCont<'a, T> = Box<dyn FnOnce(&mut Ctx, Box<Exp>) -> TcResult<T> + 'a>;
type PatsCont<'a, T> = Box<dyn FnOnce(&mut Ctx, Vec<Box<Exp>>) -> TcResult<T> + 'a>;

/// Elaborate a pattern against its expected type: bind the pattern's
/// variables in the context and hand the continuation the term the pattern
/// stands for, expressed in the extended context. That term is what the
/// scrutinee is unified with.
pub fn declare_pat<'a, T>(
    ctx: &mut Ctx,
    pattern: &'a Pattern,
    typ: &Exp,
    f: PatCont<'a, T>,
) -> TcResult<T> {
    match pattern {
        Pattern::Var { name, .. } => {
            ctx.bind_single(Binder { name: name.clone(), content: Box::new(typ.clone()) }, |ctx| {
                f(ctx, var_here(name))
            })
        }
        Pattern::Ctor { span, name, params } => {
            let typ = typ.whnf(&ctx.info, &ctx.levels())?;
            let typ_app = expect_typ_app(&typ)?;
            let scoped = ctx.info.lookup_ctor_in(name, &typ_app.name)?;
            if params.len() != scoped.ctor.params.bindings() {
                return Err(Box::new(TypeError::PatternArgLenMismatch {
                    name: name.id.clone(),
                    expected: scoped.ctor.params.bindings(),
                    actual: params.len(),
                    span: span.to_miette(),
                }));
            }
            let tele = instantiate_params(&scoped.data_params, &typ_app.args, &scoped.ctor.params);
            declare_pats(
                ctx,
                params,
                tele,
                Box::new(move |ctx, args| {
                    f(
                        ctx,
                        Box::new(Exp::Ctor(Ctor {
                            span: None,
                            name: name.clone(),
                            args: Args::from(args),
                        })),
                    )
                }),
            )
        }
    }
}

/// Elaborate a list of sub-patterns against a telescope. `Def` entries bind
/// nothing and are skipped; their equations were enforced when the
/// constructor itself was checked. After each elaborated pattern the
/// remaining telescope is transported into the extended scope by weakening
/// past the fresh bindings and instantiating the telescope binder with the
/// pattern's term.
fn declare_pats<'a, T>(
    ctx: &mut Ctx,
    patterns: &'a [Pattern],
    tele: Telescope,
    f: PatsCont<'a, T>,
) -> TcResult<T> {
    let mut params = tele.params;
    while matches!(params.first(), Some(Param::Def { .. })) {
        params.remove(0);
    }

    let Some(head) = params.first().cloned() else {
        return match patterns {
            [] => f(ctx, vec![]),
            [pattern, ..] => Err(Box::new(TypeError::PatternArgLenMismatch {
                name: pattern.print_to_string(None),
                expected: 0,
                actual: patterns.len(),
                span: pattern.span().to_miette(),
            })),
        };
    };
    let Param::Decl { name: _, typ } = head else { unreachable!() };

    let Some((pattern, rest_patterns)) = patterns.split_first() else {
        return Err(Box::new(TypeError::PatternArgLenMismatch {
            name: typ.print_to_string(None),
            expected: params.iter().filter(|p| matches!(p, Param::Decl { .. })).count(),
            actual: 0,
            span: typ.span().to_miette(),
        }));
    };

    let tail = Telescope { params: params[1..].to_vec() };

    declare_pat(
        ctx,
        pattern,
        &typ,
        Box::new(move |ctx, pat_exp| {
            let size = pattern.size();
            let mut tail = tail;
            tail.shift_in_range(&(1..), size as isize);
            let tail = open_tail(&ctx.levels(), tail, &pat_exp);
            declare_pats(
                ctx,
                rest_patterns,
                tail,
                Box::new(move |ctx, mut rest_exps| {
                    let later: usize = rest_patterns.iter().map(Pattern::size).sum();
                    let pat_exp = shift_and_clone(&pat_exp, later as isize);
                    let mut args = vec![pat_exp];
                    args.append(&mut rest_exps);
                    f(ctx, args)
                }),
            )
        }),
    )
}

/// Instantiate the binder a telescope tail lives under with the term of the
/// pattern just elaborated.
fn open_tail(levels: &LevelCtx, tele: Telescope, exp: &Exp) -> Telescope {
    let mut levels = levels.clone();
    levels.bind_single(Binder { name: VarBind::wildcard(), content: () }, |levels| {
        let assign =
            Assign { lvl: Lvl(levels.len() - 1), exp: shift_and_clone(&Box::new(exp.clone()), 1) };
        let mut tele = tele.subst(levels, &assign);
        tele.shift(-1);
        tele
    })
}
