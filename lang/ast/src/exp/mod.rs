use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::tokens::{COMMA, FAT_ARROW};
use minipi_printer::util::BracesExt;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::values::Binder;
use crate::ctx::{BindContext, LevelCtx};
use crate::ident::*;
use crate::traits::*;

mod anno;
mod app;
mod args;
mod ctor;
mod equality;
mod global;
mod hole;
mod lam;
mod local_let;
mod local_match;
mod pi;
mod typ_ctor;
mod type_univ;
mod variable;

pub use anno::*;
pub use app::*;
pub use args::*;
pub use ctor::*;
pub use equality::*;
pub use global::*;
pub use hole::*;
pub use lam::*;
pub use local_let::*;
pub use local_match::*;
pub use pi::*;
pub use typ_ctor::*;
pub use type_univ::*;
pub use variable::*;

// Exp
//
//

/// Since variables are represented as de Bruijn indices and binder names as
/// well as spans are ignored by `Eq`, syntactic equality of two expressions
/// is α-equivalence.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub enum Exp {
    Variable(Variable),
    Global(Global),
    TypeUniv(TypeUniv),
    Pi(Pi),
    Lam(Lam),
    App(App),
    Anno(Anno),
    LocalLet(LocalLet),
    TypCtor(TypCtor),
    Ctor(Ctor),
    TypeEq(TypeEq),
    Refl(Refl),
    Rewrite(Rewrite),
    Absurd(Absurd),
    Hole(Hole),
    LocalMatch(LocalMatch),
}

impl Exp {
    pub fn to_typctor(self) -> Option<TypCtor> {
        match self {
            Exp::TypCtor(e) => Some(e),
            _ => None,
        }
    }
}

impl HasSpan for Exp {
    fn span(&self) -> Option<Span> {
        match self {
            Exp::Variable(e) => e.span(),
            Exp::Global(e) => e.span(),
            Exp::TypeUniv(e) => e.span(),
            Exp::Pi(e) => e.span(),
            Exp::Lam(e) => e.span(),
            Exp::App(e) => e.span(),
            Exp::Anno(e) => e.span(),
            Exp::LocalLet(e) => e.span(),
            Exp::TypCtor(e) => e.span(),
            Exp::Ctor(e) => e.span(),
            Exp::TypeEq(e) => e.span(),
            Exp::Refl(e) => e.span(),
            Exp::Rewrite(e) => e.span(),
            Exp::Absurd(e) => e.span(),
            Exp::Hole(e) => e.span(),
            Exp::LocalMatch(e) => e.span(),
        }
    }
}

impl Shift for Exp {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        match self {
            Exp::Variable(e) => e.shift_in_range(range, by),
            Exp::Global(e) => e.shift_in_range(range, by),
            Exp::TypeUniv(e) => e.shift_in_range(range, by),
            Exp::Pi(e) => e.shift_in_range(range, by),
            Exp::Lam(e) => e.shift_in_range(range, by),
            Exp::App(e) => e.shift_in_range(range, by),
            Exp::Anno(e) => e.shift_in_range(range, by),
            Exp::LocalLet(e) => e.shift_in_range(range, by),
            Exp::TypCtor(e) => e.shift_in_range(range, by),
            Exp::Ctor(e) => e.shift_in_range(range, by),
            Exp::TypeEq(e) => e.shift_in_range(range, by),
            Exp::Refl(e) => e.shift_in_range(range, by),
            Exp::Rewrite(e) => e.shift_in_range(range, by),
            Exp::Absurd(e) => e.shift_in_range(range, by),
            Exp::Hole(e) => e.shift_in_range(range, by),
            Exp::LocalMatch(e) => e.shift_in_range(range, by),
        }
    }
}

impl Occurs for Exp {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        match self {
            Exp::Variable(e) => e.occurs(ctx, f),
            Exp::Global(e) => e.occurs(ctx, f),
            Exp::TypeUniv(e) => e.occurs(ctx, f),
            Exp::Pi(e) => e.occurs(ctx, f),
            Exp::Lam(e) => e.occurs(ctx, f),
            Exp::App(e) => e.occurs(ctx, f),
            Exp::Anno(e) => e.occurs(ctx, f),
            Exp::LocalLet(e) => e.occurs(ctx, f),
            Exp::TypCtor(e) => e.occurs(ctx, f),
            Exp::Ctor(e) => e.occurs(ctx, f),
            Exp::TypeEq(e) => e.occurs(ctx, f),
            Exp::Refl(e) => e.occurs(ctx, f),
            Exp::Rewrite(e) => e.occurs(ctx, f),
            Exp::Absurd(e) => e.occurs(ctx, f),
            Exp::Hole(e) => e.occurs(ctx, f),
            Exp::LocalMatch(e) => e.occurs(ctx, f),
        }
    }
}

impl Substitutable for Exp {
    type Target = Exp;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        match self {
            Exp::Variable(e) => *e.subst(ctx, by),
            Exp::Global(e) => e.subst(ctx, by).into(),
            Exp::TypeUniv(e) => e.subst(ctx, by).into(),
            Exp::Pi(e) => e.subst(ctx, by).into(),
            Exp::Lam(e) => e.subst(ctx, by).into(),
            Exp::App(e) => e.subst(ctx, by).into(),
            Exp::Anno(e) => e.subst(ctx, by).into(),
            Exp::LocalLet(e) => e.subst(ctx, by).into(),
            Exp::TypCtor(e) => e.subst(ctx, by).into(),
            Exp::Ctor(e) => e.subst(ctx, by).into(),
            Exp::TypeEq(e) => e.subst(ctx, by).into(),
            Exp::Refl(e) => e.subst(ctx, by).into(),
            Exp::Rewrite(e) => e.subst(ctx, by).into(),
            Exp::Absurd(e) => e.subst(ctx, by).into(),
            Exp::Hole(e) => e.subst(ctx, by).into(),
            Exp::LocalMatch(e) => e.subst(ctx, by).into(),
        }
    }
}

impl Print for Exp {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            Exp::Variable(e) => e.print_prec(cfg, alloc, prec),
            Exp::Global(e) => e.print_prec(cfg, alloc, prec),
            Exp::TypeUniv(e) => e.print_prec(cfg, alloc, prec),
            Exp::Pi(e) => e.print_prec(cfg, alloc, prec),
            Exp::Lam(e) => e.print_prec(cfg, alloc, prec),
            Exp::App(e) => e.print_prec(cfg, alloc, prec),
            Exp::Anno(e) => e.print_prec(cfg, alloc, prec),
            Exp::LocalLet(e) => e.print_prec(cfg, alloc, prec),
            Exp::TypCtor(e) => e.print_prec(cfg, alloc, prec),
            Exp::Ctor(e) => e.print_prec(cfg, alloc, prec),
            Exp::TypeEq(e) => e.print_prec(cfg, alloc, prec),
            Exp::Refl(e) => e.print_prec(cfg, alloc, prec),
            Exp::Rewrite(e) => e.print_prec(cfg, alloc, prec),
            Exp::Absurd(e) => e.print_prec(cfg, alloc, prec),
            Exp::Hole(e) => e.print_prec(cfg, alloc, prec),
            Exp::LocalMatch(e) => e.print_prec(cfg, alloc, prec),
        }
    }
}

// Pattern
//
//

#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub enum Pattern {
    /// A variable pattern; binds one variable.
    Var {
        #[derivative(PartialEq = "ignore", Hash = "ignore")]
        span: Option<Span>,
        #[derivative(PartialEq = "ignore", Hash = "ignore")]
        name: VarBind,
    },
    /// A constructor pattern with nested sub-patterns.
    Ctor {
        #[derivative(PartialEq = "ignore", Hash = "ignore")]
        span: Option<Span>,
        name: Ident,
        params: Vec<Pattern>,
    },
}

impl Pattern {
    /// The number of variables this pattern binds.
    pub fn size(&self) -> usize {
        match self {
            Pattern::Var { .. } => 1,
            Pattern::Ctor { params, .. } => params.iter().map(Pattern::size).sum(),
        }
    }
}

impl HasSpan for Pattern {
    fn span(&self) -> Option<Span> {
        match self {
            Pattern::Var { span, .. } => *span,
            Pattern::Ctor { span, .. } => *span,
        }
    }
}

impl Print for Pattern {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Pattern::Var { name, .. } => name.print(cfg, alloc),
            Pattern::Ctor { name, params, .. } => {
                let head = alloc.ctor(&name.id);
                if params.is_empty() {
                    head
                } else {
                    head.append(params.print(cfg, alloc).parens())
                }
            }
        }
    }
}

// Case
//
//

#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Case {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub pattern: Pattern,
    pub body: Box<Exp>,
}

impl Shift for Case {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        let size = self.pattern.size();
        self.body.shift_in_range(&range.clone().shift(size as isize), by);
    }
}

impl Occurs for Case {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let Case { pattern, body, .. } = self;
        let binders =
            (0..pattern.size()).map(|_| Binder { name: VarBind::wildcard(), content: () });
        ctx.bind_iter(binders, |ctx| body.occurs(ctx, f))
    }
}

impl Substitutable for Case {
    type Target = Case;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self {
        let Case { span, pattern, body } = self;
        let size = pattern.size();
        let binders = (0..size).map(|_| Binder { name: VarBind::wildcard(), content: () });
        ctx.bind_iter(binders, |ctx| {
            let mut by = (*by).clone();
            by.shift(size as isize);
            Case { span: *span, pattern: pattern.clone(), body: body.subst(ctx, &by) }
        })
    }
}

impl Print for Case {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Case { span: _, pattern, body } = self;

        pattern
            .print(cfg, alloc)
            .append(alloc.space())
            .append(alloc.text(FAT_ARROW))
            .append(alloc.line())
            .append(body.print(cfg, alloc))
            .nest(cfg.indent)
            .group()
    }
}

pub fn print_cases<'a>(cases: &'a [Case], cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
    match cases.len() {
        0 => alloc.space().braces_anno(),

        1 => alloc
            .line()
            .append(cases[0].print(cfg, alloc))
            .nest(cfg.indent)
            .append(alloc.line())
            .braces_anno()
            .group(),
        _ => {
            let sep = alloc.text(COMMA).append(alloc.hardline());
            alloc
                .hardline()
                .append(alloc.intersperse(cases.iter().map(|x| x.print(cfg, alloc)), sep))
                .nest(cfg.indent)
                .append(alloc.hardline())
                .braces_anno()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_size_counts_nested_bindings() {
        // S(S(k)) binds one variable, Cons(x, xs) binds two
        let succ = Pattern::Ctor {
            span: None,
            name: Ident::from_string("S"),
            params: vec![Pattern::Ctor {
                span: None,
                name: Ident::from_string("S"),
                params: vec![Pattern::Var { span: None, name: VarBind::from_string("k") }],
            }],
        };
        assert_eq!(succ.size(), 1);

        let cons = Pattern::Ctor {
            span: None,
            name: Ident::from_string("Cons"),
            params: vec![
                Pattern::Var { span: None, name: VarBind::from_string("x") },
                Pattern::Var { span: None, name: VarBind::from_string("xs") },
            ],
        };
        assert_eq!(cons.size(), 2);
    }

    #[test]
    fn patterns_equal_up_to_names() {
        let lhs = Pattern::Var { span: None, name: VarBind::from_string("x") };
        let rhs = Pattern::Var { span: None, name: VarBind::from_string("y") };
        assert_eq!(lhs, rhs);
    }
}
