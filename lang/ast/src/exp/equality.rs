use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::tokens::{CONTRA, EQUALS, REFL, SUBST, SUBST_BY};
use minipi_printer::util::ParensIfExt;
use minipi_printer::{Alloc, Builder, DocAllocator, Precedence, Print, PrintCfg};

use crate::ctx::LevelCtx;
use crate::ident::Lvl;
use crate::traits::*;

use super::Exp;

// TypeEq
//
//

/// The propositional equality type `a = b`.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct TypeEq {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub lhs: Box<Exp>,
    pub rhs: Box<Exp>,
}

impl HasSpan for TypeEq {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<TypeEq> for Exp {
    fn from(val: TypeEq) -> Self {
        Exp::TypeEq(val)
    }
}

impl Shift for TypeEq {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.lhs.shift_in_range(range, by);
        self.rhs.shift_in_range(range, by);
    }
}

impl Occurs for TypeEq {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let TypeEq { lhs, rhs, .. } = self;
        lhs.occurs(ctx, f) || rhs.occurs(ctx, f)
    }
}

impl Substitutable for TypeEq {
    type Target = TypeEq;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let TypeEq { span, lhs, rhs } = self;
        TypeEq { span: *span, lhs: lhs.subst(ctx, by), rhs: rhs.subst(ctx, by) }
    }
}

impl Print for TypeEq {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let TypeEq { lhs, rhs, .. } = self;
        lhs.print_prec(cfg, alloc, Precedence::App)
            .append(alloc.space())
            .append(EQUALS)
            .append(alloc.space())
            .append(rhs.print_prec(cfg, alloc, Precedence::App))
            .group()
            .parens_if(prec > Precedence::Ops)
    }
}

// Refl
//
//

/// The proof of reflexivity.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Refl {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
}

impl HasSpan for Refl {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Refl> for Exp {
    fn from(val: Refl) -> Self {
        Exp::Refl(val)
    }
}

impl Shift for Refl {
    fn shift_in_range<R: ShiftRange>(&mut self, _range: &R, _by: isize) {}
}

impl Occurs for Refl {
    fn occurs<F: Fn(Lvl) -> bool>(&self, _ctx: &mut LevelCtx, _f: &F) -> bool {
        false
    }
}

impl Substitutable for Refl {
    type Target = Refl;
    fn subst<S: Substitution>(&self, _ctx: &mut LevelCtx, _by: &S) -> Self::Target {
        self.clone()
    }
}

impl Print for Refl {
    fn print_prec<'a>(
        &'a self,
        _cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc.ctor(REFL)
    }
}

// Rewrite
//
//

/// `subst body by proof`: use the equality `proof` to rewrite the type the
/// body is checked at.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Rewrite {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub body: Box<Exp>,
    pub proof: Box<Exp>,
}

impl HasSpan for Rewrite {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Rewrite> for Exp {
    fn from(val: Rewrite) -> Self {
        Exp::Rewrite(val)
    }
}

impl Shift for Rewrite {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.body.shift_in_range(range, by);
        self.proof.shift_in_range(range, by);
    }
}

impl Occurs for Rewrite {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        let Rewrite { body, proof, .. } = self;
        body.occurs(ctx, f) || proof.occurs(ctx, f)
    }
}

impl Substitutable for Rewrite {
    type Target = Rewrite;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let Rewrite { span, body, proof } = self;
        Rewrite { span: *span, body: body.subst(ctx, by), proof: proof.subst(ctx, by) }
    }
}

impl Print for Rewrite {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Rewrite { body, proof, .. } = self;
        alloc
            .keyword(SUBST)
            .append(alloc.space())
            .append(body.print_prec(cfg, alloc, Precedence::App))
            .append(alloc.space())
            .append(alloc.keyword(SUBST_BY))
            .append(alloc.space())
            .append(proof.print_prec(cfg, alloc, Precedence::App))
            .group()
            .parens_if(prec > Precedence::Exp)
    }
}

// Absurd
//
//

/// `contra proof`: ex falso from an equality between distinct constructors.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Absurd {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub proof: Box<Exp>,
}

impl HasSpan for Absurd {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<Absurd> for Exp {
    fn from(val: Absurd) -> Self {
        Exp::Absurd(val)
    }
}

impl Shift for Absurd {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        self.proof.shift_in_range(range, by);
    }
}

impl Occurs for Absurd {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        self.proof.occurs(ctx, f)
    }
}

impl Substitutable for Absurd {
    type Target = Absurd;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let Absurd { span, proof } = self;
        Absurd { span: *span, proof: proof.subst(ctx, by) }
    }
}

impl Print for Absurd {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Absurd { proof, .. } = self;
        alloc
            .keyword(CONTRA)
            .append(alloc.space())
            .append(proof.print_prec(cfg, alloc, Precedence::Atom))
            .group()
            .parens_if(prec > Precedence::App)
    }
}
