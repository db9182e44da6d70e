use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::theme::ThemeExt;
use minipi_printer::tokens::{COLON, COMMA, DATA, EQUALS, LET};
use minipi_printer::util::BracesExt;
use minipi_printer::{Alloc, Builder, DocAllocator, Print, PrintCfg};

use crate::ctx::values::Binder;
use crate::ctx::{BindContext, LevelCtx};
use crate::exp::Exp;
use crate::ident::{Ident, VarBind};
use crate::traits::*;

// Telescope
//
//

/// A dependent parameter list. A `Decl` entry binds one variable for the rest
/// of the telescope; a `Def` entry is an equation on an earlier variable and
/// binds nothing.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub enum Param {
    Decl {
        #[derivative(PartialEq = "ignore", Hash = "ignore")]
        name: VarBind,
        typ: Box<Exp>,
    },
    Def {
        /// The constrained variable. Starts out as a `Variable`; instantiating
        /// the telescope may replace it by an arbitrary term.
        var: Box<Exp>,
        body: Box<Exp>,
    },
}

#[derive(Debug, Clone, Default, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Telescope {
    pub params: Vec<Param>,
}

impl Telescope {
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The number of variables this telescope binds.
    pub fn bindings(&self) -> usize {
        self.params.iter().filter(|param| matches!(param, Param::Decl { .. })).count()
    }
}

impl Shift for Telescope {
    fn shift_in_range<R: ShiftRange>(&mut self, range: &R, by: isize) {
        shift_params(&mut self.params, range, by);
    }
}

fn shift_params<R: ShiftRange>(params: &mut [Param], range: &R, by: isize) {
    let Some((head, tail)) = params.split_first_mut() else {
        return;
    };
    match head {
        Param::Decl { typ, .. } => {
            typ.shift_in_range(range, by);
            shift_params(tail, &range.clone().shift(1), by);
        }
        Param::Def { var, body } => {
            var.shift_in_range(range, by);
            body.shift_in_range(range, by);
            shift_params(tail, range, by);
        }
    }
}

impl Substitutable for Telescope {
    type Target = Telescope;
    fn subst<S: Substitution>(&self, ctx: &mut LevelCtx, by: &S) -> Self::Target {
        let mut out = Vec::with_capacity(self.params.len());
        subst_params(ctx, &self.params, by, &mut out);
        Telescope { params: out }
    }
}

fn subst_params<S: Substitution>(
    ctx: &mut LevelCtx,
    params: &[Param],
    by: &S,
    out: &mut Vec<Param>,
) {
    let Some((head, tail)) = params.split_first() else {
        return;
    };
    match head {
        Param::Decl { name, typ } => {
            out.push(Param::Decl { name: name.clone(), typ: typ.subst(ctx, by) });
            ctx.bind_single(Binder { name: name.clone(), content: () }, |ctx| {
                let mut by = (*by).clone();
                by.shift(1);
                subst_params(ctx, tail, &by, out)
            })
        }
        Param::Def { var, body } => {
            out.push(Param::Def { var: var.subst(ctx, by), body: body.subst(ctx, by) });
            subst_params(ctx, tail, by, out)
        }
    }
}

impl Print for Param {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Param::Decl { name, typ } => name
                .print(cfg, alloc)
                .append(alloc.space())
                .append(COLON)
                .append(alloc.space())
                .append(typ.print(cfg, alloc)),
            Param::Def { var, body } => var
                .print(cfg, alloc)
                .append(alloc.space())
                .append(EQUALS)
                .append(alloc.space())
                .append(body.print(cfg, alloc)),
        }
    }
}

impl Print for Telescope {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        if self.params.is_empty() {
            return alloc.nil();
        }
        let sep = alloc.text(COMMA).append(alloc.space());
        alloc.intersperse(self.params.iter().map(|param| param.print(cfg, alloc)), sep).parens()
    }
}

// Declarations
//
//

#[derive(Debug, Clone)]
pub struct Module {
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Data(Data),
    Sig(Sig),
    Let(Let),
}

impl Decl {
    pub fn name(&self) -> &Ident {
        match self {
            Decl::Data(data) => &data.name,
            Decl::Sig(sig) => &sig.name,
            Decl::Let(tl_let) => &tl_let.name,
        }
    }
}

impl HasSpan for Decl {
    fn span(&self) -> Option<Span> {
        match self {
            Decl::Data(data) => data.span,
            Decl::Sig(sig) => sig.span,
            Decl::Let(tl_let) => tl_let.span,
        }
    }
}

/// A data type declaration. The parameter telescope is closed and must not
/// contain `Def` entries; the constructor telescopes live under it.
#[derive(Debug, Clone)]
pub struct Data {
    pub span: Option<Span>,
    pub name: Ident,
    pub params: Telescope,
    pub ctors: Vec<CtorDef>,
}

#[derive(Debug, Clone)]
pub struct CtorDef {
    pub span: Option<Span>,
    pub name: Ident,
    pub params: Telescope,
}

/// A top-level type declaration `x : T`, serving as the type hint for a later
/// definition of `x`.
#[derive(Debug, Clone)]
pub struct Sig {
    pub span: Option<Span>,
    pub name: Ident,
    pub typ: Box<Exp>,
}

/// A top-level definition. The type annotation is optional; if it is missing
/// and no hint is in scope, the type is inferred.
#[derive(Debug, Clone)]
pub struct Let {
    pub span: Option<Span>,
    pub name: Ident,
    pub typ: Option<Box<Exp>>,
    pub body: Box<Exp>,
}

impl Print for Data {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Data { name, params, ctors, .. } = self;
        let sep = alloc.text(COMMA).append(alloc.line());
        let body = if ctors.is_empty() {
            alloc.space().braces_anno()
        } else {
            alloc
                .line()
                .append(alloc.intersperse(ctors.iter().map(|ctor| ctor.print(cfg, alloc)), sep))
                .nest(cfg.indent)
                .append(alloc.line())
                .braces_anno()
        };
        alloc
            .keyword(DATA)
            .append(alloc.space())
            .append(alloc.typ(&name.id))
            .append(params.print(cfg, alloc))
            .append(alloc.space())
            .append(body)
            .group()
    }
}

impl Print for CtorDef {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let CtorDef { name, params, .. } = self;
        alloc.ctor(&name.id).append(params.print(cfg, alloc))
    }
}

impl Print for Sig {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Sig { name, typ, .. } = self;
        name.print(cfg, alloc)
            .append(alloc.space())
            .append(COLON)
            .append(alloc.space())
            .append(typ.print(cfg, alloc))
            .group()
    }
}

impl Print for Let {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Let { name, typ, body, .. } = self;
        let anno = match typ {
            Some(typ) => alloc
                .space()
                .append(COLON)
                .append(alloc.space())
                .append(typ.print(cfg, alloc)),
            None => alloc.nil(),
        };
        alloc
            .keyword(LET)
            .append(alloc.space())
            .append(name.print(cfg, alloc))
            .append(anno)
            .append(alloc.space())
            .append(EQUALS)
            .append(alloc.space())
            .append(body.print(cfg, alloc))
            .group()
    }
}

impl Print for Decl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Decl::Data(data) => data.print(cfg, alloc),
            Decl::Sig(sig) => sig.print(cfg, alloc),
            Decl::Let(tl_let) => tl_let.print(cfg, alloc),
        }
    }
}

impl Print for Module {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let sep = alloc.hardline().append(alloc.hardline());
        alloc.intersperse(self.decls.iter().map(|decl| decl.print(cfg, alloc)), sep)
    }
}
