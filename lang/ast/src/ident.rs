use std::fmt;

use derivative::Derivative;
use minipi_miette_util::codespan::Span;
use minipi_printer::{Alloc, Builder, Print, PrintCfg};
use pretty::DocAllocator;

use crate::traits::HasSpan;

// Local variables (binding site)
//
//

/// The name of a local binder. Only used for printing; two terms that differ
/// in binder names are still equal.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct VarBind {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub id: String,
}

impl VarBind {
    pub fn from_string(id: &str) -> Self {
        VarBind { span: None, id: id.to_owned() }
    }

    pub fn wildcard() -> Self {
        VarBind { span: None, id: "_".to_owned() }
    }
}

impl fmt::Display for VarBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl HasSpan for VarBind {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl Print for VarBind {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(&self.id)
    }
}

// Local variables (bound occurrence)
//
//

/// The name annotated at a variable occurrence. We do not use this information
/// for tracking the binding structure, but only for prettyprinting code.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct VarBound {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub id: String,
}

impl VarBound {
    pub fn from_string(id: &str) -> Self {
        VarBound { span: None, id: id.to_owned() }
    }
}

impl fmt::Display for VarBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl From<VarBind> for VarBound {
    fn from(var: VarBind) -> Self {
        VarBound { span: var.span, id: var.id }
    }
}

// Global identifiers
//
//

/// The name of a top-level definition, type constructor or data constructor.
/// Identity is the string; spans are diagnostic only.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Ident {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub id: String,
}

impl Ident {
    pub fn from_string(id: &str) -> Self {
        Ident { span: None, id: id.to_owned() }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl HasSpan for Ident {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl Print for Ident {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        alloc.text(&self.id)
    }
}

// De Bruijn indices and levels
//
//

// We use single-dimensional De Bruijn indices and levels: each binder binds
// exactly one variable, and a context is a flat list of binders.
//
// Indices count from the innermost binder outwards:
// ```text
//  idx:  3 2 1 0
//       [a,b,c,d] ⊢ Idx(1) = c
// ```
// Levels count from the root of the context:
// ```text
//  lvl:  0 1 2 3
//       [a,b,c,d] ⊢ Lvl(2) = c
// ```
// We use levels when we want to weaken the context, because the binding
// structure remains intact when new binders are pushed on the right.

/// De Bruijn index, counting binders from the variable occurrence outwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Idx(pub usize);

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// De Bruijn level, counting binders from the root of the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lvl(pub usize);

impl fmt::Display for Lvl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Either a De-Bruijn level or an index
///
/// Used to support lookup with both representations using the same interface
#[derive(Debug, Clone, Copy)]
pub enum Var {
    Lvl(Lvl),
    Idx(Idx),
}

impl From<Idx> for Var {
    fn from(idx: Idx) -> Self {
        Var::Idx(idx)
    }
}

impl From<Lvl> for Var {
    fn from(lvl: Lvl) -> Self {
        Var::Lvl(lvl)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::Lvl(lvl) => write!(f, "lvl:{lvl}"),
            Var::Idx(idx) => write!(f, "idx:{idx}"),
        }
    }
}
