use miette::{Diagnostic, SourceSpan};
use minipi_miette_util::ToMiette;
use minipi_miette_util::codespan::Span;
use thiserror::Error;

use minipi_ast::*;

use minipi_printer::Print;

pub type TcResult<T = ()> = Result<T, Box<TypeError>>;

fn comma_separated<I: IntoIterator<Item = String>>(iter: I) -> String {
    separated(", ", iter)
}

fn separated<I: IntoIterator<Item = String>>(s: &str, iter: I) -> String {
    let vec: Vec<_> = iter.into_iter().collect();
    vec.join(s)
}

#[derive(Error, Diagnostic, Debug)]
pub enum TypeError {
    #[error("Wrong number of arguments to {name} provided: got {actual}, expected {expected}")]
    #[diagnostic(code("T-001"))]
    ArgLenMismatch {
        name: String,
        expected: usize,
        actual: usize,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("The following terms are not equal:\n  1: {lhs}\n  2: {rhs}\n")]
    #[diagnostic(code("T-002"))]
    NotEq {
        lhs: String,
        rhs: String,
        #[label("Source of (1)")]
        lhs_span: Option<SourceSpan>,
        #[label("Source of (2)")]
        rhs_span: Option<SourceSpan>,
    },
    #[error("Expected a function type, got {got}")]
    #[diagnostic(code("T-003"))]
    NotAFunction {
        got: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Expected an equality type, got {got}")]
    #[diagnostic(code("T-004"))]
    NotAnEquality {
        got: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Expected type constructor application, got {got}")]
    #[diagnostic(code("T-005"))]
    ExpectedTypApp {
        got: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Cannot infer type of {exp}; a type annotation is required")]
    #[diagnostic(code("T-006"))]
    MustAnnotate {
        exp: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("The constructor {name} is declared by more than one data type")]
    #[diagnostic(code("T-007"))]
    AmbiguousCtor {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("{name} is not defined")]
    #[diagnostic(code("T-008"))]
    UndefinedName {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("{name} is already defined")]
    #[diagnostic(code("T-009"))]
    DuplicateBinding {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("The constructor {name} is declared twice in data type {typ_name}")]
    #[diagnostic(code("T-010"))]
    DuplicateCtor {
        name: String,
        typ_name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Cannot derive a contradiction from {got}")]
    #[diagnostic(code("T-011"))]
    NotContradictory {
        got: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("{lvl} occurs in {exp}")]
    #[diagnostic(code("T-012"))]
    OccursCheckFailed {
        lvl: Lvl,
        exp: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Cannot unify {lhs} with {rhs}")]
    #[diagnostic(code("T-013"))]
    CannotUnify {
        lhs: String,
        rhs: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Invalid pattern match: {msg}")]
    #[diagnostic(code("T-014"))]
    InvalidMatch {
        msg: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Wrong number of pattern arguments to {name} provided: got {actual}, expected {expected}")]
    #[diagnostic(code("T-015"))]
    PatternArgLenMismatch {
        name: String,
        expected: usize,
        actual: usize,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Unmet obligation:\n  Goal: {goal}\n  Context: {ctx}\n")]
    #[diagnostic(code("T-016"))]
    UnmetObligation {
        goal: String,
        ctx: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("An unexpected internal error occurred: {message}")]
    #[diagnostic(code("T-XXX"))]
    /// This error should not occur.
    /// Some internal invariant has been violated.
    Impossible {
        message: String,
        #[label]
        span: Option<SourceSpan>,
    },
}

impl TypeError {
    pub fn not_eq(lhs: &Exp, rhs: &Exp) -> Box<Self> {
        Box::new(Self::NotEq {
            lhs: lhs.print_to_string(None),
            rhs: rhs.print_to_string(None),
            lhs_span: lhs.span().to_miette(),
            rhs_span: rhs.span().to_miette(),
        })
    }

    pub fn not_a_function(got: &Exp, span: Option<Span>) -> Box<Self> {
        Box::new(Self::NotAFunction { got: got.print_to_string(None), span: span.to_miette() })
    }

    pub fn not_an_equality(got: &Exp, span: Option<Span>) -> Box<Self> {
        Box::new(Self::NotAnEquality { got: got.print_to_string(None), span: span.to_miette() })
    }

    pub fn expected_typ_app(got: &Exp) -> Box<Self> {
        Box::new(Self::ExpectedTypApp {
            got: got.print_to_string(None),
            span: got.span().to_miette(),
        })
    }

    pub fn must_annotate(exp: &Exp) -> Box<Self> {
        Box::new(Self::MustAnnotate { exp: exp.print_to_string(None), span: exp.span().to_miette() })
    }

    pub fn not_contradictory(got: &Exp) -> Box<Self> {
        Box::new(Self::NotContradictory {
            got: got.print_to_string(None),
            span: got.span().to_miette(),
        })
    }

    pub fn occurs_check_failed(lvl: Lvl, exp: &Exp) -> Box<Self> {
        Box::new(Self::OccursCheckFailed {
            lvl,
            exp: exp.print_to_string(None),
            span: exp.span().to_miette(),
        })
    }

    pub fn cannot_unify(lhs: &Exp, rhs: &Exp) -> Box<Self> {
        Box::new(Self::CannotUnify {
            lhs: lhs.print_to_string(None),
            rhs: rhs.print_to_string(None),
            span: lhs.span().or(rhs.span()).to_miette(),
        })
    }

    pub fn invalid_match(
        missing: HashSet<String>,
        undeclared: HashSet<String>,
        duplicate: HashSet<String>,
        span: &Option<Span>,
    ) -> Box<Self> {
        let mut msgs = Vec::new();

        if !missing.is_empty() {
            msgs.push(format!("missing {}", comma_separated(missing.iter().cloned())));
        }
        if !undeclared.is_empty() {
            msgs.push(format!("undeclared {}", comma_separated(undeclared.iter().cloned())));
        }
        if !duplicate.is_empty() {
            msgs.push(format!("duplicate {}", comma_separated(duplicate.iter().cloned())));
        }

        Box::new(Self::InvalidMatch { msg: separated("; ", msgs), span: span.to_miette() })
    }

    pub fn impossible(message: impl Into<String>, span: Option<Span>) -> Box<Self> {
        Box::new(Self::Impossible { message: message.into(), span: span.to_miette() })
    }
}
