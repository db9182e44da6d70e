use minipi_ast::*;

use crate::result::{TcResult, TypeError};

/// Require a weak-head normal type to be a type constructor application.
pub fn expect_typ_app(exp: &Exp) -> TcResult<TypCtor> {
    match exp {
        Exp::TypCtor(typ_app) => Ok(typ_app.clone()),
        _ => Err(TypeError::expected_typ_app(exp)),
    }
}

/// Require a weak-head normal type to be a dependent function type.
pub fn expect_pi(exp: &Exp) -> TcResult<Pi> {
    match exp {
        Exp::Pi(pi) => Ok(pi.clone()),
        _ => Err(TypeError::not_a_function(exp, exp.span())),
    }
}

/// Require a weak-head normal type to be a propositional equality.
pub fn expect_eq(exp: &Exp) -> TcResult<TypeEq> {
    match exp {
        Exp::TypeEq(eq) => Ok(eq.clone()),
        _ => Err(TypeError::not_an_equality(exp, exp.span())),
    }
}
