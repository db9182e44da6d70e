//! End-to-end checks of whole modules through `check_module`.

use minipi_ast::*;
use minipi_elaborator::{TypeError, check_module};

// AST builders
//
//

fn ident(id: &str) -> Ident {
    Ident::from_string(id)
}

fn var(idx: usize, name: &str) -> Box<Exp> {
    Box::new(Exp::Variable(Variable { span: None, idx: Idx(idx), name: VarBound::from_string(name) }))
}

fn typ() -> Box<Exp> {
    Box::new(Exp::TypeUniv(TypeUniv::new()))
}

fn pi(param: &str, domain: Box<Exp>, codomain: Box<Exp>) -> Box<Exp> {
    Box::new(Exp::Pi(Pi { span: None, param: VarBind::from_string(param), domain, codomain }))
}

fn lam(param: &str, body: Box<Exp>) -> Box<Exp> {
    Box::new(Exp::Lam(Lam { span: None, param: VarBind::from_string(param), body }))
}

fn app(fun: Box<Exp>, arg: Box<Exp>) -> Box<Exp> {
    Box::new(Exp::App(App { span: None, fun, arg }))
}

fn anno(exp: Box<Exp>, typ: Box<Exp>) -> Box<Exp> {
    Box::new(Exp::Anno(Anno { span: None, exp, typ }))
}

fn typ_ctor(name: &str, args: Vec<Box<Exp>>) -> Box<Exp> {
    Box::new(Exp::TypCtor(TypCtor { span: None, name: ident(name), args: Args::from(args) }))
}

fn ctor(name: &str, args: Vec<Box<Exp>>) -> Box<Exp> {
    Box::new(Exp::Ctor(Ctor { span: None, name: ident(name), args: Args::from(args) }))
}

fn eq(lhs: Box<Exp>, rhs: Box<Exp>) -> Box<Exp> {
    Box::new(Exp::TypeEq(TypeEq { span: None, lhs, rhs }))
}

fn refl() -> Box<Exp> {
    Box::new(Exp::Refl(Refl { span: None }))
}

fn subst(body: Box<Exp>, proof: Box<Exp>) -> Box<Exp> {
    Box::new(Exp::Rewrite(Rewrite { span: None, body, proof }))
}

fn contra(proof: Box<Exp>) -> Box<Exp> {
    Box::new(Exp::Absurd(Absurd { span: None, proof }))
}

fn hole(kind: HoleKind) -> Box<Exp> {
    Box::new(Exp::Hole(Hole { span: None, kind }))
}

fn match_(on_exp: Box<Exp>, cases: Vec<Case>) -> Box<Exp> {
    Box::new(Exp::LocalMatch(LocalMatch { span: None, on_exp, cases }))
}

fn case(pattern: Pattern, body: Box<Exp>) -> Case {
    Case { span: None, pattern, body }
}

fn pat_var(name: &str) -> Pattern {
    Pattern::Var { span: None, name: VarBind::from_string(name) }
}

fn pat_ctor(name: &str, params: Vec<Pattern>) -> Pattern {
    Pattern::Ctor { span: None, name: ident(name), params }
}

fn decl_param(name: &str, typ: Box<Exp>) -> Param {
    Param::Decl { name: VarBind::from_string(name), typ }
}

fn def_param(var: Box<Exp>, body: Box<Exp>) -> Param {
    Param::Def { var, body }
}

fn sig(name: &str, typ: Box<Exp>) -> Decl {
    Decl::Sig(Sig { span: None, name: ident(name), typ })
}

fn global_let(name: &str, body: Box<Exp>) -> Decl {
    Decl::Let(Let { span: None, name: ident(name), typ: None, body })
}

fn data(name: &str, params: Vec<Param>, ctors: Vec<(&str, Vec<Param>)>) -> Decl {
    Decl::Data(Data {
        span: None,
        name: ident(name),
        params: Telescope { params },
        ctors: ctors
            .into_iter()
            .map(|(name, params)| CtorDef {
                span: None,
                name: ident(name),
                params: Telescope { params },
            })
            .collect(),
    })
}

/// `data Nat { Z, S(n : Nat) }`
fn nat() -> Decl {
    data(
        "Nat",
        vec![],
        vec![("Z", vec![]), ("S", vec![decl_param("n", typ_ctor("Nat", vec![]))])],
    )
}

fn check(decls: Vec<Decl>) -> Result<Module, Box<TypeError>> {
    check_module(&Module { decls })
}

// Scenarios
//
//

#[test]
fn polymorphic_identity_checks() {
    // id : (A : Type) -> A -> A
    // id = \A. \x. x
    let id_typ = pi("A", typ(), pi("x", var(0, "A"), var(1, "A")));
    let module = vec![sig("id", id_typ), global_let("id", lam("A", lam("x", var(0, "x"))))];
    assert!(check(module).is_ok());
}

#[test]
fn constructor_application_checks() {
    // (S Z) : Nat
    let module = vec![
        nat(),
        global_let("one", anno(ctor("S", vec![ctor("Z", vec![])]), typ_ctor("Nat", vec![]))),
    ];
    assert!(check(module).is_ok());
}

#[test]
fn overapplied_constructor_fails() {
    // Z applied to Z, written as a constructor with too many arguments
    let module = vec![
        nat(),
        global_let("bad", anno(ctor("Z", vec![ctor("Z", vec![])]), typ_ctor("Nat", vec![]))),
    ];
    match check(module) {
        Err(err) => assert!(matches!(*err, TypeError::ArgLenMismatch { .. })),
        Ok(_) => panic!("expected an arity mismatch"),
    }
}

#[test]
fn constructor_applied_as_function_fails() {
    // Z applied to Z via the function application form
    let module = vec![nat(), global_let("bad", app(ctor("Z", vec![]), ctor("Z", vec![])))];
    match check(module) {
        Err(err) => assert!(matches!(*err, TypeError::NotAFunction { .. })),
        Ok(_) => panic!("expected a non-function error"),
    }
}

#[test]
fn reflexivity_checks() {
    // refl : Nat = Nat
    // refl = Refl
    let module = vec![
        nat(),
        sig("refl", eq(typ_ctor("Nat", vec![]), typ_ctor("Nat", vec![]))),
        global_let("refl", refl()),
    ];
    assert!(check(module).is_ok());
}

#[test]
fn false_equation_fails() {
    // bad : Z = S Z
    // bad = Refl
    let module = vec![
        nat(),
        sig("bad", eq(ctor("Z", vec![]), ctor("S", vec![ctor("Z", vec![])]))),
        global_let("bad", refl()),
    ];
    match check(module) {
        Err(err) => assert!(matches!(*err, TypeError::NotEq { .. })),
        Ok(_) => panic!("expected an equality failure"),
    }
}

#[test]
fn unannotated_lambda_fails() {
    let module = vec![global_let("f", lam("x", var(0, "x")))];
    match check(module) {
        Err(err) => assert!(matches!(*err, TypeError::MustAnnotate { .. })),
        Ok(_) => panic!("expected a missing annotation error"),
    }
}

#[test]
fn match_on_constructor_checks() {
    // two : Nat
    // two = match S Z { Z => Z, S k => k }
    let scrutinee = ctor("S", vec![ctor("Z", vec![])]);
    let body = match_(
        scrutinee,
        vec![
            case(pat_ctor("Z", vec![]), ctor("Z", vec![])),
            case(pat_ctor("S", vec![pat_var("k")]), var(0, "k")),
        ],
    );
    let module = vec![nat(), sig("two", typ_ctor("Nat", vec![])), global_let("two", body)];
    assert!(check(module).is_ok());
}

#[test]
fn contradiction_discharges_any_type() {
    // absurd : (p : Z = S Z) -> Nat
    // absurd = \p. contra p
    let absurd_typ =
        pi("p", eq(ctor("Z", vec![]), ctor("S", vec![ctor("Z", vec![])])), typ_ctor("Nat", vec![]));
    let module = vec![
        nat(),
        sig("absurd", absurd_typ),
        global_let("absurd", lam("p", contra(var(0, "p")))),
    ];
    assert!(check(module).is_ok());
}

// Beyond the basic scenarios
//
//

#[test]
fn symmetry_via_subst() {
    // sym : (x : Nat) -> (y : Nat) -> x = y -> y = x
    // sym = \x. \y. \p. subst Refl by p
    let sym_typ = pi(
        "x",
        typ_ctor("Nat", vec![]),
        pi(
            "y",
            typ_ctor("Nat", vec![]),
            pi("p", eq(var(1, "x"), var(0, "y")), eq(var(1, "y"), var(2, "x"))),
        ),
    );
    let module = vec![
        nat(),
        sig("sym", sym_typ),
        global_let("sym", lam("x", lam("y", lam("p", subst(refl(), var(0, "p")))))),
    ];
    assert!(check(module).is_ok());
}

#[test]
fn dependent_match_refines_goal() {
    // diag : (n : Nat) -> n = n
    // diag = \n. match n { Z => Refl, S k => Refl }
    let diag_typ = pi("n", typ_ctor("Nat", vec![]), eq(var(0, "n"), var(0, "n")));
    let body = lam(
        "n",
        match_(
            var(0, "n"),
            vec![
                case(pat_ctor("Z", vec![]), refl()),
                case(pat_ctor("S", vec![pat_var("k")]), refl()),
            ],
        ),
    );
    let module = vec![nat(), sig("diag", diag_typ), global_let("diag", body)];
    assert!(check(module).is_ok());
}

#[test]
fn non_exhaustive_match_fails() {
    let body = match_(ctor("S", vec![ctor("Z", vec![])]), vec![case(
        pat_ctor("Z", vec![]),
        ctor("Z", vec![]),
    )]);
    let module = vec![nat(), sig("bad", typ_ctor("Nat", vec![])), global_let("bad", body)];
    match check(module) {
        Err(err) => assert!(matches!(*err, TypeError::InvalidMatch { .. })),
        Ok(_) => panic!("expected a non-exhaustive match error"),
    }
}

#[test]
fn variable_pattern_is_exhaustive() {
    let body = match_(ctor("S", vec![ctor("Z", vec![])]), vec![case(pat_var("n"), var(0, "n"))]);
    let module = vec![nat(), sig("ok", typ_ctor("Nat", vec![])), global_let("ok", body)];
    assert!(check(module).is_ok());
}

#[test]
fn indexed_datatype_with_equations() {
    // data Vec(A : Type, n : Nat) {
    //     Nil(n = Z),
    //     Cons(m : Nat, x : A, xs : Vec(A, m), n = S m),
    // }
    let vec_decl = data(
        "Vec",
        vec![decl_param("A", typ()), decl_param("n", typ_ctor("Nat", vec![]))],
        vec![
            ("Nil", vec![def_param(var(0, "n"), ctor("Z", vec![]))]),
            ("Cons", vec![
                decl_param("m", typ_ctor("Nat", vec![])),
                decl_param("x", var(2, "A")),
                decl_param("xs", typ_ctor("Vec", vec![var(3, "A"), var(1, "m")])),
                def_param(var(3, "n"), ctor("S", vec![var(2, "m")])),
            ]),
        ],
    );

    // singleton : Vec(Nat, S Z)
    // singleton = Cons(Z, Z, Nil)
    let singleton_typ =
        typ_ctor("Vec", vec![typ_ctor("Nat", vec![]), ctor("S", vec![ctor("Z", vec![])])]);
    let singleton =
        ctor("Cons", vec![ctor("Z", vec![]), ctor("Z", vec![]), ctor("Nil", vec![])]);

    let module = vec![
        nat(),
        vec_decl,
        sig("singleton", singleton_typ),
        global_let("singleton", singleton),
    ];
    assert!(check(module).is_ok());
}

#[test]
fn indexed_datatype_wrong_length_fails() {
    let vec_decl = data(
        "Vec",
        vec![decl_param("A", typ()), decl_param("n", typ_ctor("Nat", vec![]))],
        vec![
            ("Nil", vec![def_param(var(0, "n"), ctor("Z", vec![]))]),
            ("Cons", vec![
                decl_param("m", typ_ctor("Nat", vec![])),
                decl_param("x", var(2, "A")),
                decl_param("xs", typ_ctor("Vec", vec![var(3, "A"), var(1, "m")])),
                def_param(var(3, "n"), ctor("S", vec![var(2, "m")])),
            ]),
        ],
    );

    // bad : Vec(Nat, Z) but the value is a singleton
    let bad_typ = typ_ctor("Vec", vec![typ_ctor("Nat", vec![]), ctor("Z", vec![])]);
    let bad = ctor("Cons", vec![ctor("Z", vec![]), ctor("Z", vec![]), ctor("Nil", vec![])]);

    let module = vec![nat(), vec_decl, sig("bad", bad_typ), global_let("bad", bad)];
    assert!(check(module).is_err());
}

#[test]
fn trustme_is_accepted_at_any_type() {
    let module = vec![
        nat(),
        sig("axiom", eq(ctor("Z", vec![]), ctor("S", vec![ctor("Z", vec![])]))),
        global_let("axiom", hole(HoleKind::Admitted)),
    ];
    assert!(check(module).is_ok());
}

#[test]
fn open_goal_reports_obligation() {
    let module = vec![
        nat(),
        sig("todo", typ_ctor("Nat", vec![])),
        global_let("todo", hole(HoleKind::Goal)),
    ];
    match check(module) {
        Err(err) => assert!(matches!(*err, TypeError::UnmetObligation { .. })),
        Ok(_) => panic!("expected an unmet obligation"),
    }
}

#[test]
fn duplicate_definition_fails() {
    let module = vec![
        nat(),
        global_let("x", anno(ctor("Z", vec![]), typ_ctor("Nat", vec![]))),
        global_let("x", anno(ctor("Z", vec![]), typ_ctor("Nat", vec![]))),
    ];
    match check(module) {
        Err(err) => assert!(matches!(*err, TypeError::DuplicateBinding { .. })),
        Ok(_) => panic!("expected a duplicate binding error"),
    }
}

#[test]
fn inferred_definition_gets_a_declaration() {
    let module = vec![nat(), global_let("one", anno(ctor("S", vec![ctor("Z", vec![])]), typ_ctor("Nat", vec![])))];
    let out = check(module).unwrap();
    // data Nat, inferred sig for one, let one
    assert_eq!(out.decls.len(), 3);
    assert!(matches!(&out.decls[1], Decl::Sig(sig) if sig.name.id == "one"));
    assert!(matches!(&out.decls[2], Decl::Let(tl_let) if tl_let.name.id == "one"));
}

#[test]
fn annotation_roundtrip() {
    // If `infer(e) = T` then `(e : T)` checks, and is interchangeable with
    // checking `e` against `T`.
    let exp = ctor("S", vec![ctor("Z", vec![])]);
    let module = vec![
        nat(),
        sig("a", typ_ctor("Nat", vec![])),
        global_let("a", anno(exp.clone(), typ_ctor("Nat", vec![]))),
        sig("b", typ_ctor("Nat", vec![])),
        global_let("b", exp),
    ];
    assert!(check(module).is_ok());
}

#[test]
fn recursion_through_declared_type() {
    // double : (n : Nat) -> Nat
    // double = \n. match n { Z => Z, S k => S (S (double k)) }
    let double_typ = pi("n", typ_ctor("Nat", vec![]), typ_ctor("Nat", vec![]));
    let double_body = lam(
        "n",
        match_(
            var(0, "n"),
            vec![
                case(pat_ctor("Z", vec![]), ctor("Z", vec![])),
                case(
                    pat_ctor("S", vec![pat_var("k")]),
                    ctor("S", vec![ctor("S", vec![app(
                        Box::new(Exp::Global(Global { span: None, name: ident("double") })),
                        var(0, "k"),
                    )])]),
                ),
            ],
        ),
    );
    let module = vec![nat(), sig("double", double_typ), global_let("double", double_body)];
    assert!(check(module).is_ok());
}
