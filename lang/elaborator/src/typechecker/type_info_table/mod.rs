//! The global signature
//!
//! While a module is checked, every successfully checked declaration is
//! recorded here. The table only ever grows; each declaration is checked
//! against a snapshot containing everything declared before it.

use minipi_ast::*;
use minipi_miette_util::ToMiette;

use crate::result::{TcResult, TypeError};

/// The type and optional unfolding of a global definition.
#[derive(Debug, Clone)]
pub struct LetMeta {
    pub typ: Box<Exp>,
    pub body: Option<Box<Exp>>,
}

/// The parameter telescope and constructor names of a data type.
#[derive(Debug, Clone)]
pub struct TyCtorMeta {
    pub params: Telescope,
    pub ctors: Vec<Ident>,
}

/// A constructor together with the data type that declares it. The
/// constructor telescope lives under the data type's parameter telescope.
#[derive(Debug, Clone)]
pub struct CtorMeta {
    pub typ_name: Ident,
    pub params: Telescope,
}

#[derive(Debug, Clone, Default)]
pub struct TypeInfoTable {
    map_let: HashMap<Ident, LetMeta>,
    map_tyctor: HashMap<Ident, TyCtorMeta>,
    /// A constructor name may be declared by several data types; lookup
    /// disambiguates via the expected type.
    map_ctor: HashMap<Ident, Vec<CtorMeta>>,
    /// Types declared by a `Sig` that have not yet met their definition.
    hints: HashMap<Ident, Box<Exp>>,
}

impl TypeInfoTable {
    pub fn insert_let(&mut self, name: Ident, meta: LetMeta) {
        self.hints.remove(&name);
        self.map_let.insert(name, meta);
    }

    pub fn insert_hint(&mut self, name: Ident, typ: Box<Exp>) {
        self.hints.insert(name, typ);
    }

    pub fn insert_tyctor(&mut self, name: Ident, meta: TyCtorMeta) {
        self.map_tyctor.insert(name, meta);
    }

    pub fn insert_data(&mut self, data: &Data) {
        let Data { name, params, ctors, .. } = data;
        self.insert_tyctor(
            name.clone(),
            TyCtorMeta {
                params: params.clone(),
                ctors: ctors.iter().map(|ctor| ctor.name.clone()).collect(),
            },
        );
        for ctor in ctors {
            self.map_ctor
                .entry(ctor.name.clone())
                .or_default()
                .push(CtorMeta { typ_name: name.clone(), params: ctor.params.clone() });
        }
    }

    pub fn has_global(&self, name: &Ident) -> bool {
        self.map_let.contains_key(name)
    }

    pub fn has_hint(&self, name: &Ident) -> bool {
        self.hints.contains_key(name)
    }

    pub fn has_tyctor(&self, name: &Ident) -> bool {
        self.map_tyctor.contains_key(name)
    }

    pub fn lookup_hint(&self, name: &Ident) -> Option<&Exp> {
        self.hints.get(name).map(|typ| &**typ)
    }

    /// The type of a global, whether it is already defined or only declared.
    pub fn lookup_global_typ(&self, name: &Ident) -> TcResult<Box<Exp>> {
        if let Some(meta) = self.map_let.get(name) {
            return Ok(meta.typ.clone());
        }
        if let Some(typ) = self.hints.get(name) {
            return Ok(typ.clone());
        }
        Err(Box::new(TypeError::UndefinedName {
            name: name.id.clone(),
            span: name.span.to_miette(),
        }))
    }

    /// The unfolding of a global definition, if it has one. Used by the
    /// normalizer; a name without a body is simply neutral.
    pub fn def_body(&self, name: &Ident) -> Option<&Exp> {
        self.map_let.get(name).and_then(|meta| meta.body.as_deref())
    }

    pub fn lookup_tyctor(&self, name: &Ident) -> TcResult<&TyCtorMeta> {
        self.map_tyctor.get(name).ok_or_else(|| {
            Box::new(TypeError::UndefinedName {
                name: name.id.clone(),
                span: name.span.to_miette(),
            })
        })
    }

    /// Look up the constructor `name` as declared by the data type
    /// `typ_name`. Returns the data parameters and the constructor telescope.
    pub fn lookup_ctor_in(&self, name: &Ident, typ_name: &Ident) -> TcResult<ScopedCtor> {
        let candidates = self.map_ctor.get(name);
        let ctor = candidates
            .and_then(|ctors| ctors.iter().find(|ctor| &ctor.typ_name == typ_name))
            .ok_or_else(|| {
                Box::new(TypeError::UndefinedName {
                    name: format!("{name} (in type {typ_name})"),
                    span: name.span.to_miette(),
                })
            })?;
        let data = self.lookup_tyctor(typ_name)?;
        Ok(ScopedCtor { data_params: data.params.clone(), ctor: ctor.clone() })
    }

    /// Look up a constructor without an expected type. This only succeeds if
    /// the name is declared by exactly one data type.
    pub fn lookup_ctor_unique(&self, name: &Ident) -> TcResult<ScopedCtor> {
        let candidates = self.map_ctor.get(name).map(|ctors| ctors.as_slice()).unwrap_or(&[]);
        match candidates {
            [] => Err(Box::new(TypeError::UndefinedName {
                name: name.id.clone(),
                span: name.span.to_miette(),
            })),
            [ctor] => {
                let data = self.lookup_tyctor(&ctor.typ_name)?;
                Ok(ScopedCtor { data_params: data.params.clone(), ctor: ctor.clone() })
            }
            _ => Err(Box::new(TypeError::AmbiguousCtor {
                name: name.id.clone(),
                span: name.span.to_miette(),
            })),
        }
    }
}

/// A constructor definition paired with the parameter telescope of its data
/// type.
#[derive(Debug, Clone)]
pub struct ScopedCtor {
    pub data_params: Telescope,
    pub ctor: CtorMeta,
}
