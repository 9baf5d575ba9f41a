use blintz_types::error::RegistryError;
use derive_more::From;
use std::any::Any;
use std::fmt::Debug;

/// A live application value, as the shape walker sees it. Class instances
/// appear behind the [`Structured`] capability; everything else is plain
/// data.
#[derive(From, Debug)]
pub enum Obj {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Obj>),
    Dict(Vec<(Obj, Obj)>),
    Inst(Box<dyn Structured>),
}

impl From<&str> for Obj {
    fn from(s: &str) -> Self {
        Obj::Str(String::from(s))
    }
}

impl Obj {
    pub fn desc(&self) -> &'static str {
        match self {
            Obj::Null => "null",
            Obj::Bool(_) => "bool",
            Obj::Int(_) => "int",
            Obj::Float(_) => "float",
            Obj::Str(_) => "string",
            Obj::List(_) => "list",
            Obj::Dict(_) => "dict",
            Obj::Inst(_) => "class instance",
        }
    }
}

impl PartialEq for Obj {
    fn eq(&self, other: &Obj) -> bool {
        match (self, other) {
            (Obj::Null, Obj::Null) => true,
            (Obj::Bool(slf), Obj::Bool(oth)) => slf == oth,
            (Obj::Int(slf), Obj::Int(oth)) => slf == oth,
            (Obj::Float(slf), Obj::Float(oth)) => slf == oth,
            (Obj::Str(slf), Obj::Str(oth)) => slf == oth,
            (Obj::List(slf), Obj::List(oth)) => slf == oth,
            (Obj::Dict(slf), Obj::Dict(oth)) => slf == oth,
            (Obj::Inst(slf), Obj::Inst(oth)) => slf.eq_obj(oth.as_ref()),
            _ => false,
        }
    }
}

/// Field access for class instances, implemented once per serializable type
/// by the embedding application. Stands in for runtime reflection: the
/// walker reads and writes fields only through this surface.
pub trait Structured: Debug {
    /// A copy of the named field, or None if the type has no such field.
    fn get(&self, field: &str) -> Option<Obj>;

    fn set(&mut self, field: &str, obj: Obj) -> Result<(), RegistryError>;

    /// Escape hatch for callers that need the concrete type back after
    /// materialization.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality across `dyn` boundaries; implementors downcast
    /// `other` via [`Structured::as_any`].
    fn eq_obj(&self, other: &dyn Structured) -> bool;
}
