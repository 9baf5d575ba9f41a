use crate::error::SchemaError;
use crate::serde::{Kind, Symbol, Value};


/// A declarative description of one value's shape. Purely descriptive and
/// immutable; malformations are caught lazily by whichever component
/// consumes the offending node.
///
/// A schema travels inside every output file as plain [`Value`] metadata
/// ([`Schema::to_meta`]), so decoding needs no external schema.
#[derive(PartialEq, Clone, Debug)]
pub enum Schema {
    Bool,
    Int,
    Float,
    Str,
    List {
        elem: Box<Schema>,
    },
    Dict {
        key: Box<Schema>,
        val: Box<Schema>,
    },
    Class {
        classname: String,
        /// Field declaration order is the wire order.
        fields: Vec<(String, Schema)>,
    },
    Nullable(Box<Schema>),
}

impl Schema {
    /// The runtime kind a value projected against this schema will have.
    /// A projected record is a plain field mapping, hence `Dict`.
    pub fn kind(&self) -> Result<Kind, SchemaError> {
        match self {
            Schema::Bool => Ok(Kind::Bool),
            Schema::Int => Ok(Kind::Int),
            Schema::Float => Ok(Kind::Float),
            Schema::Str => Ok(Kind::Str),
            Schema::List { .. } => Ok(Kind::List),
            Schema::Dict { .. } => Ok(Kind::Dict),
            Schema::Class { .. } => Ok(Kind::Dict),
            Schema::Nullable(_) => Err(SchemaError::NestedNullable),
        }
    }

    /// The schema's own description as a plain [`Value`]: the form in which
    /// it is embedded into every output file.
    ///
    /// Leaves embed as their bare kind name. Structural nodes embed as a
    /// dict keyed by `type` (and `value_type` / `classname` / `keys` /
    /// `values` as the kind requires). A nullable node embeds as its inner
    /// node's dict with the `type` entry rewritten to the `nullable_`
    /// counterpart; a nullable leaf therefore still embeds as a dict, so
    /// presence handling is never skipped.
    pub fn to_meta(&self) -> Result<Value, SchemaError> {
        match self {
            Schema::Bool => Ok(Value::Str(String::from(Symbol::Bool.name()))),
            Schema::Int => Ok(Value::Str(String::from(Symbol::Int.name()))),
            Schema::Float => Ok(Value::Str(String::from(Symbol::Float.name()))),
            Schema::Str => Ok(Value::Str(String::from(Symbol::String.name()))),
            Schema::List { elem } => Ok(Value::Dict(vec![
                (
                    Value::Str(String::from(Symbol::Type.name())),
                    Value::Str(String::from(Symbol::List.name())),
                ),
                (
                    Value::Str(String::from(Symbol::ValueType.name())),
                    elem.to_meta()?,
                ),
            ])),
            Schema::Dict { key, val } => Ok(Value::Dict(vec![
                (
                    Value::Str(String::from(Symbol::Type.name())),
                    Value::Str(String::from(Symbol::Dict.name())),
                ),
                (
                    Value::Str(String::from(Symbol::ValueType.name())),
                    Value::Dict(vec![
                        (
                            Value::Str(String::from(Symbol::Keys.name())),
                            key.to_meta()?,
                        ),
                        (
                            Value::Str(String::from(Symbol::Values.name())),
                            val.to_meta()?,
                        ),
                    ]),
                ),
            ])),
            Schema::Class { classname, fields } => {
                let mut field_meta = Vec::with_capacity(fields.len());
                for (fname, fschema) in fields {
                    field_meta.push((Value::Str(fname.clone()), fschema.to_meta()?));
                }
                Ok(Value::Dict(vec![
                    (
                        Value::Str(String::from(Symbol::Type.name())),
                        Value::Str(String::from(Symbol::Class.name())),
                    ),
                    (
                        Value::Str(String::from(Symbol::Classname.name())),
                        Value::Str(classname.clone()),
                    ),
                    (
                        Value::Str(String::from(Symbol::ValueType.name())),
                        Value::Dict(field_meta),
                    ),
                ]))
            }
            Schema::Nullable(inner) => {
                let nullable_sym = Self::nullable_symbol_of(inner)?;
                let type_entry = (
                    Value::Str(String::from(Symbol::Type.name())),
                    Value::Str(String::from(nullable_sym.name())),
                );
                match inner.to_meta()? {
                    Value::Str(_) => Ok(Value::Dict(vec![type_entry])),
                    Value::Dict(mut pairs) => {
                        for pair in pairs.iter_mut() {
                            if pair.0 == type_entry.0 {
                                pair.1 = type_entry.1.clone();
                            }
                        }
                        Ok(Value::Dict(pairs))
                    }
                    _ => Err(SchemaError::Malformed(
                        "schema metadata is neither a kind name nor a mapping",
                    )),
                }
            }
        }
    }

    fn nullable_symbol_of(inner: &Schema) -> Result<Symbol, SchemaError> {
        match inner {
            Schema::Bool => Ok(Symbol::NullableBool),
            Schema::Int => Ok(Symbol::NullableInt),
            Schema::Float => Ok(Symbol::NullableFloat),
            Schema::Str => Ok(Symbol::NullableString),
            Schema::List { .. } => Ok(Symbol::NullableList),
            Schema::Dict { .. } => Ok(Symbol::NullableDict),
            Schema::Class { .. } => Ok(Symbol::NullableClass),
            Schema::Nullable(_) => Err(SchemaError::NestedNullable),
        }
    }

    /// Rebuilds a schema from decoded metadata: the inverse of
    /// [`Schema::to_meta`].
    pub fn from_meta(meta: &Value) -> Result<Self, SchemaError> {
        match meta {
            Value::Str(name) => match Symbol::from_name(name) {
                Some(Symbol::Bool) => Ok(Schema::Bool),
                Some(Symbol::Int) => Ok(Schema::Int),
                Some(Symbol::Float) => Ok(Schema::Float),
                Some(Symbol::String) => Ok(Schema::Str),
                _ => Err(SchemaError::UnknownKind(name.clone())),
            },
            Value::Dict(_) => {
                let type_name = match meta.dict_get(Symbol::Type.name()) {
                    Some(Value::Str(type_name)) => type_name,
                    Some(_) => {
                        return Err(SchemaError::Malformed("the `type` entry is not a string"))
                    }
                    None => return Err(SchemaError::MissingKey(Symbol::Type.name())),
                };
                let sym = Symbol::from_name(type_name)
                    .ok_or_else(|| SchemaError::UnknownKind(type_name.clone()))?;
                match sym.non_nullable() {
                    Some(base) => {
                        let inner = Self::from_meta_structural(base, meta)?;
                        Ok(Schema::Nullable(Box::new(inner)))
                    }
                    None => Self::from_meta_structural(sym, meta),
                }
            }
            _ => Err(SchemaError::Malformed(
                "schema metadata is neither a kind name nor a mapping",
            )),
        }
    }

    fn from_meta_structural(sym: Symbol, meta: &Value) -> Result<Self, SchemaError> {
        match sym {
            // Leaves reachable here only via their nullable dict form.
            Symbol::Bool => Ok(Schema::Bool),
            Symbol::Int => Ok(Schema::Int),
            Symbol::Float => Ok(Schema::Float),
            Symbol::String => Ok(Schema::Str),
            Symbol::List => {
                let elem_meta = meta
                    .dict_get(Symbol::ValueType.name())
                    .ok_or(SchemaError::MissingKey(Symbol::ValueType.name()))?;
                Ok(Schema::List {
                    elem: Box::new(Self::from_meta(elem_meta)?),
                })
            }
            Symbol::Dict => {
                let vt_meta = meta
                    .dict_get(Symbol::ValueType.name())
                    .ok_or(SchemaError::MissingKey(Symbol::ValueType.name()))?;
                let key_meta = vt_meta
                    .dict_get(Symbol::Keys.name())
                    .ok_or(SchemaError::MissingKey(Symbol::Keys.name()))?;
                let val_meta = vt_meta
                    .dict_get(Symbol::Values.name())
                    .ok_or(SchemaError::MissingKey(Symbol::Values.name()))?;
                Ok(Schema::Dict {
                    key: Box::new(Self::from_meta(key_meta)?),
                    val: Box::new(Self::from_meta(val_meta)?),
                })
            }
            Symbol::Class => {
                let classname = match meta.dict_get(Symbol::Classname.name()) {
                    Some(Value::Str(classname)) => classname.clone(),
                    Some(_) => {
                        return Err(SchemaError::Malformed(
                            "the `classname` entry is not a string",
                        ))
                    }
                    None => return Err(SchemaError::MissingKey(Symbol::Classname.name())),
                };
                let fields_meta = match meta.dict_get(Symbol::ValueType.name()) {
                    Some(Value::Dict(pairs)) => pairs,
                    Some(_) => {
                        return Err(SchemaError::Malformed(
                            "the `value_type` entry of a class is not a mapping",
                        ))
                    }
                    None => return Err(SchemaError::MissingKey(Symbol::ValueType.name())),
                };
                let mut fields = Vec::with_capacity(fields_meta.len());
                for (fname, fmeta) in fields_meta {
                    match fname {
                        Value::Str(fname) => fields.push((fname.clone(), Self::from_meta(fmeta)?)),
                        _ => return Err(SchemaError::Malformed("a field name is not a string")),
                    }
                }
                Ok(Schema::Class { classname, fields })
            }
            _ => Err(SchemaError::UnknownKind(String::from(sym.name()))),
        }
    }
}
