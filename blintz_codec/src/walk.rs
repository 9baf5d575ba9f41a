use crate::obj::Obj;
use crate::registry::Registry;
use blintz_types::error::{DecodeError, EncodeError, Error};
use blintz_types::schema::Schema;
use blintz_types::serde::{Kind, Value};


/// Projects a live value against its schema into the normalized
/// intermediate form. Pure; the live value is only read.
pub fn project(obj: &Obj, schema: &Schema) -> Result<Value, EncodeError> {
    match schema {
        Schema::Bool | Schema::Int | Schema::Float | Schema::Str => project_passthrough(obj),
        Schema::List { elem } => match obj {
            Obj::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(project(item, elem)?);
                }
                Ok(Value::List(out))
            }
            _ => Err(unsupported("list", obj)),
        },
        Schema::Dict { key, val } => match obj {
            Obj::Dict(pairs) => {
                let mut out = Vec::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let k = project(k, key)?;
                    match Kind::from(&k) {
                        Kind::List | Kind::Dict => {
                            return Err(EncodeError::NonPrimitiveKey(k.desc()))
                        }
                        _ => {}
                    }
                    if let Value::Nullable(_, _) = k {
                        return Err(EncodeError::NonPrimitiveKey(k.desc()));
                    }
                    let v = project(v, val)?;
                    out.push((k, v));
                }
                Ok(Value::Dict(out))
            }
            _ => Err(unsupported("dict", obj)),
        },
        Schema::Class { fields, .. } => match obj {
            Obj::Inst(inst) => {
                let mut out = Vec::with_capacity(fields.len());
                for (fname, fschema) in fields {
                    let fobj = inst
                        .get(fname)
                        .ok_or_else(|| EncodeError::FieldAccess(fname.clone()))?;
                    out.push((Value::Str(fname.clone()), project(&fobj, fschema)?));
                }
                Ok(Value::Dict(out))
            }
            _ => Err(unsupported("class", obj)),
        },
        Schema::Nullable(inner) => {
            let kind = inner.kind()?;
            match obj {
                Obj::Null => Ok(Value::Nullable(kind, None)),
                _ => {
                    let item = project(obj, inner)?;
                    Ok(Value::Nullable(kind, Some(Box::new(item))))
                }
            }
        }
    }
}

/// Leaf schemas don't constrain shape: the value converts by its own
/// runtime kind. Schema metadata entries take this path, as does any field
/// a schema declares only as a primitive.
fn project_passthrough(obj: &Obj) -> Result<Value, EncodeError> {
    match obj {
        Obj::Null => Err(EncodeError::UnexpectedNull),
        Obj::Bool(b) => Ok(Value::Bool(*b)),
        Obj::Int(i) => {
            let int = i32::try_from(*i).map_err(|_| EncodeError::IntOutOfRange(*i))?;
            Ok(Value::Int(int))
        }
        Obj::Float(f) => Ok(Value::Float(*f)),
        Obj::Str(s) => Ok(Value::Str(s.clone())),
        Obj::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(project_passthrough(item)?);
            }
            Ok(Value::List(out))
        }
        Obj::Dict(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                out.push((project_passthrough(k)?, project_passthrough(v)?));
            }
            Ok(Value::Dict(out))
        }
        Obj::Inst(_) => Err(unsupported("primitive or plain container", obj)),
    }
}

fn unsupported(expected: &'static str, obj: &Obj) -> EncodeError {
    EncodeError::UnsupportedValue {
        expected,
        found: obj.desc(),
    }
}

/// Rebuilds a live value from the intermediate form: the mirror of
/// [`project`]. Record reconstruction goes through the caller-supplied
/// registry; everything else is plain data conversion.
pub fn materialize(val: &Value, schema: &Schema, registry: &Registry) -> Result<Obj, Error> {
    match schema {
        Schema::Bool | Schema::Int | Schema::Float | Schema::Str => materialize_passthrough(val),
        Schema::List { elem } => match val {
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(materialize(item, elem, registry)?);
                }
                Ok(Obj::List(out))
            }
            _ => Err(mismatch("list", val)),
        },
        Schema::Dict { key, val: vschema } => match val {
            Value::Dict(pairs) => {
                let mut out = Vec::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let k = materialize(k, key, registry)?;
                    let v = materialize(v, vschema, registry)?;
                    out.push((k, v));
                }
                Ok(Obj::Dict(out))
            }
            _ => Err(mismatch("dict", val)),
        },
        Schema::Class { classname, fields } => match val {
            Value::Dict(_) => {
                let mut inst = registry.construct(classname)?;
                for (fname, fschema) in fields {
                    let fval = val
                        .dict_get(fname)
                        .ok_or_else(|| DecodeError::MissingField(fname.clone()))?;
                    let fobj = materialize(fval, fschema, registry)?;
                    inst.set(fname, fobj)?;
                }
                Ok(Obj::Inst(inst))
            }
            _ => Err(mismatch("dict", val)),
        },
        Schema::Nullable(inner) => {
            let kind = inner.kind().map_err(Error::from)?;
            match val {
                Value::Nullable(_, None) => Ok(Obj::Null),
                Value::Nullable(box_kind, Some(item)) => {
                    if *box_kind != kind {
                        return Err(mismatch(kind.symbol().name(), val));
                    }
                    materialize(item, inner, registry)
                }
                // An unboxed value under a nullable schema is well-kinded;
                // accept it rather than force callers to pre-box.
                _ => materialize(val, inner, registry),
            }
        }
    }
}

fn materialize_passthrough(val: &Value) -> Result<Obj, Error> {
    match val {
        Value::Bool(b) => Ok(Obj::Bool(*b)),
        Value::Int(i) => Ok(Obj::Int(i64::from(*i))),
        Value::Float(f) => Ok(Obj::Float(*f)),
        Value::Str(s) => Ok(Obj::Str(s.clone())),
        Value::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(materialize_passthrough(item)?);
            }
            Ok(Obj::List(out))
        }
        Value::Dict(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                out.push((materialize_passthrough(k)?, materialize_passthrough(v)?));
            }
            Ok(Obj::Dict(out))
        }
        Value::Nullable(_, None) => Ok(Obj::Null),
        Value::Nullable(_, Some(item)) => materialize_passthrough(item),
    }
}

fn mismatch(expected: &'static str, val: &Value) -> Error {
    Error::from(DecodeError::SchemaMismatch {
        expected,
        found: val.desc(),
    })
}
