use crate::obj::Obj;
use crate::registry::Registry;
use crate::walk::{materialize, project};
use blintz_types::error::{DecodeError, Error, SchemaError};
use blintz_types::schema::Schema;
use blintz_types::serde::{Symbol, Value, WriteLen};
use std::io::{Read, Write};

/// Writes one complete file: the schema's own metadata entries, plus an
/// `object_data` entry holding the encoded payload. The schema thus rides
/// inside every file, and decoding needs no external schema.
pub fn serialize<W: Write>(obj: &Obj, schema: &Schema, w: &mut W) -> Result<WriteLen, Error> {
    let mut entries = match schema.to_meta()? {
        Value::Dict(entries) => entries,
        _ => return Err(Error::from(SchemaError::UnstructuredRoot)),
    };

    let payload = project(obj, schema)?;
    entries.push((
        Value::Str(String::from(Symbol::ObjectData.name())),
        payload,
    ));

    let w_len = Value::Dict(entries).ser(w)?;
    Ok(w_len)
}

pub fn serialize_solo(obj: &Obj, schema: &Schema) -> Result<Vec<u8>, Error> {
    let mut buf = vec![];
    serialize(obj, schema, &mut buf)?;
    Ok(buf)
}

/// Reads one complete file: decodes the outer record, splits the payload
/// from the schema metadata, rebuilds the schema, and materializes the
/// payload through the caller's registry.
pub fn deserialize<R: Read>(r: &mut R, registry: &Registry) -> Result<Obj, Error> {
    let (_, file_val) = Value::deser(r).map_err(Error::from)?;
    rebuild(file_val, registry)
}

/// [`deserialize`], plus a check that the record spans the whole buffer.
pub fn deserialize_solo(buf: &[u8], registry: &Registry) -> Result<Obj, Error> {
    let mut r: &[u8] = buf;
    let (r_len, file_val) = Value::deser(&mut r).map_err(Error::from)?;
    if r_len != buf.len() {
        return Err(Error::from(DecodeError::TrailingBytes(buf.len() - r_len)));
    }
    rebuild(file_val, registry)
}

fn rebuild(file_val: Value, registry: &Registry) -> Result<Obj, Error> {
    let entries = match file_val {
        Value::Dict(entries) => entries,
        other => {
            return Err(Error::from(DecodeError::SchemaMismatch {
                expected: Symbol::Dict.name(),
                found: other.desc(),
            }))
        }
    };

    let mut payload = None;
    let mut meta_entries = vec![];
    for (k, v) in entries {
        let is_object_data = matches!(&k, Value::Str(s) if s == Symbol::ObjectData.name());
        if is_object_data {
            payload = Some(v);
        } else {
            meta_entries.push((k, v));
        }
    }
    let payload = match payload {
        Some(payload) => payload,
        None => return Err(Error::from(DecodeError::MissingObjectData)),
    };

    let schema = Schema::from_meta(&Value::Dict(meta_entries))?;
    materialize(&payload, &schema, registry)
}
