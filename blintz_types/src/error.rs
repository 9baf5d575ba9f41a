use crate::serde::{Kind, Symbol};
use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown schema kind `{0}`.")]
    UnknownKind(String),

    #[error("Schema metadata is missing its `{0}` entry.")]
    MissingKey(&'static str),

    #[error("Malformed schema metadata: {0}.")]
    Malformed(&'static str),

    #[error("Nullable schema nodes may not nest.")]
    NestedNullable,

    #[error("The root schema must describe a structured value.")]
    UnstructuredRoot,
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("A {found} value cannot be encoded against a {expected} schema node.")]
    UnsupportedValue {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Null encountered outside a nullable schema node.")]
    UnexpectedNull,

    #[error("Field `{0}` is absent from the live value.")]
    FieldAccess(String),

    #[error("Dict keys must project to primitives; found {0}.")]
    NonPrimitiveKey(&'static str),

    #[error("Integer {0} does not fit the 4-byte wire encoding.")]
    IntOutOfRange(i64),

    #[error("Payload of {0} bytes exceeds the u32 length prefix.")]
    OversizeBody(usize),

    #[error("Nullable box remembers kind {expected:?} but holds a {found:?}.")]
    KindMismatch { expected: Kind, found: Kind },

    #[error("Nullable boxes may not nest.")]
    NestedNullable,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Io(io::Error),

    #[error("Record truncated before its declared end.")]
    Truncated,

    #[error("Unassigned tag byte {0}.")]
    UnknownSymbol(u8),

    #[error("Symbol `{}` is not a value tag.", .0.name())]
    NonValueTag(Symbol),

    #[error("Invalid presence byte {0}.")]
    InvalidPresence(u8),

    #[error("Invalid boolean byte {0}.")]
    InvalidBool(u8),

    #[error(transparent)]
    Utf8(#[from] FromUtf8Error),

    #[error("Record declared {declared} payload bytes but decoding consumed {consumed}.")]
    LengthMismatch { declared: usize, consumed: usize },

    #[error("{0} trailing bytes after the file record.")]
    TrailingBytes(usize),

    #[error("The file record has no `object_data` entry.")]
    MissingObjectData,

    #[error("Payload does not match the embedded schema: expected {expected}, found {found}.")]
    SchemaMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field `{0}` is absent from the decoded record.")]
    MissingField(String),
}

/* An EOF from the underlying reader always means the record claimed more
bytes than the input holds. */
impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => DecodeError::Truncated,
            _ => DecodeError::Io(e),
        }
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Class `{0}` is not registered.")]
    UnknownClass(String),

    #[error("Cannot set field `{field}`: {reason}.")]
    SetField { field: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
