use crate::error::DecodeError;
use derive_more::{Deref, From};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::io::Read;
use std::mem;

/// Marks a string payload as a length-prefixed literal rather than a code
/// book entry. Must never collide with an assigned code.
pub const LITERAL_MARKER: u8 = 255;

#[derive(From, Deref, Clone, Copy)]
pub struct SymbolCode(u8);
impl From<Symbol> for SymbolCode {
    fn from(sym: Symbol) -> Self {
        let int = sym.to_u8().unwrap();
        Self(int)
    }
}
impl SymbolCode {
    pub fn deser(r: &mut impl Read) -> Result<(usize, Self), DecodeError> {
        let mut buf = [0u8; mem::size_of::<u8>()];
        r.read_exact(&mut buf)?;
        let int = u8::from_be_bytes(buf);
        Ok((buf.len(), Self(int)))
    }
}

/// The code book. Codes are assigned by enumeration order and are part of
/// the wire format: never reorder or renumber; append only.
///
/// `NullableBool` sits at the end because it was appended after the first
/// table revision, which had nullable tags for every other kind but not for
/// booleans.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, ToPrimitive, Debug)]
pub enum Symbol {
    Class = 0,
    Dict = 1,
    List = 2,
    Float = 3,
    String = 4,
    Int = 5,
    Bool = 6,
    Values = 7,
    Keys = 8,
    Classname = 9,
    ValueType = 10,
    Type = 11,
    ObjectData = 12,
    NullableString = 13,
    NullableInt = 14,
    NullableFloat = 15,
    NullableDict = 16,
    NullableList = 17,
    NullableClass = 18,
    NullableBool = 19,
}

impl Symbol {
    pub const ALL: [Symbol; 20] = [
        Symbol::Class,
        Symbol::Dict,
        Symbol::List,
        Symbol::Float,
        Symbol::String,
        Symbol::Int,
        Symbol::Bool,
        Symbol::Values,
        Symbol::Keys,
        Symbol::Classname,
        Symbol::ValueType,
        Symbol::Type,
        Symbol::ObjectData,
        Symbol::NullableString,
        Symbol::NullableInt,
        Symbol::NullableFloat,
        Symbol::NullableDict,
        Symbol::NullableList,
        Symbol::NullableClass,
        Symbol::NullableBool,
    ];

    /// The reserved symbol string this code stands for.
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Class => "class",
            Symbol::Dict => "dict",
            Symbol::List => "list",
            Symbol::Float => "float",
            Symbol::String => "string",
            Symbol::Int => "int",
            Symbol::Bool => "bool",
            Symbol::Values => "values",
            Symbol::Keys => "keys",
            Symbol::Classname => "classname",
            Symbol::ValueType => "value_type",
            Symbol::Type => "type",
            Symbol::ObjectData => "object_data",
            Symbol::NullableString => "nullable_string",
            Symbol::NullableInt => "nullable_int",
            Symbol::NullableFloat => "nullable_float",
            Symbol::NullableDict => "nullable_dict",
            Symbol::NullableList => "nullable_list",
            Symbol::NullableClass => "nullable_class",
            Symbol::NullableBool => "nullable_bool",
        }
    }

    /// The interning lookup: reserved symbol string to code book entry.
    pub fn from_name(name: &str) -> Option<Symbol> {
        Self::ALL.iter().copied().find(|sym| sym.name() == name)
    }

    pub fn non_nullable(self) -> Option<Symbol> {
        match self {
            Symbol::NullableClass => Some(Symbol::Class),
            Symbol::NullableDict => Some(Symbol::Dict),
            Symbol::NullableList => Some(Symbol::List),
            Symbol::NullableFloat => Some(Symbol::Float),
            Symbol::NullableString => Some(Symbol::String),
            Symbol::NullableInt => Some(Symbol::Int),
            Symbol::NullableBool => Some(Symbol::Bool),
            _ => None,
        }
    }

    pub fn is_nullable(self) -> bool {
        self.non_nullable().is_some()
    }
}

impl TryFrom<SymbolCode> for Symbol {
    type Error = DecodeError;
    fn try_from(code: SymbolCode) -> Result<Self, DecodeError> {
        Symbol::from_u8(*code).ok_or(DecodeError::UnknownSymbol(*code))
    }
}
