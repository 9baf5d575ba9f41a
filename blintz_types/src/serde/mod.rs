//! # Serialization format
//!
//! The de/serializable type is [`Value`], the normalized intermediate form
//! every live value is projected into before hitting bytes.
//!
//! Every encoded record starts with a `tag` byte drawn from the code book
//! (see [`Symbol`]). The code book assigns one byte per reserved symbol
//! string, in a fixed enumeration order that is part of the wire format.
//! It does double duty: tag bytes for records, and an interning dictionary
//! for string payloads (any string equal to a reserved symbol is written as
//! its 1-byte code; any other string is written as the sentinel byte 255
//! followed by a length-prefixed UTF-8 literal).
//!
//! All multi-byte integers, and the float payload, are big-endian.
//!
//! ```text
//! struct Value::Bool {
//!     tag:            u8,
//!     body:           u8,             // 0 | 1
//! }
//!
//! struct Value::Int {
//!     tag:            u8,
//!     body:           i32,
//! }
//!
//! struct Value::Float {
//!     tag:            u8,
//!     body:           f64,
//! }
//!
//! struct Value::Str {
//!     tag:            u8,
//!     code:           u8,             // code book entry, or 255
//!     // only when code == 255:
//!     body_len:       u32,
//!     body:           [u8; body_len], // UTF-8
//! }
//!
//! struct Value::List {
//!     tag:            u8,
//!     body_len:       u32,
//!     body:           {
//!         item_0_len:     u32,
//!         item_0:         Value::*,
//!         item_1_len:     u32,
//!         item_1:         Value::*,
//!         ...             // until body_len is consumed exactly
//!     }
//! }
//!
//! struct Value::Dict {
//!     tag:            u8,
//!     body_len:       u32,
//!     body:           {
//!         key_0_len:      u32,
//!         key_0:          Value::*,
//!         val_0_len:      u32,
//!         val_0:          Value::*,
//!         ...             // entries in insertion order
//!     }
//! }
//!
//! struct Value::Nullable {
//!     tag:            u8,             // the nullable counterpart of the kind
//!     absent:         u8,             // 1 = null; nothing follows
//!     // only when absent == 0:
//!     body:           ...             // the non-nullable record minus its tag
//! }
//! ```
//!
//! A nullable record is a strict prefix-extension of its non-nullable
//! sibling: after the presence byte, the decoder re-enters the plain
//! per-kind path unchanged.
//!
//! The outer length prefix on containers lets a reader skip a whole record
//! without parsing it; the per-item prefixes let it skip individual
//! children.

mod lengths;
mod symbol;
mod value;

pub use symbol::*;
pub use value::*;
use lengths::*;
