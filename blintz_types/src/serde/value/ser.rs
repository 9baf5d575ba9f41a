use crate::error::EncodeError;
use crate::serde::{Kind, PayloadLen, Symbol, SymbolCode, Value, LITERAL_MARKER};
use derive_more::Deref;
use std::io::Write;

#[derive(Deref)]
pub struct WriteLen(usize);

impl Value {
    /// Writes one complete record: tag byte, then the kind-specific payload.
    pub fn ser<W: Write>(&self, w: &mut W) -> Result<WriteLen, EncodeError> {
        let mut w_len = 0;

        let tag = match self {
            Value::Nullable(kind, _) => kind.nullable_symbol(),
            _ => Kind::from(self).symbol(),
        };
        w_len += w.write(&SymbolCode::from(tag).to_be_bytes())?;

        w_len += *self.ser_payload(w)?;

        Ok(WriteLen(w_len))
    }

    pub fn ser_solo(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = vec![];
        self.ser(&mut buf)?;
        Ok(buf)
    }

    /// Everything after the tag byte. A present nullable embeds the
    /// non-nullable payload of its boxed value after the presence byte;
    /// the decoder re-enters the plain per-kind path from there.
    fn ser_payload<W: Write>(&self, w: &mut W) -> Result<WriteLen, EncodeError> {
        let mut w_len = 0;

        match self {
            Value::Bool(b) => {
                w_len += w.write(&[u8::from(*b)])?;
            }
            Value::Int(i) => {
                w_len += w.write(&i.to_be_bytes())?;
            }
            Value::Float(f) => {
                w_len += w.write(&f.to_be_bytes())?;
            }
            Value::Str(s) => {
                w_len += *Self::ser_str_payload(s, w)?;
            }
            Value::List(items) => {
                let mut body = vec![];
                for item in items {
                    let item_buf = item.ser_solo()?;
                    body.extend_from_slice(&PayloadLen::from_body(&item_buf)?.to_be_bytes());
                    body.extend_from_slice(&item_buf);
                }
                w_len += w.write(&PayloadLen::from_body(&body)?.to_be_bytes())?;
                w_len += w.write(&body)?;
            }
            Value::Dict(pairs) => {
                let mut body = vec![];
                for (key, val) in pairs {
                    let key_buf = key.ser_solo()?;
                    body.extend_from_slice(&PayloadLen::from_body(&key_buf)?.to_be_bytes());
                    body.extend_from_slice(&key_buf);

                    let val_buf = val.ser_solo()?;
                    body.extend_from_slice(&PayloadLen::from_body(&val_buf)?.to_be_bytes());
                    body.extend_from_slice(&val_buf);
                }
                w_len += w.write(&PayloadLen::from_body(&body)?.to_be_bytes())?;
                w_len += w.write(&body)?;
            }
            Value::Nullable(kind, opt) => match opt {
                None => {
                    w_len += w.write(&[1u8])?;
                }
                Some(item) => {
                    if let Value::Nullable(_, _) = item.as_ref() {
                        return Err(EncodeError::NestedNullable);
                    }
                    let item_kind = Kind::from(item.as_ref());
                    if item_kind != *kind {
                        return Err(EncodeError::KindMismatch {
                            expected: *kind,
                            found: item_kind,
                        });
                    }
                    w_len += w.write(&[0u8])?;
                    w_len += *item.ser_payload(w)?;
                }
            },
        }

        Ok(WriteLen(w_len))
    }

    fn ser_str_payload<W: Write>(s: &str, w: &mut W) -> Result<WriteLen, EncodeError> {
        let mut w_len = 0;

        match Symbol::from_name(s) {
            Some(sym) => {
                w_len += w.write(&SymbolCode::from(sym).to_be_bytes())?;
            }
            None => {
                w_len += w.write(&[LITERAL_MARKER])?;
                let bytes = s.as_bytes();
                w_len += w.write(&PayloadLen::from_body(bytes)?.to_be_bytes())?;
                w_len += w.write(bytes)?;
            }
        }

        Ok(WriteLen(w_len))
    }
}
