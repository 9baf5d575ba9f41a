use crate::error::DecodeError;
use crate::serde::{Kind, PayloadLen, Symbol, SymbolCode, Value, LITERAL_MARKER};
use std::io::{Read, Seek, SeekFrom};
use std::mem;

impl Value {
    /// Reads one complete record. Returns the bytes consumed along with the
    /// decoded value.
    pub fn deser<R: Read>(r: &mut R) -> Result<(usize, Self), DecodeError> {
        let (mut r_len, code) = SymbolCode::deser(r)?;
        let sym = Symbol::try_from(code)?;

        if sym.is_nullable() {
            let kind = Kind::from_nullable_symbol(sym).ok_or(DecodeError::NonValueTag(sym))?;

            let mut buf = [0u8; 1];
            r.read_exact(&mut buf)?;
            r_len += buf.len();
            match buf[0] {
                1 => return Ok((r_len, Value::Nullable(kind, None))),
                0 => {
                    let (delta_r_len, item) = Self::deser_payload(kind, r)?;
                    r_len += delta_r_len;
                    return Ok((r_len, Value::Nullable(kind, Some(Box::new(item)))));
                }
                byte => return Err(DecodeError::InvalidPresence(byte)),
            }
        }

        let kind = Kind::from_plain_symbol(sym).ok_or(DecodeError::NonValueTag(sym))?;
        let (delta_r_len, val) = Self::deser_payload(kind, r)?;
        r_len += delta_r_len;
        Ok((r_len, val))
    }

    pub fn deser_solo(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r: &[u8] = buf;
        let (_, val) = Self::deser(&mut r)?;
        Ok(val)
    }

    /// Hops over one record via its length prefixes, without building it.
    pub fn skip<R: Read + Seek>(r: &mut R) -> Result<usize, DecodeError> {
        let (mut r_len, code) = SymbolCode::deser(r)?;
        let mut sym = Symbol::try_from(code)?;

        if let Some(base) = sym.non_nullable() {
            let mut buf = [0u8; 1];
            r.read_exact(&mut buf)?;
            r_len += buf.len();
            match buf[0] {
                1 => return Ok(r_len),
                0 => sym = base,
                byte => return Err(DecodeError::InvalidPresence(byte)),
            }
        }

        let kind = Kind::from_plain_symbol(sym).ok_or(DecodeError::NonValueTag(sym))?;
        r_len += Self::skip_payload(kind, r)?;
        Ok(r_len)
    }

    fn deser_payload<R: Read>(kind: Kind, r: &mut R) -> Result<(usize, Self), DecodeError> {
        match kind {
            Kind::Bool => {
                let mut buf = [0u8; 1];
                r.read_exact(&mut buf)?;
                match buf[0] {
                    0 => Ok((buf.len(), Value::Bool(false))),
                    1 => Ok((buf.len(), Value::Bool(true))),
                    byte => Err(DecodeError::InvalidBool(byte)),
                }
            }
            Kind::Int => {
                let mut buf = [0u8; mem::size_of::<i32>()];
                r.read_exact(&mut buf)?;
                Ok((buf.len(), Value::Int(i32::from_be_bytes(buf))))
            }
            Kind::Float => {
                let mut buf = [0u8; mem::size_of::<f64>()];
                r.read_exact(&mut buf)?;
                Ok((buf.len(), Value::Float(f64::from_be_bytes(buf))))
            }
            Kind::Str => {
                let (r_len, s) = Self::deser_str_payload(r)?;
                Ok((r_len, Value::Str(s)))
            }
            Kind::List => {
                let (mut r_len, body) = Self::deser_body(r)?;
                r_len += body.len();

                let mut body_r: &[u8] = &body;
                let mut items = vec![];
                while !body_r.is_empty() {
                    let (_, item) = Self::deser_framed(&mut body_r)?;
                    items.push(item);
                }
                Ok((r_len, Value::List(items)))
            }
            Kind::Dict => {
                let (mut r_len, body) = Self::deser_body(r)?;
                r_len += body.len();

                let mut body_r: &[u8] = &body;
                let mut pairs = vec![];
                while !body_r.is_empty() {
                    let (_, key) = Self::deser_framed(&mut body_r)?;
                    let (_, val) = Self::deser_framed(&mut body_r)?;
                    pairs.push((key, val));
                }
                Ok((r_len, Value::Dict(pairs)))
            }
        }
    }

    fn deser_str_payload<R: Read>(r: &mut R) -> Result<(usize, String), DecodeError> {
        let (mut r_len, code) = SymbolCode::deser(r)?;
        if *code != LITERAL_MARKER {
            let sym = Symbol::try_from(code)?;
            return Ok((r_len, String::from(sym.name())));
        }

        let (delta_r_len, str_len) = PayloadLen::deser(r)?;
        r_len += delta_r_len;
        let mut buf = vec![0u8; *str_len as usize];
        r.read_exact(&mut buf)?;
        r_len += buf.len();
        let s = String::from_utf8(buf)?;
        Ok((r_len, s))
    }

    /// A container body: `body_len:u32` then exactly that many bytes.
    fn deser_body<R: Read>(r: &mut R) -> Result<(usize, Vec<u8>), DecodeError> {
        let (r_len, body_len) = PayloadLen::deser(r)?;
        let mut body = vec![0u8; *body_len as usize];
        r.read_exact(&mut body)?;
        Ok((r_len, body))
    }

    /// One framed sub-record: `len:u32` then exactly `len` record bytes.
    /// A sub-record that decodes to fewer bytes than its frame declares is
    /// as corrupt as one that overruns it.
    fn deser_framed(r: &mut &[u8]) -> Result<(usize, Self), DecodeError> {
        let (mut r_len, sub_len) = PayloadLen::deser(r)?;
        let mut sub_buf = vec![0u8; *sub_len as usize];
        r.read_exact(&mut sub_buf)?;
        r_len += sub_buf.len();

        let mut sub_r: &[u8] = &sub_buf;
        let (sub_consumed, val) = Self::deser(&mut sub_r)?;
        if sub_consumed != sub_buf.len() {
            return Err(DecodeError::LengthMismatch {
                declared: sub_buf.len(),
                consumed: sub_consumed,
            });
        }
        Ok((r_len, val))
    }

    fn skip_payload<R: Read + Seek>(kind: Kind, r: &mut R) -> Result<usize, DecodeError> {
        match kind {
            Kind::Bool => {
                r.seek(SeekFrom::Current(1))?;
                Ok(1)
            }
            Kind::Int => {
                let len = mem::size_of::<i32>();
                r.seek(SeekFrom::Current(len as i64))?;
                Ok(len)
            }
            Kind::Float => {
                let len = mem::size_of::<f64>();
                r.seek(SeekFrom::Current(len as i64))?;
                Ok(len)
            }
            Kind::Str => {
                let (mut r_len, code) = SymbolCode::deser(r)?;
                if *code == LITERAL_MARKER {
                    let (delta_r_len, str_len) = PayloadLen::deser(r)?;
                    r_len += delta_r_len;
                    r.seek(SeekFrom::Current(*str_len as i64))?;
                    r_len += *str_len as usize;
                }
                Ok(r_len)
            }
            Kind::List | Kind::Dict => {
                let (mut r_len, body_len) = PayloadLen::deser(r)?;
                r.seek(SeekFrom::Current(*body_len as i64))?;
                r_len += *body_len as usize;
                Ok(r_len)
            }
        }
    }
}
