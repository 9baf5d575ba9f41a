use crate::error::{DecodeError, EncodeError};
use derive_more::Deref;
use std::io::Read;
use std::mem;

/// A u32 length prefix: the byte length of a container body, of one framed
/// sub-record, or of a literal string.
#[derive(Deref, Clone, Copy)]
pub struct PayloadLen(u32);
impl PayloadLen {
    pub fn from_body(buf: &[u8]) -> Result<Self, EncodeError> {
        let int = u32::try_from(buf.len()).map_err(|_| EncodeError::OversizeBody(buf.len()))?;
        Ok(Self(int))
    }
    pub fn deser(r: &mut impl Read) -> Result<(usize, Self), DecodeError> {
        let mut buf = [0u8; mem::size_of::<u32>()];
        r.read_exact(&mut buf)?;
        let int = u32::from_be_bytes(buf);
        Ok((buf.len(), Self(int)))
    }
}
