use solana_program::pubkey::Pubkey;

use crate::{error::CursorError, numeric::Numeric};

/// Sequential read cursor over an account blob.
///
/// Every read is bounds-checked and advances the position by exactly the
/// width of the field. A read that would run past the end returns
/// [`CursorError::BufferUnderrun`] and leaves the position untouched.
///
/// ```
/// use ore_lens_api::cursor::ByteCursor;
///
/// let data = [7u8, 0, 0, 0, 0, 0, 0, 0, 42, 0, 0, 0, 0, 0, 0, 0];
/// let mut cur = ByteCursor::new(&data);
/// cur.skip(8).unwrap(); // discriminator
/// assert_eq!(cur.read_u64().unwrap(), 42);
/// assert!(cur.read_u64().is_err());
/// ```
///
/// The cursor knows nothing about what the bytes mean. If the read order
/// doesn't match the on-chain layout you get wrong values, not an error.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset into the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left from the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Move to an absolute offset. Seeking to exactly the end is allowed.
    pub fn seek(&mut self, offset: usize) -> Result<(), CursorError> {
        if offset > self.data.len() {
            return Err(CursorError::BufferUnderrun {
                offset: self.pos,
                needed: offset.saturating_sub(self.pos),
                available: self.remaining(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Borrow the next `n` bytes and advance past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.data.len());
        let Some(end) = end else {
            return Err(CursorError::BufferUnderrun {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        };
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Skip `n` bytes of padding or fields the caller doesn't need.
    pub fn skip(&mut self, n: usize) -> Result<(), CursorError> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// `0` is `false`, anything else is `true`.
    pub fn read_bool(&mut self) -> Result<bool, CursorError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, CursorError> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, CursorError> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64, CursorError> {
        self.read_array().map(u64::from_le_bytes)
    }

    pub fn read_i64(&mut self) -> Result<i64, CursorError> {
        self.read_array().map(i64::from_le_bytes)
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey, CursorError> {
        self.read_array().map(Pubkey::new_from_array)
    }

    /// 16-byte little-endian fixed-point value.
    pub fn read_numeric(&mut self) -> Result<Numeric, CursorError> {
        self.read_array().map(Numeric::from_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_by_field_width() {
        let mut data = vec![];
        data.extend_from_slice(&5u64.to_le_bytes());
        data.extend_from_slice(&(-3i64).to_le_bytes());
        data.extend_from_slice(&[9u8; 32]);
        data.push(1);

        let mut cur = ByteCursor::new(&data);
        assert_eq!(cur.read_u64().unwrap(), 5);
        assert_eq!(cur.position(), 8);
        assert_eq!(cur.read_i64().unwrap(), -3);
        assert_eq!(cur.position(), 16);
        assert_eq!(cur.read_pubkey().unwrap(), Pubkey::new_from_array([9u8; 32]));
        assert_eq!(cur.position(), 48);
        assert!(cur.read_bool().unwrap());
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn i64_is_sign_extended() {
        let data = u64::MAX.to_le_bytes();
        assert_eq!(ByteCursor::new(&data).read_i64().unwrap(), -1);
    }

    #[test]
    fn underrun_leaves_position() {
        let data = [0u8; 12];
        let mut cur = ByteCursor::new(&data);
        cur.skip(8).unwrap();
        let err = cur.read_u64().unwrap_err();
        assert_eq!(
            err,
            CursorError::BufferUnderrun {
                offset: 8,
                needed: 8,
                available: 4
            }
        );
        assert_eq!(cur.position(), 8);
        assert_eq!(cur.read_u32().unwrap(), 0);
    }

    #[test]
    fn skip_rejects_huge_lengths() {
        let data = [0u8; 4];
        let mut cur = ByteCursor::new(&data);
        cur.skip(1).unwrap();
        assert!(cur.skip(usize::MAX).is_err());
        assert_eq!(cur.position(), 1);
    }

    #[test]
    fn seek_is_absolute() {
        let data = [1u8, 2, 3, 4];
        let mut cur = ByteCursor::new(&data);
        cur.seek(3).unwrap();
        assert_eq!(cur.read_u8().unwrap(), 4);
        cur.seek(0).unwrap();
        assert_eq!(cur.read_u16().unwrap(), 0x0201);
        cur.seek(4).unwrap();
        assert!(cur.seek(5).is_err());
    }
}
