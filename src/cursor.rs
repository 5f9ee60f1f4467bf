// ABOUTME: Bounds-checked forward-only cursor over a BSON buffer.
// ABOUTME: Every advance is checked against the end of the enclosing object.

use crate::error::Error;

/// A position within `data` that may never reach `end`.
///
/// Every object ends in an EOO byte, so any element content must stop
/// strictly before the object's end. Advancing to `end` or beyond fails.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pub(crate) pos: usize,
    pub(crate) end: usize,
}

impl<'a> Cursor<'a> {
    /// `end` must not exceed `data.len()`.
    #[inline]
    pub(crate) fn new(data: &'a [u8], pos: usize, end: usize) -> Self {
        debug_assert!(pos <= end && end <= data.len());
        Self { data, pos, end }
    }

    /// Advance by `len` bytes.
    #[inline]
    pub(crate) fn skip(&mut self, len: usize) -> Result<(), Error> {
        match self.pos.checked_add(len) {
            Some(pos) if pos < self.end => {
                self.pos = pos;
                Ok(())
            }
            _ => Err(Error::SizeLargerThanBuffer),
        }
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let start = self.pos;
        self.skip(N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[start..self.pos]);
        Ok(buf)
    }

    #[inline]
    pub(crate) fn read_u8(&mut self) -> Result<u8, Error> {
        let [byte] = self.read_array()?;
        Ok(byte)
    }

    #[inline]
    pub(crate) fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub(crate) fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Skip an int32-length-prefixed string whose length includes its NUL.
    #[inline]
    pub(crate) fn skip_string(&mut self) -> Result<(), Error> {
        let len = self.read_u32()? as usize;
        self.skip(len)?;
        if len == 0 || self.data[self.pos - 1] != 0 {
            return Err(Error::UnterminatedString);
        }
        Ok(())
    }

    /// Length of the NUL-terminated byte run at the cursor, excluding the NUL.
    ///
    /// The scan never looks past `end`; a run without a NUL before `end` fails.
    #[inline]
    pub(crate) fn strlen(&self) -> Result<usize, Error> {
        memchr::memchr(0, &self.data[self.pos..self.end]).ok_or(Error::SizeLargerThanBuffer)
    }
}
