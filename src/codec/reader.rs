use super::FormatError;

/// Big-endian cursor over an encoded tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Current offset within the buffer.
    pub(crate) fn position(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Fail unless at least `needed` bytes remain, without consuming them.
    pub(crate) fn require(&self, needed: u64, field: &'static str) -> Result<(), FormatError> {
        if needed > self.remaining() as u64 {
            return Err(FormatError::Truncated {
                field,
                offset: self.offset,
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read exactly `len` bytes.
    pub(crate) fn read_exact(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], FormatError> {
        self.require(len as u64, field)?;
        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..start + len])
    }

    pub(crate) fn read_u8(&mut self, field: &'static str) -> Result<u8, FormatError> {
        Ok(self.read_exact(1, field)?[0])
    }

    pub(crate) fn read_u32(&mut self, field: &'static str) -> Result<u32, FormatError> {
        let mut out = [0u8; 4];
        out.copy_from_slice(self.read_exact(4, field)?);
        Ok(u32::from_be_bytes(out))
    }
}
