//! Declarative byte layouts for accounts owned by programs outside this repo.
//!
//! A [`Layout`] is a table of named fields at fixed offsets (measured after
//! the 8-byte discriminator). When the upstream program changes its layout
//! only the table needs editing; decoders never compute offsets themselves.

use solana_program::pubkey::Pubkey;

use crate::{consts::DISCRIMINATOR_SIZE, cursor::ByteCursor, error::CursorError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    Bool,
    U64,
    Pubkey,
    /// `n` consecutive addresses.
    Pubkeys(usize),
    /// Opaque bytes.
    Bytes(usize),
}

impl FieldKind {
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U8 | FieldKind::Bool => 1,
            FieldKind::U64 => 8,
            FieldKind::Pubkey => 32,
            FieldKind::Pubkeys(n) => 32 * n,
            FieldKind::Bytes(n) => n,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, kind: FieldKind) -> Self {
        Self { name, offset, kind }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.kind.width()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Layout {
    /// Bytes after the discriminator needed to hold every field.
    pub const fn extent(&self) -> usize {
        let mut end = 0;
        let mut i = 0;
        while i < self.fields.len() {
            if self.fields[i].end() > end {
                end = self.fields[i].end();
            }
            i += 1;
        }
        end
    }

    /// Bind the layout to a cursor sitting just past the discriminator.
    ///
    /// The whole extent is checked up front, so once this succeeds no field
    /// read can fail.
    pub fn bind<'c, 'a>(
        &self,
        cursor: &'c mut ByteCursor<'a>,
    ) -> Result<LayoutReader<'c, 'a>, CursorError> {
        let base = cursor.position();
        if cursor.remaining() < self.extent() {
            return Err(CursorError::BufferUnderrun {
                offset: base,
                needed: self.extent(),
                available: cursor.remaining(),
            });
        }
        Ok(LayoutReader {
            layout: *self,
            cursor,
            base,
        })
    }

    /// Total account size including the discriminator.
    pub const fn account_size(&self) -> usize {
        DISCRIMINATOR_SIZE + self.extent()
    }
}

/// Reads individual fields of a bound [`Layout`].
pub struct LayoutReader<'c, 'a> {
    layout: Layout,
    cursor: &'c mut ByteCursor<'a>,
    base: usize,
}

impl LayoutReader<'_, '_> {
    fn at(&mut self, field: &Field, kind: FieldKind) -> Result<&mut Self, CursorError> {
        debug_assert_eq!(field.kind, kind, "{}.{}", self.layout.name, field.name);
        debug_assert!(
            self.layout.fields.contains(field),
            "{} is not a field of {}",
            field.name,
            self.layout.name
        );
        self.cursor.seek(self.base + field.offset)?;
        Ok(self)
    }

    pub fn u8(&mut self, field: &Field) -> Result<u8, CursorError> {
        self.at(field, FieldKind::U8)?.cursor.read_u8()
    }

    pub fn bool(&mut self, field: &Field) -> Result<bool, CursorError> {
        self.at(field, FieldKind::Bool)?.cursor.read_bool()
    }

    pub fn u64(&mut self, field: &Field) -> Result<u64, CursorError> {
        self.at(field, FieldKind::U64)?.cursor.read_u64()
    }

    pub fn pubkey(&mut self, field: &Field) -> Result<Pubkey, CursorError> {
        self.at(field, FieldKind::Pubkey)?.cursor.read_pubkey()
    }

    pub fn pubkeys<const N: usize>(&mut self, field: &Field) -> Result<[Pubkey; N], CursorError> {
        let cursor = &mut self.at(field, FieldKind::Pubkeys(N))?.cursor;
        let mut out = [Pubkey::default(); N];
        for key in out.iter_mut() {
            *key = cursor.read_pubkey()?;
        }
        Ok(out)
    }

    /// Like [`pubkeys`](Self::pubkeys) for tables too long for a serde array.
    pub fn pubkey_vec(&mut self, field: &Field) -> Result<Vec<Pubkey>, CursorError> {
        let n = match field.kind {
            FieldKind::Pubkeys(n) => n,
            _ => 0,
        };
        let cursor = &mut self.at(field, FieldKind::Pubkeys(n))?.cursor;
        (0..n).map(|_| cursor.read_pubkey()).collect()
    }

    pub fn bytes<const N: usize>(&mut self, field: &Field) -> Result<[u8; N], CursorError> {
        self.at(field, FieldKind::Bytes(N))?.cursor.read_array()
    }
}
