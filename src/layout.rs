use std::ops::Range;

use serde::Serialize;

use crate::types::{AttributeKind, ELEMENT_SIZE, ObjCounts};

/// Byte range of one typed array inside the shared buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub offset: usize,
    pub len: usize,
}

impl Section {
    /// The same range in 4-byte words.
    pub fn words(&self) -> Range<usize> {
        self.offset / ELEMENT_SIZE..(self.offset + self.len) / ELEMENT_SIZE
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Placement of the four typed arrays in one contiguous caller buffer.
///
/// Arrays are stored back to back in the fixed order positions, normals,
/// texcoords, faces. Every element is 4 bytes, so a buffer of
/// [`word_count`](Self::word_count) `u32` words always holds the whole parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BufferLayout {
    pub counts: ObjCounts,
    sections: [Section; 4],
}

impl BufferLayout {
    pub fn new(counts: ObjCounts) -> Self {
        let mut sections = [Section::default(); 4];
        let mut offset = 0;
        for (section, kind) in sections.iter_mut().zip(AttributeKind::ALL) {
            let len = counts.element_count(kind) * ELEMENT_SIZE;
            *section = Section { offset, len };
            offset += len;
        }
        Self { counts, sections }
    }

    pub fn section(&self, kind: AttributeKind) -> Section {
        match kind {
            AttributeKind::Position => self.sections[0],
            AttributeKind::Normal => self.sections[1],
            AttributeKind::TexCoord => self.sections[2],
            AttributeKind::Face => self.sections[3],
        }
    }

    /// Bytes the caller must allocate for [`materialize`](crate::parser::materialize).
    pub fn total_bytes(&self) -> usize {
        self.sections[3].end()
    }

    /// [`total_bytes`](Self::total_bytes) in 4-byte words.
    pub fn word_count(&self) -> usize {
        self.total_bytes() / ELEMENT_SIZE
    }
}
