//! Byte offsets for vertex data.
//!
//! The demos store vertex attributes in one of two ways. A *block* layout keeps every value of
//! one attribute together and places the attribute blocks back to back in a single buffer
//! (`PPPP NNNN TTTT`), so an attribute pointer has a stride of zero and an offset equal to the
//! size of every block before it. An *interleaved* layout keeps the attributes of one vertex
//! together (`PNT PNT PNT`), so every attribute shares the vertex size as its stride.

use std::mem::size_of;

/// One float attribute as it should be handed to `glVertexAttribPointer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub index: u32,
    pub components: usize,
    pub stride: usize,
    pub offset: usize,
}

/// Struct-of-arrays layout of `f32` attributes in one buffer.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    vertex_count: usize,
    components: Vec<usize>,
}

impl BlockLayout {
    pub fn new(vertex_count: usize, components: &[usize]) -> Self {
        Self {
            vertex_count,
            components: components.to_vec(),
        }
    }

    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Size in bytes of the block that holds `attribute`.
    pub fn size(&self, attribute: usize) -> usize {
        self.components[attribute] * size_of::<f32>() * self.vertex_count
    }

    /// Byte offset at which the block of `attribute` starts.
    pub fn offset(&self, attribute: usize) -> usize {
        (0..attribute).map(|a| self.size(a)).sum()
    }

    /// Byte offset of one vertex's value inside the block of `attribute`.
    pub fn element_offset(&self, attribute: usize, vertex: usize) -> usize {
        self.offset(attribute) + self.components[attribute] * size_of::<f32>() * vertex
    }

    pub fn total_size(&self) -> usize {
        self.offset(self.components.len())
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        (0..self.components.len())
            .map(|a| Attribute {
                index: a as u32,
                components: self.components[a],
                stride: 0,
                offset: self.offset(a),
            })
            .collect()
    }
}

/// Array-of-structs layout of `f32` attributes.
#[derive(Debug, Clone)]
pub struct InterleavedLayout {
    components: Vec<usize>,
}

impl InterleavedLayout {
    pub fn new(components: &[usize]) -> Self {
        Self { components: components.to_vec() }
    }

    pub fn stride(&self) -> usize {
        self.components.iter().sum::<usize>() * size_of::<f32>()
    }

    pub fn offset(&self, attribute: usize) -> usize {
        self.components[..attribute].iter().sum::<usize>() * size_of::<f32>()
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        let stride = self.stride();
        (0..self.components.len())
            .map(|a| Attribute {
                index: a as u32,
                components: self.components[a],
                stride,
                offset: self.offset(a),
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn block_layout_places_blocks_back_to_back() {
        // position, normal, uv for 10 vertices
        let layout = BlockLayout::new(10, &[3, 3, 2]);

        assert_eq!(layout.offset(0), 0);
        assert_eq!(layout.offset(1), 120);
        assert_eq!(layout.offset(2), 240);
        assert_eq!(layout.size(2), 80);
        assert_eq!(layout.total_size(), 320);
    }

    #[test]
    fn block_layout_element_offsets_step_by_attribute_size() {
        let layout = BlockLayout::new(4, &[3, 2]);

        assert_eq!(layout.element_offset(1, 0), 48);
        assert_eq!(layout.element_offset(1, 3), 48 + 3 * 8);
    }

    #[test]
    fn block_attributes_have_zero_stride() {
        let layout = BlockLayout::new(6, &[2, 3]);
        let attributes = layout.attributes();

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[1], Attribute { index: 1, components: 3, stride: 0, offset: 48 });
    }

    #[test]
    fn interleaved_layout_shares_one_stride() {
        let layout = InterleavedLayout::new(&[3, 3, 2]);

        assert_eq!(layout.stride(), 32);
        assert_eq!(layout.offset(1), 12);
        assert_eq!(layout.offset(2), 24);
        assert!(layout.attributes().iter().all(|a| a.stride == 32));
    }
}
