//! Packing values into the byte image of a uniform block.
//!
//! The layout of a default (`shared`) uniform block is only known after linking, so the offsets
//! and matrix strides come from `glGetActiveUniformsiv` and are handed to [`BlockWriter`].

use std::fmt;

/// Layout of one member of a uniform block as reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMember {
    pub name: String,
    pub offset: usize,
    pub array_stride: usize,
    pub matrix_stride: usize,
    pub size: usize,
    pub kind: u32,
}

impl fmt::Display for BlockMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (offset {}, array stride {}, matrix stride {}, size {}, type 0x{:04X})",
            self.name, self.offset, self.array_stride, self.matrix_stride, self.size, self.kind
        )
    }
}

/// A byte buffer sized for a uniform block that values are written into at explicit offsets.
pub struct BlockWriter {
    bytes: Vec<u8>,
}

impl BlockWriter {
    pub fn new(size: usize) -> Self {
        Self { bytes: vec![0; size] }
    }

    pub fn len(&self) -> usize { self.bytes.len() }

    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    pub fn bytes(&self) -> &[u8] { &self.bytes }

    fn write_floats(&mut self, offset: usize, values: &[f32]) {
        let end = offset + values.len() * 4;
        if end > self.bytes.len() {
            self.bytes.resize(end, 0);
        }
        self.bytes[offset..end].copy_from_slice(bytemuck::cast_slice(values));
    }

    pub fn write_vec4(&mut self, offset: usize, value: [f32; 4]) {
        self.write_floats(offset, &value);
    }

    /// Writes a column-major matrix, one column every `matrix_stride` bytes.
    pub fn write_mat4(&mut self, offset: usize, matrix_stride: usize, columns: [[f32; 4]; 4]) {
        for (i, column) in columns.iter().enumerate() {
            self.write_floats(offset + i * matrix_stride, column);
        }
    }

    /// Writes a matrix member at the place the driver reported for it.
    pub fn write_member_mat4(&mut self, member: &BlockMember, columns: [[f32; 4]; 4]) {
        let stride = if member.matrix_stride == 0 { 16 } else { member.matrix_stride };
        self.write_mat4(member.offset, stride, columns);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes.chunks_exact(4).map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]])).collect()
    }

    const IDENTITY: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    #[test]
    fn matrices_land_at_their_offsets() {
        let mut writer = BlockWriter::new(128);
        let view = BlockMember {
            name: "TransformBlock.view".into(),
            offset: 0,
            array_stride: 0,
            matrix_stride: 16,
            size: 1,
            kind: 0x8B5C,
        };
        let projection = BlockMember { name: "TransformBlock.projection".into(), offset: 64, ..view.clone() };

        writer.write_member_mat4(&view, IDENTITY);
        writer.write_member_mat4(&projection, [[2.0; 4]; 4]);

        let values = floats(writer.bytes());
        assert_eq!(values[0], 1.0);
        assert_eq!(values[5], 1.0);
        assert!(values[16..].iter().all(|&v| v == 2.0));
    }

    #[test]
    fn padded_matrix_stride_leaves_gaps() {
        let mut writer = BlockWriter::new(0);
        writer.write_mat4(0, 32, [[1.0; 4]; 4]);

        let values = floats(writer.bytes());
        assert_eq!(writer.len(), 3 * 32 + 16);
        assert_eq!(&values[0..4], &[1.0; 4]);
        assert_eq!(&values[4..8], &[0.0; 4]);
        assert_eq!(&values[8..12], &[1.0; 4]);
    }

    #[test]
    fn member_description_names_the_type() {
        let member = BlockMember {
            name: "m".into(),
            offset: 4,
            array_stride: 0,
            matrix_stride: 16,
            size: 1,
            kind: 0x8B5C,
        };

        assert!(member.to_string().contains("0x8B5C"));
    }
}
