//! Buffer objects and vertex array state.

use std::ffi::c_void;
use std::mem::size_of;
use std::ptr::null;
use std::slice;

use bytemuck::Pod;
use gl::types::*;

use geometry::layout::Attribute;

use super::error::GraphicsError;
use super::gl_types::{BufferTarget, BufferUsage};

pub struct Buffer {
    id: GLuint,
}

impl Buffer {
    pub fn generate() -> Self {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        Self { id }
    }

    pub fn id(&self) -> GLuint { self.id }

    pub fn with_data<T: Pod>(target: BufferTarget, data: &[T], usage: BufferUsage) -> Self {
        let buffer = Self::generate();
        buffer.bind(target);
        unsafe {
            gl::BufferData(
                target.gl_enum(),
                (data.len() * size_of::<T>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                usage as GLenum,
            );
        }
        buffer
    }

    /// Allocates `size` bytes of uninitialised storage.
    pub fn with_size(target: BufferTarget, size: usize, usage: BufferUsage) -> Self {
        let buffer = Self::generate();
        buffer.bind(target);
        unsafe { gl::BufferData(target.gl_enum(), size as GLsizeiptr, null(), usage as GLenum) };
        buffer
    }

    pub fn bind(&self, target: BufferTarget) {
        unsafe { gl::BindBuffer(target.gl_enum(), self.id) };
    }

    pub fn bind_base(&self, target: BufferTarget, index: GLuint) {
        unsafe { gl::BindBufferBase(target.gl_enum(), index, self.id) };
    }

    /// Overwrites part of the buffer while it is bound to `target`.
    pub fn sub_data<T: Pod>(&self, target: BufferTarget, offset: usize, data: &[T]) {
        self.bind(target);
        unsafe {
            gl::BufferSubData(
                target.gl_enum(),
                offset as GLintptr,
                (data.len() * size_of::<T>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
            );
        }
    }

    pub fn size(&self) -> usize {
        self.bind(BufferTarget::CopyRead);
        let mut size = 0;
        unsafe { gl::GetBufferParameteriv(gl::COPY_READ_BUFFER, gl::BUFFER_SIZE, &mut size) };
        size.max(0) as usize
    }

    /// Copies `size` bytes from `source` on the GPU, binding the copy targets on the way.
    pub fn copy_from(&self, source: &Buffer, read_offset: usize, write_offset: usize, size: usize) {
        source.bind(BufferTarget::CopyRead);
        self.bind(BufferTarget::CopyWrite);
        unsafe {
            gl::CopyBufferSubData(
                gl::COPY_READ_BUFFER,
                gl::COPY_WRITE_BUFFER,
                read_offset as GLintptr,
                write_offset as GLintptr,
                size as GLsizeiptr,
            );
        }
    }

    /// Reads `count` values of `T` starting `offset` bytes into the buffer.
    pub fn read<T: Pod>(&self, offset: usize, count: usize) -> Vec<T> {
        let mut values = vec![T::zeroed(); count];
        self.bind(BufferTarget::CopyRead);
        unsafe {
            gl::GetBufferSubData(
                gl::COPY_READ_BUFFER,
                offset as GLintptr,
                (count * size_of::<T>()) as GLsizeiptr,
                values.as_mut_ptr() as *mut c_void,
            );
        }
        values
    }

    /// Maps `len` bytes at `offset` for writing. Nothing written reaches the buffer until it is
    /// flushed, and the driver does not wait for pending draws before handing out the pointer.
    pub fn map_write(
        &self,
        target: BufferTarget,
        offset: usize,
        len: usize,
    ) -> Result<MappedRange<'_>, GraphicsError> {
        self.bind(target);
        let ptr = unsafe {
            gl::MapBufferRange(
                target.gl_enum(),
                offset as GLintptr,
                len as GLsizeiptr,
                gl::MAP_WRITE_BIT | gl::MAP_FLUSH_EXPLICIT_BIT | gl::MAP_UNSYNCHRONIZED_BIT,
            )
        };

        if ptr.is_null() {
            return Err(GraphicsError::Map { buffer: self.id, offset, len });
        }

        Ok(MappedRange {
            buffer: self,
            target,
            bytes: unsafe { slice::from_raw_parts_mut(ptr as *mut u8, len) },
        })
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) };
    }
}

/// A write-only view into a mapped buffer range. Unmapped when dropped.
pub struct MappedRange<'a> {
    buffer: &'a Buffer,
    target: BufferTarget,
    bytes: &'a mut [u8],
}

impl<'a> MappedRange<'a> {
    pub fn len(&self) -> usize { self.bytes.len() }

    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Copies `values` to `offset`, relative to the start of the mapped range.
    pub fn write<T: Pod>(&mut self, offset: usize, values: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(values);
        debug_assert!(
            offset + bytes.len() <= self.bytes.len(),
            "write of {} bytes at {} overruns a {} byte mapping",
            bytes.len(),
            offset,
            self.bytes.len()
        );
        self.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Makes `len` bytes at `offset` (relative to the range) visible to the GL.
    pub fn flush(&self, offset: usize, len: usize) {
        self.buffer.bind(self.target);
        unsafe {
            gl::FlushMappedBufferRange(self.target.gl_enum(), offset as GLintptr, len as GLsizeiptr)
        };
    }

    pub fn flush_all(&self) {
        self.flush(0, self.bytes.len());
    }

    pub fn write_and_flush<T: Pod>(&mut self, offset: usize, values: &[T]) {
        self.write(offset, values);
        self.flush(offset, values.len() * size_of::<T>());
    }
}

impl<'a> Drop for MappedRange<'a> {
    fn drop(&mut self) {
        self.buffer.bind(self.target);
        unsafe { gl::UnmapBuffer(self.target.gl_enum()) };
    }
}

pub struct VertexArray {
    id: GLuint,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        Self { id }
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) };
    }

    /// Describes a float attribute sourced from the buffer bound to `ARRAY_BUFFER`.
    pub fn float_attribute(&self, index: GLuint, components: usize, stride: usize, offset: usize) {
        self.bind();
        unsafe {
            gl::VertexAttribPointer(
                index,
                components as GLint,
                gl::FLOAT,
                gl::FALSE,
                stride as GLsizei,
                offset as *const c_void,
            );
            gl::EnableVertexAttribArray(index);
        }
    }

    pub fn attributes(&self, attributes: &[Attribute]) {
        for a in attributes {
            self.float_attribute(a.index, a.components, a.stride, a.offset);
        }
    }

    pub fn divisor(&self, index: GLuint, divisor: GLuint) {
        self.bind();
        unsafe { gl::VertexAttribDivisor(index, divisor) };
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) };
    }
}

/// Sets the value a disabled attribute array reads for every vertex.
pub fn constant_attribute(index: GLuint, value: [f32; 4]) {
    unsafe {
        gl::DisableVertexAttribArray(index);
        gl::VertexAttrib4f(index, value[0], value[1], value[2], value[3]);
    }
}
