use std::ffi::c_void;
use std::path::Path;
use std::ptr::null;

use gl::types::*;
use image::DynamicImage;
use log::{debug, warn};

use super::buffers::Buffer;
use super::error::GraphicsError;
use super::gl_types::TextureTarget;

pub struct Texture {
    id: GLuint,
    target: TextureTarget,
}

/// Pixels decoded from an image file, with rows ordered bottom to top as GL expects.
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub format: GLenum,
    pub internal_format: GLenum,
    pub data: Vec<u8>,
}

impl Pixels {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GraphicsError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let image = image::open(path).map_err(|e| GraphicsError::image(&name, e))?.flipv();
        debug!("loaded {} ({}x{})", name, image.width(), image.height());

        Ok(Self::from_image(image))
    }

    fn from_image(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        if image.color().has_alpha() {
            Self {
                width,
                height,
                format: gl::RGBA,
                internal_format: gl::RGBA8,
                data: image.into_rgba8().into_raw(),
            }
        } else {
            Self {
                width,
                height,
                format: gl::RGB,
                internal_format: gl::RGB8,
                data: image.into_rgb8().into_raw(),
            }
        }
    }
}

impl Texture {
    pub fn new(target: TextureTarget) -> Self {
        let mut id = 0;
        unsafe { gl::GenTextures(1, &mut id) };
        let texture = Self { id, target };
        texture.bind();
        texture
    }

    pub fn id(&self) -> GLuint { self.id }

    pub fn bind(&self) {
        unsafe { gl::BindTexture(self.target.gl_enum(), self.id) };
    }

    pub fn bind_unit(&self, unit: GLuint) {
        unsafe { gl::ActiveTexture(gl::TEXTURE0 + unit) };
        self.bind();
    }

    pub fn parameter(&self, name: GLenum, value: GLenum) {
        self.bind();
        unsafe { gl::TexParameteri(self.target.gl_enum(), name, value as GLint) };
    }

    /// Linear filtering and clamped edges, the setup most demos want.
    pub fn linear_clamped(&self) {
        self.parameter(gl::TEXTURE_MIN_FILTER, gl::LINEAR);
        self.parameter(gl::TEXTURE_MAG_FILTER, gl::LINEAR);
        self.parameter(gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE);
        self.parameter(gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE);
    }

    /// Immutable single-level 2D storage.
    pub fn storage_2d(internal_format: GLenum, width: u32, height: u32) -> Self {
        let texture = Self::new(TextureTarget::Texture2D);
        unsafe {
            gl::TexStorage2D(gl::TEXTURE_2D, 1, internal_format, width as GLsizei, height as GLsizei)
        };
        texture
    }

    pub fn sub_image_2d(&self, width: u32, height: u32, format: GLenum, kind: GLenum, data: &[u8]) {
        self.bind();
        unsafe {
            gl::TexSubImage2D(
                gl::TEXTURE_2D,
                0,
                0,
                0,
                width as GLsizei,
                height as GLsizei,
                format,
                kind,
                data.as_ptr() as *const c_void,
            );
        }
    }

    /// Single-channel 8-bit texture, used for height maps.
    pub fn from_r8(width: u32, height: u32, data: &[u8]) -> Self {
        unsafe { gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1) };
        let texture = Self::storage_2d(gl::R8, width, height);
        texture.sub_image_2d(width, height, gl::RED, gl::UNSIGNED_BYTE, data);
        texture
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GraphicsError> {
        let pixels = Pixels::open(path)?;
        unsafe { gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1) };

        let texture = Self::storage_2d(pixels.internal_format, pixels.width, pixels.height);
        texture.sub_image_2d(pixels.width, pixels.height, pixels.format, gl::UNSIGNED_BYTE, &pixels.data);
        texture.linear_clamped();

        Ok(texture)
    }

    /// Builds a cubemap from faces given in `+X, -X, +Y, -Y, +Z, -Z` order. Storage is sized
    /// from the first face; every face must share its size.
    pub fn cubemap_from_files<P: AsRef<Path>>(faces: &[P; 6]) -> Result<Self, GraphicsError> {
        let faces = faces
            .iter()
            // Cubemap faces are addressed top-down
            .map(|f| Pixels::open(f).map(flip_back))
            .collect::<Result<Vec<_>, _>>()?;

        let texture = Self::new(TextureTarget::CubeMap);
        let (width, height) = (faces[0].width, faces[0].height);
        unsafe {
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexStorage2D(gl::TEXTURE_CUBE_MAP, 1, gl::RGB8, width as GLsizei, height as GLsizei);
        }

        for (i, face) in faces.iter().enumerate() {
            if (face.width, face.height) != (width, height) {
                warn!(
                    "cubemap face {} is {}x{}, expected {}x{}; skipped",
                    i, face.width, face.height, width, height
                );
                continue;
            }

            let rgb = to_rgb(face);
            unsafe {
                gl::TexSubImage2D(
                    gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as GLenum,
                    0,
                    0,
                    0,
                    width as GLsizei,
                    height as GLsizei,
                    gl::RGB,
                    gl::UNSIGNED_BYTE,
                    rgb.as_ptr() as *const c_void,
                );
            }
        }

        texture.linear_clamped();
        texture.parameter(gl::TEXTURE_WRAP_R, gl::CLAMP_TO_EDGE);

        Ok(texture)
    }

    /// Exposes `buffer` to shaders as a texel array of `internal_format`.
    pub fn from_buffer(internal_format: GLenum, buffer: &Buffer) -> Self {
        let texture = Self::new(TextureTarget::Buffer);
        unsafe { gl::TexBuffer(gl::TEXTURE_BUFFER, internal_format, buffer.id()) };
        texture
    }

    pub fn bind_image(&self, unit: GLuint, access: GLenum, format: GLenum) {
        unsafe { gl::BindImageTexture(unit, self.id, 0, gl::FALSE, 0, access, format) };
    }

    /// Replaces the contents with a region of the current read framebuffer.
    pub fn copy_from_framebuffer(&self, internal_format: GLenum, width: u32, height: u32) {
        self.bind();
        unsafe {
            gl::CopyTexImage2D(
                gl::TEXTURE_2D,
                0,
                internal_format,
                0,
                0,
                width as GLsizei,
                height as GLsizei,
                0,
            )
        };
    }

    /// Mutable storage of the given size with no initial contents.
    pub fn empty_2d(internal_format: GLenum, width: u32, height: u32, format: GLenum, kind: GLenum) -> Self {
        let texture = Self::new(TextureTarget::Texture2D);
        unsafe {
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                internal_format as GLint,
                width as GLsizei,
                height as GLsizei,
                0,
                format,
                kind,
                null(),
            );
        }
        texture
    }

    pub fn invalidate(&self) {
        unsafe { gl::InvalidateTexImage(self.id, 0) };
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

fn flip_back(mut pixels: Pixels) -> Pixels {
    let channels = if pixels.format == gl::RGBA { 4 } else { 3 };
    pixels.data = geometry::pixels::flip_rows(
        &pixels.data,
        pixels.width as usize,
        pixels.height as usize,
        channels,
    );
    pixels
}

fn to_rgb(pixels: &Pixels) -> Vec<u8> {
    if pixels.format == gl::RGB {
        return pixels.data.clone();
    }
    pixels.data
        .chunks_exact(4)
        .flat_map(|p| p[..3].iter().copied())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn format_follows_the_decoded_channels() {
        let rgba = Pixels::from_image(DynamicImage::new_rgba8(4, 2));
        let rgb = Pixels::from_image(DynamicImage::new_rgb8(4, 2));

        assert_eq!((rgba.format, rgba.internal_format, rgba.data.len()), (gl::RGBA, gl::RGBA8, 32));
        assert_eq!((rgb.format, rgb.internal_format, rgb.data.len()), (gl::RGB, gl::RGB8, 24));
    }

    #[test]
    fn alpha_is_dropped_for_cubemap_faces() {
        let pixels = Pixels {
            width: 2,
            height: 1,
            format: gl::RGBA,
            internal_format: gl::RGBA8,
            data: vec![1, 2, 3, 255, 4, 5, 6, 255],
        };

        assert_eq!(to_rgb(&pixels), vec![1, 2, 3, 4, 5, 6]);
    }
}
