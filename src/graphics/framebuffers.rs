use std::fmt;
use std::ffi::c_void;
use std::path::Path;

use gl::types::*;
use log::info;

use super::error::GraphicsError;
use super::textures::Texture;

/// What `glCheckFramebufferStatus` reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    Undefined,
    IncompleteAttachment,
    MissingAttachment,
    IncompleteDrawBuffer,
    IncompleteReadBuffer,
    Unsupported,
    IncompleteMultisample,
    IncompleteLayerTargets,
    Unknown(GLenum),
}

impl FramebufferStatus {
    pub fn from_gl(status: GLenum) -> Self {
        use self::FramebufferStatus::*;
        match status {
            gl::FRAMEBUFFER_COMPLETE => Complete,
            gl::FRAMEBUFFER_UNDEFINED => Undefined,
            gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => IncompleteAttachment,
            gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => MissingAttachment,
            gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => IncompleteDrawBuffer,
            gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => IncompleteReadBuffer,
            gl::FRAMEBUFFER_UNSUPPORTED => Unsupported,
            gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => IncompleteMultisample,
            gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => IncompleteLayerTargets,
            other => Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        use self::FramebufferStatus::*;
        match self {
            Complete => "GL_FRAMEBUFFER_COMPLETE",
            Undefined => "GL_FRAMEBUFFER_UNDEFINED",
            IncompleteAttachment => "GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
            MissingAttachment => "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT",
            IncompleteDrawBuffer => "GL_FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER",
            IncompleteReadBuffer => "GL_FRAMEBUFFER_INCOMPLETE_READ_BUFFER",
            Unsupported => "GL_FRAMEBUFFER_UNSUPPORTED",
            IncompleteMultisample => "GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE",
            IncompleteLayerTargets => "GL_FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS",
            Unknown(_) => "unknown framebuffer status",
        }
    }
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferStatus::Unknown(code) => write!(f, "{} 0x{:04X}", self.name(), code),
            _ => f.write_str(self.name()),
        }
    }
}

pub struct Renderbuffer {
    id: GLuint,
}

impl Renderbuffer {
    /// Allocates storage, multisampled when `samples` is non-zero.
    pub fn new(internal_format: GLenum, width: u32, height: u32, samples: u32) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenRenderbuffers(1, &mut id);
            gl::BindRenderbuffer(gl::RENDERBUFFER, id);
            gl::RenderbufferStorageMultisample(
                gl::RENDERBUFFER,
                samples as GLsizei,
                internal_format,
                width as GLsizei,
                height as GLsizei,
            );
        }
        Self { id }
    }

    pub fn id(&self) -> GLuint { self.id }
}

impl Drop for Renderbuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteRenderbuffers(1, &self.id) };
    }
}

pub struct Framebuffer {
    id: GLuint,
}

impl Framebuffer {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenFramebuffers(1, &mut id);
            gl::BindFramebuffer(gl::FRAMEBUFFER, id);
        }
        Self { id }
    }

    pub fn id(&self) -> GLuint { self.id }

    pub fn bind(&self, target: GLenum) {
        unsafe { gl::BindFramebuffer(target, self.id) };
    }

    /// Size and sample count used when the framebuffer has no attachments.
    pub fn set_defaults(&self, width: u32, height: u32, samples: u32) {
        self.bind(gl::FRAMEBUFFER);
        unsafe {
            gl::FramebufferParameteri(gl::FRAMEBUFFER, gl::FRAMEBUFFER_DEFAULT_WIDTH, width as GLint);
            gl::FramebufferParameteri(gl::FRAMEBUFFER, gl::FRAMEBUFFER_DEFAULT_HEIGHT, height as GLint);
            gl::FramebufferParameteri(gl::FRAMEBUFFER, gl::FRAMEBUFFER_DEFAULT_SAMPLES, samples as GLint);
        }
    }

    pub fn attach_renderbuffer(&self, attachment: GLenum, renderbuffer: &Renderbuffer) {
        self.bind(gl::FRAMEBUFFER);
        unsafe {
            gl::FramebufferRenderbuffer(gl::FRAMEBUFFER, attachment, gl::RENDERBUFFER, renderbuffer.id())
        };
    }

    pub fn attach_texture(&self, attachment: GLenum, texture: &Texture) {
        self.bind(gl::FRAMEBUFFER);
        unsafe { gl::FramebufferTexture(gl::FRAMEBUFFER, attachment, texture.id(), 0) };
    }

    pub fn status(&self) -> FramebufferStatus {
        self.bind(gl::FRAMEBUFFER);
        FramebufferStatus::from_gl(unsafe { gl::CheckFramebufferStatus(gl::FRAMEBUFFER) })
    }

    /// Logs the completeness status under `label` and fails unless it is complete.
    pub fn check(&self, label: &str) -> Result<(), GraphicsError> {
        let status = self.status();
        info!("{} framebuffer status: {}", label, status);

        match status {
            FramebufferStatus::Complete => Ok(()),
            status => Err(GraphicsError::Framebuffer(status)),
        }
    }

    pub fn draw_buffers(&self, attachments: &[GLenum]) {
        self.bind(gl::FRAMEBUFFER);
        unsafe { gl::DrawBuffers(attachments.len() as GLsizei, attachments.as_ptr()) };
    }

    pub fn invalidate(&self, attachments: &[GLenum]) {
        self.bind(gl::FRAMEBUFFER);
        unsafe {
            gl::InvalidateFramebuffer(gl::FRAMEBUFFER, attachments.len() as GLsizei, attachments.as_ptr())
        };
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteFramebuffers(1, &self.id) };
    }
}

/// Copies a same-sized region from the read to the draw framebuffer. `None` stands for the
/// window's default framebuffer.
pub fn blit(from: Option<&Framebuffer>, to: Option<&Framebuffer>, width: u32, height: u32, mask: GLbitfield) {
    let (w, h) = (width as GLint, height as GLint);
    unsafe {
        gl::BindFramebuffer(gl::READ_FRAMEBUFFER, from.map_or(0, |f| f.id()));
        gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, to.map_or(0, |f| f.id()));
        gl::BlitFramebuffer(0, 0, w, h, 0, 0, w, h, mask, gl::NEAREST);
    }
}

pub fn bind_default() {
    unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, 0) };
}

/// Reads RGBA8 pixels from the current read framebuffer, bottom row first.
pub fn read_pixels(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; (width * height * 4) as usize];
    unsafe {
        gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
        gl::ReadPixels(
            0,
            0,
            width as GLsizei,
            height as GLsizei,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixels.as_mut_ptr() as *mut c_void,
        );
    }
    pixels
}

/// Saves the current read framebuffer as a PNG, top row first.
pub fn save_png<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<(), GraphicsError> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let pixels = geometry::pixels::flip_rows(&read_pixels(width, height), width as usize, height as usize, 4);

    image::save_buffer(path, &pixels, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| GraphicsError::image(&name, e))?;
    info!("saved {}", name);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn statuses_are_reported_by_name() {
        assert_eq!(FramebufferStatus::from_gl(gl::FRAMEBUFFER_COMPLETE), FramebufferStatus::Complete);
        assert_eq!(
            FramebufferStatus::from_gl(gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE).to_string(),
            "GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE"
        );
        assert_eq!(
            FramebufferStatus::from_gl(gl::FRAMEBUFFER_UNSUPPORTED).name(),
            "GL_FRAMEBUFFER_UNSUPPORTED"
        );
    }

    #[test]
    fn unknown_statuses_keep_their_code() {
        let status = FramebufferStatus::from_gl(0x1234);

        assert_eq!(status, FramebufferStatus::Unknown(0x1234));
        assert_eq!(status.to_string(), "unknown framebuffer status 0x1234");
    }
}
