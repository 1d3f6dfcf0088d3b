use std::ffi::{CStr, CString};
use std::ptr::{null, null_mut};

use gl::types::*;

/// Compiles `source` as a shader of the given stage, returning the driver log on failure.
pub fn shader_from_source(source: &CStr, kind: GLenum) -> Result<GLuint, String> {
    let id = unsafe { gl::CreateShader(kind) };
    unsafe {
        gl::ShaderSource(id, 1, &source.as_ptr(), null());
        gl::CompileShader(id);
    }

    let mut success = 1;
    unsafe { gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success) };

    if success == 0 {
        let log = shader_info_log(id);
        unsafe { gl::DeleteShader(id) };
        return Err(log);
    }

    Ok(id)
}

pub fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe { gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len) };

    let log = create_ws_cstring_with_len(len.max(0) as usize);
    unsafe { gl::GetShaderInfoLog(id, len, null_mut(), log.as_ptr() as *mut GLchar) };

    trim_log(log.into_bytes())
}

pub fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe { gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len) };

    let log = create_ws_cstring_with_len(len.max(0) as usize);
    unsafe { gl::GetProgramInfoLog(id, len, null_mut(), log.as_ptr() as *mut GLchar) };

    trim_log(log.into_bytes())
}

/// A string of `len` spaces for the driver to write a log into.
pub fn create_ws_cstring_with_len(len: usize) -> CString {
    let buf = vec![b' '; len];
    // Spaces contain no interior nul
    CString::new(buf).unwrap_or_default()
}

/// Turns a driver-filled buffer into a log line without its terminator and trailing padding.
fn trim_log(bytes: Vec<u8>) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim_end().to_string()
}

/// Reads a driver-owned, nul-terminated string such as `GL_VERSION`.
pub fn gl_string(name: GLenum) -> String {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return String::new();
        }
        CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
    }
}

pub fn get_integer(name: GLenum) -> GLint {
    let mut value = 0;
    unsafe { gl::GetIntegerv(name, &mut value) };
    value
}

pub fn get_integer_indexed(name: GLenum, index: GLuint) -> GLint {
    let mut value = 0;
    unsafe { gl::GetIntegeri_v(name, index, &mut value) };
    value
}

/// Converts a name for the driver. Names with an interior nul become the empty string,
/// which the driver never matches.
pub fn c_name(name: &str) -> CString {
    CString::new(name).unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn whitespace_buffer_has_requested_length() {
        let s = create_ws_cstring_with_len(12);

        assert_eq!(s.as_bytes().len(), 12);
        assert!(s.as_bytes().iter().all(|&b| b == b' '));
    }

    #[test]
    fn logs_stop_at_the_driver_terminator() {
        let mut raw = b"0:3(1): error: syntax error".to_vec();
        raw.push(0);
        raw.extend_from_slice(b"   ");

        assert_eq!(trim_log(raw), "0:3(1): error: syntax error");
    }

    #[test]
    fn names_with_interior_nul_are_emptied() {
        assert_eq!(c_name("model").as_bytes(), b"model");
        assert_eq!(c_name("mo\0del").as_bytes(), b"");
    }
}
