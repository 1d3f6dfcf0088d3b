//! Routes driver debug messages to the logger.

use std::ffi::{c_void, CStr};
use std::ptr::null;

use gl::types::*;
use log::{log, Level};

/// Errors get an error line, everything else the driver reports is logged at debug level.
pub fn level_for(kind: GLenum) -> Level {
    match kind {
        gl::DEBUG_TYPE_ERROR => Level::Error,
        _ => Level::Debug,
    }
}

extern "system" fn on_message(
    source: GLenum,
    kind: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    _user: *mut c_void,
) {
    if message.is_null() {
        return;
    }

    let text = if length >= 0 {
        let bytes = unsafe { std::slice::from_raw_parts(message as *const u8, length as usize) };
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
    };

    log!(
        level_for(kind),
        "GL 0x{:04X} (source 0x{:04X}, type 0x{:04X}, severity 0x{:04X}): {}",
        id, source, kind, severity, text.trim_end()
    );
}

/// Needs a context created with the debug flag to receive anything.
pub fn install() {
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(on_message), null());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_errors_are_logged_as_errors() {
        assert_eq!(level_for(gl::DEBUG_TYPE_ERROR), Level::Error);
        assert_eq!(level_for(gl::DEBUG_TYPE_PERFORMANCE), Level::Debug);
        assert_eq!(level_for(gl::DEBUG_TYPE_OTHER), Level::Debug);
        assert_eq!(level_for(gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR), Level::Debug);
        assert_eq!(level_for(gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR), Level::Debug);
    }
}
