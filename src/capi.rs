//! The C boundary: engine lifecycle, script evaluation, and HTML conversion as a
//! foreign-callable surface.
//!
//! Ownership rules:
//!
//! - [`docq_create`] allocates an engine that must be released with [`docq_destroy`].
//! - [`docq_eval`] returns a [`DocqResult`] that must be released with
//!   [`docq_free_result`], exactly once.
//! - [`docq_html_to_markdown`] returns a string that must be released with
//!   [`docq_free_string`].
//! - Every release entry point is a safe no-op on null. Double-release and use-after-
//!   release are the caller's responsibility to avoid.
//!
//! A call either fully succeeds (values, no error message) or fully fails (no values, one
//! non-empty message). "No matches" is success with zero values.

use crate::engine::{Engine, Error};
use crate::html2md::{convert_html_to_markdown, ConversionOptions};
use std::ffi::{c_char, c_void, CStr, CString};
use std::ptr;

/// An opaque engine handle.
pub type DocqContext = c_void;

/// The outcome of one [`docq_eval`] call.
///
/// On success `values` points at `values_len` caller-owned strings and `error_msg` is
/// null; on failure `values` is null, `values_len` is zero, and `error_msg` is non-null.
#[repr(C)]
pub struct DocqResult {
    pub values: *mut *mut c_char,
    pub values_len: usize,
    pub error_msg: *mut c_char,
}

/// C-compatible mirror of [`ConversionOptions`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct DocqConversionOptions {
    pub extract_scripts_as_code_blocks: bool,
    pub generate_front_matter: bool,
    pub use_title_as_h1: bool,
}

impl From<DocqConversionOptions> for ConversionOptions {
    fn from(options: DocqConversionOptions) -> Self {
        ConversionOptions {
            extract_scripts_as_code_blocks: options.extract_scripts_as_code_blocks,
            generate_front_matter: options.generate_front_matter,
            use_title_as_h1: options.use_title_as_h1,
        }
    }
}

fn to_c_string(s: String) -> *mut c_char {
    // interior NUL means the string can't cross the boundary; null is the least-bad answer
    CString::new(s).map_or_else(|_| ptr::null_mut(), CString::into_raw)
}

unsafe fn c_str_to_str<'a>(s: *const c_char) -> Result<&'a str, std::str::Utf8Error> {
    if s.is_null() {
        return Ok("");
    }
    unsafe { CStr::from_ptr(s).to_str() }
}

fn error_result(message: String) -> DocqResult {
    DocqResult {
        values: ptr::null_mut(),
        values_len: 0,
        error_msg: to_c_string(message),
    }
}

/// Creates a new engine. Never fails. The caller must release the handle with
/// [`docq_destroy`].
#[no_mangle]
pub extern "C" fn docq_create() -> *mut DocqContext {
    Box::into_raw(Box::new(Engine::new())) as *mut DocqContext
}

/// Destroys an engine created by [`docq_create`]. A null handle is a no-op.
///
/// # Safety
///
/// `ctx` must be null or a pointer previously returned by [`docq_create`] that has not
/// already been destroyed.
#[no_mangle]
pub unsafe extern "C" fn docq_destroy(ctx: *mut DocqContext) {
    if ctx.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(ctx as *mut Engine));
    }
}

/// Evaluates a script against input text in the named format.
///
/// The returned [`DocqResult`] is caller-owned; release it with [`docq_free_result`].
/// Format matching is case-insensitive; recognized values are `"text"` and `"markdown"`.
///
/// # Safety
///
/// `ctx` must be null or a live handle from [`docq_create`]. Each string argument must be
/// null or a valid NUL-terminated C string that stays valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn docq_eval(
    ctx: *mut DocqContext,
    script_c: *const c_char,
    input_c: *const c_char,
    format_c: *const c_char,
) -> DocqResult {
    if ctx.is_null() {
        return error_result("Engine pointer is null".to_string());
    }
    let engine = unsafe { &*(ctx as *const Engine) };

    let script = match unsafe { c_str_to_str(script_c) } {
        Ok(s) => s,
        Err(_) => return error_result("Invalid UTF-8 sequence in script".to_string()),
    };
    let input = match unsafe { c_str_to_str(input_c) } {
        Ok(s) => s,
        Err(_) => return error_result("Invalid UTF-8 sequence in input".to_string()),
    };
    let format = match unsafe { c_str_to_str(format_c) } {
        Ok(s) => s,
        Err(_) => return error_result("Invalid UTF-8 sequence in format".to_string()),
    };

    match engine.eval(script, input, format) {
        Ok(values) => {
            let c_values: Box<[*mut c_char]> =
                values.into_iter().map(to_c_string).collect::<Vec<_>>().into_boxed_slice();
            let values_len = c_values.len();
            DocqResult {
                values: Box::into_raw(c_values) as *mut *mut c_char,
                values_len,
                error_msg: ptr::null_mut(),
            }
        }
        Err(Error::UnsupportedFormat(err)) => error_result(err.to_string()),
        Err(err) => error_result(format!("Error evaluating query: {err}")),
    }
}

/// Frees a single string returned by this API. A null pointer is a no-op.
///
/// # Safety
///
/// `s` must be null or a string this API handed out that has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn docq_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(s));
    }
}

/// Frees a [`DocqResult`]: every value string, the value array, and the error message, in
/// one call. Safe on an all-null result; must be called exactly once per result.
///
/// # Safety
///
/// `result` must be a value returned by [`docq_eval`] whose contents have not already
/// been freed.
#[no_mangle]
pub unsafe extern "C" fn docq_free_result(result: DocqResult) {
    unsafe {
        if !result.error_msg.is_null() {
            docq_free_string(result.error_msg);
        }
        if !result.values.is_null() {
            let values = Box::from_raw(ptr::slice_from_raw_parts_mut(
                result.values,
                result.values_len,
            ));
            for &value in values.iter() {
                if !value.is_null() {
                    docq_free_string(value);
                }
            }
        }
    }
}

/// Converts HTML to Markdown. Returns a caller-owned string (release with
/// [`docq_free_string`]), or null with `*error_msg` set to a caller-owned message.
///
/// # Safety
///
/// `html_c` must be null or a valid NUL-terminated C string; `error_msg` must be null or
/// point at writable storage for one pointer.
#[no_mangle]
pub unsafe extern "C" fn docq_html_to_markdown(
    html_c: *const c_char,
    options: DocqConversionOptions,
    error_msg: *mut *mut c_char,
) -> *mut c_char {
    unsafe {
        if !error_msg.is_null() {
            *error_msg = ptr::null_mut();
        }

        if html_c.is_null() {
            if !error_msg.is_null() {
                *error_msg = to_c_string("HTML input pointer is null".to_string());
            }
            return ptr::null_mut();
        }

        let html = match c_str_to_str(html_c) {
            Ok(s) => s,
            Err(_) => {
                if !error_msg.is_null() {
                    *error_msg = to_c_string("Invalid UTF-8 sequence in HTML input".to_string());
                }
                return ptr::null_mut();
            }
        };

        match convert_html_to_markdown(html, options.into()) {
            Ok(markdown) => to_c_string(markdown),
            Err(e) => {
                if !error_msg.is_null() {
                    *error_msg = to_c_string(format!("HTML to Markdown conversion error: {e}"));
                }
                ptr::null_mut()
            }
        }
    }
}
