//! C-ABI Foreign Function Interface for edi834.
//!
//! This module provides C-compatible bindings for using edi834 from other
//! languages such as C, C#, Python, and any language with C FFI support.
//!
//! # Memory Management
//!
//! All strings returned by this library must be freed using `edi834_free_string`.
//!
//! # Error Handling
//!
//! Functions that can fail return a null pointer on error. Use `edi834_last_error`
//! to retrieve the error message.
//!
//! # Example (C)
//!
//! ```c
//! #include <stdio.h>
//! #include "edi834.h"
//!
//! int main() {
//!     char* edi = edi834_transcode_bytes(data, len, EDI834_INPUT_XLSX, 0);
//!     if (!edi) {
//!         fprintf(stderr, "Error: %s\n", edi834_last_error());
//!         return 1;
//!     }
//!     printf("%s\n", edi);
//!     edi834_free_string(edi);
//!     return 0;
//! }
//! ```

use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr, CString};
use std::panic::catch_unwind;
use std::ptr;

use crate::edi::{SystemStamp, DEFAULT_CONTROL_NUMBER};
use crate::render::JsonFormat;
use crate::InputFormat;

// Thread-local storage for the last error message.
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message.
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message.
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// JSON format options.
pub const EDI834_JSON_PRETTY: c_int = 0;
pub const EDI834_JSON_COMPACT: c_int = 1;

/// Input format options.
pub const EDI834_INPUT_XLSX: c_int = 0;
pub const EDI834_INPUT_CSV: c_int = 1;

fn input_format(code: c_int) -> Result<InputFormat, String> {
    match code {
        EDI834_INPUT_XLSX => Ok(InputFormat::Xlsx),
        EDI834_INPUT_CSV => Ok(InputFormat::Csv),
        other => Err(format!("unknown input format: {}", other)),
    }
}

/// Hand a string result to the caller, recording any error.
fn into_c_string(result: std::thread::Result<Result<String, String>>, during: &str) -> *mut c_char {
    match result {
        Ok(Ok(text)) => match CString::new(text) {
            Ok(s) => s.into_raw(),
            Err(_) => {
                set_last_error("output contains null byte");
                ptr::null_mut()
            }
        },
        Ok(Err(e)) => {
            set_last_error(&e);
            ptr::null_mut()
        }
        Err(_) => {
            set_last_error(&format!("panic occurred during {}", during));
            ptr::null_mut()
        }
    }
}

fn stamp_for(control_number: u32) -> SystemStamp {
    if control_number == 0 {
        SystemStamp::with_control_number(DEFAULT_CONTROL_NUMBER)
    } else {
        SystemStamp::with_control_number(control_number)
    }
}

/// Get the version of the library.
///
/// # Safety
///
/// Returns a static string that must not be freed.
#[no_mangle]
pub extern "C" fn edi834_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Get the last error message.
///
/// # Safety
///
/// Returns a pointer to a thread-local error string. The pointer is valid until
/// the next call to any edi834 function on the same thread.
#[no_mangle]
pub extern "C" fn edi834_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Parse XLSX or CSV bytes and return the records as JSON.
///
/// # Safety
///
/// - `data` must be a valid pointer to a byte buffer of at least `len` bytes.
/// - `input` is one of `EDI834_INPUT_XLSX` or `EDI834_INPUT_CSV`.
/// - `format` is one of `EDI834_JSON_PRETTY` or `EDI834_JSON_COMPACT`.
/// - Returns null on error. Use `edi834_last_error` to get the error message.
/// - The returned string must be freed with `edi834_free_string`.
#[no_mangle]
pub unsafe extern "C" fn edi834_parse_bytes_json(
    data: *const u8,
    len: usize,
    input: c_int,
    format: c_int,
) -> *mut c_char {
    clear_last_error();

    if data.is_null() {
        set_last_error("data is null");
        return ptr::null_mut();
    }

    let result = catch_unwind(|| -> Result<String, String> {
        let bytes = std::slice::from_raw_parts(data, len);
        let json_format = if format == EDI834_JSON_COMPACT {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        crate::parse_bytes_as(bytes, input_format(input)?)
            .and_then(|records| crate::render::records_to_json(&records, json_format))
            .map_err(|e| e.to_string())
    });

    into_c_string(result, "parsing")
}

/// Parse XLSX or CSV bytes and generate 834 text.
///
/// # Safety
///
/// - `data` must be a valid pointer to a byte buffer of at least `len` bytes.
/// - `input` is one of `EDI834_INPUT_XLSX` or `EDI834_INPUT_CSV`.
/// - `control_number` of 0 selects the default control number.
/// - Returns null on error. Use `edi834_last_error` to get the error message.
/// - The returned string must be freed with `edi834_free_string`.
#[no_mangle]
pub unsafe extern "C" fn edi834_transcode_bytes(
    data: *const u8,
    len: usize,
    input: c_int,
    control_number: u32,
) -> *mut c_char {
    clear_last_error();

    if data.is_null() {
        set_last_error("data is null");
        return ptr::null_mut();
    }

    let result = catch_unwind(|| -> Result<String, String> {
        let bytes = std::slice::from_raw_parts(data, len);
        crate::transcode_bytes_as(bytes, input_format(input)?, &stamp_for(control_number))
            .map_err(|e| e.to_string())
    });

    into_c_string(result, "generation")
}

/// Generate 834 text from a JSON array of record objects.
///
/// # Safety
///
/// - `json` must be a valid null-terminated UTF-8 string.
/// - `control_number` of 0 selects the default control number.
/// - Returns null on error. Use `edi834_last_error` to get the error message.
/// - The returned string must be freed with `edi834_free_string`.
#[no_mangle]
pub unsafe extern "C" fn edi834_generate_from_json(
    json: *const c_char,
    control_number: u32,
) -> *mut c_char {
    clear_last_error();

    if json.is_null() {
        set_last_error("json is null");
        return ptr::null_mut();
    }

    let result = catch_unwind(|| -> Result<String, String> {
        let text = CStr::from_ptr(json).to_str().map_err(|e| e.to_string())?;
        let records = crate::render::records_from_json(text).map_err(|e| e.to_string())?;
        Ok(crate::generate_834(&records, &stamp_for(control_number)))
    });

    into_c_string(result, "generation")
}

/// Free a string allocated by this library.
///
/// # Safety
///
/// - `s` must be a pointer returned by an edi834 function, or null.
/// - After calling this function, the pointer is invalid and must not be used.
#[no_mangle]
pub unsafe extern "C" fn edi834_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take(s: *mut c_char) -> String {
        let owned = CStr::from_ptr(s).to_str().unwrap().to_string();
        edi834_free_string(s);
        owned
    }

    #[test]
    fn test_version() {
        let version = edi834_version();
        assert!(!version.is_null());
        let version_str = unsafe { CStr::from_ptr(version) }.to_str().unwrap();
        assert!(!version_str.is_empty());
    }

    #[test]
    fn test_null_inputs() {
        let out = unsafe { edi834_parse_bytes_json(ptr::null(), 0, EDI834_INPUT_XLSX, EDI834_JSON_PRETTY) };
        assert!(out.is_null());
        assert!(!edi834_last_error().is_null());

        let out = unsafe { edi834_transcode_bytes(ptr::null(), 0, EDI834_INPUT_XLSX, 0) };
        assert!(out.is_null());

        let out = unsafe { edi834_generate_from_json(ptr::null(), 0) };
        assert!(out.is_null());
    }

    #[test]
    fn test_parse_bytes_json() {
        let csv = b"Member ID,Last Name\n100,Doe\n";
        let out = unsafe {
            edi834_parse_bytes_json(csv.as_ptr(), csv.len(), EDI834_INPUT_CSV, EDI834_JSON_COMPACT)
        };
        assert!(!out.is_null());
        assert!(edi834_last_error().is_null());
        let json = unsafe { take(out) };
        assert_eq!(json, r#"[{"Member ID":"100","Last Name":"Doe"}]"#);
    }

    #[test]
    fn test_transcode_bytes() {
        let csv = b"Member ID,Relationship Code\n100,18\n";
        let out = unsafe { edi834_transcode_bytes(csv.as_ptr(), csv.len(), EDI834_INPUT_CSV, 42) };
        assert!(!out.is_null());
        let edi = unsafe { take(out) };
        assert!(edi.contains("INS*Y*18*"));
        assert!(edi.ends_with("IEA*1*000000042~"));
    }

    #[test]
    fn test_text_as_workbook_fails() {
        let text = b"Member ID\n100\n";
        let out = unsafe { edi834_transcode_bytes(text.as_ptr(), text.len(), EDI834_INPUT_XLSX, 0) };
        assert!(out.is_null());
        let error = unsafe { CStr::from_ptr(edi834_last_error()) }.to_str().unwrap();
        assert!(error.starts_with("Malformed archive"));

        let out = unsafe { edi834_transcode_bytes(text.as_ptr(), text.len(), 7, 0) };
        assert!(out.is_null());
    }

    #[test]
    fn test_generate_from_json() {
        let json = CString::new(r#"[{"Member ID": 7, "Relationship Code": "19"}]"#).unwrap();
        let out = unsafe { edi834_generate_from_json(json.as_ptr(), 0) };
        assert!(!out.is_null());
        let edi = unsafe { take(out) };
        assert!(edi.contains("NM1*IL*1*DOE*JOHN****34*7~"));
        assert!(edi.ends_with("IEA*1*000894135~"));
    }

    #[test]
    fn test_error_message_kept() {
        let json = CString::new("not json").unwrap();
        let out = unsafe { edi834_generate_from_json(json.as_ptr(), 0) };
        assert!(out.is_null());
        let error = unsafe { CStr::from_ptr(edi834_last_error()) }.to_str().unwrap();
        assert!(error.starts_with("Serialization error"));
    }

    #[test]
    fn test_free_null() {
        // Should not crash
        unsafe { edi834_free_string(ptr::null_mut()) };
    }
}
