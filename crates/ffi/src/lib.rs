// ABOUTME: C FFI bindings for the jobtailor job-description extractor.
// ABOUTME: Exposes an arena-allocated extraction response to browser-extension and native hosts.

use std::panic;
use std::ptr;

use bumpalo::Bump;
use jobtailor_scout::{extract_job_description, ExtractionResponse};

/// FFI version constant for ABI compatibility checking.
pub const JOBTAILOR_FFI_VERSION: u32 = 1;

/// Returns the FFI ABI version number.
/// Consumers should check this matches their expected version.
#[no_mangle]
pub extern "C" fn jobtailor_ffi_version() -> u32 {
    JOBTAILOR_FFI_VERSION
}

// ----------------------------------------------------------------------------
// Error handling
// ----------------------------------------------------------------------------

/// Error codes matching the C ABI DErrorCode enum.
#[repr(u32)]
pub enum DErrorCode {
    Ok = 0,
    Invalid = 1,
    Internal = 255,
}

/// UTF-8 string slice for FFI. Not null-terminated.
/// Consumer must not mutate or free; memory owned by the arena or static.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct DString {
    pub data: *const u8,
    pub len: usize,
}

impl DString {
    /// Creates an empty DString with null pointer and zero length.
    pub const fn empty() -> Self {
        DString {
            data: ptr::null(),
            len: 0,
        }
    }

    /// Points at a string with static lifetime.
    pub const fn from_static(s: &'static str) -> Self {
        DString {
            data: s.as_ptr(),
            len: s.len(),
        }
    }
}

impl Default for DString {
    fn default() -> Self {
        Self::empty()
    }
}

/// FFI error struct matching C ABI DError.
#[repr(C)]
pub struct DError {
    pub code: u32,
    pub message: DString,
}

impl DError {
    /// Creates a success (D_OK) error with empty message.
    pub const fn ok() -> Self {
        DError {
            code: DErrorCode::Ok as u32,
            message: DString::empty(),
        }
    }
}

// ----------------------------------------------------------------------------
// DJobView - matches C ABI struct
// ----------------------------------------------------------------------------

/// The extraction response. `error` is empty unless extraction failed unexpectedly.
#[repr(C)]
pub struct DJobView {
    pub job_description: DString,
    pub source: DString,
    pub url: DString,
    pub error: DString,
    pub success: bool,
    pub needs_manual: bool,
}

/// Arena holding one extraction response.
/// All allocations for the view live in the bump allocator.
pub struct DJobArena {
    #[allow(dead_code)]
    bump: Bump,
    view: *const DJobView,
}

// ----------------------------------------------------------------------------
// Helper functions
// ----------------------------------------------------------------------------

/// Copies a string into the arena and returns a DString pointing to it.
fn copy_str_to_arena(bump: &Bump, s: &str) -> DString {
    if s.is_empty() {
        return DString::empty();
    }
    let bytes = bump.alloc_slice_copy(s.as_bytes());
    DString {
        data: bytes.as_ptr(),
        len: bytes.len(),
    }
}

/// Creates a DJobView in the arena from an ExtractionResponse.
fn make_job_view(bump: &Bump, resp: &ExtractionResponse) -> *const DJobView {
    let view = bump.alloc(DJobView {
        job_description: copy_str_to_arena(bump, &resp.job_description),
        source: copy_str_to_arena(bump, &resp.meta.source),
        url: copy_str_to_arena(bump, &resp.meta.url),
        error: copy_str_to_arena(bump, resp.meta.error.as_deref().unwrap_or("")),
        success: resp.meta.success,
        needs_manual: resp.meta.needs_manual,
    });
    view as *const DJobView
}

/// Sets the out_err with the given code and static message.
/// If out_err is null, this is a no-op.
unsafe fn set_error(out_err: *mut DError, code: DErrorCode, message: &'static str) {
    if !out_err.is_null() {
        (*out_err).code = code as u32;
        (*out_err).message = DString::from_static(message);
    }
}

/// Sets out_err to success (D_OK with empty message).
/// If out_err is null, this is a no-op.
unsafe fn set_success(out_err: *mut DError) {
    if !out_err.is_null() {
        (*out_err).code = DErrorCode::Ok as u32;
        (*out_err).message = DString::empty();
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ArgError {
    Missing,
    NotUtf8,
}

/// Reads `len` bytes at `data` as UTF-8.
unsafe fn utf8_arg<'a>(data: *const u8, len: usize) -> Result<&'a str, ArgError> {
    if data.is_null() || len == 0 {
        return Err(ArgError::Missing);
    }
    let bytes = std::slice::from_raw_parts(data, len);
    std::str::from_utf8(bytes).map_err(|_| ArgError::NotUtf8)
}

// ----------------------------------------------------------------------------
// Job extraction FFI functions
// ----------------------------------------------------------------------------

/// Blocking job description extraction. Returns an arena-allocated response.
///
/// # Arguments
/// * `url` - Page URL bytes (UTF-8)
/// * `url_len` - Length of URL in bytes
/// * `html` - Page HTML bytes (UTF-8)
/// * `html_len` - Length of HTML in bytes
/// * `out_err` - Output error struct (may be null)
///
/// # Returns
/// Pointer to DJobArena whenever the inputs are valid, even when nothing
/// was extracted (check `success` / `needs_manual` in the view). Null when
/// an input is invalid or the extractor panicked; out_err then holds details.
///
/// # Safety
/// `url` and `html` must point to `url_len` and `html_len` readable bytes.
/// Caller must free the returned arena via jobtailor_free_job.
#[no_mangle]
pub unsafe extern "C" fn jobtailor_extract_job(
    url: *const u8,
    url_len: usize,
    html: *const u8,
    html_len: usize,
    out_err: *mut DError,
) -> *mut DJobArena {
    let url_str = match utf8_arg(url, url_len) {
        Ok(s) => s,
        Err(e) => {
            let msg = match e {
                ArgError::Missing => "url is null or empty",
                ArgError::NotUtf8 => "url is not valid UTF-8",
            };
            set_error(out_err, DErrorCode::Invalid, msg);
            return ptr::null_mut();
        }
    };
    let html_str = match utf8_arg(html, html_len) {
        Ok(s) => s,
        Err(e) => {
            let msg = match e {
                ArgError::Missing => "html is null or empty",
                ArgError::NotUtf8 => "html is not valid UTF-8",
            };
            set_error(out_err, DErrorCode::Invalid, msg);
            return ptr::null_mut();
        }
    };

    // Catch panics to avoid unwinding across FFI boundary
    match panic::catch_unwind(|| extract_job_description(html_str, url_str)) {
        Ok(response) => {
            let bump = Bump::new();
            let view = make_job_view(&bump, &response);
            let arena = Box::new(DJobArena { bump, view });
            set_success(out_err);
            Box::into_raw(arena)
        }
        Err(_) => {
            set_error(out_err, DErrorCode::Internal, "internal panic during extraction");
            ptr::null_mut()
        }
    }
}

/// Returns a pointer to the DJobView inside the arena.
///
/// # Safety
/// The arena pointer must be valid or null.
/// The returned pointer is valid until jobtailor_free_job is called.
#[no_mangle]
pub unsafe extern "C" fn jobtailor_job_result(arena: *const DJobArena) -> *const DJobView {
    if arena.is_null() {
        return ptr::null();
    }
    (*arena).view
}

/// Frees the job arena and all associated allocations.
///
/// # Safety
/// The arena pointer must have been returned by jobtailor_extract_job, or be null.
/// After this call, the arena pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn jobtailor_free_job(arena: *mut DJobArena) {
    if !arena.is_null() {
        drop(Box::from_raw(arena));
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
