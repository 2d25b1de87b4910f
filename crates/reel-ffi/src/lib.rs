//! C FFI surface for reel.
//!
//! Pattern: opaque EngineHandle + C strings + JSON serialization.
//!
//! The host (a browser shell, a native player, a mobile app) answers the
//! decode-support query through a callback when the engine is opened.
//! After that every call is a pure lookup.

use std::cell::RefCell;
use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use reel_core::effects::{CanPlay, PlaybackProbe};
use reel_core::{content_type_for, CapabilitySet, ClientConfig, Engine, MediaFile};

// ---------------------------------------------------------------------------
// Error handling (thread-local last error)
// ---------------------------------------------------------------------------

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn set_error(msg: String) {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = Some(msg));
}

fn clear_error() {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = None);
}

/// Returns the last error message (caller frees with `reel_string_free`).
#[no_mangle]
pub extern "C" fn reel_last_error() -> *mut c_char {
    LAST_ERROR.with(|cell| {
        cell.borrow_mut()
            .take()
            .and_then(|s| CString::new(s).ok())
            .map(|s| s.into_raw())
            .unwrap_or(ptr::null_mut())
    })
}

/// Frees a string returned from reel FFI.
///
/// # Safety
/// Must be a pointer returned from this FFI and not already freed.
#[no_mangle]
pub unsafe extern "C" fn reel_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

// ---------------------------------------------------------------------------
// Opaque handle
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct EngineHandle {
    _private: [u8; 0],
}

struct EngineHandleInner {
    engine: Engine,
}

fn into_handle(engine: Engine) -> *mut EngineHandle {
    Box::into_raw(Box::new(EngineHandleInner { engine })) as *mut EngineHandle
}

// ---------------------------------------------------------------------------
// Host probe
// ---------------------------------------------------------------------------

/// Host decode-support query: 0 = no, 1 = maybe, 2 = probably.
pub type CanPlayTypeFn = extern "C" fn(mime: *const c_char, user_data: *mut c_void) -> i32;

struct CallbackProbe {
    supports_video: bool,
    can_play_type: Option<CanPlayTypeFn>,
    user_data: *mut c_void,
}

// SAFETY: a CallbackProbe only lives for the duration of
// `reel_open_with_probe` and is only used on the calling thread.
unsafe impl Send for CallbackProbe {}
unsafe impl Sync for CallbackProbe {}

impl PlaybackProbe for CallbackProbe {
    fn supports_video(&self) -> bool {
        self.supports_video && self.can_play_type.is_some()
    }

    fn can_play_type(&self, mime: &str) -> CanPlay {
        let (Some(callback), Ok(mime)) = (self.can_play_type, CString::new(mime)) else {
            return CanPlay::No;
        };
        match callback(mime.as_ptr(), self.user_data) {
            2 => CanPlay::Probably,
            1 => CanPlay::Maybe,
            _ => CanPlay::No,
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Opens an engine from a config JSON document and a capability JSON object
/// (`{"avc": true, "vp9": true, ...}`).
///
/// Either pointer may be NULL: a NULL config means defaults, NULL
/// capabilities means the config's `capabilities` block (or none).
/// Returns NULL on error.
#[no_mangle]
pub extern "C" fn reel_open(
    config_json: *const c_char,
    capabilities_json: *const c_char,
) -> *mut EngineHandle {
    clear_error();
    let config = match read_config(config_json) {
        Ok(c) => c,
        Err(e) => return err_null_handle(e),
    };
    if capabilities_json.is_null() {
        return into_handle(Engine::from_config(config));
    }
    let caps: CapabilitySet = match read_cstr(capabilities_json)
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(c) => c,
        Err(e) => return err_null_handle(e),
    };
    into_handle(Engine::with_capabilities(config, caps))
}

/// Opens an engine, probing the host through `can_play_type` once per
/// canonical content type. With `supports_video == 0` (or a NULL
/// callback) the callback is never invoked and nothing but AVC is served.
#[no_mangle]
pub extern "C" fn reel_open_with_probe(
    config_json: *const c_char,
    supports_video: i32,
    can_play_type: Option<CanPlayTypeFn>,
    user_data: *mut c_void,
) -> *mut EngineHandle {
    clear_error();
    let config = match read_config(config_json) {
        Ok(c) => c,
        Err(e) => return err_null_handle(e),
    };
    let probe = CallbackProbe {
        supports_video: supports_video != 0,
        can_play_type,
        user_data,
    };
    into_handle(Engine::new(config, &probe))
}

/// Closes the engine and releases all resources.
#[no_mangle]
pub extern "C" fn reel_close(handle: *mut EngineHandle) {
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle as *mut EngineHandleInner));
        }
    }
}

/// Capability set of the engine as JSON (caller frees).
#[no_mangle]
pub extern "C" fn reel_capabilities(handle: *mut EngineHandle) -> *mut c_char {
    clear_error();
    match engine_ref(handle) {
        Ok(engine) => json_to_cstr(engine.capabilities()),
        Err(e) => err_null(e),
    }
}

// ---------------------------------------------------------------------------
// Negotiation
// ---------------------------------------------------------------------------

/// Negotiated format tag (`"avc"`, `"vp9"`, ...) for a source. `codec` and
/// `mime` may be NULL for unknown.
#[no_mangle]
pub extern "C" fn reel_resolve_format(
    handle: *mut EngineHandle,
    codec: *const c_char,
    mime: *const c_char,
) -> *mut c_char {
    clear_error();
    let engine = match engine_ref(handle) {
        Ok(e) => e,
        Err(e) => return err_null(e),
    };
    let (codec, mime) = match (read_opt_cstr(codec), read_opt_cstr(mime)) {
        (Ok(c), Ok(m)) => (c, m),
        (Err(e), _) | (_, Err(e)) => return err_null(e),
    };
    to_cstr(engine.resolve_format(&codec, &mime).to_string())
}

/// Content type of the negotiated format (caller frees).
#[no_mangle]
pub extern "C" fn reel_content_type(
    handle: *mut EngineHandle,
    codec: *const c_char,
    mime: *const c_char,
) -> *mut c_char {
    clear_error();
    let engine = match engine_ref(handle) {
        Ok(e) => e,
        Err(e) => return err_null(e),
    };
    let (codec, mime) = match (read_opt_cstr(codec), read_opt_cstr(mime)) {
        (Ok(c), Ok(m)) => (c, m),
        (Err(e), _) | (_, Err(e)) => return err_null(e),
    };
    to_cstr(engine.content_type(&codec, &mime).to_string())
}

/// Content type for a format or codec tag; `video/mp4` for unknown tags.
#[no_mangle]
pub extern "C" fn reel_format_content_type(tag: *const c_char) -> *mut c_char {
    clear_error();
    match read_opt_cstr(tag) {
        Ok(t) => to_cstr(content_type_for(&t).to_string()),
        Err(e) => err_null(e),
    }
}

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

/// Video URL in the negotiated format. Empty string when `hash` is empty.
#[no_mangle]
pub extern "C" fn reel_video_url(
    handle: *mut EngineHandle,
    hash: *const c_char,
    codec: *const c_char,
    mime: *const c_char,
) -> *mut c_char {
    clear_error();
    let engine = match engine_ref(handle) {
        Ok(e) => e,
        Err(e) => return err_null(e),
    };
    let asset = match (read_opt_cstr(hash), read_opt_cstr(codec), read_opt_cstr(mime)) {
        (Ok(h), Ok(c), Ok(m)) => reel_core::AssetRef {
            hash: h,
            codec: Some(c).filter(|c| !c.is_empty()),
            mime: Some(m).filter(|m| !m.is_empty()),
        },
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return err_null(e),
    };
    to_cstr(engine.video_url(&asset))
}

/// Video source (`{"format", "url", "content_type"}`) for a JSON array of
/// files. Falls back to `fallback_hash` served as AVC.
#[no_mangle]
pub extern "C" fn reel_video_source(
    handle: *mut EngineHandle,
    files_json: *const c_char,
    fallback_hash: *const c_char,
) -> *mut c_char {
    clear_error();
    let engine = match engine_ref(handle) {
        Ok(e) => e,
        Err(e) => return err_null(e),
    };
    let files: Vec<MediaFile> = match read_cstr(files_json)
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(f) => f,
        Err(e) => return err_null(e),
    };
    let fallback = match read_opt_cstr(fallback_hash) {
        Ok(h) => h,
        Err(e) => return err_null(e),
    };
    json_to_cstr(&engine.video_source(&files, &fallback))
}

/// Thumbnail size tag for a display area in device pixels.
#[no_mangle]
pub extern "C" fn reel_thumb_size(handle: *mut EngineHandle, width: u32, height: u32) -> *mut c_char {
    clear_error();
    match engine_ref(handle) {
        Ok(engine) => to_cstr(engine.thumb_size(width, height).to_string()),
        Err(e) => err_null(e),
    }
}

/// Thumbnail URL for a file hash and size tag (caller frees).
#[no_mangle]
pub extern "C" fn reel_thumbnail_url(
    handle: *mut EngineHandle,
    hash: *const c_char,
    size: *const c_char,
) -> *mut c_char {
    clear_error();
    let engine = match engine_ref(handle) {
        Ok(e) => e,
        Err(e) => return err_null(e),
    };
    match (read_opt_cstr(hash), read_cstr(size)) {
        (Ok(h), Ok(s)) => to_cstr(engine.thumbnail_url(&h, "", &s)),
        (Err(e), _) | (_, Err(e)) => err_null(e),
    }
}

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// Returns the FFI API version.
#[no_mangle]
pub extern "C" fn reel_version() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn engine_ref<'a>(handle: *mut EngineHandle) -> Result<&'a Engine, String> {
    if handle.is_null() {
        return Err("null engine handle".into());
    }
    let inner = unsafe { &*(handle as *mut EngineHandleInner) };
    Ok(&inner.engine)
}

fn read_cstr(ptr: *const c_char) -> Result<String, String> {
    if ptr.is_null() {
        return Err("null string pointer".into());
    }
    unsafe {
        CStr::from_ptr(ptr)
            .to_str()
            .map(String::from)
            .map_err(|_| "invalid utf-8".into())
    }
}

/// Like `read_cstr`, but NULL reads as the empty string.
fn read_opt_cstr(ptr: *const c_char) -> Result<String, String> {
    if ptr.is_null() {
        return Ok(String::new());
    }
    read_cstr(ptr)
}

fn read_config(ptr: *const c_char) -> Result<ClientConfig, String> {
    if ptr.is_null() {
        return Ok(ClientConfig::default());
    }
    let json = read_cstr(ptr)?;
    ClientConfig::from_json(&json).map_err(|e| e.to_string())
}

fn json_to_cstr<T: serde::Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => to_cstr(json),
        Err(e) => err_null(e.to_string()),
    }
}

fn to_cstr(s: String) -> *mut c_char {
    CString::new(s)
        .map(|c| c.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn err_null(msg: String) -> *mut c_char {
    set_error(msg);
    ptr::null_mut()
}

fn err_null_handle(msg: String) -> *mut EngineHandle {
    log::warn!("reel: open failed: {}", msg);
    set_error(msg);
    ptr::null_mut()
}

// ---------------------------------------------------------------------------
// FFI Integration Tests
// ---------------------------------------------------------------------------
