//! EGL default-display initialization probe.
//!
//! libEGL is loaded at runtime so the binary runs on hosts without it. The
//! driver calls happen on a detached thread: a wedged driver cannot block the
//! async runtime or its shutdown, it just loses the race against the timeout.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::ptr;
use std::time::Duration;

use libloading::{Library, Symbol};
use thiserror::Error;
use tokio::sync::oneshot;

type EglDisplay = *mut c_void;
type EglGetDisplay = unsafe extern "C" fn(*mut c_void) -> EglDisplay;
type EglInitialize = unsafe extern "C" fn(EglDisplay, *mut i32, *mut i32) -> u32;
type EglTerminate = unsafe extern "C" fn(EglDisplay) -> u32;
type EglGetError = unsafe extern "C" fn() -> i32;

#[derive(Debug, Error)]
pub enum EglError {
    #[error("could not load EGL library (tried {tried}): {reason}")]
    LibraryNotFound { tried: String, reason: String },

    #[error("EGL library is missing symbol {symbol}: {reason}")]
    MissingSymbol { symbol: &'static str, reason: String },

    #[error("eglGetDisplay returned EGL_NO_DISPLAY")]
    NoDisplay,

    #[error("eglInitialize failed with error 0x{code:04x}")]
    InitFailed { code: i32 },

    #[error("EGL probe did not finish within {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("EGL probe thread failed: {0}")]
    Thread(String),
}

/// Initialize the default EGL display and report `"<major>.<minor>"`.
pub async fn probe_egl(libraries: Vec<String>, timeout: Duration) -> Result<String, EglError> {
    let (tx, rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("egl-probe".to_string())
        .spawn(move || {
            let _ = tx.send(initialize_default_display(&libraries));
        })
        .map_err(|e| EglError::Thread(e.to_string()))?;

    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(result)) => result,
        // Sender dropped without a result: the thread panicked.
        Ok(Err(_)) => Err(EglError::Thread("exited without a result".to_string())),
        Err(_) => Err(EglError::Timeout(timeout)),
    }
}

fn load_library(candidates: &[String]) -> Result<Library, EglError> {
    let mut last_error = "no candidate libraries configured".to_string();
    for name in candidates {
        // SAFETY: libEGL runs no initialization code with preconditions we
        // could violate; loading it is the point of the probe.
        match unsafe { Library::new(name) } {
            Ok(library) => return Ok(library),
            Err(e) => last_error = e.to_string(),
        }
    }
    Err(EglError::LibraryNotFound {
        tried: candidates.join(", "),
        reason: last_error,
    })
}

fn symbol<'lib, T>(library: &'lib Library, name: &'static str) -> Result<Symbol<'lib, T>, EglError> {
    // SAFETY: every call site pairs the name with its EGL 1.4 signature.
    unsafe { library.get::<T>(name.as_bytes()) }.map_err(|e| EglError::MissingSymbol {
        symbol: name,
        reason: e.to_string(),
    })
}

fn initialize_default_display(candidates: &[String]) -> Result<String, EglError> {
    let library = load_library(candidates)?;
    let get_display = symbol::<EglGetDisplay>(&library, "eglGetDisplay")?;
    let initialize = symbol::<EglInitialize>(&library, "eglInitialize")?;
    let terminate = symbol::<EglTerminate>(&library, "eglTerminate")?;
    let get_error = symbol::<EglGetError>(&library, "eglGetError")?;

    // SAFETY: EGL_DEFAULT_DISPLAY is the null native display; the version
    // out-pointers are valid for the duration of the call.
    unsafe {
        let display = get_display(ptr::null_mut());
        if display.is_null() {
            return Err(EglError::NoDisplay);
        }

        let (mut major, mut minor) = (0_i32, 0_i32);
        if initialize(display, &raw mut major, &raw mut minor) == 0 {
            return Err(EglError::InitFailed { code: get_error() });
        }
        terminate(display);

        Ok(format!("{major}.{minor}"))
    }
}
