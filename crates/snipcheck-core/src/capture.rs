//! Console sink and scoped output capture
//!
//! Snippet bodies print through [`emit`]. Outside a capture the line goes to
//! stdout; inside [`with_capture`] it is appended to the capture buffer
//! instead. The sink belongs to the executing thread, and a capture holds it
//! exclusively until the guard is dropped.

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::errors::{Result, SnipError};

thread_local! {
    static SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Print one console line (or several, if `text` contains newlines)
pub fn emit(text: impl AsRef<str>) {
    for line in text.as_ref().split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let captured = SINK.with(|sink| match sink.borrow_mut().as_mut() {
            Some(buffer) => {
                buffer.push(line.to_string());
                true
            }
            None => false,
        });
        if !captured {
            println!("{}", line);
        }
    }
}

/// Whether a capture is active on this thread
pub fn is_capturing() -> bool {
    SINK.with(|sink| sink.borrow().is_some())
}

/// Lines emitted during a capture, plus the action's return value
#[derive(Debug)]
pub struct Captured<R> {
    pub lines: Vec<String>,
    pub value: R,
}

/// Run `action` with the console sink redirected into a buffer
///
/// The previous sink is restored when this returns, including when `action`
/// panics.
///
/// # Errors
///
/// Returns `ReentrantCapture` if a capture is already active on this thread.
pub fn with_capture<R>(action: impl FnOnce() -> R) -> Result<Captured<R>> {
    let guard = CaptureGuard::acquire()?;
    let value = action();
    let lines = guard.release();
    Ok(Captured { lines, value })
}

/// Holds the sink; restores stdout on drop
struct CaptureGuard {
    // Thread-bound: the sink lives in a thread local.
    _not_send: PhantomData<*const ()>,
}

impl CaptureGuard {
    fn acquire() -> Result<Self> {
        SINK.with(|sink| {
            let mut sink = sink.borrow_mut();
            if sink.is_some() {
                return Err(SnipError::ReentrantCapture);
            }
            *sink = Some(Vec::new());
            Ok(Self {
                _not_send: PhantomData,
            })
        })
    }

    fn release(self) -> Vec<String> {
        SINK.with(|sink| sink.borrow_mut().take().unwrap_or_default())
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        let _ = SINK.try_with(|sink| {
            if let Ok(mut sink) = sink.try_borrow_mut() {
                *sink = None;
            }
        });
    }
}
