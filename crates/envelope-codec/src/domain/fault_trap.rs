//! Fault trap
//!
//! Deserializers of registered classes are ordinary Rust code and may panic on
//! hostile input. The guarded decode path catches such panics with
//! `catch_unwind`, but the process-wide panic hook would still print them as
//! if the process were crashing. A [`FaultTrap`] silences the hook for panics
//! raised on the thread that armed it, and forwards every other panic to the
//! hook that was installed before.
//!
//! ## Global State
//!
//! The panic hook is process-global. Installation and restoration happen under
//! one mutex and are reference counted:
//!
//! - the first live trap takes the current hook and installs the chaining hook
//! - nested and concurrent traps share that hook
//! - the last trap dropped puts the previous hook back exactly as it was
//!
//! Whether a panic is "ours" is decided per thread, so a trap armed on one
//! thread never swallows a panic raised on another.
//!
//! Hooks set by other code while a trap is live are discarded when the last
//! trap is released. Requires `panic = "unwind"`.

use parking_lot::{const_mutex, Mutex};
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

struct HookState {
    /// Live traps across all threads.
    depth: usize,
    /// Hook that was installed before the first live trap.
    previous: Option<Arc<PanicHook>>,
}

static HOOK_STATE: Mutex<HookState> = const_mutex(HookState {
    depth: 0,
    previous: None,
});

thread_local! {
    static ARMED: Cell<usize> = const { Cell::new(0) };
    static LAST_FAULT: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn is_armed() -> bool {
    ARMED.with(|armed| armed.get() > 0)
}

fn describe(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");

    match info.location() {
        Some(location) => format!("{message} at {}:{}", location.file(), location.line()),
        None => message.to_string(),
    }
}

/// Scoped interception of panics on the current thread.
///
/// Must be dropped on the thread that installed it.
#[must_use = "the trap is released as soon as it is dropped"]
pub struct FaultTrap {
    _not_send: PhantomData<*const ()>,
}

impl FaultTrap {
    /// Arm the current thread, installing the chaining hook if no other trap
    /// is live.
    pub fn install() -> Self {
        {
            let mut state = HOOK_STATE.lock();
            // set_hook panics on a panicking thread; the thread is left
            // unarmed for the hook in that case and the panic goes through.
            if state.previous.is_none() && !std::thread::panicking() {
                let previous: Arc<PanicHook> = Arc::new(panic::take_hook());
                let chained = Arc::clone(&previous);
                panic::set_hook(Box::new(move |info| {
                    if is_armed() {
                        let fault = describe(info);
                        LAST_FAULT.with(|last| *last.borrow_mut() = Some(fault));
                    } else {
                        (**chained)(info);
                    }
                }));
                state.previous = Some(previous);
            }
            state.depth += 1;
        }

        ARMED.with(|armed| armed.set(armed.get() + 1));
        LAST_FAULT.with(|last| last.borrow_mut().take());

        Self {
            _not_send: PhantomData,
        }
    }

    /// Description of the last panic swallowed on this thread, if any.
    pub fn take_fault(&self) -> Option<String> {
        LAST_FAULT.with(|last| last.borrow_mut().take())
    }

    /// Number of live traps across all threads.
    #[must_use]
    pub fn live_traps() -> usize {
        HOOK_STATE.lock().depth
    }

    /// Whether the chaining hook is currently installed.
    #[must_use]
    pub fn is_hook_installed() -> bool {
        HOOK_STATE.lock().previous.is_some()
    }
}

impl Drop for FaultTrap {
    fn drop(&mut self) {
        ARMED.with(|armed| armed.set(armed.get().saturating_sub(1)));

        let mut state = HOOK_STATE.lock();
        state.depth = state.depth.saturating_sub(1);
        if state.depth > 0 || std::thread::panicking() {
            return;
        }
        let Some(previous) = state.previous.take() else {
            return;
        };

        // Dropping the chaining hook releases its handle on `previous`.
        drop(panic::take_hook());
        match Arc::try_unwrap(previous) {
            Ok(hook) => panic::set_hook(hook),
            Err(shared) => panic::set_hook(Box::new(move |info| (**shared)(info))),
        }
    }
}
