use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static RUNNING: AtomicBool = AtomicBool::new(true);

/// Cooperative stop flag shared with the SIGINT/SIGTERM handlers.
///
/// The render loop checks it between frames; the engine itself never
/// looks at it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShutdownFlag;

impl ShutdownFlag {
    /// Route SIGINT and SIGTERM to `request_stop`
    pub fn install() -> io::Result<Self> {
        for signal in [libc::SIGINT, libc::SIGTERM] {
            let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
            if unsafe { libc::signal(signal, handler) } == libc::SIG_ERR {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(ShutdownFlag)
    }

    pub fn is_running(&self) -> bool {
        RUNNING.load(Ordering::SeqCst)
    }

    pub fn request_stop(&self) {
        RUNNING.store(false, Ordering::SeqCst);
    }
}

extern "C" fn on_signal(_signal: libc::c_int) {
    // Only async-signal-safe work here
    RUNNING.store(false, Ordering::SeqCst);
}
