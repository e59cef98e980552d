//! Unix signal handling (SIGINT).
//!
//! A ^C at the terminal reaches both us and the running command.  We let the
//! first one through to the child only: the child dies, its failure aborts
//! the build, and we still get to report it and close the trace.  A second
//! SIGINT gets the default behavior and kills minimake outright.

#[cfg(unix)]
fn sigint_action(handler: libc::sighandler_t) {
    // Safety: registering a signal handler is libc unsafe code.
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = handler;
        libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigint_handler(_sig: libc::c_int) {
    sigint_action(libc::SIG_DFL);
}

#[cfg(unix)]
pub fn register_sigint() {
    sigint_action(sigint_handler as extern "C" fn(libc::c_int) as libc::sighandler_t);
}

#[cfg(not(unix))]
pub fn register_sigint() {}
