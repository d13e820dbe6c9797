// Fail-fast policy: a transfer error that reaches the facade ends the process
use eterm_transport::TransferError;
use std::backtrace::Backtrace;

/// Log `err` with its errno and a stack trace, then abort.
///
/// Nothing is cleaned up here; whoever owns the session tears it down.
pub fn fatal(err: &TransferError) -> ! {
    let code = err.raw_os_error().unwrap_or(0);
    let trace = Backtrace::force_capture();

    tracing::error!(op = err.op(), code, error = %err, "unrecoverable socket failure");
    // stderr directly too, so the reason survives without a subscriber
    eprintln!("Error: ({}): {}", code, err);
    eprintln!("Stack Trace:\n{}", trace);

    std::process::abort()
}
