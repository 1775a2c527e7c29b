use autophylip_core::domain::errors::AutoPhylipError;

/// Name of the error kind carried by an error chain
///
/// Errors raised by the core keep their own kind. Anything else comes from
/// the port plumbing and is reported as `Runtime`.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<AutoPhylipError>() {
        Some(err) => err.kind(),
        None => "Runtime",
    }
}

/// Report an error on stderr and exit with a non-zero status
///
/// Destructors do not run after this call, so the logger guard must be
/// dropped by the caller first.
pub fn exit_with_error(err: anyhow::Error) -> ! {
    eprintln!("Error [{kind}]: {err:#}", kind = error_kind(&err));

    std::process::exit(1)
}
