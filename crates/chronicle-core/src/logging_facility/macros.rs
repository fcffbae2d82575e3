//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use chronicle_core::log_op_start;
/// log_op_start!("run_program");
/// log_op_start!("run_program", decl_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chronicle_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chronicle_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use chronicle_core::log_op_end;
/// log_op_end!("run_program", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chronicle_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chronicle_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use chronicle_core::log_op_error;
/// # use chronicle_core::errors::ChronicleError;
/// let err = ChronicleError::UnknownIdentifier {
///     id: "e1".to_string(),
///     context: "export target".to_string(),
/// };
/// log_op_error!("export", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err: &$crate::errors::ChronicleError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = chronicle_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = err.kind().as_str(),
            err_code = err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err: &$crate::errors::ChronicleError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = chronicle_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = err.kind().as_str(),
            err_code = err.code(),
            $($field)*
        );
    }};
}
