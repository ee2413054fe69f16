//! ---
//! fc_section: "03-logging"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Context-enriched logging macros."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
//! `fc_*` macros: `tracing` events enriched with a [`LogContext`](crate::LogContext).

#[doc(hidden)]
#[macro_export]
macro_rules! __fc_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            suite = ctx.suite.unwrap_or(""),
            case = ctx.case.unwrap_or(""),
            worker = ctx.worker,
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with case context.
#[macro_export]
macro_rules! fc_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fc_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fc_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with case context.
#[macro_export]
macro_rules! fc_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fc_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fc_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with case context.
#[macro_export]
macro_rules! fc_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fc_event!(tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fc_event!(tracing::Level::WARN, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with case context.
#[macro_export]
macro_rules! fc_error {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fc_event!(tracing::Level::ERROR, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fc_event!(tracing::Level::ERROR, $crate::LogContext::default(), $($arg)+)
    };
}
