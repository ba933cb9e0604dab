//! Output macros shared by every command.
//!
//! Each macro routes its message to `tracing` when debug mode is on and to
//! plain stdout/stderr otherwise:
//!
//! ```text
//! msg_info!(m) ──▶ NEETPLAN_DEBUG or RUST_LOG set? ──▶ tracing::info!
//!                                                 └──▶ println!
//! ```
//!
//! - `msg_print!`: plain line
//! - `msg_success!`: ✅ prefix
//! - `msg_info!`: ℹ️ prefix
//! - `msg_warning!`: ⚠️ prefix
//! - `msg_error!`: ❌ prefix, stderr
//! - `msg_debug!`: debug mode only
//!
//! ```rust
//! use neetplan::libs::messages::Message;
//! use neetplan::{msg_info, msg_success};
//!
//! msg_success!(Message::ConfigSaved);
//! msg_info!(Message::NoTasksForDate("2025-02-01".to_string()), true);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// `true` when `NEETPLAN_DEBUG` or `RUST_LOG` is set. Checked once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("NEETPLAN_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Routes one formatted line: `tracing` at `$level` in debug mode, otherwise `$print`.
#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $print:ident, $prefix:literal, $msg:expr, $spaced:expr) => {{
        let line = format!("{}{}", $prefix, $msg);
        let line = if $spaced { format!("\n{}\n", line) } else { line };
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}", line);
        } else {
            $print!("{}", line);
        }
    }};
}

/// Prints a message as is. Pass `true` to surround it with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, true)
    };
}

/// Writes to stderr outside debug mode.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, "⚠️ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(warn, println, "⚠️ ", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, true)
    };
}

/// Suppressed entirely outside debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}
