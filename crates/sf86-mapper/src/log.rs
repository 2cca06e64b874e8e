// crates/sf86-mapper/src/log.rs

use crate::types::SectionNumber;
use alloc::format;
use alloc::string::String;

/// Trait for structs that provide metadata for logging
pub trait LogMetadata {
    fn meta(&self) -> String;
}

/// Log context naming the section and the component doing the work.
pub struct SectionLog {
    pub section: SectionNumber,
    pub component: &'static str,
}

impl SectionLog {
    pub fn new(section: SectionNumber, component: &'static str) -> Self {
        Self { section, component }
    }
}

impl LogMetadata for SectionLog {
    fn meta(&self) -> String {
        format!(
            "section={}, component={}",
            self.section.get(),
            self.component
        )
    }
}

// =============================================
// Logging Macros (namespaced under crate::log)
// =============================================

// ===== ctx_info! =====
macro_rules! ctx_info {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::info!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== ctx_warn! =====
macro_rules! ctx_warn {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::warn!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== ctx_debug! =====
macro_rules! ctx_debug {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::debug!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== ctx_trace! =====
macro_rules! ctx_trace {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        if ::log::log_enabled!(::log::Level::Trace) {
            let meta = $crate::log::LogMetadata::meta(&$ctx);
            ::log::trace!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
        }
    }};
}

// Re-export macros for use in other files
pub(crate) use ctx_debug;
pub(crate) use ctx_info;
pub(crate) use ctx_trace;
pub(crate) use ctx_warn;
