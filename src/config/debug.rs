//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Most call sites are additionally gated by
//! `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit the raw bar count and dropped-close count for every fetched window.
    pub print_window_stats: bool,
    /// Emit the fitted min/max for every request.
    pub print_scaler_fit: bool,
    /// Emit the raw (scaled) model output before inverse scaling.
    pub print_raw_model_output: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_window_stats: false,
    print_scaler_fit: false,
    print_raw_model_output: false,
};
