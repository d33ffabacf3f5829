//! Build script for interlock: picks the interlocked back-end for the target.
//!
//! Emits `cfg(interlock_locked)` when the target cannot perform every
//! operation with native atomics, or when the `lock-fallback` feature asks
//! for the process-wide lock explicitly. Otherwise the native back-end is
//! compiled.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let forced = env::var_os("CARGO_FEATURE_LOCK_FALLBACK").is_some();

    // Comma-separated list such as "8,16,32,64,ptr".
    let has_atomic = env::var("CARGO_CFG_TARGET_HAS_ATOMIC").unwrap_or_default();
    let widths: Vec<&str> = has_atomic.split(',').map(str::trim).collect();
    let pointer_width = env::var("CARGO_CFG_TARGET_POINTER_WIDTH").unwrap_or_default();

    let mut missing = Vec::new();
    for width in ["32", "ptr"] {
        if !widths.contains(&width) {
            missing.push(width);
        }
    }
    if pointer_width == "64" && !widths.contains(&"64") {
        missing.push("64");
    }

    if forced || !missing.is_empty() {
        println!("cargo:rustc-cfg=interlock_locked");
    }
    if !missing.is_empty() {
        println!(
            "cargo:warning=target lacks native atomics ({}); using a single lock for all interlocked operations",
            missing.join(", ")
        );
    }
}
