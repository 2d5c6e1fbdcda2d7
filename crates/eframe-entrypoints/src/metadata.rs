use shadow_rs::shadow;

shadow!(build);

/// Log version and build info at startup.
/// On Android, the `log` crate is used (handled by android_logger);
/// elsewhere `tracing` (handled by our tracing_subscriber).
#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn log_version_info(app_name: &str) {
    let version = short_version_info(app_name);

    #[cfg(target_os = "android")]
    {
        log::info!("{}", version);
        log::info!("Build date: {} ({})", build::BUILD_TIME_2822, build::BUILD_RUST_CHANNEL);
    }
    #[cfg(not(target_os = "android"))]
    {
        tracing::info!("{}", version);
        tracing::info!("Build date: {} ({})", build::BUILD_TIME_2822, build::BUILD_RUST_CHANNEL);
    }
}

/// One-line version string: `<app> <version> (<branch>@<commit>[+dirty])`
#[allow(dead_code)]
pub fn short_version_info(app_name: &str) -> String {
    let commit = if build::SHORT_COMMIT.is_empty() {
        "unknown"
    } else {
        build::SHORT_COMMIT
    };

    format!(
        "{} {} ({}@{}{})",
        app_name,
        build::PKG_VERSION,
        build::BRANCH,
        commit,
        if build::GIT_CLEAN { "" } else { "+dirty" }
    )
}
