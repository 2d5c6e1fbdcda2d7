//! Entry points for egui/eframe applications on desktop and Android
//!
//! Both platforms share the same startup sequence: install logging, log the
//! build metadata, create a multi-threaded Tokio runtime and run the eframe
//! event loop inside it, so the app can spawn tasks from its UI thread.
//!
//! # Usage
//!
//! In the application's `lib.rs`:
//!
//! ```ignore
//! eframe_entrypoints::eframe_app!("My App Name", |cc| Box::new(MyApp::new(cc)));
//! ```
//!
//! and in its `main.rs`:
//!
//! ```ignore
//! fn main() {
//!     my_app::run_native();
//! }
//! ```

pub mod cli;
pub mod logging;

// Re-export commonly used types
pub use cli::{get_env, parse_args, parse_args_or_exit};
pub use logging::setup_logging;

mod metadata;
pub use metadata::{log_version_info, short_version_info};

// Re-export eframe types commonly needed for app creation
pub use eframe;
pub use eframe::CreationContext;

/// Boxed app constructor handed to eframe
pub type AppCreator = Box<dyn FnOnce(&eframe::CreationContext<'_>) -> Box<dyn eframe::App>>;

/// Box an app constructor, fixing its signature for closure inference
pub fn app_creator<F>(creator: F) -> AppCreator
where
    F: FnOnce(&eframe::CreationContext<'_>) -> Box<dyn eframe::App> + 'static,
{
    Box::new(creator)
}

/// Define the platform entry points for an eframe application.
///
/// * `$app_name` - window title and name used in logs
/// * `$app_creator` - closure taking `&CreationContext` and returning `Box<dyn eframe::App>`
///
/// Generates `android_main` (exported, Android only) and `run_native()`
/// (desktop, call it from `main.rs`).
#[macro_export]
macro_rules! eframe_app {
    ($app_name:expr, $app_creator:expr) => {
        #[cfg(target_os = "android")]
        #[unsafe(no_mangle)] // SAFETY: there is no other global function of this name
        pub fn android_main(app: ::winit::platform::android::activity::AndroidApp) {
            $crate::android_main_impl($app_name, app, $crate::app_creator($app_creator));
        }

        /// Run the application on desktop platforms.
        #[cfg(not(target_os = "android"))]
        pub fn run_native() {
            $crate::native_main_impl($app_name, $crate::app_creator($app_creator));
        }
    };
}

fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("fun-fact-worker")
        .build()
}

/// Desktop entry point. Use the `eframe_app!` macro instead of calling this directly.
#[cfg(not(target_os = "android"))]
#[doc(hidden)]
pub fn native_main_impl(app_name: &str, app_creator: AppCreator) {
    logging::setup_logging();
    log_version_info(app_name);

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {}", e);
            return;
        }
    };

    // eframe blocks this thread; entering the runtime lets the app spawn tasks from the UI
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 820.0])
            .with_min_inner_size([320.0, 480.0])
            .with_title(app_name),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        app_name,
        native_options,
        Box::new(move |cc| Ok(app_creator(cc))),
    ) {
        tracing::error!("{} exited with an error: {}", app_name, e);
    }
}

/// Android entry point. Use the `eframe_app!` macro instead of calling this directly.
#[cfg(target_os = "android")]
#[doc(hidden)]
pub fn android_main_impl(
    app_name: &str,
    app: winit::platform::android::activity::AndroidApp,
    app_creator: AppCreator,
) {
    use winit::platform::android::EventLoopBuilderExtAndroid;

    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );
    log_version_info(app_name);

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to create Tokio runtime: {}", e);
            return;
        }
    };
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_title(app_name),
        event_loop_builder: Some(Box::new(move |builder| {
            builder.with_android_app(app);
        })),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        app_name,
        native_options,
        Box::new(move |cc| Ok(app_creator(cc))),
    ) {
        log::error!("{} exited with an error: {}", app_name, e);
    }
}
