#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// The binary uses the library, not duplicate modules
fn main() {
    #[cfg(not(target_os = "android"))]
    fun_fact_map::run_native();
}
