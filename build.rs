//! # AI Flashcards - Tauri Cargo 构建脚本
//!
//! 在 `cargo build` 编译主项目之前自动执行，
//! 由 `tauri_build::build()` 根据 `tauri.conf.json` 生成资源绑定、
//! 权限清单以及 Windows 平台的应用程序清单。

fn main() {
  tauri_build::build()
}
