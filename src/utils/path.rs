//! # 路径工具函数
//!
//! 提供应用配置目录及其中各配置文件的路径：
//! - 应用配置目录（`<config_dir>/ai-flashcards/`）
//! - 偏好设置文件（`preferences.json`）
//! - 生成器配置文件（`generator-config.json`）

use std::path::{Path, PathBuf};

/// 应用配置目录名
const APP_DIR_NAME: &str = "ai-flashcards";

/// 获取应用配置目录的绝对路径
///
/// 使用 `dirs` crate 获取跨平台的用户配置目录：
/// - Windows: `C:\Users\username\AppData\Roaming\ai-flashcards`
/// - macOS: `/Users/username/Library/Application Support/ai-flashcards`
/// - Linux: `/home/username/.config/ai-flashcards`
///
/// # 错误
/// 无法确定用户配置目录时（如无 HOME 环境变量）返回错误信息。
pub fn get_app_config_path() -> Result<PathBuf, String> {
    let config = dirs::config_dir().ok_or_else(|| "无法获取用户配置目录".to_string())?;
    Ok(config.join(APP_DIR_NAME))
}

/// 偏好设置文件路径
pub fn preferences_file(config_dir: &Path) -> PathBuf {
    config_dir.join("preferences.json")
}

/// 生成器配置文件路径
pub fn generator_config_file(config_dir: &Path) -> PathBuf {
    config_dir.join("generator-config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_files_live_in_config_dir() {
        let dir = Path::new("base");
        assert_eq!(preferences_file(dir), dir.join("preferences.json"));
        assert_eq!(generator_config_file(dir), dir.join("generator-config.json"));
    }

    #[test]
    fn test_app_config_path_ends_with_app_dir() {
        // CI 环境可能没有配置目录，此时跳过
        if let Ok(path) = get_app_config_path() {
            assert!(path.ends_with(APP_DIR_NAME));
        }
    }
}
