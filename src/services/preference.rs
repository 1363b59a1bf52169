//! # 深色模式偏好服务
//!
//! 偏好通过 `KeyValueStore` 接口持久化，存储机制（JSON 文件、内存等）可替换，
//! 不影响会话逻辑。
//!
//! ## 初始值解析顺序
//! 1. 已持久化的值（`darkMode` 键，`"true"` / `"false"`）
//! 2. 平台外观信号（主窗口当前主题）
//! 3. 默认浅色

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::settings::Preference;

/// 深色模式在存储中的固定键名
pub const DARK_MODE_KEY: &str = "darkMode";

/// 简单的字符串键值存储接口
pub trait KeyValueStore: Send + Sync {
    /// 读取键对应的值；键不存在时返回 `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// 写入键值
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// 基于单个 JSON 文件的键值存储
///
/// 文件内容为扁平的字符串对象，如 `{"darkMode": "true"}`。
/// 每次写入都会读取整个文件、修改后整体覆写；文件不存在视为空存储。
pub struct JsonFileStore {
    path: PathBuf,
    /// 串行化同一进程内的读-改-写
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, String> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("读取偏好文件失败: {}", e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| format!("解析偏好文件失败: {}", e))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("序列化偏好失败: {}", e))?;

        std::fs::write(&self.path, content).map_err(|e| format!("写入偏好文件失败: {}", e))
    }
}

fn ensure_dir(dir: &Path) -> Result<(), String> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| format!("创建配置目录失败: {}", e))?;
    }
    Ok(())
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| "偏好存储锁已损坏".to_string())?;

        // 文件损坏时以空存储覆盖，保证偏好仍能写回
        let mut entries = self.read_all().unwrap_or_else(|e| {
            log::warn!("{}，将重建偏好文件", e);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

/// 初始值来源（仅用于日志）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceSource {
    Persisted,
    Platform,
    Default,
}

/// 解析启动时的深色模式偏好
///
/// # 参数
/// - `store` - 偏好存储
/// - `platform_dark` - 平台外观信号；无法获取时为 None
pub fn resolve_preference(
    store: &dyn KeyValueStore,
    platform_dark: Option<bool>,
) -> (Preference, PreferenceSource) {
    let persisted = match store.get(DARK_MODE_KEY) {
        Ok(value) => value.and_then(|v| v.trim().parse::<bool>().ok()),
        Err(e) => {
            log::warn!("读取深色模式偏好失败: {}", e);
            None
        }
    };

    let (dark_mode, source) = match (persisted, platform_dark) {
        (Some(dark), _) => (dark, PreferenceSource::Persisted),
        (None, Some(dark)) => (dark, PreferenceSource::Platform),
        (None, None) => (false, PreferenceSource::Default),
    };

    (Preference { dark_mode }, source)
}

/// 写回偏好
pub fn persist_preference(store: &dyn KeyValueStore, preference: Preference) -> Result<(), String> {
    store.set(DARK_MODE_KEY, &preference.dark_mode.to_string())
}

/// 切换深色模式并写回存储
///
/// 内存中的值总会被切换；写入失败时返回错误，由调用方决定如何提示。
pub fn toggle_dark_mode(
    preference: &mut Preference,
    store: &dyn KeyValueStore,
) -> Result<Preference, String> {
    preference.dark_mode = !preference.dark_mode;
    persist_preference(store, *preference)?;
    Ok(*preference)
}
