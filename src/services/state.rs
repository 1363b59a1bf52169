//! # 应用全局状态
//!
//! 通过 Tauri 的 `manage()` 注册，所有 command 通过 `State<AppState>` 访问。
//! 包含复习会话、深色模式偏好、偏好存储与生成器。

use std::sync::{Mutex, MutexGuard};

use crate::models::settings::{GeneratorConfig, Preference};
use crate::services::generator::Generator;
use crate::services::preference::{self, JsonFileStore, KeyValueStore, PreferenceSource};
use crate::services::session::SessionState;

pub struct AppState {
    /// 复习会话状态（仅通过 `services::review` 修改）
    pub session: Mutex<SessionState>,
    /// 当前深色模式偏好
    pub preference: Mutex<Preference>,
    /// 偏好持久化存储
    pub store: Box<dyn KeyValueStore>,
    /// 启动时加载的生成器配置
    pub config: GeneratorConfig,
    /// 按配置构建的生成器
    pub generator: Generator,
}

impl AppState {
    /// 构建应用状态，并按"已持久化值 → 平台信号 → 浅色"解析初始偏好
    ///
    /// 解析出的偏好会立即写回存储；写回失败只记录日志。
    ///
    /// # 错误
    /// 生成器的 HTTP 客户端创建失败时返回错误信息
    pub fn new(
        config: GeneratorConfig,
        store: JsonFileStore,
        platform_dark: Option<bool>,
    ) -> Result<Self, String> {
        let generator = Generator::from_config(&config)?;

        let (initial, source) = preference::resolve_preference(&store, platform_dark);
        log::info!(
            "深色模式初始值: {} (来源: {:?})",
            initial.dark_mode,
            source
        );
        if source != PreferenceSource::Persisted {
            if let Err(e) = preference::persist_preference(&store, initial) {
                log::warn!("写回深色模式偏好失败: {}", e);
            }
        }

        Ok(Self {
            session: Mutex::new(SessionState::new()),
            preference: Mutex::new(initial),
            store: Box::new(store),
            config,
            generator,
        })
    }

    /// 获取偏好锁；锁被污染时仍取出内部值
    pub fn lock_preference(&self) -> MutexGuard<'_, Preference> {
        self.preference
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::preference::DARK_MODE_KEY;

    #[test]
    fn test_new_state_writes_back_resolved_preference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let state = AppState::new(GeneratorConfig::default(), JsonFileStore::new(&path), Some(true))
            .unwrap();
        assert!(state.lock_preference().dark_mode);
        assert_eq!(state.store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        // 第二次启动时平台信号变化，已持久化的值优先
        let state =
            AppState::new(GeneratorConfig::default(), JsonFileStore::new(&path), Some(false))
                .unwrap();
        assert!(state.lock_preference().dark_mode);
        assert!(state.session.lock().unwrap().deck().is_empty());
    }
}
