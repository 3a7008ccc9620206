mod structs;

use std::sync::OnceLock;

pub use structs::*;

static CONFIG: OnceLock<StaticConfig> = OnceLock::new();

/// 加载并缓存全局配置，重复调用返回同一实例
pub fn init_config() -> &'static StaticConfig {
    CONFIG.get_or_init(StaticConfig::load)
}

/// 获取全局配置；若尚未初始化则加载
pub fn get_config() -> &'static StaticConfig {
    CONFIG.get_or_init(StaticConfig::load)
}
