use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// 宿主组件经历的生命周期阶段。
///
/// # 教案级注释
/// - **意图 (Why)**：每个阶段都可能使用不同的分类顺序（例如启动时基础设施先行、停止时反向），
///   生命周期管理器按阶段各自构造一次排序器；
/// - **契约 (What)**：`as_str` 返回稳定的小写名称，与 TOML 配置中的键保持一致；
///   [`FromStr`] 同时接受 `initialize` 拼写。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    /// 初始化。
    #[serde(alias = "initialize")]
    Initialise,
    /// 启动。
    Start,
    /// 停止。
    Stop,
    /// 释放。
    Dispose,
}

impl LifecyclePhase {
    /// 按状态迁移顺序排列的全部阶段。
    pub const ALL: [LifecyclePhase; 4] = [
        LifecyclePhase::Initialise,
        LifecyclePhase::Start,
        LifecyclePhase::Stop,
        LifecyclePhase::Dispose,
    ];

    /// 返回阶段的稳定名称。
    pub const fn as_str(self) -> &'static str {
        match self {
            LifecyclePhase::Initialise => "initialise",
            LifecyclePhase::Start => "start",
            LifecyclePhase::Stop => "stop",
            LifecyclePhase::Dispose => "dispose",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecyclePhase {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "initialise" | "initialize" => Ok(LifecyclePhase::Initialise),
            "start" => Ok(LifecyclePhase::Start),
            "stop" => Ok(LifecyclePhase::Stop),
            "dispose" => Ok(LifecyclePhase::Dispose),
            _ => Err(ConfigurationError::UnknownPhase {
                name: value.to_owned(),
            }),
        }
    }
}
