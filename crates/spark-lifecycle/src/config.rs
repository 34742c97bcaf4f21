//! 生命周期阶段的分类顺序配置。
//!
//! 宿主的静态生命周期配置按阶段列出分类名称，名称由 [`CategoryCatalog`](crate::CategoryCatalog)
//! 解析为分类实例：
//!
//! ```toml
//! [phases]
//! initialise = ["infrastructure", "connector", "component"]
//! stop = ["component", "connector", "infrastructure"]
//! ```

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use serde::{Deserialize, Serialize};

use crate::{catalog::CategoryCatalog, error::ConfigurationError, phase::LifecyclePhase};

/// 各阶段的分类顺序。未配置的阶段保持 `None`。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseOrderings {
    #[serde(default, alias = "initialize", skip_serializing_if = "Option::is_none")]
    pub initialise: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispose: Option<Vec<String>>,
}

impl PhaseOrderings {
    fn slot(&self, phase: LifecyclePhase) -> &Option<Vec<String>> {
        match phase {
            LifecyclePhase::Initialise => &self.initialise,
            LifecyclePhase::Start => &self.start,
            LifecyclePhase::Stop => &self.stop,
            LifecyclePhase::Dispose => &self.dispose,
        }
    }

    fn slot_mut(&mut self, phase: LifecyclePhase) -> &mut Option<Vec<String>> {
        match phase {
            LifecyclePhase::Initialise => &mut self.initialise,
            LifecyclePhase::Start => &mut self.start,
            LifecyclePhase::Stop => &mut self.stop,
            LifecyclePhase::Dispose => &mut self.dispose,
        }
    }
}

/// `LifecycleOrderingConfig` 描述每个生命周期阶段使用的分类顺序。
///
/// # 教案级注释
/// - **意图 (Why)**：分类顺序属于宿主的静态配置，与分类实现分离后可以在不改代码的情况下调整启动/停止次序；
/// - **执行逻辑 (How)**：`from_toml_str` 使用 `toml` 将文本映射为强类型结构；`with_phase` 支持以代码装配；
/// - **契约 (What)**：
///   - 未知字段会被拒绝，拼写错误在解析阶段即暴露为 [`ConfigurationError::Parse`]；
///   - 读取未配置的阶段返回 [`ConfigurationError::PhaseNotConfigured`]；空列表是合法配置。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LifecycleOrderingConfig {
    #[serde(default)]
    pub phases: PhaseOrderings,
}

impl LifecycleOrderingConfig {
    /// 创建空配置。
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析 TOML 文本。
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(raw).map_err(|err| ConfigurationError::Parse {
            detail: err.to_string(),
        })
    }

    /// 序列化为 TOML 文本，便于输出当前生效的顺序。
    pub fn to_toml_string(&self) -> Result<String, ConfigurationError> {
        toml::to_string(self).map_err(|err| ConfigurationError::Serialize {
            detail: err.to_string(),
        })
    }

    /// 设置 `phase` 的分类顺序，覆盖已有值。
    pub fn with_phase<I, S>(mut self, phase: LifecyclePhase, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.phases.slot_mut(phase) = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// 读取 `phase` 的分类顺序。
    pub fn ordering(&self, phase: LifecyclePhase) -> Result<&[String], ConfigurationError> {
        self.phases
            .slot(phase)
            .as_deref()
            .ok_or(ConfigurationError::PhaseNotConfigured { phase })
    }

    /// 已配置的阶段，按迁移顺序排列。
    pub fn configured_phases(&self) -> impl Iterator<Item = LifecyclePhase> + '_ {
        LifecyclePhase::ALL
            .into_iter()
            .filter(|phase| self.phases.slot(*phase).is_some())
    }

    /// 校验所有已配置阶段都能在 `catalog` 中解析。
    pub fn validate<T: ?Sized>(&self, catalog: &CategoryCatalog<T>) -> Result<(), ConfigurationError> {
        for phase in self.configured_phases() {
            catalog.resolve(self.ordering(phase)?)?;
        }
        Ok(())
    }
}
