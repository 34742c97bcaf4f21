//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义排序器在装配阶段可能暴露的配置错误，调用方据此决定是否中止宿主启动；
//! - 分类、目录、阶段配置三条路径共用同一错误域，便于上层统一记录。
//!
//! ## 设计要求（What）
//! - 错误仅出现在构造/解析阶段，`add_object` 与 `sorted_objects` 不会失败；
//! - 未命中任何分类的对象、重复登记的对象都不是错误，属于排序器的正常路径。

use thiserror::Error;

use crate::phase::LifecyclePhase;

/// 生命周期排序器的配置错误。
///
/// # 教案式说明
/// - **意图 (Why)**：分类列表在宿主启动前一次性确定，任何一处配置错误都会让整个阶段的调用顺序失真，
///   因此统一为“致命、同步、不可重试”的错误类型；
/// - **契约 (What)**：所有变体均携带可读上下文，派生 [`thiserror::Error`] 以兼容 `std::error::Error`；
/// - **权衡 (Trade-offs)**：使用 `String` 保存标签，牺牲少量分配换取诊断可读性。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigurationError {
    /// 阶段顺序引用了目录中不存在的分类。
    #[error("lifecycle category `{label}` is not registered")]
    UnknownCategory { label: String },

    /// 目录中已存在同名分类。
    #[error("lifecycle category `{label}` already registered")]
    DuplicateCategory { label: String },

    /// 同一阶段的顺序中重复列出了某个分类。
    #[error("lifecycle category `{label}` appears more than once in a phase ordering")]
    DuplicateOrdering { label: String },

    /// 针对单个分类的填充策略指向了列表之外的分类。
    #[error("bucket fill override targets category `{label}` which is not part of the ordering")]
    FillTargetMissing { label: String },

    /// 无法识别的阶段名称。
    #[error("unknown lifecycle phase `{name}`")]
    UnknownPhase { name: String },

    /// 配置未给出该阶段的分类顺序。
    #[error("no category ordering configured for lifecycle phase `{phase}`")]
    PhaseNotConfigured { phase: LifecyclePhase },

    /// 顺序配置文本解析失败。
    #[error("failed to parse lifecycle ordering configuration: {detail}")]
    Parse { detail: String },

    /// 顺序配置无法序列化为 TOML 文本。
    #[error("failed to serialize lifecycle ordering configuration: {detail}")]
    Serialize { detail: String },
}
