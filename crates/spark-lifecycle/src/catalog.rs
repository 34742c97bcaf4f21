use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use core::fmt;

use crate::{
    category::{Category, SharedCategory},
    config::LifecycleOrderingConfig,
    error::ConfigurationError,
    phase::LifecyclePhase,
    sorter::{DefaultObjectSorter, SorterBuilder},
};

/// `CategoryCatalog` 维护宿主可见的生命周期分类目录。
///
/// # 教案级注释
/// - **目标 (Why)**
///   - 分类由宿主的静态生命周期配置按名称引用，目录负责把名称解析为分类实例；
///   - 命名冲突在注册时即被捕获，而不是等到某个阶段排序时才暴露。
/// - **设计要点 (How)**
///   - 内部使用 `BTreeMap<String, SharedCategory<T>>`，遍历顺序稳定，便于诊断输出；
///   - 分类以 `Arc` 共享，每个阶段构造的排序器引用同一组实例。
/// - **契约 (What)**
///   - 名称即 [`Category::label`]，区分大小写；
///   - 解析顺序时，未知名称返回 [`ConfigurationError::UnknownCategory`]，重复名称返回
///     [`ConfigurationError::DuplicateOrdering`]。
pub struct CategoryCatalog<T: ?Sized> {
    entries: BTreeMap<String, SharedCategory<T>>,
}

impl<T: ?Sized> Default for CategoryCatalog<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: ?Sized> CategoryCatalog<T> {
    /// 创建空目录。
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册分类。
    pub fn register(
        &mut self,
        category: impl Category<T> + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        self.register_shared(Arc::new(category))
    }

    /// 注册已共享的分类句柄。
    ///
    /// - **前置条件**：目录中尚无同名分类；
    /// - **返回值**：成功时返回 `&mut Self` 以便链式注册；重名时返回
    ///   [`ConfigurationError::DuplicateCategory`]，目录保持不变。
    pub fn register_shared(
        &mut self,
        category: SharedCategory<T>,
    ) -> Result<&mut Self, ConfigurationError> {
        let label = category.label().to_string();
        if self.entries.contains_key(&label) {
            return Err(ConfigurationError::DuplicateCategory { label });
        }
        self.entries.insert(label, category);
        Ok(self)
    }

    /// 按名称读取分类。
    pub fn get(&self, label: &str) -> Option<&SharedCategory<T>> {
        self.entries.get(label)
    }

    /// 以名称顺序遍历全部分类。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedCategory<T>)> {
        self.entries
            .iter()
            .map(|(label, category)| (label.as_str(), category))
    }

    /// 已注册的分类数量。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 目录是否为空。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 将有序名称列表解析为分类列表，保持输入顺序。
    pub fn resolve<S: AsRef<str>>(
        &self,
        labels: &[S],
    ) -> Result<Vec<SharedCategory<T>>, ConfigurationError> {
        let mut resolved: Vec<SharedCategory<T>> = Vec::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            let label = label.as_ref();
            if labels[..index].iter().any(|prior| prior.as_ref() == label) {
                return Err(ConfigurationError::DuplicateOrdering {
                    label: label.to_string(),
                });
            }
            let category = self
                .entries
                .get(label)
                .ok_or_else(|| ConfigurationError::UnknownCategory {
                    label: label.to_string(),
                })?;
            resolved.push(Arc::clone(category));
        }
        Ok(resolved)
    }

    /// 为 `phase` 创建可继续定制填充策略的 [`SorterBuilder`]。
    pub fn builder_for(
        &self,
        config: &LifecycleOrderingConfig,
        phase: LifecyclePhase,
    ) -> Result<SorterBuilder<T>, ConfigurationError> {
        let ordering = config.ordering(phase)?;
        let categories = self.resolve(ordering)?;
        tracing::debug!(
            phase = phase.as_str(),
            categories = categories.len(),
            "lifecycle sorter assembled"
        );
        Ok(SorterBuilder::new(categories))
    }

    /// 为 `phase` 构造一个新的排序器，全部分类使用默认填充策略。
    ///
    /// - **使用方式**：生命周期管理器在每个阶段开始时调用一次，枚举注册表登记对象后取出顺序；
    /// - **错误**：阶段未配置、名称未知或重复时返回对应的 [`ConfigurationError`]。
    pub fn sorter_for(
        &self,
        config: &LifecycleOrderingConfig,
        phase: LifecyclePhase,
    ) -> Result<DefaultObjectSorter<T>, ConfigurationError> {
        self.builder_for(config, phase)?.build()
    }
}

impl<T: ?Sized> fmt::Debug for CategoryCatalog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryCatalog")
            .field("labels", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
