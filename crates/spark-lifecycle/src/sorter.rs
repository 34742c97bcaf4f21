#![allow(clippy::module_name_repetitions)]

use alloc::{string::String, sync::Arc, vec::Vec};
use core::fmt;
use std::collections::HashSet;

use crate::{
    category::{Category, SharedCategory},
    error::ConfigurationError,
    fill::{AppendFill, BucketFill, SharedFill},
    identity::IdentityKey,
};

/// 生命周期管理器依赖的排序契约。
///
/// # 教案级注释
/// - **意图 (Why)**：管理器在每个阶段枚举注册表中的对象，先逐个登记，再按返回顺序调用
///   initialise/start/stop/dispose；以 trait 隔离具体分桶策略，便于替换实现；
/// - **契约 (What)**：
///   - `add_object` 不返回错误，未命中分类的对象被静默忽略；
///   - `sorted_objects` 每次都根据当前状态重新推导，且按实例身份去重。
pub trait ObjectSorter<T: ?Sized> {
    /// 登记一个以 `name` 注册的对象。`name` 仅用于诊断。
    fn add_object(&mut self, name: &str, object: Arc<T>);

    /// 返回按分类优先级展开、按身份去重后的对象序列。
    fn sorted_objects(&self) -> Vec<Arc<T>>;
}

/// 单个分类对应的槽位：分类、填充策略与惰性分配的分桶。
struct Slot<T: ?Sized> {
    category: SharedCategory<T>,
    fill: SharedFill<T>,
    bucket: Option<Vec<Arc<T>>>,
}

/// 类型优先级排序器。
///
/// # 教案级注释
/// - **设计目的 (Why)**
///   - 宿主启动/停止组件的先后顺序由一组有序分类决定，顺序错误会导致依赖尚未就绪的组件被提前启动；
///   - 排序器把无序的注册流归入优先级分桶，再展开为单一序列交给生命周期管理器。
/// - **关键流程 (How)**
///   1. `add_object` 按下标顺序测试分类，首个命中者获得对象，其后的分类不再测试；
///   2. 命中分类的分桶在首次使用时分配，写入动作委托给该分类的 [`BucketFill`]；
///   3. `sorted_objects` 依次拼接分桶 0..N-1，跳过未分配的分桶，并以 [`IdentityKey`] 保留首次出现。
/// - **契约说明 (What)**
///   - 分类列表在构造时固定；空列表合法，此时所有对象都会被忽略；
///   - 分桶内部允许出现重复实例，去重只发生在展开阶段；
///   - `sorted_objects` 是当前分桶状态的纯函数，在其后继续 `add_object` 也会反映到下一次调用。
/// - **风险提示 (Trade-offs)**
///   - 排序器不提供内部同步，多线程登记时需由调用方在外部串行化（`&mut self` 已在编译期约束）；
///   - 不支持移除对象或在取出后重新排序，每个生命周期阶段应构造新的实例。
pub struct DefaultObjectSorter<T: ?Sized> {
    slots: Vec<Slot<T>>,
    object_count: usize,
}

impl<T: ?Sized> DefaultObjectSorter<T> {
    /// 以有序分类列表构造排序器，所有分类使用 [`AppendFill`]。
    ///
    /// - **输入参数**：`categories` 下标 0 的优先级最高；
    /// - **后置条件**：返回的排序器尚未分配任何分桶。
    pub fn new(categories: impl IntoIterator<Item = SharedCategory<T>>) -> Self {
        let fill: SharedFill<T> = Arc::new(AppendFill);
        Self::from_parts(
            categories
                .into_iter()
                .map(|category| (category, Arc::clone(&fill)))
                .collect(),
        )
    }

    /// 创建可定制填充策略的 [`SorterBuilder`]。
    pub fn builder(categories: impl IntoIterator<Item = SharedCategory<T>>) -> SorterBuilder<T> {
        SorterBuilder::new(categories)
    }

    fn from_parts(parts: Vec<(SharedCategory<T>, SharedFill<T>)>) -> Self {
        let slots = parts
            .into_iter()
            .map(|(category, fill)| Slot {
                category,
                fill,
                bucket: None,
            })
            .collect();
        Self {
            slots,
            object_count: 0,
        }
    }

    /// 登记对象，详见 [`ObjectSorter::add_object`]。
    pub fn add_object(&mut self, name: &str, object: Arc<T>) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.category.matches(&*object) {
                continue;
            }
            let bucket = slot.bucket.get_or_insert_with(Vec::new);
            let added = slot.fill.fill(name, object, bucket);
            self.object_count = self.object_count.saturating_add(added);
            tracing::debug!(
                name,
                category = slot.category.label(),
                index,
                added,
                "lifecycle object classified"
            );
            return;
        }
        tracing::trace!(name, "lifecycle object matched no category; skipped");
    }

    /// 展开分桶并按身份去重，详见 [`ObjectSorter::sorted_objects`]。
    pub fn sorted_objects(&self) -> Vec<Arc<T>> {
        // 填充策略的计数不可信，容量以分桶中的实际条目数为上限。
        let entries: usize = self
            .slots
            .iter()
            .filter_map(|slot| slot.bucket.as_ref())
            .map(Vec::len)
            .sum();
        let capacity = self.object_count.min(entries);
        let mut seen = HashSet::with_capacity(capacity);
        let mut sorted = Vec::with_capacity(capacity);
        let mut buckets = 0_usize;

        for bucket in self.slots.iter().filter_map(|slot| slot.bucket.as_ref()) {
            buckets += 1;
            for object in bucket {
                if seen.insert(IdentityKey::of(object)) {
                    sorted.push(Arc::clone(object));
                }
            }
        }

        tracing::debug!(
            buckets,
            entries,
            unique = sorted.len(),
            "lifecycle objects sorted"
        );
        sorted
    }

    /// 分类数量。
    pub fn category_count(&self) -> usize {
        self.slots.len()
    }

    /// 按优先级顺序返回分类标签。
    pub fn category_labels(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.category.label())
    }

    /// 各填充策略报告的写入条目总数（饱和累加），仅作容量提示。
    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// 指定分类分桶中的条目数（含重复实例）；未分配或越界时为 0。
    pub fn bucket_len(&self, index: usize) -> usize {
        self.slots
            .get(index)
            .and_then(|slot| slot.bucket.as_ref())
            .map_or(0, Vec::len)
    }

    /// 是否尚无任何条目进入分桶。
    pub fn is_empty(&self) -> bool {
        self.slots
            .iter()
            .filter_map(|slot| slot.bucket.as_ref())
            .all(Vec::is_empty)
    }
}

impl<T: ?Sized> ObjectSorter<T> for DefaultObjectSorter<T> {
    fn add_object(&mut self, name: &str, object: Arc<T>) {
        DefaultObjectSorter::add_object(self, name, object);
    }

    fn sorted_objects(&self) -> Vec<Arc<T>> {
        DefaultObjectSorter::sorted_objects(self)
    }
}

impl<T: ?Sized> fmt::Debug for DefaultObjectSorter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.category_labels().collect();
        f.debug_struct("DefaultObjectSorter")
            .field("categories", &labels)
            .field("object_count", &self.object_count)
            .finish()
    }
}

/// `SorterBuilder` 为排序器装配全局或按分类的填充策略。
///
/// # 教案级注释
/// - **意图 (Why)**：少数分类需要在写入主对象时附带插入关联对象，其余分类保持默认追加；
/// - **执行逻辑 (How)**：`fill` 替换全局默认策略，`fill_for` 以分类标签登记覆写，`build` 时逐一解析；
/// - **契约 (What)**：
///   - 分类标签在列表中重复时返回 [`ConfigurationError::DuplicateOrdering`]；
///   - 覆写指向列表外的标签时返回 [`ConfigurationError::FillTargetMissing`]；
///   - 同一标签多次覆写时以最后一次为准。
pub struct SorterBuilder<T: ?Sized> {
    categories: Vec<SharedCategory<T>>,
    default_fill: SharedFill<T>,
    overrides: Vec<(String, SharedFill<T>)>,
}

impl<T: ?Sized> SorterBuilder<T> {
    /// 以有序分类列表创建 Builder。
    pub fn new(categories: impl IntoIterator<Item = SharedCategory<T>>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            default_fill: Arc::new(AppendFill),
            overrides: Vec::new(),
        }
    }

    /// 替换所有分类共用的默认填充策略。
    pub fn fill(mut self, fill: impl BucketFill<T> + 'static) -> Self {
        self.default_fill = Arc::new(fill);
        self
    }

    /// 为标签为 `label` 的分类指定填充策略。
    pub fn fill_for(mut self, label: impl Into<String>, fill: impl BucketFill<T> + 'static) -> Self {
        self.overrides.push((label.into(), Arc::new(fill)));
        self
    }

    /// 校验配置并构建排序器。
    pub fn build(self) -> Result<DefaultObjectSorter<T>, ConfigurationError> {
        let SorterBuilder {
            categories,
            default_fill,
            overrides,
        } = self;

        for (index, category) in categories.iter().enumerate() {
            let label = category.label();
            if categories[..index].iter().any(|prior| prior.label() == label) {
                return Err(ConfigurationError::DuplicateOrdering {
                    label: label.into(),
                });
            }
        }

        let mut fills: Vec<SharedFill<T>> = categories
            .iter()
            .map(|_| Arc::clone(&default_fill))
            .collect();
        for (label, fill) in overrides {
            let index = categories
                .iter()
                .position(|category| category.label() == label)
                .ok_or(ConfigurationError::FillTargetMissing { label })?;
            fills[index] = fill;
        }

        Ok(DefaultObjectSorter::from_parts(
            categories.into_iter().zip(fills).collect(),
        ))
    }
}

impl<T: ?Sized> fmt::Debug for SorterBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.categories.iter().map(|c| c.label()).collect();
        let overrides: Vec<&str> = self.overrides.iter().map(|(l, _)| l.as_str()).collect();
        f.debug_struct("SorterBuilder")
            .field("categories", &labels)
            .field("overrides", &overrides)
            .finish()
    }
}
