use alloc::{borrow::Cow, sync::Arc};
use core::{any::Any, fmt, marker::PhantomData};

/// 生命周期分类：回答“对象 X 是否属于我”。
///
/// # 教案级注释
/// - **意图 (Why)**：宿主在不同阶段需要按能力分组调用组件，例如“基础设施先于连接器、连接器先于普通组件”；
///   分类以 trait 对象的形式提供，避免运行期反射；
/// - **契约 (What)**：
///   - `label` 需在同一目录内唯一，用于诊断日志与按名称解析顺序；
///   - `matches` 必须是纯函数：对同一对象多次调用返回相同结果，否则同一实例可能落入不同分桶；
/// - **风险提示 (Trade-offs)**：分类之间允许重叠，排序器只采用第一个命中的分类，重叠部分由顺序决定归属。
pub trait Category<T: ?Sized>: Send + Sync {
    /// 分类的稳定标签。
    fn label(&self) -> &str;

    /// 判断对象是否属于该分类。
    fn matches(&self, object: &T) -> bool;
}

/// 可在多个排序器之间共享的分类句柄。
pub type SharedCategory<T> = Arc<dyn Category<T>>;

/// 以闭包谓词表达的分类，适合基于能力查询（trait 方法）的判定。
pub struct FnCategory<F> {
    label: Cow<'static, str>,
    predicate: F,
}

impl<F> FnCategory<F> {
    /// 以标签与谓词构造分类。
    pub fn new(label: impl Into<Cow<'static, str>>, predicate: F) -> Self {
        Self {
            label: label.into(),
            predicate,
        }
    }
}

impl<T, F> Category<T> for FnCategory<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn label(&self) -> &str {
        &self.label
    }

    fn matches(&self, object: &T) -> bool {
        (self.predicate)(object)
    }
}

impl<F> fmt::Debug for FnCategory<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCategory")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// 以具体类型划分的分类，作用于 `dyn Any` 形态的对象。
///
/// - **契约 (What)**：仅当对象的具体类型恰为 `C` 时命中；默认标签为 `C` 的类型名；
/// - **风险提示**：`TypeId` 比较不感知 trait 实现关系，若需要“实现了某能力即命中”，请改用 [`FnCategory`]。
pub struct TypeCategory<C> {
    label: Cow<'static, str>,
    _marker: PhantomData<fn() -> C>,
}

impl<C: Any> TypeCategory<C> {
    /// 以类型名作为标签构造分类。
    pub fn new() -> Self {
        Self::labelled(core::any::type_name::<C>())
    }

    /// 以自定义标签构造分类。
    pub fn labelled(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            _marker: PhantomData,
        }
    }
}

impl<C: Any> Default for TypeCategory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Any> Category<dyn Any + Send + Sync> for TypeCategory<C> {
    fn label(&self) -> &str {
        &self.label
    }

    fn matches(&self, object: &(dyn Any + Send + Sync + 'static)) -> bool {
        object.is::<C>()
    }
}

impl<C: Any> Category<dyn Any> for TypeCategory<C> {
    fn label(&self) -> &str {
        &self.label
    }

    fn matches(&self, object: &(dyn Any + 'static)) -> bool {
        object.is::<C>()
    }
}

impl<C> fmt::Debug for TypeCategory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeCategory").field(&self.label).finish()
    }
}
