use alloc::{sync::Arc, vec::Vec};
use core::fmt;

/// 将已分类对象写入分桶的策略。
///
/// # 教案级注释
/// - **意图 (Why)**：部分组件需要与其附属对象一起进入同一优先级，例如把内部依赖插在主对象之前；
///   以可注入策略代替继承覆写，调用方可全局或按分类替换；
/// - **契约 (What)**：
///   - 策略可以在分桶任意位置写入零个、一个或多个对象；
///   - 返回值为本次写入的条目数，排序器仅将其累加为容量提示，不依赖它保证正确性；
///   - 重复写入同一实例是允许的，最终去重在 `sorted_objects` 中完成。
pub trait BucketFill<T: ?Sized>: Send + Sync {
    /// 将 `object` 写入 `bucket`，返回写入的条目数。
    fn fill(&self, name: &str, object: Arc<T>, bucket: &mut Vec<Arc<T>>) -> usize;
}

/// 可在多个分类之间共享的填充策略句柄。
pub type SharedFill<T> = Arc<dyn BucketFill<T>>;

/// 默认策略：追加到分桶末尾并报告写入一条。
#[derive(Clone, Copy, Debug, Default)]
pub struct AppendFill;

impl<T: ?Sized> BucketFill<T> for AppendFill {
    fn fill(&self, _name: &str, object: Arc<T>, bucket: &mut Vec<Arc<T>>) -> usize {
        bucket.push(object);
        1
    }
}

/// 以闭包实现的填充策略。
pub struct FnFill<F>(F);

impl<F> FnFill<F> {
    /// 包装闭包。
    pub fn new(fill: F) -> Self {
        Self(fill)
    }
}

impl<T, F> BucketFill<T> for FnFill<F>
where
    T: ?Sized,
    F: Fn(&str, Arc<T>, &mut Vec<Arc<T>>) -> usize + Send + Sync,
{
    fn fill(&self, name: &str, object: Arc<T>, bucket: &mut Vec<Arc<T>>) -> usize {
        (self.0)(name, object, bucket)
    }
}

impl<F> fmt::Debug for FnFill<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFill")
    }
}
