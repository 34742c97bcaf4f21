use alloc::sync::Arc;

/// 仅以实例身份参与比较与哈希的去重键。
///
/// # 教案式说明
/// - **意图 (Why)**：同一实例可能以不同名称多次登记，而值相等的两个不同实例必须各自保留；
///   因此去重不能依赖对象自身的 `PartialEq`/`Hash`；
/// - **逻辑 (How)**：取 `Arc` 指向的数据地址（丢弃胖指针元数据）作为键；
/// - **契约 (What)**：键只在对应 `Arc` 存活期间有意义；排序器在去重期间持有全部分桶，地址不会被复用。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey(usize);

impl IdentityKey {
    /// 提取 `object` 的身份键。
    pub fn of<T: ?Sized>(object: &Arc<T>) -> Self {
        Self(Arc::as_ptr(object).cast::<()>().addr())
    }
}
