#![deny(unsafe_code)]
#![doc = "spark-lifecycle: 按类型优先级决定宿主组件接收生命周期迁移（initialise/start/stop/dispose）的先后顺序。"]
#![doc = ""]
#![doc = "生命周期管理器在每个阶段构造一次 [`DefaultObjectSorter`]，枚举注册表逐个登记对象，"]
#![doc = "再按 [`ObjectSorter::sorted_objects`] 返回的顺序调用对应的生命周期方法。"]
#![doc = "排序器本身不调用生命周期方法，也不解析对象之间的依赖图。"]

extern crate alloc;

pub mod catalog;
pub mod category;
pub mod config;
pub mod error;
pub mod fill;
pub mod identity;
pub mod phase;
pub mod sorter;

pub use catalog::CategoryCatalog;
pub use category::{Category, FnCategory, SharedCategory, TypeCategory};
pub use config::{LifecycleOrderingConfig, PhaseOrderings};
pub use error::ConfigurationError;
pub use fill::{AppendFill, BucketFill, FnFill, SharedFill};
pub use identity::IdentityKey;
pub use phase::LifecyclePhase;
pub use sorter::{DefaultObjectSorter, ObjectSorter, SorterBuilder};
