//! # UnlockReactiveProperty
//!
//! 无锁的响应式属性句柄，直接复用 [`super::reactive_core::ReactiveProperty`]。
//! 适合高频更新场景（如传输进度），读写都不会等待。
//!
//! ## 使用示例
//! ```rust,no_run
//! use resumable_stream::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let prop = UnlockReactiveProperty::new(0u64);
//! prop.update(1);
//! prop.update_field(|v| *v += 1);
//! assert_eq!(prop.get_current(), Some(2));
//! ```

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

/// 轻量级响应式属性容器（纯通知机制）。
pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
