//! 字段装饰模块
//!
//! 按字段类型标签把元素字段转换为文档条目

mod data;
mod decorator;
mod registry;

pub use decorator::{BlockField, DecoratorStrategy, FieldDecorator, StandardField};
pub use registry::DecoratorRegistry;
pub(crate) use data::load_field_kinds;
