pub mod record_store;
pub mod template_store;

pub use record_store::{MemoryRecordStore, RecordStore};
pub use template_store::{DirTemplateStore, MemoryTemplateStore, TemplateStore};
