pub mod firebase_client;
pub mod template_client;

pub use firebase_client::FirebaseRecordStore;
pub use template_client::HttpTemplateStore;
