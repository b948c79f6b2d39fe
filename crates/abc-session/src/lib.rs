//! # ABC Session
//!
//! 目前上傳資料集的持有與重算

pub mod session;

// Re-export 主要類型
pub use session::{Dataset, InventorySession, UploadId};
