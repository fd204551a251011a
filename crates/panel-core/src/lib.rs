pub mod config;
pub mod error;
pub mod notice;
pub mod result;

pub use config::{AppConfig, RecoveryPolicy};
pub use error::PanelError;
pub use notice::{Notice, NoticeLevel, Notifier};
pub use result::PanelResult;
