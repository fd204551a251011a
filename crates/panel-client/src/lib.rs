pub mod api;
pub mod http;
pub mod sync;

pub use api::PanelApi;
pub use http::{HttpPanelClient, MessageResponse};
pub use sync::{create_card_in_new_group, load_dashboard, SortSync, SyncReport};
