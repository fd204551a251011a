pub mod card;
pub mod drag;
pub mod field_update;
pub mod group;
pub mod settings;
pub mod sort;
pub mod store;

pub use card::{Card, CardDraft, CardId, CardPatch, IconKind};
pub use drag::{DragController, DragKind, DragTarget, DropOutcome};
pub use field_update::FieldUpdate;
pub use group::{Group, GroupDraft, GroupId, GroupKey, GroupPatch};
pub use settings::{Settings, SettingsPatch};
pub use sort::{card_sort_batch, group_sort_batch, move_item, CardSortItem, GroupSortItem};
pub use store::{EntitySnapshot, EntityStore, GroupedCards};
