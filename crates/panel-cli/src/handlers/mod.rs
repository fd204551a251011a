pub mod card;
pub mod group;
pub mod settings;
