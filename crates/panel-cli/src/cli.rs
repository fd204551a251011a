use clap::{Args, Parser, Subcommand};
use panel_domain::{CardId, GroupId};

#[derive(Parser)]
#[command(name = "panel")]
#[command(about = "A navigation dashboard client", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Backend base URL (or set PANEL_SERVER_URL)
    #[arg(long, value_name = "URL", env = "PANEL_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Card operations
    Card(CardCommand),
    /// Group operations
    Group(GroupCommand),
    /// Settings operations
    Settings(SettingsCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// List all cards in display order
    List,
    /// Get a specific card
    Get {
        #[arg(long)]
        id: CardId,
    },
    /// Create a new card
    Create(CardCreateArgs),
    /// Update a card
    Update(CardUpdateArgs),
    /// Delete a card
    Delete {
        #[arg(long)]
        id: CardId,
    },
    /// Drag a card onto another card or into a group
    Move(CardMoveArgs),
}

#[derive(Args)]
pub struct CardCreateArgs {
    #[arg(long)]
    pub title: String,
    /// Existing group to create the card in
    #[arg(long, conflicts_with = "new_group")]
    pub group_id: Option<GroupId>,
    /// Create this group first, then the card inside it
    #[arg(long)]
    pub new_group: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    /// iconify or url
    #[arg(long)]
    pub icon_type: Option<String>,
    #[arg(long)]
    pub icon_background: Option<String>,
    #[arg(long)]
    pub internal_url: Option<String>,
    #[arg(long)]
    pub external_url: Option<String>,
    /// Open the card in the current tab instead of a new one
    #[arg(long)]
    pub same_tab: bool,
    /// Open the card in an embedded iframe
    #[arg(long)]
    pub iframe: bool,
}

#[derive(Args)]
pub struct CardUpdateArgs {
    #[arg(long)]
    pub id: CardId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub group_id: Option<GroupId>,
    #[arg(long)]
    pub clear_group: bool,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub clear_icon: bool,
    /// iconify or url
    #[arg(long)]
    pub icon_type: Option<String>,
    #[arg(long)]
    pub icon_background: Option<String>,
    #[arg(long)]
    pub clear_icon_background: bool,
    #[arg(long)]
    pub internal_url: Option<String>,
    #[arg(long)]
    pub clear_internal_url: bool,
    #[arg(long)]
    pub external_url: Option<String>,
    #[arg(long)]
    pub clear_external_url: bool,
    #[arg(long)]
    pub open_in_new_tab: Option<bool>,
    #[arg(long)]
    pub open_in_iframe: Option<bool>,
}

#[derive(Args)]
pub struct CardMoveArgs {
    #[arg(long)]
    pub id: CardId,
    /// Drop onto another card's position, adopting its group
    #[arg(long)]
    pub onto_card: Option<CardId>,
    /// Drop onto a group header, joining that group
    #[arg(long)]
    pub into_group: Option<GroupId>,
}

// Group commands
#[derive(Args)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub action: GroupAction,
}

#[derive(Subcommand)]
pub enum GroupAction {
    /// List all groups in display order
    List,
    /// Create a new group
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Update a group
    Update(GroupUpdateArgs),
    /// Delete a group and the cards inside it
    Delete {
        #[arg(long)]
        id: GroupId,
    },
    /// Drag a group onto another group's position
    Move {
        #[arg(long)]
        id: GroupId,
        #[arg(long)]
        onto: GroupId,
    },
}

#[derive(Args)]
pub struct GroupUpdateArgs {
    #[arg(long)]
    pub id: GroupId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub clear_icon: bool,
    #[arg(long)]
    pub collapsed: Option<bool>,
}

// Settings commands
#[derive(Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Update settings fields
    Set(SettingsSetArgs),
    /// Switch between internal and external card URLs
    ToggleNetwork,
}

#[derive(Args)]
pub struct SettingsSetArgs {
    #[arg(long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub wallpaper: Option<String>,
    #[arg(long)]
    pub clear_wallpaper: bool,
    #[arg(long)]
    pub search_engine: Option<String>,
    #[arg(long)]
    pub use_external_url: Option<bool>,
}
