use crate::cli::{SettingsAction, SettingsSetArgs};
use crate::context::DashboardContext;
use crate::output;
use panel_domain::{FieldUpdate, SettingsPatch};

pub async fn handle(ctx: &mut DashboardContext, action: SettingsAction) -> anyhow::Result<()> {
    match action {
        SettingsAction::Show => {
            output::output_success(&ctx.settings);
        }
        SettingsAction::Set(args) => {
            let patch = build_patch(&args);
            if patch.is_empty() {
                output::output_error("No fields to update");
            }
            let settings = ctx.api.update_settings(patch).await?;
            ctx.settings = settings;
            output::output_success(&ctx.settings);
        }
        SettingsAction::ToggleNetwork => {
            let settings = ctx.api.toggle_network().await?;
            ctx.settings = settings;
            output::output_success(&ctx.settings);
        }
    }
    Ok(())
}

fn build_patch(args: &SettingsSetArgs) -> SettingsPatch {
    SettingsPatch {
        theme: args.theme.clone(),
        wallpaper: if args.clear_wallpaper {
            FieldUpdate::Clear
        } else {
            args.wallpaper
                .clone()
                .map(FieldUpdate::Set)
                .unwrap_or(FieldUpdate::NoChange)
        },
        search_engine: args.search_engine.clone(),
        use_external_url: args.use_external_url,
    }
}
