use crate::cli::{GroupAction, GroupUpdateArgs};
use crate::context::DashboardContext;
use crate::output;
use panel_client::SyncReport;
use panel_domain::{
    DragController, DragKind, DragTarget, FieldUpdate, GroupDraft, GroupId, GroupPatch,
};

pub async fn handle(ctx: &mut DashboardContext, action: GroupAction) -> anyhow::Result<()> {
    match action {
        GroupAction::List => {
            output::output_list(ctx.store.groups());
        }
        GroupAction::Create { name, icon } => {
            let mut draft = GroupDraft::new(name);
            draft.icon = icon;
            draft.validate()?;
            let group = ctx.api.create_group(draft).await?;
            ctx.refresh().await?;
            output::output_success(&group);
        }
        GroupAction::Update(args) => {
            let patch = build_patch(&args);
            if patch.is_empty() {
                output::output_error("No fields to update");
            }
            patch.validate()?;
            let group = ctx.api.update_group(args.id, patch).await?;
            ctx.refresh().await?;
            output::output_success(&group);
        }
        GroupAction::Delete { id } => {
            ctx.api.delete_group(id).await?;
            // the backend removes the group's cards with it
            ctx.refresh().await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        GroupAction::Move { id, onto } => {
            move_group(ctx, id, onto).await?;
        }
    }
    Ok(())
}

async fn move_group(ctx: &mut DashboardContext, id: GroupId, onto: GroupId) -> anyhow::Result<()> {
    let target = DragTarget::group(onto);

    let mut controller = DragController::new();
    controller.begin(&ctx.store, id, DragKind::Group)?;
    controller.update_hover_target(&mut ctx.store, target);
    let outcome = controller.end(&mut ctx.store, target);

    let report = ctx.persist(outcome).await;
    if matches!(
        report,
        SyncReport::FailedKept | SyncReport::FailedRefetched | SyncReport::FailedRestored
    ) {
        output::output_error("Failed to save group order");
    }
    output::output_list(ctx.store.groups());
    Ok(())
}

fn build_patch(args: &GroupUpdateArgs) -> GroupPatch {
    GroupPatch {
        name: args.name.clone(),
        icon: if args.clear_icon {
            FieldUpdate::Clear
        } else {
            args.icon
                .clone()
                .map(FieldUpdate::Set)
                .unwrap_or(FieldUpdate::NoChange)
        },
        sort_order: None,
        is_collapsed: args.collapsed,
    }
}
