use crate::cli::{CardAction, CardCreateArgs, CardMoveArgs, CardUpdateArgs};
use crate::context::DashboardContext;
use crate::output;
use panel_client::{create_card_in_new_group, SyncReport};
use panel_domain::{
    CardDraft, CardPatch, DragController, DragKind, DragTarget, FieldUpdate, IconKind,
};

pub async fn handle(ctx: &mut DashboardContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::List => {
            output::output_list(ctx.store.cards());
        }
        CardAction::Get { id } => {
            let card = ctx.api.get_card(id).await?;
            output::output_success(&card);
        }
        CardAction::Create(args) => {
            let draft = build_draft(&args).map_err(|e| anyhow::anyhow!(e))?;
            if let Some(group_name) = &args.new_group {
                let (group, card) =
                    create_card_in_new_group(ctx.api.as_ref(), draft, group_name).await?;
                ctx.refresh().await?;
                output::output_success(serde_json::json!({ "group": group, "card": card }));
            } else {
                draft.validate()?;
                let card = ctx.api.create_card(draft).await?;
                ctx.refresh().await?;
                output::output_success(&card);
            }
        }
        CardAction::Update(args) => {
            let patch = build_patch(&args).map_err(|e| anyhow::anyhow!(e))?;
            if patch.is_empty() {
                output::output_error("No fields to update");
            }
            patch.validate()?;
            let card = ctx.api.update_card(args.id, patch).await?;
            ctx.refresh().await?;
            output::output_success(&card);
        }
        CardAction::Delete { id } => {
            ctx.api.delete_card(id).await?;
            ctx.refresh().await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        CardAction::Move(args) => {
            let target = resolve_target(&args);

            let mut controller = DragController::new();
            controller.begin(&ctx.store, args.id, DragKind::Card)?;
            controller.update_hover_target(&mut ctx.store, target);
            let outcome = controller.end(&mut ctx.store, target);

            let report = ctx.persist(outcome).await;
            if matches!(
                report,
                SyncReport::FailedKept | SyncReport::FailedRefetched | SyncReport::FailedRestored
            ) {
                output::output_error("Failed to save card order");
            }
            output::output_list(ctx.store.cards());
        }
    }
    Ok(())
}

fn resolve_target(args: &CardMoveArgs) -> DragTarget {
    match (args.onto_card, args.into_group) {
        (Some(card_id), None) => DragTarget::card(card_id),
        (None, Some(group_id)) => DragTarget::group(group_id),
        _ => output::output_error("Specify exactly one of --onto-card or --into-group"),
    }
}

fn build_draft(args: &CardCreateArgs) -> Result<CardDraft, String> {
    let mut draft = CardDraft::new(args.title.clone());
    draft.group_id = args.group_id;
    draft.description = args.description.clone();
    draft.icon = args.icon.clone();
    if let Some(kind) = &args.icon_type {
        draft.icon_type = parse_icon_kind(kind)?;
    }
    draft.icon_background = args.icon_background.clone();
    draft.internal_url = args.internal_url.clone();
    draft.external_url = args.external_url.clone();
    draft.open_in_new_tab = !args.same_tab;
    draft.open_in_iframe = args.iframe;
    Ok(draft)
}

fn build_patch(args: &CardUpdateArgs) -> Result<CardPatch, String> {
    let icon_type = match &args.icon_type {
        Some(kind) => Some(parse_icon_kind(kind)?),
        None => None,
    };
    Ok(CardPatch {
        title: args.title.clone(),
        group_id: tri_state(args.clear_group, args.group_id),
        description: tri_state(args.clear_description, args.description.clone()),
        icon: tri_state(args.clear_icon, args.icon.clone()),
        icon_type,
        icon_background: tri_state(args.clear_icon_background, args.icon_background.clone()),
        internal_url: tri_state(args.clear_internal_url, args.internal_url.clone()),
        external_url: tri_state(args.clear_external_url, args.external_url.clone()),
        open_in_new_tab: args.open_in_new_tab,
        open_in_iframe: args.open_in_iframe,
        sort_order: None,
    })
}

fn tri_state<T>(clear: bool, value: Option<T>) -> FieldUpdate<T> {
    if clear {
        FieldUpdate::Clear
    } else {
        value.map(FieldUpdate::Set).unwrap_or(FieldUpdate::NoChange)
    }
}

fn parse_icon_kind(s: &str) -> Result<IconKind, String> {
    match s.to_lowercase().as_str() {
        "iconify" => Ok(IconKind::Iconify),
        "url" => Ok(IconKind::Url),
        _ => Err(format!(
            "Invalid icon type '{}'. Valid values: iconify, url",
            s
        )),
    }
}
