use std::path::PathBuf;

use clap::{Args, Subcommand};
use medstore::catalog::StatusFilter;
use medstore_app::{context::AppContext, drafts};

use super::{
    print_ids, run_wizard,
    table::{amount, or_dash, render},
};

#[derive(Debug, Args)]
pub(crate) struct AccessoriesCommand {
    #[command(subcommand)]
    command: AccessoriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccessoriesSubcommand {
    List(ListArgs),
    Create(CreateArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Status to fetch (all, pending, live)
    #[arg(long, default_value_t = StatusFilter::All)]
    status: StatusFilter,

    /// Case-insensitive filter over title and category
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// YAML draft with accessory, images and details sections
    #[arg(long)]
    draft: PathBuf,
}

pub(crate) async fn run(
    command: AccessoriesCommand,
    context: &AppContext,
    currency: &str,
) -> Result<(), String> {
    match command.command {
        AccessoriesSubcommand::List(args) => list(args, context, currency).await,
        AccessoriesSubcommand::Create(args) => create(args, context).await,
    }
}

async fn list(args: ListArgs, context: &AppContext, currency: &str) -> Result<(), String> {
    let mut view = context.accessories().with_status(args.status);

    view.refresh()
        .await
        .map_err(|error| format!("failed to list accessories: {error}"))?;

    if let Some(query) = args.search {
        view.set_query(query);
    }

    let visible = view.visible();

    if visible.is_empty() {
        println!("no accessories found");
        return Ok(());
    }

    let rows = visible.into_iter().map(|accessory| {
        [
            accessory.id.to_string(),
            accessory.product_title.clone(),
            or_dash(accessory.product_category.as_deref()),
            accessory.stock.to_string(),
            accessory.status.to_string(),
            amount(
                Some(accessory.final_price.unwrap_or(accessory.price)),
                currency,
            ),
        ]
    });

    println!(
        "{}",
        render(
            ["id", "title", "category", "stock", "status", "price"],
            rows,
            3..4
        )
    );

    Ok(())
}

async fn create(args: CreateArgs, context: &AppContext) -> Result<(), String> {
    let draft: drafts::AccessoryDraft =
        drafts::read(&args.draft).map_err(|error| error.to_string())?;

    let stages = draft
        .into_stages(drafts::base_dir(&args.draft))
        .map_err(|error| error.to_string())?;

    let mut session = context.accessory_wizard();

    *session.forms_mut() = stages;

    let ids = run_wizard(session).await?;

    print_ids(&ids);

    Ok(())
}
