use std::{path::PathBuf, sync::Arc};

use clap::{Args, Subcommand};
use medstore::{
    catalog::{ListingStatus, ModelId, ProductId, Scheme},
    forms::{SchemeForm, StatusForm},
    wizard::{Advance, WizardIds},
};
use medstore_app::{
    context::AppContext,
    drafts,
    notify::{Confirm, FixedAnswer},
};

use super::{print_ids, prompt::PromptConfirm, run_wizard};

#[derive(Debug, Args)]
pub(crate) struct ModelsCommand {
    #[command(subcommand)]
    command: ModelsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ModelsSubcommand {
    Add(AddArgs),
    AddColor(AddColorArgs),
    Delete(DeleteArgs),
    Status(StatusArgs),
    Scheme(SchemeArgs),
}

#[derive(Debug, Args)]
struct Target {
    /// Parent product id
    #[arg(long)]
    product: String,

    /// Model id
    #[arg(long)]
    model: String,
}

impl Target {
    fn ids(&self) -> (ProductId, ModelId) {
        (ProductId::new(&self.product), ModelId::new(&self.model))
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Parent product id
    #[arg(long)]
    product: String,

    /// YAML draft with model, color and details sections
    #[arg(long)]
    draft: PathBuf,
}

#[derive(Debug, Args)]
struct AddColorArgs {
    #[command(flatten)]
    target: Target,

    /// YAML draft with a color section
    #[arg(long)]
    draft: PathBuf,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    #[command(flatten)]
    target: Target,

    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

#[derive(Debug, Args)]
struct StatusArgs {
    #[command(flatten)]
    target: Target,

    /// New status (live, pending, enquiry)
    status: ListingStatus,
}

#[derive(Debug, Args)]
struct SchemeArgs {
    #[command(flatten)]
    target: Target,

    /// Scheme to toggle (sale, trading, recommended, company, valuable)
    scheme: Scheme,
}

pub(crate) async fn run(command: ModelsCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        ModelsSubcommand::Add(args) => add(args, context).await,
        ModelsSubcommand::AddColor(args) => add_color(args, context).await,
        ModelsSubcommand::Delete(args) => delete(args, context).await,
        ModelsSubcommand::Status(args) => status(args, context).await,
        ModelsSubcommand::Scheme(args) => scheme(args, context).await,
    }
}

async fn add(args: AddArgs, context: &AppContext) -> Result<(), String> {
    let draft: drafts::ModelDraft = drafts::read(&args.draft).map_err(|error| error.to_string())?;

    let stages = draft
        .into_stages(drafts::base_dir(&args.draft))
        .map_err(|error| error.to_string())?;

    let product = ProductId::new(args.product);
    let mut view = context.products();
    let mut session = view.add_model(&product);

    *session.forms_mut() = stages;

    let ids = run_wizard(session).await?;

    print_ids(&ids);

    view.wizard_advanced(&Advance::Finished(ids))
        .await
        .map_err(|error| format!("failed to reload products: {error}"))?;

    if let Some(row) = view.items().iter().find(|row| row.id == product) {
        println!("models: {}", row.models.len());
    }

    Ok(())
}

async fn add_color(args: AddColorArgs, context: &AppContext) -> Result<(), String> {
    let draft: drafts::ColorDraft = drafts::read(&args.draft).map_err(|error| error.to_string())?;

    let stages = draft
        .into_stages(drafts::base_dir(&args.draft))
        .map_err(|error| error.to_string())?;

    let (product, model) = args.target.ids();
    let mut session = context.products().add_color(&product, &model);

    *session.forms_mut() = stages;

    let ids = run_wizard(session).await?;

    print_ids(&ids);

    Ok(())
}

async fn delete(args: DeleteArgs, context: &AppContext) -> Result<(), String> {
    let confirm: Arc<dyn Confirm> = if args.yes {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(PromptConfirm)
    };

    let context = AppContext {
        confirm,
        ..context.clone()
    };

    let (product, model) = args.target.ids();
    let mut view = context.products();

    view.refresh()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    let deleted = view
        .delete_model(&product, &model)
        .await
        .map_err(|error| format!("failed to delete model: {error}"))?;

    if deleted {
        println!("deleted model {model}");
    } else {
        println!("cancelled");
    }

    Ok(())
}

async fn status(args: StatusArgs, context: &AppContext) -> Result<(), String> {
    let (product, model) = args.target.ids();

    let mut editor = context.products().edit_section(
        StatusForm {
            status: args.status,
        },
        WizardIds::for_model(product, model),
    );

    editor
        .save()
        .await
        .map_err(|error| format!("failed to change status: {error}"))?;

    println!("status: {}", args.status);

    Ok(())
}

async fn scheme(args: SchemeArgs, context: &AppContext) -> Result<(), String> {
    let (product_id, model_id) = args.target.ids();
    let view = context.products();

    let product = view
        .detail(&product_id)
        .await
        .map_err(|error| format!("failed to fetch product: {error}"))?;

    let update = product
        .model(&model_id)
        .ok_or_else(|| format!("product {product_id} has no model {model_id}"))?
        .details
        .schem
        .toggled(args.scheme);

    let mut editor = view.edit_section(
        SchemeForm::from(update),
        WizardIds::for_model(product_id, model_id),
    );

    editor
        .save()
        .await
        .map_err(|error| format!("failed to toggle scheme: {error}"))?;

    println!(
        "{}: {}",
        args.scheme,
        if update.enabled { "on" } else { "off" }
    );

    Ok(())
}
