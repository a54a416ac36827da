use std::path::PathBuf;

use clap::{Args, Subcommand};
use medstore::catalog::{Product, ProductId, Scheme, StatusFilter};
use medstore_app::{context::AppContext, drafts, listing::ListError};

use super::{
    print_ids, run_wizard,
    table::{amount, or_dash, render},
};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    List(ListArgs),
    Show(ShowArgs),
    Categories(CategoriesArgs),
    Create(CreateArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Status to fetch (all, pending, live)
    #[arg(long, default_value_t = StatusFilter::All)]
    status: StatusFilter,

    /// Case-insensitive filter over title, category and model names
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Product id
    id: String,
}

#[derive(Debug, Args)]
struct CategoriesArgs {
    /// Status to draw categories from
    #[arg(long, default_value_t = StatusFilter::All)]
    status: StatusFilter,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// YAML draft with product, model, color and details sections
    #[arg(long)]
    draft: PathBuf,
}

pub(crate) async fn run(
    command: ProductsCommand,
    context: &AppContext,
    currency: &str,
) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list(args, context, currency).await,
        ProductsSubcommand::Show(args) => show(args, context, currency).await,
        ProductsSubcommand::Categories(args) => categories(args, context).await,
        ProductsSubcommand::Create(args) => create(args, context).await,
    }
}

async fn list(args: ListArgs, context: &AppContext, currency: &str) -> Result<(), String> {
    let mut view = context.products().with_status(args.status);

    view.refresh()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if let Some(query) = args.search {
        view.set_query(query);
    }

    let visible = view.visible();

    if visible.is_empty() {
        println!("no products found");
        return Ok(());
    }

    let rows = visible.into_iter().map(|product| product_row(product, currency));

    println!(
        "{}",
        render(
            ["id", "title", "category", "models", "status", "price"],
            rows,
            3..4
        )
    );

    Ok(())
}

fn product_row(product: &Product, currency: &str) -> [String; 6] {
    [
        product.id.to_string(),
        product.product_title.clone(),
        or_dash(product.product_category.as_deref()),
        product.models.len().to_string(),
        product.status.to_string(),
        amount(product.final_price.or(product.price), currency),
    ]
}

async fn show(args: ShowArgs, context: &AppContext, currency: &str) -> Result<(), String> {
    let view = context.products();

    let id = ProductId::new(args.id);

    let product = view.detail(&id).await.map_err(|error| match error {
        ListError::Api(api) if api.is_not_found() => format!("no product {id}"),
        other => format!("failed to fetch product: {other}"),
    })?;

    println!("product_id: {}", product.id);
    println!("title: {}", product.product_title);
    println!("category: {}", or_dash(product.product_category.as_deref()));
    println!("status: {}", product.status);
    println!("price: {}", amount(product.price, currency));
    println!("final_price: {}", amount(product.final_price, currency));
    println!(
        "thumbnail: {}",
        or_dash(product.thumbnail().map(|image| image.url.as_str()))
    );

    if product.models.is_empty() {
        println!("no models");
        return Ok(());
    }

    let rows = product.models.iter().flat_map(|model| {
        let schemes = model
            .details
            .schem
            .enabled()
            .map(Scheme::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        model.colors.iter().map(move |color| {
            let price = color
                .price_in(currency)
                .map(|entry| entry.final_price.unwrap_or(entry.price));

            [
                model.model_id.to_string(),
                model.model_name.clone(),
                model.status.to_string(),
                color.color_name.clone(),
                color.stock.to_string(),
                amount(price, currency),
                or_dash(Some(&schemes)),
            ]
        })
    });

    println!(
        "{}",
        render(
            ["model_id", "model", "status", "color", "stock", "price", "schemes"],
            rows,
            4..6
        )
    );

    Ok(())
}

async fn categories(args: CategoriesArgs, context: &AppContext) -> Result<(), String> {
    let mut view = context.products().with_status(args.status);

    view.refresh()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    for category in view.categories(&context.excluded_categories) {
        println!("{category}");
    }

    Ok(())
}

async fn create(args: CreateArgs, context: &AppContext) -> Result<(), String> {
    let draft: drafts::ProductDraft =
        drafts::read(&args.draft).map_err(|error| error.to_string())?;

    let stages = draft
        .into_stages(drafts::base_dir(&args.draft))
        .map_err(|error| error.to_string())?;

    let mut session = context.product_wizard();

    *session.forms_mut() = stages;

    let ids = run_wizard(session).await?;

    print_ids(&ids);

    Ok(())
}

