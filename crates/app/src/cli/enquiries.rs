use clap::{Args, Subcommand};
use medstore::catalog::ProductId;
use medstore_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct EnquiriesCommand {
    #[command(subcommand)]
    command: EnquiriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum EnquiriesSubcommand {
    Submit(SubmitArgs),
}

#[derive(Debug, Args)]
struct SubmitArgs {
    /// Product the enquiry is about
    #[arg(long)]
    product: String,

    /// Contact name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone
    #[arg(long)]
    phone: String,

    /// Message to the sales team
    #[arg(long)]
    message: String,
}

pub(crate) async fn run(command: EnquiriesCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        EnquiriesSubcommand::Submit(args) => submit(args, context).await,
    }
}

async fn submit(args: SubmitArgs, context: &AppContext) -> Result<(), String> {
    let storefront = context.storefront();

    let id = ProductId::new(args.product);

    let product = storefront.product(&id).await.map_err(|error| {
        if error.is_not_found() {
            format!("no product {id}")
        } else {
            format!("failed to fetch product: {}", error.user_message())
        }
    })?;

    let mut editor = storefront.enquire_about_product(&product);

    let form = editor.form_mut();
    form.name = args.name;
    form.email = args.email;
    form.phone = args.phone;
    form.message = args.message;

    editor
        .save()
        .await
        .map_err(|error| format!("failed to submit enquiry: {}", error.user_message()))?;

    println!("enquiry sent for {}", product.product_title);

    Ok(())
}
