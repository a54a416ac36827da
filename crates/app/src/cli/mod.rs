use std::sync::Arc;

use clap::{Parser, Subcommand};
use medstore::{money::find_currency, wizard::WizardIds};
use medstore_app::{
    config::{Config, logging::LoggingConfig},
    context::AppContext,
    wizards::{StageForms, WizardSession},
};

mod accessories;
mod enquiries;
mod models;
mod products;
mod prompt;
mod table;

#[derive(Debug, Parser)]
#[command(name = "medstore", about = "Medstore catalog administration", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Products(products::ProductsCommand),
    Models(models::ModelsCommand),
    Accessories(accessories::AccessoriesCommand),
    Enquiries(enquiries::EnquiriesCommand),
}

impl Cli {
    /// Parse flags after loading `.env`, if present.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        find_currency(&self.config.catalog.currency).map_err(|error| error.to_string())?;

        let context = AppContext::from_config(&self.config, Arc::new(prompt::PromptConfirm))
            .map_err(|error| format!("{error}"))?;

        let currency = self.config.catalog.currency.as_str();

        match self.command {
            Commands::Products(command) => products::run(command, &context, currency).await,
            Commands::Models(command) => models::run(command, &context).await,
            Commands::Accessories(command) => accessories::run(command, &context, currency).await,
            Commands::Enquiries(command) => enquiries::run(command, &context).await,
        }
    }
}

/// Save every stage of a prepared session. On failure the session is cancelled
/// and the stage that failed is named.
async fn run_wizard<S: StageForms>(mut session: WizardSession<S>) -> Result<WizardIds, String> {
    match session.save_all().await {
        Ok(ids) => Ok(ids),
        Err(error) => {
            let stage = session.current().map_or("unknown", |spec| spec.name);

            session.cancel();

            Err(format!("{stage} stage failed: {error}"))
        }
    }
}

fn print_ids(ids: &WizardIds) {
    if let Some(product) = &ids.product {
        println!("product_id: {product}");
    }

    if let Some(model) = &ids.model {
        println!("model_id: {model}");
    }

    if let Some(color) = &ids.color {
        println!("color_id: {color}");
    }

    if let Some(accessory) = &ids.accessory {
        println!("accessory_id: {accessory}");
    }
}
