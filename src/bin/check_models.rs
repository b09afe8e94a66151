//! Lists the Gemini models the configured key can use.

use std::process::ExitCode;

use clap::Parser;
use recipe_service::{config::AppConfig, gemini::GeminiGenerator};

#[derive(Debug, Parser)]
#[command(name = "check-models", about = "List Gemini models available to GOOGLE_API_KEY")]
struct Args {
    /// How many models to print.
    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Name fragment to look for. Defaults to the configured GEMINI_MODEL.
    #[arg(long)]
    find: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = AppConfig::load();

    let Some(api_key) = config.api_key.as_deref() else {
        eprintln!("GOOGLE_API_KEY is not set (checked the environment, .env.local and .env)");
        return ExitCode::FAILURE;
    };

    let client = match GeminiGenerator::new(
        api_key,
        config.model.as_str(),
        config.api_base_url.as_str(),
        config.timeout(),
    ) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Client error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let models = match client.list_models().await {
        Ok(models) => models,
        Err(err) => {
            eprintln!("API error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Available models (first {}):", args.limit.min(models.len()));
    for model in models.iter().take(args.limit) {
        println!(
            "- {} ({})",
            model.name,
            model.supported_generation_methods.join(", ")
        );
    }

    let wanted = args.find.unwrap_or(config.model);
    match models.iter().find(|m| m.name.contains(&wanted)) {
        Some(model) => {
            let label = model.display_name.as_deref().unwrap_or(&model.name);
            println!("\nFound {wanted}: {} ({label})", model.name);
            ExitCode::SUCCESS
        }
        None => {
            println!("\n{wanted} NOT found for this key!");
            ExitCode::FAILURE
        }
    }
}
