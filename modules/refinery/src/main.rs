use std::collections::HashMap;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use refinery::{Config, Controller, Orchestrator};

#[derive(Parser)]
#[command(name = "refinery")]
#[command(about = "Answer a question, then refine the answer until an automated reviewer accepts it")]
#[command(version)]
struct Cli {
    /// Question to answer (prompted for when omitted)
    question: Option<String>,

    /// Completion provider: groq, openai or anthropic
    #[arg(long)]
    provider: Option<String>,

    /// Model name (defaults per provider)
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f32>,

    /// Generation budget before giving up
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Flags shadow the environment variables of the same meaning.
    fn overrides(&self) -> HashMap<&'static str, String> {
        let mut overrides = HashMap::new();
        if let Some(ref provider) = self.provider {
            overrides.insert("REFINERY_PROVIDER", provider.clone());
        }
        if let Some(ref model) = self.model {
            overrides.insert("REFINERY_MODEL", model.clone());
        }
        if let Some(temperature) = self.temperature {
            overrides.insert("REFINERY_TEMPERATURE", temperature.to_string());
        }
        if let Some(max_attempts) = self.max_attempts {
            overrides.insert("REFINERY_MAX_ATTEMPTS", max_attempts.to_string());
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::from_default_env().add_directive("refinery=info".parse()?);
    if cli.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let overrides = cli.overrides();
    let config = Config::from_lookup(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    })?;
    config.log_redacted();

    let question = match cli.question {
        Some(question) => question,
        None => Input::<String>::new()
            .with_prompt("Enter your question")
            .interact_text()
            .context("Failed to read question")?,
    };

    let service = config.text_service();
    let orchestrator = Orchestrator::new(service.as_ref(), Controller::new(config.max_attempts));
    let outcome = orchestrator.run(question).await?;

    println!("\n{}", "=".repeat(50));
    println!("Final Answer:");
    println!("{}", "=".repeat(50));
    println!("{}", outcome.final_answer);
    println!("\nStats: {} attempts.", outcome.attempts_used);
    if !outcome.passed {
        println!("Reviewer never accepted the answer; this is the last attempt, not a certified one.");
    }

    Ok(())
}
