//! prompt-enhancer - turn a short idea into a well-structured prompt

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use prompt_enhancer::config::{
    Config, ConfigOptions, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use prompt_enhancer::enhancer::validate_idea;
use prompt_enhancer::{EnhanceError, PromptEnhancer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "prompt-enhancer")]
#[command(about = "Turn a short idea into a detailed prompt using Gemini")]
struct Args {
    /// Idea to enhance; read interactively from stdin when omitted
    idea: Option<String>,

    /// Gemini model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Print only the enhanced prompt, without banners
    #[arg(long)]
    raw: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the prompt
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = Config::from_env(ConfigOptions {
        base_url: Some(args.base_url),
        model: Some(args.model),
        timeout_secs: Some(args.timeout),
    })?;

    let idea = match args.idea {
        Some(idea) => idea,
        None => {
            if !args.raw {
                println!("--- Prompt Engineering Assistant ---");
                println!(
                    "Enter your basic idea, and I'll enhance it into a powerful, well-structured prompt.\n"
                );
            }
            read_idea()?
        }
    };

    if let Err(e) = validate_idea(&idea) {
        report_failure(&e);
        std::process::exit(1);
    }

    let enhancer = PromptEnhancer::new(config)?;

    if !args.raw {
        println!("\n✨ Enhancing your prompt... (This might take a moment)");
    }

    match enhancer.enhance(&idea).await {
        Ok(enhanced) => {
            if args.raw {
                println!("{}", enhanced);
            } else {
                println!("\n--- Enhanced Prompt ---");
                println!("{}", enhanced);
                println!("-----------------------\n");
            }
            info!("Done");
            Ok(())
        }
        Err(e) => {
            if e.is_local() {
                warn!("Enhancement not attempted: {}", e);
            } else {
                error!("Enhancement failed: {}", e);
            }
            report_failure(&e);
            std::process::exit(1);
        }
    }
}

/// Prompt for and read one line from stdin, without the line terminator
fn read_idea() -> Result<String> {
    print!("Your Basic Prompt: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read prompt from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn report_failure(err: &EnhanceError) {
    match err {
        EnhanceError::Input => println!("\nError: {}", err),
        _ => println!("\nAn error occurred: {}", err),
    }
}
