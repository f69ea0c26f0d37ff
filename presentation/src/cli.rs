use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use application::stylist_service::StylistService;
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use infrastructure::config::Config;
use infrastructure::openai_client::OpenAiClient;
use infrastructure::pinecone_client::PineconeIndex;
use tracing::info;

use crate::shell::{render_banner, InteractionShell, INPUT_PLACEHOLDER, INPUT_PROMPT};

#[derive(Parser, Debug)]
#[command(name = "stylist")]
#[command(about = "Fashion AI Chatbot: ask for recommendations and let the AI stylist help")]
pub struct Cli {
    /// Number of products to retrieve (overrides STYLIST_TOP_K)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// TOML file holding OPENAI_API_KEY, PINECONE_API_KEY and friends
    #[arg(long)]
    pub secrets: Option<PathBuf>,

    /// Log every external call to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask once and exit; leave empty for the interactive prompt
    #[arg(trailing_var_arg = true)]
    pub query: Vec<String>,
}

pub type LiveShell = InteractionShell<OpenAiClient, PineconeIndex, OpenAiClient>;

pub struct CliApp {
    shell: LiveShell,
}

impl CliApp {
    /// Resolves the index handle and the OpenAI client once for the process.
    pub fn new(config: &Config) -> Self {
        let openai = OpenAiClient::new(config);
        let index = PineconeIndex::new(config);
        info!(index = index.name(), top_k = config.top_k, "services initialised");
        let service = StylistService::new(openai.clone(), index, openai, config.top_k);
        Self {
            shell: InteractionShell::new(service),
        }
    }

    pub async fn run(&mut self, cli: &Cli) -> Result<ExitCode> {
        render_banner(&mut io::stdout())?;
        if cli.query.is_empty() {
            self.run_interactive().await?;
            return Ok(ExitCode::SUCCESS);
        }

        let input = cli.query.join(" ");
        let outcome = self
            .shell
            .run_once(&input, &mut io::stdout(), &mut io::stderr())
            .await?;
        Ok(if outcome.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    async fn run_interactive(&mut self) -> Result<()> {
        println!("{}", "Type 'exit' to quit.".dimmed());
        loop {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("{INPUT_PROMPT} ({INPUT_PLACEHOLDER})"))
                .allow_empty(true)
                .interact_text()
                .context("failed to read query")?;
            let trimmed = input.trim();
            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                break;
            }
            self.shell
                .run_once(&input, &mut io::stdout(), &mut io::stderr())
                .await?;
            println!();
        }
        Ok(())
    }
}
