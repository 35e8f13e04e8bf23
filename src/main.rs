use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use news_verdict::artifacts::ModelHandle;
use news_verdict::config::{ApiKey, Settings};
use news_verdict::pipeline::{CheckPipeline, DummySearch, HttpSearchClient, SearchClient};
use news_verdict::report;
use news_verdict::telemetry::{self, LogFormat};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

#[derive(Parser)]
#[command(name = "news-verdict", version, about = "Check whether a news text looks real or fake")]
struct Cli {
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a news text and look for corroborating evidence
    Check {
        /// News text; read from stdin when omitted
        text: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Directory holding vectorizer.json and classifier.json
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Timeout for each outbound lookup
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

enum Search {
    Live(HttpSearchClient),
    Disabled(DummySearch),
}

#[async_trait]
impl SearchClient for Search {
    async fn search(&self, params: &[(&str, String)]) -> anyhow::Result<Value> {
        match self {
            Search::Live(c) => c.search(params).await,
            Search::Disabled(c) => c.search(params).await,
        }
    }
}

fn search_client(
    service: &str,
    endpoint: Url,
    key: Option<ApiKey>,
    timeout: Duration,
    build: fn(Url, ApiKey, Duration) -> anyhow::Result<HttpSearchClient>,
) -> anyhow::Result<Search> {
    match key {
        Some(key) => Ok(Search::Live(build(endpoint, key, timeout)?)),
        None => {
            warn!(service, "no credential configured, lookups will return nothing");
            Ok(Search::Disabled(DummySearch))
        }
    }
}

fn read_text(arg: Option<String>) -> anyhow::Result<String> {
    let text = match arg {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read news text from stdin")?;
            buf
        }
    };
    let text = text.trim().to_string();
    anyhow::ensure!(!text.is_empty(), "news text must not be empty");
    Ok(text)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::init(cli.log_format);

    let Command::Check {
        text,
        format,
        model_dir,
        timeout_secs,
    } = cli.command;

    let mut settings = Settings::from_env().context("invalid configuration")?;
    if let Some(dir) = model_dir {
        settings.model_dir = dir;
    }
    if let Some(secs) = timeout_secs {
        settings.http_timeout = Duration::from_secs(secs);
    }

    let model = ModelHandle::load(&settings.model_dir).context("failed to load model artifacts")?;
    let text = read_text(text)?;

    let pipeline = CheckPipeline {
        model: Arc::new(model),
        claims: search_client(
            "claim search",
            settings.fact_check_endpoint.clone(),
            settings.fact_check_key.clone(),
            settings.http_timeout,
            HttpSearchClient::claim_search,
        )?,
        articles: search_client(
            "article search",
            settings.news_api_endpoint.clone(),
            settings.news_api_key.clone(),
            settings.http_timeout,
            HttpSearchClient::article_search,
        )?,
    };

    let verdict = pipeline.submit_check(&text).await;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&verdict)?),
        OutputFormat::Text => print!("{}", report::render(&verdict)),
    }
    Ok(())
}
