use clap::Parser;
use pulse_core::{CategoryTag, Config, Locale, Result};
use pulse_feeds::{
    init_logging, ContentExtractor, DomSmoothieExtractor, FeedAggregator, HttpFeedFetcher,
    HttpPageFetcher,
};
use pulse_storage::CacheService;
use pulse_web::AppState;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let overflow = || format!("Duration too large: {}", s);
        let mut total_seconds = 0u64;
        let mut digits = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            if c.is_whitespace() && digits.is_empty() {
                continue;
            }
            let scale = match c {
                's' => 1,
                'm' => 60,
                'h' => 3600,
                'd' => 86400,
                _ if digits.is_empty() => {
                    return Err(format!("Invalid character in duration: {}", c))
                }
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            if digits.is_empty() {
                return Err(format!("Unit without a number: {}", c));
            }
            let num = digits.parse::<u64>().map_err(|_| overflow())?;
            total_seconds = num
                .checked_mul(scale)
                .and_then(|secs| total_seconds.checked_add(secs))
                .ok_or_else(overflow)?;
            digits.clear();
            has_value = true;
        }

        // A trailing bare number counts as seconds
        if !digits.is_empty() {
            let num = digits.parse::<u64>().map_err(|_| overflow())?;
            total_seconds = total_seconds.checked_add(num).ok_or_else(overflow)?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Tech news aggregator and article reader", long_about = None)]
struct Cli {
    /// Feed sources and keyword vocabulary to use
    #[arg(long, value_enum, env = "PULSE_LOCALE", default_value = "en", global = true)]
    locale: Locale,
    /// How long the aggregated article list stays fresh (e.g. 10m)
    #[arg(long, env = "PULSE_LIST_TTL", default_value = "10m", global = true)]
    list_ttl: HumanDuration,
    /// How long an extracted article stays cached (e.g. 30m)
    #[arg(long, env = "PULSE_CONTENT_TTL", default_value = "30m", global = true)]
    content_ttl: HumanDuration,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "PULSE_HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Fetch all feeds once and print the article list as JSON
    Articles {
        #[arg(long, value_enum)]
        category: Option<CategoryTag>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Extract the readable content of one article page
    Extract { url: String },
    /// List the configured feed sources
    Sources,
}

struct Services {
    cache: Arc<CacheService>,
    aggregator: Arc<FeedAggregator>,
    extractor: Arc<ContentExtractor>,
}

fn build_services(config: &Config) -> Result<Services> {
    let cache = Arc::new(CacheService::new(config));
    let feeds = HttpFeedFetcher::new(config.feed_timeout, &config.user_agent)?;
    let pages = HttpPageFetcher::new(config.page_timeout, &config.user_agent)?;

    let aggregator = Arc::new(FeedAggregator::new(config, Arc::new(feeds), cache.clone()));
    let extractor = Arc::new(ContentExtractor::new(
        Arc::new(pages),
        Arc::new(DomSmoothieExtractor::new()),
        cache.clone(),
    ));

    Ok(Services {
        cache,
        aggregator,
        extractor,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        list_ttl: cli.list_ttl.0,
        content_ttl: cli.content_ttl.0,
        ..Config::for_locale(cli.locale)
    };

    match cli.command {
        Commands::Serve { host, port } => {
            let services = build_services(&config)?;
            info!(
                "📡 {} feed sources configured ({:?})",
                config.sources.len(),
                cli.locale
            );

            // Warm the cache in the background; the server starts regardless.
            services.aggregator.prefetch();

            let state = AppState {
                aggregator: services.aggregator,
                extractor: services.extractor,
                cache: services.cache,
            };
            pulse_web::serve(SocketAddr::new(host, port), state).await?;
        }
        Commands::Articles { category, limit } => {
            let services = build_services(&config)?;
            let snapshot = services.aggregator.get_articles().await?;
            let items: Vec<_> = snapshot
                .items
                .iter()
                .filter(|a| category.map_or(true, |c| a.category == c))
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Commands::Extract { url } => {
            let services = build_services(&config)?;
            let content = services.extractor.extract_content(&url).await?;
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Commands::Sources => {
            for source in &config.sources {
                println!("  {} [{}]", source.endpoint, source.default_category);
            }
        }
    }

    Ok(())
}
