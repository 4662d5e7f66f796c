use macd_scanner::config::Config;
use macd_scanner::sources::YahooFinanceClient;
use macd_scanner::{api, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macd_scanner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting MACD scanner on {}:{}", config.host, config.port);
    info!(
        "Symbol cap {}, lookback {} days at {} interval",
        config.symbol_cap, config.fetch.lookback_days, config.fetch.interval
    );

    let source = YahooFinanceClient::new(&config)?;
    let addr = format!("{}:{}", config.host, config.port);
    let app = api::app(AppState::new(config, source));

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MACD scanner listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
