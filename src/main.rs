//! Command-line demo: loads the restaurant list, applies a search or cuisine filter and
//! optionally opens one restaurant's detail view.

use anyhow::Context;
use clap::Parser;
use tracing::{info, Instrument};
use yumpdum::clients::ViewModelHandle;
use yumpdum::config::AppConfig;
use yumpdum::framework::FetchState;
use yumpdum::lifecycle::{setup_tracing, AppSystem};
use yumpdum::model::RestaurantId;
use yumpdum::session::Session;

#[derive(Parser)]
#[command(name = "yumpdum")]
#[command(about = "Browse restaurants from the YumpDum backend", long_about = None)]
struct Cli {
    /// Free-text search over name, location and description
    #[arg(short, long)]
    search: Option<String>,

    /// Cuisine to filter by (falls back to all restaurants when nothing matches)
    #[arg(short, long)]
    category: Option<String>,

    /// Open the detail view for this restaurant id
    #[arg(short, long)]
    detail: Option<u64>,

    /// Bearer token from the identity provider
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let session = match cli.token {
        Some(token) => Session::signed_in(token),
        None => Session::anonymous(),
    };

    let mut system = AppSystem::start(config, session).await?;
    if system.should_show_onboarding() {
        info!("First launch: onboarding would be shown");
    }

    let state = async { system.listing.wait_until_settled().await }
        .instrument(tracing::info_span!("listing"))
        .await?;
    if let FetchState::Error(message) = &state.fetch {
        println!("{}", message);
        system.shutdown().await?;
        return Ok(());
    }

    if let Some(text) = cli.search.as_deref() {
        system.listing.search(text).await?;
    }
    if let Some(label) = cli.category.as_deref() {
        system.listing.select_category(label).await?;
    }
    for restaurant in system.listing.restaurants() {
        println!(
            "{:>4}  {:<32} {:<24} {}",
            restaurant.id.0,
            restaurant.name,
            restaurant.cuisine.as_deref().unwrap_or("-"),
            restaurant.rating
        );
    }

    if let Some(id) = cli.detail {
        let detail = system.open_detail(RestaurantId(id)).await?;
        let state = detail.wait_until_settled().await?;
        match (&state.fetch, detail.restaurant()) {
            (FetchState::Error(message), _) => println!("{}", message),
            (_, Some(restaurant)) => {
                println!("\n{} ({})", restaurant.name, restaurant.rating);
                println!("{}", restaurant.location);
                println!("{}", restaurant.description);
                for item in &restaurant.menu {
                    println!("  {:<28} {:>8.2}", item.name, item.price);
                }
                for review in &restaurant.reviews {
                    println!("  {} ({}/5): {}", review.username, review.stars, review.body);
                }
            }
            (_, None) => {}
        }
        drop(detail);
    }

    system.shutdown().await?;
    info!("Done");
    Ok(())
}
