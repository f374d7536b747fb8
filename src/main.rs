use anyhow::Context;

use chat_portal::config::PortalConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PortalConfig::from_env().context("invalid configuration")?;

    eprintln!("💬 Chat Portal v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.api_base_url);
    eprintln!("   Public routes: {}", config.guard.public_routes.join(", "));
    eprintln!("   Onboarding: {}", config.guard.onboarding_route);
    eprintln!("   Landing: {}", config.guard.landing_route);
    eprintln!(
        "   Onboarding tracking: {}",
        if config.guard.track_onboarding { "enabled" } else { "disabled" }
    );
    eprintln!("   Listening: http://0.0.0.0:{}\n", config.port);

    chat_portal::serve(config).await?;

    Ok(())
}
