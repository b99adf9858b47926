// Boots an AgroLink session from the environment and reports which surface
// the client would mount. Pass `--logout` to clear persisted credentials first.

use agrolink_core::router::Surface;
use agrolink_core::{AppContext, ClientConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agrolink_core=info,agrolink_shell=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run() -> agrolink_core::Result<()> {
    let logout = std::env::args().skip(1).any(|arg| arg == "--logout");

    let config = ClientConfig::from_env()?;
    let (app, bootstrap) = AppContext::start(config)?;
    let state = bootstrap.wait().await?;
    tracing::info!(status = %state.status, "Session ready");

    if logout {
        // Also drops records that never resolved to a session
        app.logout().await?;
    }

    if let Some(language) = app.language().await? {
        tracing::info!(%language, "Language preference");
    }

    match app.surface() {
        Surface::App(shell) => {
            let user = app.session().snapshot().user.unwrap_or_default();
            tracing::info!(%shell, user = %user.display_name(), "Mounting application shell");
            println!("{shell}");
        }
        Surface::SignIn => {
            tracing::info!("No session, mounting sign-in");
            println!("sign-in");
        }
        Surface::Splash => {
            tracing::warn!("Bootstrap returned while still loading");
            println!("splash");
        }
    }
    Ok(())
}
