use crate::prelude::*;
use sentry::{init, release_name, ClientInitGuard, ClientOptions};
use sentry_tracing::{EventFilter, SentryLayer};
use std::env::var;
use tracing_subscriber::{
    fmt,
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
    Registry,
};

type FmtRegistry = Layered<fmt::Layer<Registry>, Registry>;

/// Installs the fmt subscriber, with Sentry error forwarding when
/// `SENTRY_DSN` is set. The returned guard must outlive the program's work.
pub async fn setup_logging() -> Result<Option<ClientInitGuard>> {
    match var("SENTRY_DSN") {
        Ok(dsn) => match dsn.is_empty() {
            true => {
                set_subscriber(None).await?;
                tracing::info!("SENTRY_DSN is empty");
                Ok(None)
            }
            false => {
                let guard = init((
                    dsn,
                    ClientOptions {
                        release: release_name!(),
                        ..Default::default()
                    },
                ));
                let sentry_layer = sentry_tracing::layer().event_filter(|md| match md.level() {
                    &tracing::Level::ERROR => EventFilter::Event,
                    _ => EventFilter::Ignore,
                });
                set_subscriber(Some(sentry_layer)).await?;
                Ok(Some(guard))
            }
        },
        Err(_) => {
            set_subscriber(None).await?;
            tracing::info!("SENTRY_DSN not found in environment");
            Ok(None)
        }
    }
}

async fn set_subscriber(layer: Option<SentryLayer<FmtRegistry>>) -> Result<()> {
    match layer {
        Some(sentry_layer) => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(sentry_layer)
                .try_init()?;
        }
        None => tracing_subscriber::registry().with(fmt::layer()).try_init()?,
    }

    Ok(())
}
