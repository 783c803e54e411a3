//! Wiring & DI. Entry point: load config, bootstrap adapters, inject into the service, run once.
//! No business logic here; scheduling repeated runs is left to the host (cron, systemd timer).

use group_reminder::adapters::mail::{DryRunTransport, SmtpSettings, SmtpTransport};
use group_reminder::adapters::persistence::{CommunicationLog, JsonCatalogStore};
use group_reminder::adapters::render::HandlebarsRenderer;
use group_reminder::adapters::settings::StaticSettings;
use group_reminder::ports::{GroupStore, MessageTransport, ReminderJob, TemplateStore};
use group_reminder::shared::config::AppConfig;
use group_reminder::usecases::{NotificationDispatcher, ReminderService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv::dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("load configuration: {}", e))?;

    // --- Stores (catalog is read on first lookup) ---
    let catalog = Arc::new(JsonCatalogStore::new(cfg.catalog_path_or_default()));
    let groups: Arc<dyn GroupStore> = Arc::clone(&catalog) as Arc<dyn GroupStore>;
    let templates: Arc<dyn TemplateStore> = catalog as Arc<dyn TemplateStore>;

    // --- Transport (SMTP when configured, otherwise dry run) ---
    let archive = Arc::new(CommunicationLog::new(cfg.archive_path_or_default()));
    let transport: Arc<dyn MessageTransport> = if cfg.is_smtp_configured() {
        let settings = SmtpSettings {
            host: cfg.smtp_host.clone().unwrap_or_default(),
            port: cfg.smtp_port_or_default(),
            username: cfg.smtp_username.clone(),
            password: cfg.smtp_password.clone(),
            timeout: Duration::from_secs(cfg.smtp_timeout_secs_or_default()),
        };
        info!(host = %settings.host, port = settings.port, "SMTP delivery enabled");
        Arc::new(
            SmtpTransport::new(&settings, Some(archive)).map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    } else {
        warn!("GROUP_REMINDER_SMTP_HOST not set, messages will only be logged (dry run)");
        Arc::new(DryRunTransport::with_archive(archive))
    };

    // --- Service ---
    let dispatcher = NotificationDispatcher::new(Arc::new(HandlebarsRenderer::new()), transport);
    let service = ReminderService::new(
        groups,
        templates,
        Arc::new(StaticSettings::new(cfg.base_url.clone())),
        dispatcher,
    );

    let result = service
        .run(&cfg.job)
        .await
        .map_err(|e| anyhow::anyhow!("reminder run failed: {}", e))?;

    for fault in &result.faults {
        warn!(?fault, "run fault");
    }
    println!("{}", result.summary);

    Ok(())
}
