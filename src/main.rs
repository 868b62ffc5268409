use std::io;
use std::sync::Arc;

use rusty_library_catalogue::adapters::SystemClock;
use rusty_library_catalogue::application::catalogue::CatalogueService;
use rusty_library_catalogue::cli::{Console, menu};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize tracing
    // ログはstderrへ。stdoutはメニューとの対話専用
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_library_catalogue=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut service = CatalogueService::new(Arc::new(SystemClock));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    tracing::info!("catalogue ready");
    menu::run(&mut service, &mut console);
}
