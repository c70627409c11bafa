mod app_state;
mod cli;

use lazypane_config::LazypaneConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

const DEFAULT_DIRECTIVE: &str = "lazypane=info";

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log level '{directive}': {e}");
        DEFAULT_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn main() {
    let args = cli::parse();

    // Config decides the log level, so it loads before logging starts.
    let loaded = lazypane_config::load_config(args.config.as_deref());

    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => cli::log_directive(level),
        (None, Ok((config, _))) => config.logging.level.directive().to_string(),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("lazypane v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = match loaded {
        Ok((config, source)) => {
            tracing::info!("{source}");
            config
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            LazypaneConfig::default()
        }
    };
    tracing::info!(program = %config.tool.program, "Config loaded");

    let restore = config.session.restore_on_launch && !args.no_restore;
    let startup = app_state::startup_commands(&args.directories);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            eprintln!("lazypane: failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::LazypaneApp::new(config, startup, restore);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
