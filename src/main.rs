mod api;
mod app;
mod application;
mod config;
mod domain;
mod theme;
mod ui;
mod utils;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    iced::application(app::boot, app::update, app::view)
        .title("Media Grabber")
        .theme(app::theme)
        .window_size((640.0, 560.0))
        .run()
}

/// `RUST_LOG` directives as given, or `info` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some("media_grabber=loud")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_log_filter_respects_quieter_env() {
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("error")).max_level_hint(), Some(LevelFilter::ERROR));
    }
}
