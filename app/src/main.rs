use neutron_core::Config;
use neutron_lib::{config_path_from_args, serve, AppState};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = match config_path_from_args(std::env::args().skip(1))? {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    neutron_core::init_logging(&config.log_filter);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Neutron");

    let state = AppState::new(config)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());

    serve(state, stdin, tokio::io::stdout()).await
}
