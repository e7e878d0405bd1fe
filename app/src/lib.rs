//! Neutron Browser - stdio host
//!
//! Connects a presentation layer (and the content frames it embeds) to the
//! shell core. One JSON object per line in each direction:
//!
//! ```text
//! → {"id":1,"method":"nav.navigate","params":{"input":"openai.com"}}
//! ← {"id":1,"success":true,"data":{"changed":true,"view":{...}},"error":null}
//! ← {"event":"view","data":{...}}   (pushed when a reload fallback fires)
//! ```

mod commands;
mod runtime;
mod state;

use anyhow::{bail, Context};
use std::path::PathBuf;

pub use commands::{dispatch, tabs::CommandResult};
pub use runtime::{handle_line, serve};
pub use state::AppState;

/// Pick the config file: `--config <path>`, else `$NEUTRON_CONFIG` or the
/// platform default.
pub fn config_path_from_args<I>(args: I) -> anyhow::Result<Option<PathBuf>>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                return Ok(Some(PathBuf::from(path)));
            }
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    return Ok(Some(PathBuf::from(path)));
                }
                bail!("unknown argument: {other}");
            }
        }
    }

    Ok(neutron_core::Config::default_path())
}
