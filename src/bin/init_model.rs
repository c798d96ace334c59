use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use next_close::InferenceBackend;
use next_close::config::SERVER;
use next_close::model::{PriceLstm, PriceLstmConfig};

/// Write a freshly initialised (untrained) model record so the service can be
/// started end to end before real weights are available.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = SERVER.model_path)]
    out: PathBuf,

    /// Replace an existing record
    #[arg(long, default_value_t = false)]
    force: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    write_untrained_record(&args.out, args.force)
}

fn write_untrained_record(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{:?} already exists (pass --force to overwrite)", path);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    let config = PriceLstmConfig::default();
    let device = Default::default();
    let model = PriceLstm::<InferenceBackend>::new(&device, &config);
    model
        .save(&path.to_string_lossy())
        .with_context(|| format!("Failed to write model record to {:?}", path))?;

    println!(
        "✅ Untrained model record written to {:?} (hidden {}, {} layers). Predictions are meaningless until real weights replace it.",
        path, config.hidden_size, config.num_layers
    );
    Ok(())
}
