use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use synthbase::{logging, read_table, SynthBase, SynthConfig, Synthesizer};
use tracing::info;

/// Validates its input and hands it back unchanged.
#[derive(Serialize, Deserialize)]
struct Passthrough {
    base: SynthBase,
}

impl Synthesizer for Passthrough {
    fn base(&self) -> &SynthBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SynthBase {
        &mut self.base
    }
}

fn main() -> Result<()> {
    logging::init_logging();

    // ─── 1) args ─────────────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let usage = "Usage: synthbase <INPUT_CSV> <NAME> [CONFIG_YAML]";
    let input = args.next().context(usage)?;
    let name = args.next().context(usage)?;
    let cfg = match args.next() {
        Some(p) => SynthConfig::from_yaml_file(&p)
            .with_context(|| format!("loading config {}", p))?,
        None => SynthConfig::default(),
    };
    info!(tag = %cfg.tag, epsilon = cfg.epsilon, "config loaded");

    // ─── 2) read + validate ──────────────────────────────────────────
    let mut synth = Passthrough {
        base: cfg.build_base().context("building synthesizer")?,
    };
    let raw = read_table(&input).with_context(|| format!("reading {}", input))?;
    let table = synth
        .validate(raw)
        .with_context(|| format!("validating {}", input))?;
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "input validated"
    );

    // ─── 3) write artifacts ──────────────────────────────────────────
    let out_dir = cfg.output_dir.as_deref();
    if let Some(dir) = out_dir {
        ensure_dir(dir)?;
    }
    synth
        .write_table(&table, &name, out_dir)
        .context("writing table")?
        .write_model(&name, out_dir)
        .context("writing model")?;

    info!("all done");
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}
