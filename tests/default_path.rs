// Changes the process working directory, so it lives in its own test binary.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{env, fs};
use synthbase::{load_model, SynthBase, Synthesizer};
use tempfile::tempdir;

#[derive(Serialize, Deserialize)]
struct Synth {
    base: SynthBase,
}

impl Synthesizer for Synth {
    fn base(&self) -> &SynthBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SynthBase {
        &mut self.base
    }
}

#[test]
fn test_writers_default_to_working_directory() -> Result<()> {
    let tmp = tempdir()?;
    let before = env::current_dir()?;
    env::set_current_dir(tmp.path())?;

    let mut s = Synth {
        base: SynthBase::with_epsilon("Synth", 0.5)?,
    };
    let table = s.validate((vec!["x", "y"], vec![vec!["a", "1"], vec!["b", "2"]]))?;
    let written = s
        .write_table(&table, "demo", None)
        .and_then(|owner| owner.write_model("demo", None))
        .map(|owner| owner.base().tag().to_string());

    env::set_current_dir(&before)?;

    assert_eq!(written?, "Synth");
    assert_eq!(
        fs::read_to_string(tmp.path().join("demo_Synth_0.5eps.csv"))?,
        "x,y\na,1\nb,2\n"
    );
    let loaded: Synth = load_model(tmp.path().join("demo_Synth_0.5eps.p"))?;
    assert_eq!(loaded.base, s.base);
    Ok(())
}
