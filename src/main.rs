use std::env;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use log::info;
use num::BigUint;
use rand::rngs::OsRng;

use amm_root::{extract_root_with_config, AmmConfig, Parameters};

const USAGE: &str = "Usage: amm-root <q> <delta> <r>";

fn parse_arg(args: &[String], index: usize, name: &str) -> Result<BigUint> {
    let arg = args.get(index).ok_or_else(|| anyhow!(USAGE))?;
    BigUint::from_str(arg).with_context(|| format!("{} ({}) is not a decimal integer", name, arg))
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args: Vec<String> = env::args().collect();
    let params = Parameters {
        q: parse_arg(&args, 1, "q")?,
        delta: parse_arg(&args, 2, "delta")?,
        r: parse_arg(&args, 3, "r")?,
    };

    let mut config = AmmConfig::default();
    if let Ok(max) = env::var("AMM_MAX_SAMPLES") {
        let max = max
            .parse()
            .with_context(|| format!("AMM_MAX_SAMPLES ({}) is not a count", max))?;
        config = config.with_max_sampling_attempts(max);
    }

    let start = Instant::now();
    let root = extract_root_with_config(&params, &mut OsRng, &config)?;
    info!("Finished in {}s", start.elapsed().as_secs_f64());

    println!("{}", root);
    Ok(())
}
