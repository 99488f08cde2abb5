use anyhow::{Context, Result, bail};
use txsplain::splain::{Mode, SplainOptions, splain_hex};

const USAGE: &str = "usage: splain_probe [--verbose] [--strict] <raw-tx-hex | @path>";

fn main() -> Result<()> {
    let mut options = SplainOptions::default();
    let mut input: Option<String> = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => options.verbose = true,
            "--strict" => options.mode = Mode::Strict,
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with("--") => bail!("unknown flag {}\n{}", flag, USAGE),
            value => {
                if input.is_some() {
                    bail!("expected a single transaction\n{}", USAGE);
                }
                input = Some(value.to_string());
            }
        }
    }

    let input = input.with_context(|| USAGE.to_string())?;
    let raw = match input.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transaction file at {}", path))?,
        None => input,
    };

    let splain = splain_hex(&raw, options)
        .with_context(|| format!("could not decode transaction ({} chars)", raw.trim().len()))?;
    println!("{}", splain.to_json_pretty()?);
    eprintln!(
        "tokens={} verbose={} mode={:?}",
        splain.tokens.len(),
        options.verbose,
        options.mode
    );
    Ok(())
}
