use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = blurry::cli::CliArgs::parse();
    blurry::run(args)?;
    Ok(())
}
