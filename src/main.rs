use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

mod command_line;

use command_line::Args;
use dt_overlay_gen::{dts, overlay};

fn run(args: &Args) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let dma_node = dts::extract_dma_node(&source)?;
    log::debug!("extracted node, amba_pl hierarchy flattened:\n{dma_node}");

    let document = overlay::render(&args.firmware, &dma_node);

    fs::write(&args.output, document)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!("Overlay generated: {}", args.output.display());
    Ok(())
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        // clap exits with 2 on bad arguments, we report all failures as 1
        let code = match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
            _ => 1,
        };
        process::exit(code);
    });

    stderrlog::new()
        .verbosity(args.verbose as usize + 1)
        .init()
        .unwrap();

    if let Err(e) = run(&args) {
        eprintln!("Failed to generate overlay: {e:#}");
        process::exit(1);
    }
}
