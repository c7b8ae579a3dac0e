/// Parse the main command-line.
///
use std::path::PathBuf;

use clap::Parser;

// This is the help blurb:
/// Generate a device-tree overlay (.dts) that loads an FPGA bitstream and
/// inserts the AXI DMA node extracted from a Vivado-generated .dtsi.
#[derive(Debug, Parser)]
#[command(version, long_about, verbatim_doc_comment)]
pub struct Args {
    /// Display more information (use multiple times to increase verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Device-tree source include describing the PL design
    #[arg(value_name = "input.dtsi")]
    pub input: PathBuf,

    /// Firmware (bitstream) file name, inserted verbatim into the overlay
    #[arg(value_name = "firmware.bin")]
    pub firmware: String,

    /// Overlay source file to write
    #[arg(value_name = "output.dts")]
    pub output: PathBuf,
}
