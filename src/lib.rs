//! Generate a device-tree overlay for an FPGA design with an AXI DMA engine.
//!
//! Vivado exports the programmable-logic (PL) hardware description as a
//! device-tree source include (.dtsi), with the DMA controller buried under
//! the `amba_pl` bus node. To load the bitstream at runtime through the FPGA
//! manager, the kernel instead wants a small overlay: one fragment naming the
//! firmware image for `/fpga-region`, and one fragment grafting the DMA node
//! directly onto `/axi`.
//!
//! The `dt-overlay-gen` tool cuts the `dma@<address>` node out of the .dtsi
//! (comments stripped, braces balanced) and re-emits it inside that fixed
//! two-fragment overlay, flattening the `amba_pl` hierarchy away.
//!
//! Example
//! ```bash
//! dt-overlay-gen pl.dtsi design_1_wrapper.bin overlay.dts
//! ```

#![warn(missing_docs)]
/// Device-tree source text handling: comment stripping and node extraction
pub mod dts;
/// Overlay document rendering
pub mod overlay;
