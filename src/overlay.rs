///
/// Render the fixed two-fragment overlay document
///

// The extracted node sits three levels deep: / -> fragment@1 -> __overlay__
const NODE_INDENT: &str = "            ";

/// Prefix every line of @block (the first and blank ones included) with
/// @prefix. Existing indentation inside the block is preserved.
pub fn indent(block: &str, prefix: &str) -> String {
    block
        .lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Build the overlay source: fragment@0 points `/fpga-region` at
/// @firmware_name, fragment@1 grafts @dma_node onto `/axi`.
///
/// @firmware_name lands verbatim between double quotes, so it must not
/// contain one itself.
pub fn render(firmware_name: &str, dma_node: &str) -> String {
    let node = indent(dma_node, NODE_INDENT);
    format!(
        r#"/dts-v1/;
/plugin/;

/ {{
    /* Fragment 0: bitstream configuration */
    fragment@0 {{
        target-path = "/fpga-region";
        __overlay__ {{
            firmware-name = "{firmware_name}";
        }};
    }};

    /* Fragment 1: PL hardware nodes (AXI DMA) */
    fragment@1 {{
        target-path = "/axi";
        __overlay__ {{
            #address-cells = <2>;
            #size-cells = <2>;

{node}
        }};
    }};
}};
"#
    )
}
