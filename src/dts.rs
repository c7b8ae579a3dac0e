///
/// Extract the DMA controller node from device-tree source text
///
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Errors raised while locating or extracting the DMA node
#[derive(Debug, Error)]
pub enum DtsError {
    /// No `label: dma@<hex> {` header anywhere in the source
    #[error("no 'dma@' node found in the device-tree source")]
    NodeNotFound,

    /// The node header was found but its braces never rebalance
    #[error("'dma@' node is unterminated (braces never close)")]
    UnterminatedNode,
}

type Result<T> = core::result::Result<T, DtsError>;

// Node header: a label, a colon, "dma@", a hex unit-address, an open brace.
// Eg. "axi_dma_0: dma@a0000000 {"
fn dma_anchor() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+:\s*dma@[0-9a-fA-F]+\s*\{").unwrap())
}

/// Remove all `/* ... */` block comments, including multi-line ones. Text
/// outside comment spans is returned unchanged.
pub fn strip_comments(content: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
    re.replace_all(content, "").into_owned()
}

/// Find the first DMA node header in @content. Returns the byte offset of
/// the start of its label.
pub fn find_dma_anchor(content: &str) -> Result<usize> {
    match dma_anchor().find(content) {
        Some(m) => Ok(m.start()),
        None => Err(DtsError::NodeNotFound),
    }
}

/// Extract the brace-delimited block starting at @start (the anchor offset).
///
/// Walks the text with a depth counter that arms on the first `{` at or
/// after @start, and stops where the depth returns to zero. The closing
/// brace is included, as is a `;` immediately following it.
pub fn extract_block(content: &str, start: usize) -> Result<&str> {
    let mut depth: i32 = 0;
    let mut armed = false;

    for (i, c) in content[start..].char_indices() {
        match c {
            '{' => {
                depth += 1;
                armed = true;
            }
            '}' => depth -= 1,
            _ => {}
        }
        if armed && depth == 0 {
            // Include the closing brace, and the statement terminator if
            // the node carries one.
            let mut end = start + i + 1;
            if content[end..].starts_with(';') {
                end += 1;
            }
            return Ok(&content[start..end]);
        }
    }
    Err(DtsError::UnterminatedNode)
}

/// Extract the first DMA node from raw .dtsi text: strip comments, locate
/// the `dma@` header, and cut out the brace-balanced block.
pub fn extract_dma_node(source: &str) -> Result<String> {
    let content = strip_comments(source);
    let start = find_dma_anchor(&content)?;
    let block = extract_block(&content, start)?;
    Ok(block.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("a /* b */ c"), "a  c");
        assert_eq!(strip_comments("a /* b\nc\nd */ e"), "a  e");
        assert_eq!(strip_comments("/*x*/a/*y*/"), "a");
        assert_eq!(strip_comments("no comments"), "no comments");
    }

    #[test]
    fn test_anchor() {
        let s = "foo {}; axi_dma_0: dma@a0000000 { };";
        assert_eq!(find_dma_anchor(s).unwrap(), 8);

        // First match wins
        let s = "a: dma@1000 {}; b: dma@2000 {};";
        assert_eq!(find_dma_anchor(s).unwrap(), 0);

        assert!(matches!(
            find_dma_anchor("uart0: serial@ff000000 { };"),
            Err(DtsError::NodeNotFound)
        ));
        // The header needs an opening brace
        assert!(matches!(
            find_dma_anchor("x: dma@a0000000 ;"),
            Err(DtsError::NodeNotFound)
        ));
    }

    #[test]
    fn test_extract_flat_block() {
        let s = "x: dma@0 { reg = <0>; }";
        assert_eq!(extract_block(s, 0).unwrap(), s);

        // Immediate open/close is a valid block
        assert_eq!(extract_block("x: dma@0 {}", 0).unwrap(), "x: dma@0 {}");
    }

    #[test]
    fn test_extract_appends_terminator() {
        let s = "x: dma@0 { }; uart0: serial@ff000000 { };";
        assert_eq!(extract_block(s, 0).unwrap(), "x: dma@0 { };");

        // Terminator at end of text
        assert_eq!(extract_block("x: dma@0 { };", 0).unwrap(), "x: dma@0 { };");
    }

    #[test]
    fn test_extract_nested() {
        let s = "x: dma@0 {\n  chan@0 {\n    reg = <0>;\n  };\n  chan@1 { };\n};";
        assert_eq!(extract_block(s, 0).unwrap(), s);
    }

    #[test]
    fn test_extract_unterminated() {
        let s = "x: dma@0 {\n  chan@0 {\n  };\n";
        assert!(matches!(
            extract_block(s, 0),
            Err(DtsError::UnterminatedNode)
        ));
    }

    #[test]
    fn test_extract_dma_node() {
        let dtsi = "\
/ {
    amba_pl: amba-pl {
        /* AXI DMA, added by Vivado */
        axi_dma_0: dma@a0000000 {
            #size-cells = <1>;
            dma-channel@a0000000 {
                compatible = \"xlnx,axi-dma-mm2s-channel\";
            };
        };
    };
};
";
        let node = extract_dma_node(dtsi).unwrap();
        assert!(node.starts_with("axi_dma_0: dma@a0000000 {"));
        assert!(node.ends_with("};"));
        assert_eq!(
            node.matches('{').count(),
            node.matches('}').count()
        );

        // Comments around and inside the node must not change the result,
        // relative to the same input with the comments blanked out.
        let commented = dtsi.replace(
            "#size-cells = <1>;",
            "#size-cells = <1>; /* one cell\n                       spanning lines */",
        );
        let plain = dtsi.replace(
            "#size-cells = <1>;",
            "#size-cells = <1>; ",
        );
        assert_eq!(
            extract_dma_node(&commented).unwrap(),
            extract_dma_node(&plain).unwrap()
        );
    }
}
