//! Byte-array representation for binary artifacts.

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Encode `bytes` as the body of a brace initializer.
///
/// Two-digit lowercase hex literals, `per_line` per line, each line indented
/// by two spaces, followed by a `0x00` sentinel on its own line.
pub fn encode(bytes: &[u8], per_line: usize) -> String {
    let per_line = per_line.max(1);
    // "0x00, " per byte plus indentation and newline per line
    let mut out = String::with_capacity(bytes.len() * 6 + (bytes.len() / per_line + 2) * 4);

    for chunk in bytes.chunks(per_line) {
        out.push_str("  ");
        for (i, byte) in chunk.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str("0x");
            out.push(char::from(HEX[usize::from(byte >> 4)]));
            out.push(char::from(HEX[usize::from(byte & 0x0f)]));
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("  0x00\n");
    out
}
