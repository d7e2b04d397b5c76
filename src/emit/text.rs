//! String-literal representation for textual artifacts.
//!
//! One C string literal per artifact line. The literals concatenate to the
//! artifact byte-for-byte, so `sizeof(array) - 1` equals its length.

/// Encode `content` as C string literals (quotes included), one per line.
///
/// A line keeps its `\n` as an escape only if the artifact had one, so a
/// file without a final newline does not gain one.
pub fn encode(content: &str) -> Vec<String> {
    if content.is_empty() {
        return vec!["\"\"".to_owned()];
    }

    content
        .split_inclusive('\n')
        .map(|line| {
            let mut literal = String::with_capacity(line.len() + 4);
            literal.push('"');
            let mut prev = '\0';
            for c in line.chars() {
                match c {
                    '\\' => literal.push_str("\\\\"),
                    '"' => literal.push_str("\\\""),
                    '\n' => literal.push_str("\\n"),
                    '\r' => literal.push_str("\\r"),
                    '\t' => literal.push('\t'),
                    // `??x` would be read as a trigraph by older compilers
                    '?' if prev == '?' => literal.push_str("\\?"),
                    c if c.is_ascii_control() => {
                        let byte = c as u8;
                        literal.push('\\');
                        for shift in [6, 3, 0] {
                            literal.push(char::from(b'0' + ((byte >> shift) & 0o7)));
                        }
                    }
                    c => literal.push(c),
                }
                prev = c;
            }
            literal.push('"');
            literal
        })
        .collect()
}

/// Decode literals produced by [`encode`] back into the artifact content.
///
/// Only understands the escapes [`encode`] emits.
#[cfg(test)]
pub fn decode(literals: &[String]) -> String {
    let mut out = String::new();
    for literal in literals {
        let inner = &literal[1..literal.len() - 1];
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(d @ '0'..='7') => {
                    let digits: String = std::iter::once(d).chain(chars.by_ref().take(2)).collect();
                    let code = u32::from_str_radix(&digits, 8).unwrap();
                    out.push(char::from_u32(code).unwrap());
                }
                Some(other) => out.push(other),
                None => panic!("dangling escape in {literal}"),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_lines() {
        let literals = encode("body{}\np{color:\"red\"}\n");
        assert_eq!(literals, ["\"body{}\\n\"", "\"p{color:\\\"red\\\"}\\n\""]);
    }

    #[test]
    fn test_encode_without_final_newline() {
        let literals = encode("a\nb");
        assert_eq!(literals, ["\"a\\n\"", "\"b\""]);
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(""), ["\"\""]);
    }

    #[test]
    fn test_encode_escapes() {
        let literals = encode("c:\\dir\r\n\x01\t??=é");
        assert_eq!(literals, ["\"c:\\\\dir\\r\\n\"", "\"\\001\t?\\?=é\""]);
    }

    #[test]
    fn test_octal_escape_before_digit() {
        // Three digits always, so a following digit is not absorbed
        assert_eq!(encode("\x017"), ["\"\\0017\""]);
        assert_eq!(decode(&encode("\x017")), "\x017");
    }

    #[test]
    fn test_round_trip_lines() {
        let content = "<html>\r\n  <p class=\"x\">a\\b</p>\n\n\x7f end";
        let literals = encode(content);
        assert_eq!(literals.len(), content.split_inclusive('\n').count());
        assert_eq!(decode(&literals), content);

        for (literal, line) in literals.iter().zip(content.split_inclusive('\n')) {
            assert_eq!(decode(std::slice::from_ref(literal)), line);
        }
    }
}
