//! C identifiers derived from output names.

/// Declaration name for an output: `CONTENT_` + its normalized file name.
///
/// Only the last `/` segment of `name` counts. Letters are uppercased; every
/// character outside `[A-Za-z0-9]` becomes `_`. Distinct names may collide
/// (`a-b.js`, `a.b.js`, `js/app.js` and `app.js`), which the build rejects
/// before emitting anything.
pub fn symbol_name(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    let mut symbol = String::with_capacity("CONTENT_".len() + base.len());
    symbol.push_str("CONTENT_");
    symbol.extend(base.chars().map(|c| {
        if c.is_ascii_alphanumeric() {
            c.to_ascii_uppercase()
        } else {
            '_'
        }
    }));
    symbol
}

/// Name of the constant holding an array's content length.
pub fn length_symbol(symbol: &str) -> String {
    format!("{symbol}_LENGTH")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_name() {
        assert_eq!(symbol_name("a.b-c.js"), "CONTENT_A_B_C_JS");
        assert_eq!(symbol_name("index.html"), "CONTENT_INDEX_HTML");
        assert_eq!(symbol_name("logo 2.png"), "CONTENT_LOGO_2_PNG");
        assert_eq!(symbol_name("café.txt"), "CONTENT_CAF__TXT");
        assert_eq!(symbol_name("js/vendor/jquery.min.js"), "CONTENT_JQUERY_MIN_JS");
    }

    #[test]
    fn test_collisions_are_possible() {
        assert_eq!(symbol_name("a-b.js"), symbol_name("a.b.js"));
        assert_eq!(symbol_name("js/app.js"), symbol_name("app.js"));
    }

    #[test]
    fn test_length_symbol() {
        assert_eq!(length_symbol("CONTENT_APP_JS"), "CONTENT_APP_JS_LENGTH");
    }
}
