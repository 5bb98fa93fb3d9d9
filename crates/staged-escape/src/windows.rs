//! Quoting for arguments consumed by `cmd.exe /C`.

/// Characters cmd.exe treats specially outside of double quotes.
const CMD_META_CHARS: &[char] = &['(', ')', '%', '!', '^', '"', '<', '>', '&', '|'];

fn needs_quotes(arg: &str) -> bool {
    arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || CMD_META_CHARS.contains(&c))
}

/// Escape an argument for the Windows command interpreter.
///
/// Arguments without whitespace or cmd.exe meta characters are returned
/// unchanged. Anything else is wrapped in double quotes with:
/// - internal `"` doubled
/// - `%` written as `%%`
/// - backslashes that precede a `"` or the closing quote doubled, so the
///   C runtime argument splitter does not read them as quote escapes
pub fn escape_win_cmd_arg(arg: &str) -> String {
    if !needs_quotes(arg) {
        return arg.to_string();
    }

    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');

    let mut backslashes = 0usize;
    for c in arg.chars() {
        match c {
            '\\' => {
                backslashes += 1;
                out.push(c);
                continue;
            }
            '"' => {
                out.extend(std::iter::repeat('\\').take(backslashes));
                out.push_str("\"\"");
            }
            '%' => out.push_str("%%"),
            _ => out.push(c),
        }
        backslashes = 0;
    }

    out.extend(std::iter::repeat('\\').take(backslashes));
    out.push('"');
    out
}
