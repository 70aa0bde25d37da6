//! Line-oriented preprocessing and whitespace tokenization.
//!
//! TinyBF's grammar is line-oriented: one statement per non-empty line after
//! comments are stripped, with `{`/`}` marking block bodies that span
//! multiple lines. Tokenizing a line is whitespace-splitting, except that a
//! quoted character literal (which may itself contain a space, e.g. `' '`)
//! is kept together as a single token.

/// Strip comments and blank lines, keeping 1-based line numbers for error messages.
pub fn preprocess(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let trimmed = strip_comment(raw).trim();
            if trimmed.is_empty() {
                None
            } else {
                Some((i + 1, trimmed.to_string()))
            }
        })
        .collect()
}

fn strip_comment(line: &str) -> &str {
    let mut in_quote = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '\'' => in_quote = !in_quote,
            '#' if !in_quote => return &line[..idx],
            _ => {}
        }
    }
    line
}

/// Split a preprocessed line into tokens, keeping `'x'`/`'\e'` literals intact.
pub fn tokenize(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            i += 1;
            continue;
        }
        if ch == '\'' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            let start = i;
            i += 1;
            if i < chars.len() && chars[i] == '\\' {
                i += 1;
                if i < chars.len() {
                    i += 1;
                }
            } else if i < chars.len() && chars[i] != '\'' {
                i += 1;
            }
            if i < chars.len() && chars[i] == '\'' {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
            continue;
        }
        current.push(ch);
        i += 1;
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
