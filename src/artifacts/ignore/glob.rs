use anyhow::Context;
use regex::Regex;

/// One compiled ignore pattern, anchored to a whole file name.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    regex: Regex,
}

impl IgnoreRule {
    pub fn try_parse(pattern: &str) -> anyhow::Result<Self> {
        let translated = translate(pattern)?;
        let regex = Regex::new(&translated)
            .with_context(|| format!("invalid ignore pattern: {pattern}"))?;

        Ok(IgnoreRule {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Translate shell glob syntax into an anchored regular expression.
///
/// `*` and `?` never cross a `/`; bracket classes accept `!` or `^` negation.
fn translate(pattern: &str) -> anyhow::Result<String> {
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '\\' => match chars.next() {
                Some(escaped) => out.push_str(&regex::escape(&escaped.to_string())),
                None => anyhow::bail!("trailing backslash in ignore pattern: {pattern}"),
            },
            '[' => {
                let mut class = String::from("[");
                if let Some(&negation) = chars.peek()
                    && (negation == '!' || negation == '^')
                {
                    chars.next();
                    class.push('^');
                }
                // a leading ']' is a literal member of the class
                if chars.peek() == Some(&']') {
                    chars.next();
                    class.push_str("\\]");
                }

                let mut closed = false;
                for member in chars.by_ref() {
                    match member {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '\\' | '[' | '&' | '~' => {
                            class.push('\\');
                            class.push(member);
                        }
                        _ => class.push(member),
                    }
                }

                if !closed {
                    anyhow::bail!("unterminated character class in ignore pattern: {pattern}");
                }
                class.push(']');
                out.push_str(&class);
            }
            _ => out.push_str(&regex::escape(&c.to_string())),
        }
    }

    out.push('$');
    Ok(out)
}
