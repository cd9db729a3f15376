//! Glob patterns translated to anchored regular expressions.
//!
//! | glob      | matches                                   |
//! |-----------|-------------------------------------------|
//! | `*`       | any run of characters except `/`          |
//! | `**`      | any run of characters, `/` included       |
//! | `?`       | exactly one character except `/`          |
//! | `[ab]`    | one character from the class              |
//! | `[!ab]`   | one character not in the class            |
//! | `{a,b}`   | one of the alternatives, nestable         |
//! | `\c`      | the character `c` literally               |
//!
//! Every other character, regex metacharacters included, matches itself. A
//! pattern always matches the whole input.
//!
//! ```
//! use typereg_glob::GlobMatcher;
//!
//! let matcher = GlobMatcher::new("assets/**.{png,jpg}").unwrap();
//! assert!(matcher.is_match("assets/ui/button.png"));
//! assert!(!matcher.is_match("assets/ui/button.svg"));
//! ```

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

/// Errors raised while translating a glob.
#[derive(Debug, Error)]
pub enum GlobError {
    /// The glob is malformed.
    #[error("invalid glob '{pattern}': {reason}")]
    InvalidPattern {
        /// The glob as given.
        pattern: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The translated expression was rejected by the regex engine.
    #[error("glob does not form a valid regex: {0}")]
    Regex(#[from] regex::Error),
}

impl GlobError {
    fn invalid(pattern: &str, reason: &'static str) -> Self {
        GlobError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}

/// Translate `pattern` into the regex source it stands for, anchored at both
/// ends.
pub fn translate(pattern: &str) -> Result<String, GlobError> {
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    out.push_str("^(?:");

    let mut chars = pattern.chars().peekable();
    let mut group_depth = 0usize;
    let mut in_class = false;

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            let escaped = chars
                .next()
                .ok_or_else(|| GlobError::invalid(pattern, "dangling escape"))?;
            push_literal(&mut out, escaped);
            continue;
        }

        if in_class {
            match ch {
                ']' => {
                    in_class = false;
                    out.push(']');
                }
                '[' | '&' | '~' => {
                    out.push('\\');
                    out.push(ch);
                }
                _ => out.push(ch),
            }
            continue;
        }

        match ch {
            '*' => {
                if chars.next_if_eq(&'*').is_some() {
                    out.push_str(".*");
                } else {
                    out.push_str("[^/]*");
                }
            }
            '?' => out.push_str("[^/]"),
            '[' => {
                in_class = true;
                out.push('[');
                if chars.next_if_eq(&'!').is_some() {
                    out.push('^');
                } else if chars.next_if_eq(&'^').is_some() {
                    out.push_str("\\^");
                }
                // a leading ']' is part of the class
                if chars.next_if_eq(&']').is_some() {
                    out.push_str("\\]");
                }
            }
            '{' => {
                group_depth += 1;
                out.push_str("(?:");
            }
            '}' => {
                if group_depth == 0 {
                    return Err(GlobError::invalid(pattern, "unmatched '}'"));
                }
                group_depth -= 1;
                out.push(')');
            }
            ',' if group_depth > 0 => out.push('|'),
            _ => push_literal(&mut out, ch),
        }
    }

    if in_class {
        return Err(GlobError::invalid(pattern, "unclosed '['"));
    }
    if group_depth > 0 {
        return Err(GlobError::invalid(pattern, "unclosed '{'"));
    }

    out.push_str(")$");
    Ok(out)
}

/// Compile `pattern` into a regex matching exactly the inputs the glob does.
pub fn glob_to_regex(pattern: &str) -> Result<Regex, GlobError> {
    Ok(Regex::new(&translate(pattern)?)?)
}

fn push_literal(out: &mut String, ch: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
}

/// A compiled glob.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    glob: String,
    regex: Regex,
}

impl GlobMatcher {
    /// Compile `pattern`.
    pub fn new(pattern: &str) -> Result<Self, GlobError> {
        Ok(Self {
            glob: pattern.to_string(),
            regex: glob_to_regex(pattern)?,
        })
    }

    /// Check whether the whole of `input` matches.
    #[inline]
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// The glob this matcher was built from.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// The translated regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl FromStr for GlobMatcher {
    type Err = GlobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for GlobMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello/*.*", "hello/world.txt", true)]
    #[case("hello/*.*", "hello/world/lala.txt", false)]
    #[case("hello/**.*", "hello/world.txt", true)]
    #[case("hello/**.*", "hello/world/lala.txt", true)]
    fn star_depth(#[case] glob: &str, #[case] input: &str, #[case] expected: bool) {
        assert_eq!(glob_to_regex(glob).unwrap().is_match(input), expected);
    }

    #[rstest]
    #[case("hello/world.txt", true)]
    #[case("hello/world.json", true)]
    #[case("hello/world/lala.txt", true)]
    #[case("hello/world/lala.ok", false)]
    fn extension_groups(#[case] input: &str, #[case] expected: bool) {
        let regex = glob_to_regex("hello/**.{txt,lala,json}").unwrap();
        assert_eq!(regex.is_match(input), expected);
    }

    #[rstest]
    #[case("hello/world.txt", true)]
    #[case("hellk/world.txt", true)]
    #[case("hello/world.json", true)]
    #[case("hellk/world.json", true)]
    #[case("hello/world/lala.txt", true)]
    #[case("hellk/world/lala.txt", true)]
    #[case("hellok/world/lala.txt", false)]
    #[case("hello/world/lala.ok", false)]
    #[case("hellk/world/lala.ok", false)]
    fn class_checks(#[case] input: &str, #[case] expected: bool) {
        let regex = glob_to_regex("hell[ok]/**.{txt,lala,json}").unwrap();
        assert_eq!(regex.is_match(input), expected);
    }

    #[rstest]
    #[case("hello/world.txt", false)]
    #[case("hello/world.config.txt", false)]
    #[case("world.config.txt", true)]
    fn root_find(#[case] input: &str, #[case] expected: bool) {
        let regex = glob_to_regex("*.config.*").unwrap();
        assert_eq!(regex.is_match(input), expected);
    }

    #[rstest]
    #[case("file?.rs", "file1.rs", true)]
    #[case("file?.rs", "file10.rs", false)]
    #[case("a?b", "a/b", false)]
    #[case("[!ab]x", "cx", true)]
    #[case("[!ab]x", "ax", false)]
    #[case("[a-c]", "b", true)]
    #[case("[]x]", "]", true)]
    #[case("{src,tests}/{*.rs,mod/{a,b}.rs}", "tests/mod/b.rs", true)]
    #[case("{src,tests}/{*.rs,mod/{a,b}.rs}", "src/mod/c.rs", false)]
    #[case("a,b", "a,b", true)]
    fn wildcards_classes_and_groups(#[case] glob: &str, #[case] input: &str, #[case] expected: bool) {
        assert_eq!(glob_to_regex(glob).unwrap().is_match(input), expected);
    }

    #[rstest]
    #[case("a+b(c)|d^$", "a+b(c)|d^$")]
    #[case("v1.0", "v1.0")]
    #[case(r"\*.txt", "*.txt")]
    #[case(r"\{a\,b\}", "{a,b}")]
    #[case(r"\\", r"\")]
    fn literals(#[case] glob: &str, #[case] input: &str) {
        let regex = glob_to_regex(glob).unwrap();
        assert!(regex.is_match(input));
    }

    #[test]
    fn literal_metacharacters_do_not_widen() {
        let regex = glob_to_regex("v1.0").unwrap();
        assert!(!regex.is_match("v1x0"));
        let escaped = glob_to_regex(r"\*.txt").unwrap();
        assert!(!escaped.is_match("a.txt"));
    }

    #[rstest]
    #[case("{a,b", "unclosed '{'")]
    #[case("a}", "unmatched '}'")]
    #[case("[abc", "unclosed '['")]
    #[case("abc\\", "dangling escape")]
    fn malformed_patterns(#[case] glob: &str, #[case] expected_reason: &str) {
        match glob_to_regex(glob).unwrap_err() {
            GlobError::InvalidPattern { pattern, reason } => {
                assert_eq!(pattern, glob);
                assert_eq!(reason, expected_reason);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn translate_output() {
        assert_eq!(translate("*.rs").unwrap(), r"^(?:[^/]*\.rs)$");
        assert_eq!(translate("**/{a,b}").unwrap(), r"^(?:.*/(?:a|b))$");
        assert_eq!(translate("[!x]").unwrap(), r"^(?:[^x])$");
    }

    #[test]
    fn matcher_api() {
        let matcher: GlobMatcher = "config/*.toml".parse().unwrap();
        assert_eq!(matcher.as_str(), "config/*.toml");
        assert_eq!(matcher.to_string(), "config/*.toml");
        assert_eq!(matcher.regex().as_str(), r"^(?:config/[^/]*\.toml)$");
        assert!(matcher.is_match("config/app.toml"));
        assert!(!matcher.is_match("config/app.toml.bak"));
        assert!(!matcher.is_match("other/config/app.toml"));
        assert!("[".parse::<GlobMatcher>().is_err());
    }
}
