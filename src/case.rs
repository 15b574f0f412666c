//! Naming policies for key segments.
//!
//! A [`NamingPolicy`] rewrites a field's *declared* name into its key segment.
//! Word-based policies split the name on separators (`_`, `-`, space, `.`),
//! on a lowercase letter or digit followed by an uppercase letter, and before
//! the last capital of an acronym that runs into a lowercase letter
//! (`HTTPServer` → `HTTP`, `Server`). Digits stay with the word before them.
//!
//! ```rust
//! use serde_dotted::NamingPolicy;
//!
//! assert_eq!(NamingPolicy::Snake.apply("UserName"), "user_name");
//! assert_eq!(NamingPolicy::UpperCamel.apply("user_name"), "UserName");
//! assert_eq!(NamingPolicy::LowerCamel.apply("UserID"), "userID");
//! assert_eq!(NamingPolicy::Upper.apply("UserName"), "USERNAME");
//! ```

/// Casing transform applied to every declared field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamingPolicy {
    /// The declared name, unchanged.
    Identity,
    /// `username`
    Lower,
    /// `USERNAME`
    Upper,
    /// `UserName`
    UpperCamel,
    /// `userName`
    LowerCamel,
    /// `user_name`
    Snake,
}

impl NamingPolicy {
    /// Applies the policy to a declared field name.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            NamingPolicy::Identity => name.to_string(),
            NamingPolicy::Lower => name.to_lowercase(),
            NamingPolicy::Upper => name.to_uppercase(),
            NamingPolicy::UpperCamel => to_upper_camel(name),
            NamingPolicy::LowerCamel => to_lower_camel(name),
            NamingPolicy::Snake => to_snake(name),
        }
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | ' ' | '.')
}

fn split_words(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(pos, c)) in chars.iter().enumerate() {
        if is_separator(c) {
            if let Some(s) = start.take() {
                words.push(&name[s..pos]);
            }
            continue;
        }

        if let Some(s) = start {
            let prev = chars[i - 1].1;
            let next = chars.get(i + 1).map(|&(_, n)| n);
            let boundary = c.is_uppercase()
                && (prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));
            if boundary {
                words.push(&name[s..pos]);
                start = Some(pos);
            }
        } else {
            start = Some(pos);
        }
    }

    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn to_upper_camel(name: &str) -> String {
    split_words(name).into_iter().map(capitalize).collect()
}

fn to_lower_camel(name: &str) -> String {
    let mut words = split_words(name).into_iter();
    let Some(first) = words.next() else {
        return String::new();
    };
    let mut out = first.to_lowercase();
    out.extend(words.map(capitalize));
    out
}

fn to_snake(name: &str) -> String {
    split_words(name)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
