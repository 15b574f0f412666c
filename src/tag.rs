//! Field annotation strings.
//!
//! An annotation has the form `segment[,directive]*`. Segment 0 renames the
//! field's key segment; the remaining tokens switch on directives. Unknown
//! directive tokens are ignored.
//!
//! ```rust
//! use serde_dotted::FieldTag;
//!
//! let tag = FieldTag::parse("Owner", Some("owner,omitempty,ignoreparents"));
//! assert_eq!(tag.segment, "owner");
//! assert!(tag.omit_empty);
//! assert!(tag.ignore_parents);
//! assert!(!tag.excluded);
//! ```

/// Segment value that removes a field from the output.
pub const TAG_EXCLUDE: &str = "-";
/// Directive: drop the field when it is absent (nil reference, unset container or any-slot).
pub const TAG_OMIT_EMPTY: &str = "omitempty";
/// Directive: root the field's key at its own segment, discarding the parent prefix.
pub const TAG_IGNORE_PARENTS: &str = "ignoreparents";
/// Separates the segment and directive tokens.
pub const TAG_SEPARATOR: char = ',';

/// The parsed form of a field's annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldTag<'a> {
    pub segment: &'a str,
    pub omit_empty: bool,
    pub ignore_parents: bool,
    pub excluded: bool,
}

impl<'a> FieldTag<'a> {
    /// Parses the annotation of a field declared as `name`.
    ///
    /// A missing or empty annotation, or an empty segment 0, keeps the
    /// declared name. Once segment 0 is the exclusion sentinel no directive
    /// is read.
    #[must_use]
    pub fn parse(name: &'a str, tag: Option<&'a str>) -> Self {
        let mut parsed = FieldTag {
            segment: name,
            omit_empty: false,
            ignore_parents: false,
            excluded: false,
        };

        let Some(tag) = tag.filter(|t| !t.is_empty()) else {
            return parsed;
        };

        let mut tokens = tag.split(TAG_SEPARATOR);
        match tokens.next() {
            Some(TAG_EXCLUDE) => {
                parsed.segment = TAG_EXCLUDE;
                parsed.excluded = true;
                return parsed;
            }
            Some(segment) if !segment.is_empty() => parsed.segment = segment,
            _ => {}
        }

        for token in tokens {
            match token {
                TAG_OMIT_EMPTY => parsed.omit_empty = true,
                TAG_IGNORE_PARENTS => parsed.ignore_parents = true,
                _ => {}
            }
        }

        parsed
    }
}
