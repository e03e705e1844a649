//! List marker computation.

use crate::model::{Inline, ListOrdering, Span, TextRun, OBJECT_REPLACEMENT};

/// Literal item marker inside `[list]` content.
pub const ITEM_PLACEHOLDER: &str = "[*]";

/// Marker state for one list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScope {
    /// Marker family
    pub ordering: ListOrdering,

    /// Number of markers emitted so far
    pub counter: u32,
}

impl ListScope {
    /// Create a fresh scope with its counter at zero.
    pub fn new(ordering: ListOrdering) -> Self {
        Self {
            ordering,
            counter: 0,
        }
    }

    /// Advance the counter and return the marker for the new item.
    pub fn next_marker(&mut self) -> String {
        self.counter += 1;
        marker(self.ordering, self.counter)
    }

    /// Replace every item placeholder in a run with the next marker.
    ///
    /// A marker that does not start a line gets a newline in front of it.
    /// Spaces right after a placeholder are dropped.
    pub fn substitute(&mut self, run: TextRun) -> TextRun {
        let mut out = TextRun::new();
        let mut last: Option<char> = None;

        for span in run.spans {
            let Inline::Text { text } = &span.content else {
                last = Some(OBJECT_REPLACEMENT);
                out.push(span);
                continue;
            };

            if !text.contains(ITEM_PLACEHOLDER) {
                last = text.chars().next_back().or(last);
                out.push(span);
                continue;
            }

            let mut rewritten = String::with_capacity(text.len() + 8);
            let mut rest = text.as_str();
            while let Some(pos) = rest.find(ITEM_PLACEHOLDER) {
                rewritten.push_str(&rest[..pos]);
                let before = rewritten.chars().next_back().or(last);
                if before.is_some_and(|c| c != '\n') {
                    rewritten.push('\n');
                }
                rewritten.push_str(&self.next_marker());
                rest = rest[pos + ITEM_PLACEHOLDER.len()..].trim_start_matches(' ');
            }
            rewritten.push_str(rest);

            last = rewritten.chars().next_back().or(last);
            out.push(Span::text(rewritten, span.style));
        }

        out
    }
}

/// Marker text for the `n`-th item (1-based) of a list.
pub fn marker(ordering: ListOrdering, n: u32) -> String {
    match ordering {
        ListOrdering::Bullet => "\u{2022} ".to_string(),
        ListOrdering::Numeric => format!("{}. ", n),
        ListOrdering::Alphabetic => format!("{}. ", alphabetic(n)),
        ListOrdering::RomanUpper => format!("{}. ", roman(n)),
        ListOrdering::RomanLower => format!("{}. ", roman(n).to_lowercase()),
    }
}

/// Letter for the `n`-th item; stays at `z` past the alphabet.
fn alphabetic(n: u32) -> char {
    let offset = n.clamp(1, 26) - 1;
    char::from(b'a' + offset as u8)
}

/// Upper-case roman numeral for `n`.
pub fn roman(mut n: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for &(value, numeral) in &NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}
