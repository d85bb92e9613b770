//! The TEI cleaning policy.
//!
//! Order matters. The containment-conditioned deletions come before the
//! container rule because `p` is both a container and, when nested in
//! another `p`, a deletion target. Breaks inside running text and bare
//! breaks share an action, so their relative order only affects which rule
//! name shows up in a report.
//!
//! | # | rule                  | matches                                   | action          |
//! |---|-----------------------|-------------------------------------------|-----------------|
//! | 1 | `header`              | `teiHeader`                               | copy verbatim   |
//! | 2 | `nested-paragraph`    | `p` below a `p`                           | delete          |
//! | 3 | `break-in-running-text` | `lb`, `pb` below a `p` or `l`           | delete          |
//! | 4 | `speech-turn`         | `sp`                                      | relabel to `ab` |
//! | 5 | `container`           | `text`, `body`, `div`, `p`, ...           | copy + recurse  |
//! | 6 | `highlight-in-title`  | text of `hi` whose parent is `title`      | copy text       |
//! | 7 | `admitted-text`       | text of `l`, `hi`, `imprimatur`           | copy text       |
//! | 8 | `title-in-running-text` | text of `title` below a `p` or `l`      | copy text       |
//! | 9 | `silent-text`         | any other text of `title`, `note`         | delete          |
//! |10 | `page-break`          | `pb`                                      | delete          |
//! |11 | `figure`              | `figure`                                  | delete          |
//! |12 | `forme-work`          | `fw`                                      | delete          |
//! |13 | `line-break`          | `lb`                                      | delete          |
//! |14 | `gap`                 | `gap`                                     | delete          |

use super::vocab::{
    ANNOTATION_BLOCK, CONTAINERS, FIGURE, FORME_WORK, GAP, HEADER, HIGHLIGHT, LINE_BREAK,
    PAGE_BREAK, PARAGRAPH, RUNNING_TEXT, SILENT_PARENTS, SPEECH, TEXT_PARENTS, TITLE,
};
use super::{Action, Pattern, Rule};

pub const RULES: &[Rule] = &[
    Rule::new(
        "header",
        Pattern::Element { names: &[HEADER] },
        Action::CopyVerbatim,
    ),
    // Known lossy: the inner paragraph's text is dropped, not hoisted.
    Rule::new(
        "nested-paragraph",
        Pattern::ElementWithin {
            names: &[PARAGRAPH],
            ancestors: &[PARAGRAPH],
        },
        Action::Delete,
    ),
    Rule::new(
        "break-in-running-text",
        Pattern::ElementWithin {
            names: &[LINE_BREAK, PAGE_BREAK],
            ancestors: RUNNING_TEXT,
        },
        Action::Delete,
    ),
    Rule::new(
        "speech-turn",
        Pattern::Element { names: &[SPEECH] },
        Action::Relabel(ANNOTATION_BLOCK),
    ),
    Rule::new(
        "container",
        Pattern::Element { names: CONTAINERS },
        Action::CopyAndRecurse,
    ),
    Rule::new(
        "highlight-in-title",
        Pattern::TextUnder {
            parents: &[HIGHLIGHT],
            grandparents: &[TITLE],
        },
        Action::CopyText,
    ),
    Rule::new(
        "admitted-text",
        Pattern::Text {
            parents: TEXT_PARENTS,
        },
        Action::CopyText,
    ),
    Rule::new(
        "title-in-running-text",
        Pattern::TextWithin {
            parents: &[TITLE],
            ancestors: RUNNING_TEXT,
        },
        Action::CopyText,
    ),
    Rule::new(
        "silent-text",
        Pattern::Text {
            parents: SILENT_PARENTS,
        },
        Action::Delete,
    ),
    Rule::new(
        "page-break",
        Pattern::Element {
            names: &[PAGE_BREAK],
        },
        Action::Delete,
    ),
    Rule::new(
        "figure",
        Pattern::Element { names: &[FIGURE] },
        Action::Delete,
    ),
    Rule::new(
        "forme-work",
        Pattern::Element {
            names: &[FORME_WORK],
        },
        Action::Delete,
    ),
    Rule::new(
        "line-break",
        Pattern::Element {
            names: &[LINE_BREAK],
        },
        Action::Delete,
    ),
    Rule::new("gap", Pattern::Element { names: &[GAP] }, Action::Delete),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::vocab::APPARATUS;

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn test_every_apparatus_element_has_a_delete_rule() {
        for name in APPARATUS {
            assert!(
                RULES.iter().any(|r| r.action == Action::Delete
                    && matches!(r.pattern, Pattern::Element { names } if names == [*name])),
                "no unconditional delete rule for {name}"
            );
        }
    }

    #[test]
    fn test_nested_paragraph_precedes_container() {
        let pos = |name: &str| RULES.iter().position(|r| r.name == name).unwrap();
        assert!(pos("nested-paragraph") < pos("container"));
        assert!(pos("header") == 0);
    }
}
