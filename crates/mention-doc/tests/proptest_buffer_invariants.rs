//! Property-based invariant tests for the editing buffer.
//!
//! These verify structural invariants that must hold after any sequence of
//! editing operations:
//!
//! 1. The caret never exceeds the unit length of its paragraph.
//! 2. A paragraph never holds empty or adjacent text runs.
//! 3. Deleting backwards from the end empties the paragraph completely.

use mention_doc::{Buffer, Inline, Mention};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(String),
    Mention(String),
    DeleteBack,
    DeleteForward,
    Left,
    Right,
    Home,
    End,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z @.\\n]{1,4}".prop_map(Op::Insert),
        "[A-Z][a-z]{0,5}".prop_map(Op::Mention),
        Just(Op::DeleteBack),
        Just(Op::DeleteForward),
        Just(Op::Left),
        Just(Op::Right),
        Just(Op::Home),
        Just(Op::End),
    ]
}

fn apply(buf: &mut Buffer, op: &Op) {
    match op {
        Op::Insert(s) => buf.insert_str(s),
        Op::Mention(name) => {
            buf.insert_mention(Mention::new(name.clone(), format!("/u/{name}")));
        }
        Op::DeleteBack => {
            buf.delete_back();
        }
        Op::DeleteForward => {
            buf.delete_forward();
        }
        Op::Left => {
            buf.move_left();
        }
        Op::Right => {
            buf.move_right();
        }
        Op::Home => buf.move_home(),
        Op::End => buf.move_end(),
    }
}

proptest! {
    #[test]
    fn caret_stays_in_bounds(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut buf = Buffer::new();
        for op in &ops {
            apply(&mut buf, op);
            prop_assert!(
                buf.caret().offset <= buf.current_units(),
                "caret {} past unit length {} after {op:?}",
                buf.caret().offset,
                buf.current_units()
            );
        }
    }

    #[test]
    fn runs_stay_normalized(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut buf = Buffer::new();
        for op in &ops {
            apply(&mut buf, op);
            for block in &buf.document().blocks {
                let mut prev_was_text = false;
                for child in &block.children {
                    match child {
                        Inline::Text(run) => {
                            prop_assert!(!run.text.is_empty(), "empty text run");
                            prop_assert!(!prev_was_text, "adjacent text runs");
                            prev_was_text = true;
                        }
                        Inline::Mention(_) => prev_was_text = false,
                    }
                }
            }
        }
    }

    #[test]
    fn deleting_everything_empties_the_paragraph(
        ops in proptest::collection::vec(op_strategy(), 0..25),
    ) {
        let mut buf = Buffer::new();
        for op in &ops {
            apply(&mut buf, op);
        }
        buf.move_end();
        while buf.delete_back() {}
        prop_assert_eq!(buf.current_units(), 0);
        prop_assert!(buf.document().is_blank());
    }
}
