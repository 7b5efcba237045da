//! Property-based invariant tests for the mention composer.
//!
//! These verify behaviors that must hold for any inputs:
//!
//! 1. Candidate lists never exceed the cap and every entry contains the
//!    query case-insensitively.
//! 2. Typing `@word` always yields a trigger whose query is exactly `word`.
//! 3. Highlight navigation wraps modulo the candidate count, both ways.
//! 4. Committing inserts exactly one mention followed by one space.
//! 5. Serialized text content never contains raw angle brackets.

use mention_core::{Event, KeyCode, KeyEvent, User, UserDirectory};
use mention_doc::{Document, Inline, Paragraph, to_html};
use mention_widgets::{DEFAULT_MAX_SUGGESTIONS, MentionComposer};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn press(c: &mut MentionComposer, code: KeyCode) {
    c.handle_event(&Event::Key(KeyEvent::new(code)));
}

fn type_str(c: &mut MentionComposer, text: &str) {
    for ch in text.chars() {
        press(c, KeyCode::Char(ch));
    }
}

fn directory(names: &[String]) -> UserDirectory {
    names
        .iter()
        .map(|n| User::new(n.clone(), format!("/u/{n}"), String::new()))
        .collect()
}

fn mention_count(doc: &Document) -> usize {
    doc.blocks
        .iter()
        .flat_map(|b| b.children.iter())
        .filter(|c| matches!(c, Inline::Mention(_)))
        .count()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn candidates_capped_and_contain_query(
        names in proptest::collection::vec("[a-zA-Z]{1,10}", 0..30),
        query in "[a-zA-Z]{1,4}",
    ) {
        let mut c = MentionComposer::new().with_users(directory(&names));
        type_str(&mut c, &format!("@{query}"));

        let state = c.suggestions().expect("an @word trigger is always detected");
        prop_assert!(state.candidates().len() <= DEFAULT_MAX_SUGGESTIONS);
        let needle = query.to_lowercase();
        for name in state.candidates() {
            prop_assert!(
                name.to_lowercase().contains(&needle),
                "candidate {name:?} does not contain query {query:?}"
            );
        }
    }

    #[test]
    fn trigger_query_matches_typed_word(
        prefix in "[a-z ]{0,8}",
        word in "[a-zA-Z0-9]{1,8}",
    ) {
        let mut c = MentionComposer::new();
        type_str(&mut c, &format!("{prefix} @{word}"));

        let state = c.suggestions().expect("trigger");
        prop_assert_eq!(state.query(), word);
    }

    #[test]
    fn navigation_wraps_modulo_candidate_count(
        suffixes in proptest::collection::vec("[a-z]{0,5}", 1..12),
        steps in 0usize..24,
    ) {
        // Every name starts with "a" so "@a" matches all of them.
        let names: Vec<String> = suffixes.iter().map(|s| format!("a{s}")).collect();
        let mut c = MentionComposer::new().with_users(directory(&names));
        type_str(&mut c, "@a");

        let len = c
            .suggestions()
            .expect("trigger")
            .candidates()
            .len();
        prop_assert!(len >= 1);

        for _ in 0..steps {
            press(&mut c, KeyCode::Down);
        }
        prop_assert_eq!(
            c.suggestions().expect("still suggesting").highlighted(),
            steps % len
        );

        for _ in 0..steps {
            press(&mut c, KeyCode::Up);
        }
        prop_assert_eq!(c.suggestions().expect("still suggesting").highlighted(), 0);
    }

    #[test]
    fn commit_inserts_one_mention_and_one_space(name in "[A-Za-z]{1,10}") {
        let mut c = MentionComposer::new().with_users(directory(&[name.clone()]));
        type_str(&mut c, &format!("@{}", &name[..1]));
        press(&mut c, KeyCode::Enter);

        let doc = c.document();
        prop_assert_eq!(mention_count(doc), 1);
        prop_assert_eq!(doc.plain_text(), " ");
        prop_assert!(doc.contains_mention(&name));
    }

    #[test]
    fn serialized_text_has_no_raw_angle_brackets(text in "[ -~]{0,40}") {
        let doc = Document {
            blocks: vec![Paragraph {
                children: vec![Inline::text(text)],
            }],
        };
        let html = to_html(&doc);
        let inner = html
            .strip_prefix("<p>")
            .and_then(|s| s.strip_suffix("</p>"))
            .expect("paragraph wrapper");
        prop_assert!(!inner.contains('<'));
        prop_assert!(!inner.contains('>'));
    }
}
