use aip_blocks::{Marker, replace_block};
use proptest::prelude::*;

const START: &str = "### AIPHELPER_MARKER_START ###";
const END: &str = "### AIPHELPER_MARKER_END ###";

// Lowercase-only lines can never collide with the sentinel lines
fn plain_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z =\\[\\]\"]{0,12}", 0..8)
}

fn generated_block() -> impl Strategy<Value = String> {
    (plain_lines(), any::<bool>()).prop_map(|(body, trailing_newline)| {
        let mut lines = vec![START.to_string()];
        lines.extend(body);
        lines.push(END.to_string());
        let mut text = lines.join("\n");
        if trailing_newline {
            text.push('\n');
        }
        text
    })
}

proptest! {
    #[test]
    fn test_append_when_absent(doc in plain_lines(), block in generated_block()) {
        let doc = doc.join("\n");
        let result = replace_block(&Marker::default(), &doc, &block);

        let expected = if doc.is_empty() {
            block.clone()
        } else {
            format!("{doc}\n{block}")
        };
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn test_replace_when_present(
        head in plain_lines(),
        old in plain_lines(),
        tail in plain_lines(),
        body in prop::collection::vec("[a-z]{1,6}", 0..6),
    ) {
        let mut doc = head.clone();
        doc.push(START.to_string());
        doc.extend(old);
        doc.push(END.to_string());
        doc.extend(tail.clone());

        let result = replace_block(&Marker::default(), &doc.join("\n"), &body.join("\n"));

        let mut expected = head;
        expected.extend(body);
        expected.extend(tail);
        prop_assert_eq!(result, expected.join("\n"));
    }

    #[test]
    fn test_idempotent(
        doc in plain_lines(),
        existing in prop::option::of(generated_block()),
        block in generated_block(),
    ) {
        let marker = Marker::default();
        let mut doc = doc.join("\n");
        if let Some(existing) = existing {
            doc = replace_block(&marker, &doc, &existing);
        }

        let once = replace_block(&marker, &doc, &block);
        let twice = replace_block(&marker, &once, &block);

        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_lines_outside_block_survive(
        head in plain_lines(),
        tail in prop::collection::vec("[a-z]{1,6}", 0..6),
        block in generated_block(),
    ) {
        let mut doc = head.clone();
        doc.push(START.to_string());
        doc.push("STALE-LINE".to_string());
        doc.push(END.to_string());
        doc.extend(tail.clone());

        let result = replace_block(&Marker::default(), &doc.join("\n"), &block);
        let lines: Vec<&str> = result.split('\n').collect();

        prop_assert!(lines.len() >= head.len() + tail.len());
        for (i, line) in head.iter().enumerate() {
            prop_assert_eq!(lines[i], line.as_str());
        }
        let offset = lines.len() - tail.len();
        for (i, line) in tail.iter().enumerate() {
            prop_assert_eq!(lines[offset + i], line.as_str());
        }
        prop_assert!(!lines.contains(&"STALE-LINE"));
    }
}
