//! Property-based tests: transcript rendering.

use proptest::prelude::*;
use relay_provider_dify::build_query;
use relay_types::*;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Assistant), Just(Role::System)]
}

fn arb_plain_message() -> impl Strategy<Value = Message> {
    (arb_role(), "[a-zA-Z0-9 .,!?]{0,24}").prop_map(|(role, text)| Message::new(role, text))
}

fn arb_non_text_part() -> impl Strategy<Value = ContentPart> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|url| ContentPart::Image {
            source: ImageSource::Url { url },
        }),
        "[a-z]{1,8}".prop_map(|name| ContentPart::ToolUse {
            id: "t1".into(),
            name,
            input: serde_json::json!({}),
        }),
        "[a-z]{0,8}".prop_map(|content| ContentPart::ToolResult {
            tool_use_id: "t1".into(),
            content,
        }),
    ]
}

fn arb_part() -> impl Strategy<Value = ContentPart> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,16}".prop_map(|text| ContentPart::Text { text }),
        arb_non_text_part(),
    ]
}

fn arb_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        arb_plain_message(),
        (arb_role(), proptest::collection::vec(arb_part(), 0..5))
            .prop_map(|(role, parts)| Message::new(role, parts)),
    ]
}

/// The rendering law stated directly: one line per text fragment.
fn expected_transcript(system: &str, messages: &[Message]) -> String {
    let mut lines = Vec::new();
    if !system.is_empty() {
        lines.push(format!("System: {system}\n"));
    }
    for message in messages {
        let texts: Vec<&str> = match &message.content {
            MessageContent::Text(text) => vec![text.as_str()],
            MessageContent::Parts(parts) => parts.iter().filter_map(ContentPart::as_text).collect(),
        };
        for text in texts {
            lines.push(format!("{}: {}", message.role, text));
        }
    }
    lines.join("\n").trim().to_string()
}

proptest! {
    #[test]
    fn transcript_matches_line_law(
        system in "[a-zA-Z ]{0,16}",
        messages in proptest::collection::vec(arb_message(), 0..6),
    ) {
        prop_assert_eq!(build_query(&system, &messages), expected_transcript(&system, &messages));
    }

    #[test]
    fn transcript_is_deterministic(
        system in "[a-zA-Z ]{0,16}",
        messages in proptest::collection::vec(arb_message(), 0..6),
    ) {
        prop_assert_eq!(build_query(&system, &messages), build_query(&system, &messages));
    }

    #[test]
    fn non_text_parts_never_contribute(
        role in arb_role(),
        parts in proptest::collection::vec(arb_non_text_part(), 0..5),
    ) {
        prop_assert_eq!(build_query("", &[Message::new(role, parts)]), "");
    }

    #[test]
    fn transcript_has_no_outer_whitespace(
        messages in proptest::collection::vec(arb_plain_message(), 0..6),
    ) {
        let transcript = build_query("", &messages);
        prop_assert_eq!(transcript.trim(), transcript.as_str());
    }
}
