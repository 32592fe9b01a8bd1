//! Tests for text masking

use super::*;
use crate::token_map::build_token_map;

const SAMPLE: &str = "My name is Chukwuebuka and my email is ebulamicheal@gmail.com. Use API key sk_test_51XYZ to connect.";

fn create_entity(label: PiiLabel, start: usize, end: usize, value: &str) -> Entity {
    Entity {
        value: value.to_string(),
        label,
        start,
        end,
        confidence: 0.9,
    }
}

fn sample_entities() -> Vec<Entity> {
    vec![
        create_entity(PiiLabel::Name, 11, 22, "Chukwuebuka"),
        create_entity(PiiLabel::Email, 39, 61, "ebulamicheal@gmail.com"),
        create_entity(PiiLabel::ApiKey, 75, 88, "sk_test_51XYZ"),
    ]
}

#[test]
fn test_marker_format() {
    assert_eq!(marker(&PiiLabel::ApiKey, 3), "[API_KEY:__TOKEN_3__]");
    assert_eq!(
        marker(&PiiLabel::Custom("PHONE".to_string()), 12),
        "[PHONE:__TOKEN_12__]"
    );
}

#[test]
fn test_mask_sample() {
    let masked = mask_text(SAMPLE, &sample_entities()).unwrap();

    assert_eq!(
        masked,
        "My name is [NAME:__TOKEN_1__] and my email is [EMAIL:__TOKEN_2__]. Use API key [API_KEY:__TOKEN_3__] to connect."
    );
}

#[test]
fn test_no_entities_returns_text_unchanged() {
    assert_eq!(mask_text("nothing here", &[]).unwrap(), "nothing here");
    assert_eq!(mask_text("", &[]).unwrap(), "");
}

#[test]
fn test_entities_at_edges() {
    let text = "Ada@x.io";
    let masked = mask_text(text, &[create_entity(PiiLabel::Email, 0, 8, "Ada@x.io")]).unwrap();
    assert_eq!(masked, "[EMAIL:__TOKEN_1__]");

    let text = "Ada Grace";
    let entities = vec![
        create_entity(PiiLabel::Name, 0, 3, "Ada"),
        create_entity(PiiLabel::Name, 4, 9, "Grace"),
    ];
    assert_eq!(
        mask_text(text, &entities).unwrap(),
        "[NAME:__TOKEN_1__] [NAME:__TOKEN_2__]"
    );
}

#[test]
fn test_adjacent_entities() {
    let text = "AdaGrace";
    let entities = vec![
        create_entity(PiiLabel::Name, 0, 3, "Ada"),
        create_entity(PiiLabel::Name, 3, 8, "Grace"),
    ];

    assert_eq!(
        mask_text(text, &entities).unwrap(),
        "[NAME:__TOKEN_1__][NAME:__TOKEN_2__]"
    );
}

#[test]
fn test_markers_match_token_map() {
    let entities = sample_entities();
    let masked = mask_text(SAMPLE, &entities).unwrap();
    let map = build_token_map(&entities);

    let mut position = 0;
    for (token, record) in &map {
        let marker = format!("[{}:{}]", record.label, token);
        let found = masked[position..]
            .find(&marker)
            .expect("marker should appear in order");
        position += found + marker.len();
    }
}

#[test]
fn test_unmatched_text_is_preserved() {
    let entities = sample_entities();
    let masked = mask_text(SAMPLE, &entities).unwrap();

    let mut original_rest = String::new();
    let mut cursor = 0;
    for entity in &entities {
        original_rest.push_str(&SAMPLE[cursor..entity.start]);
        cursor = entity.end;
    }
    original_rest.push_str(&SAMPLE[cursor..]);

    let mut masked_rest = masked.clone();
    for (index, entity) in entities.iter().enumerate() {
        masked_rest = masked_rest.replacen(&marker(&entity.label, index + 1), "", 1);
    }

    assert_eq!(masked_rest, original_rest);
}

#[test]
fn test_non_ascii_text() {
    let text = "Grüße, Zoë!";
    let start = text.find("Zoë").unwrap();
    let entities = vec![create_entity(PiiLabel::Name, start, start + "Zoë".len(), "Zoë")];

    assert_eq!(
        mask_text(text, &entities).unwrap(),
        "Grüße, [NAME:__TOKEN_1__]!"
    );
}

#[test]
fn test_overlapping_entities_rejected() {
    let text = "mail bob@example.com";
    let entities = vec![
        create_entity(PiiLabel::Email, 5, 20, "bob@example.com"),
        create_entity(PiiLabel::Custom("DOMAIN".to_string()), 9, 20, "example.com"),
    ];

    let result = mask_text(text, &entities);
    assert!(matches!(
        result,
        Err(Error::OverlappingSpans {
            start: 9,
            previous_end: 20
        })
    ));
}

#[test]
fn test_unsorted_entities_rejected() {
    let text = "Ada and Grace";
    let entities = vec![
        create_entity(PiiLabel::Name, 8, 13, "Grace"),
        create_entity(PiiLabel::Name, 0, 3, "Ada"),
    ];

    assert!(matches!(
        mask_text(text, &entities),
        Err(Error::OverlappingSpans { .. })
    ));
}

#[test]
fn test_out_of_bounds_rejected() {
    let entities = vec![create_entity(PiiLabel::Name, 2, 40, "whatever")];

    assert!(matches!(
        mask_text("short", &entities),
        Err(Error::InvalidSpan {
            start: 2,
            end: 40,
            len: 5
        })
    ));
}

#[test]
fn test_empty_span_rejected() {
    let entities = vec![create_entity(PiiLabel::Name, 2, 2, "")];
    assert!(mask_text("short", &entities).is_err());
}

#[test]
fn test_char_boundary_rejected() {
    let entities = vec![create_entity(PiiLabel::Name, 1, 2, "x")];
    assert!(matches!(
        mask_text("é!", &entities),
        Err(Error::InvalidSpan { .. })
    ));
}
