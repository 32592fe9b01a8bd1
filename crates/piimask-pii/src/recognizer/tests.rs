//! Tests for recognizer configuration and composition

use super::*;
use std::io::Write;

struct FixedRecognizer(Vec<RecognizedSpan>);

impl EntityRecognizer for FixedRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[test]
fn test_recognizer_config_default() {
    assert_eq!(RecognizerConfig::default(), RecognizerConfig::Cue);
}

#[test]
fn test_recognizer_config_from_yaml_like_json() {
    let json = r#"{"kind": "gazetteer", "names": ["Ada", "Grace"]}"#;
    let config: RecognizerConfig = serde_json::from_str(json).unwrap();

    assert_eq!(
        config,
        RecognizerConfig::Gazetteer {
            path: None,
            names: vec!["Ada".to_string(), "Grace".to_string()],
            case_insensitive: false,
        }
    );
}

#[test]
fn test_composite_config_deserialization() {
    let json = r#"{"kind": "composite", "recognizers": [{"kind": "cue"}, {"kind": "gazetteer", "names": ["Ada"]}]}"#;
    let config: RecognizerConfig = serde_json::from_str(json).unwrap();

    match config {
        RecognizerConfig::Composite { recognizers } => assert_eq!(recognizers.len(), 2),
        other => panic!("unexpected config: {:?}", other),
    }
}

#[test]
fn test_build_gazetteer_from_file_and_inline() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Ngozi").unwrap();

    let config = RecognizerConfig::Gazetteer {
        path: Some(file.path().to_path_buf()),
        names: vec!["Ada".to_string()],
        case_insensitive: false,
    };

    let recognizer = build_recognizer(&config).unwrap();
    let spans = recognizer.recognize("Ada and Ngozi").unwrap();
    assert_eq!(spans.len(), 2);
    assert_eq!(recognizer.name(), "gazetteer");
}

#[test]
fn test_build_fails_fast_on_missing_gazetteer() {
    let config = RecognizerConfig::Gazetteer {
        path: Some(PathBuf::from("/nonexistent/gazetteer.txt")),
        names: Vec::new(),
        case_insensitive: false,
    };

    assert!(matches!(build_recognizer(&config), Err(Error::Io(_))));
}

#[test]
fn test_build_fails_on_empty_gazetteer() {
    let config = RecognizerConfig::Gazetteer {
        path: None,
        names: Vec::new(),
        case_insensitive: false,
    };

    assert!(build_recognizer(&config).is_err());
}

#[test]
fn test_composite_concatenates_in_order() {
    let first: Arc<dyn EntityRecognizer> =
        Arc::new(FixedRecognizer(vec![RecognizedSpan::person("Grace", 10, 15)]));
    let second: Arc<dyn EntityRecognizer> =
        Arc::new(FixedRecognizer(vec![RecognizedSpan::person("Ada", 0, 3)]));

    let composite = CompositeRecognizer::new(vec![first, second]).unwrap();
    let spans = composite.recognize("ignored").unwrap();

    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].text, "Grace");
    assert_eq!(spans[1].text, "Ada");
}

#[test]
fn test_composite_requires_backends() {
    assert!(CompositeRecognizer::new(Vec::new()).is_err());
}

#[test]
fn test_entity_category_serialization() {
    let json = serde_json::to_string(&EntityCategory::Person).unwrap();
    assert_eq!(json, r#""person""#);

    let other: EntityCategory = serde_json::from_str(r#"{"other": "WORK_OF_ART"}"#).unwrap();
    assert_eq!(other, EntityCategory::Other("WORK_OF_ART".to_string()));
}
