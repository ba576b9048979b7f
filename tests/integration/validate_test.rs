//! Integration tests for the line-level validator against files on disk

use oto_file::error::OtoError;
use oto_file::oto::{OtoFile, SkipReason};
use oto_file::validator::{LineIssue, OtoValidator};

use tempfile::tempdir;

const HAND_EDITED: &str = "\
# CV voicebank
_a.wav=- a,100,60,-300,40,10
_ka.wav=120,80,-200,60,20,- ka
_sa.wav=40,90,-150,70,30
_ta.wav=10,20,30,40,50,60
_na.wav=1,2,3
oops
_ha.wav=- a,5,5,5,5,5
";

#[test]
fn test_validator_matches_loader() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("oto.ini");
    std::fs::write(&path, HAND_EDITED).unwrap();

    let stats = OtoValidator::new(None).validate(&path).unwrap();
    let mut oto = OtoFile::new();
    oto.load(&path, None).unwrap();

    assert_eq!(stats.entries, oto.len() as u64);
    assert_eq!(stats.total_lines, 8);
    assert_eq!(stats.ignored_lines, 1);
    assert_eq!(stats.skipped_lines, 2);
    assert_eq!(stats.encoding, "utf-8");
    assert!(!stats.is_valid());
}

#[test]
fn test_validator_issue_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("oto.ini");
    std::fs::write(&path, HAND_EDITED).unwrap();

    let stats = OtoValidator::new(Some("auto")).validate(&path).unwrap();
    let found: Vec<(u64, &LineIssue)> = stats
        .issues
        .iter()
        .map(|r| (r.line_number, &r.issue))
        .collect();

    assert_eq!(
        found,
        vec![
            (
                5,
                &LineIssue::DiscardedTokens {
                    tokens: vec!["60".to_string()]
                }
            ),
            (6, &LineIssue::Skipped(SkipReason::TooFewFields { found: 3 })),
            (7, &LineIssue::Skipped(SkipReason::MissingSeparator)),
            (
                8,
                &LineIssue::DuplicateAlias {
                    alias: "- a".to_string(),
                    first_line: 2
                }
            ),
        ]
    );
    assert_eq!(stats.warning_count(), 2);
}

#[test]
fn test_validator_explicit_encoding_decode_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("oto.ini");
    std::fs::write(&path, [0x82, 0xA0, b'=', b'1', b',', b'2']).unwrap();

    let err = OtoValidator::new(Some("utf-8")).validate(&path).unwrap_err();
    assert!(matches!(err, OtoError::Decode { .. }));

    let stats = OtoValidator::new(None).validate(&path).unwrap();
    assert_eq!(stats.encoding, "cp932");
    assert_eq!(stats.skipped_lines, 1);
}
