//! Integration tests for loading and saving oto files through `OtoFile`

use oto_file::error::OtoError;
use oto_file::oto::{OtoEntry, OtoFile};

use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Helper: write raw bytes to a file in the temp dir
fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

/// Helper: load a file with auto-detection
fn load(path: &Path) -> OtoFile {
    let mut oto = OtoFile::new();
    oto.load(path, None).expect("load oto file");
    oto
}

/// Helper: Shift_JIS bytes for a line `あ.wav=あ,<rest>`
fn sjis_line(rest: &str) -> Vec<u8> {
    let mut bytes = vec![0x82, 0xA0];
    bytes.extend_from_slice(b".wav=");
    bytes.extend_from_slice(&[0x82, 0xA0]);
    bytes.push(b',');
    bytes.extend_from_slice(rest.as_bytes());
    bytes.push(b'\n');
    bytes
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("oto.ini");

    let mut original = OtoFile::from_entries(vec![
        OtoEntry::new("_ka.wav", "- ka", 120, 80, -200, 60, 20),
        OtoEntry::new("_ka.wav", "a ka", 450, 90, -180, 70, 25),
        OtoEntry::new("_sa.wav", "", 40, 90, -150, 70, 30),
        OtoEntry::new("_ta.wav", "ta", -5, 0, 0, -1, 0),
    ]);
    original.save(&path, None).unwrap();

    let loaded = load(&path);
    assert_eq!(loaded.entries, original.entries);
    assert_eq!(loaded.encoding_used(), "utf-8");
}

#[test]
fn test_loading_twice_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "oto.ini",
        b"a.wav=a,1,2,3,4,5\nb.wav=6,7,8,9,10,b\n#c\nc.wav=1,2,3\nd.wav=1.5,2,3,4,5\n",
    );

    let mut oto = OtoFile::new();
    oto.load(&path, None).unwrap();
    let first = oto.entries.clone();
    oto.load(&path, None).unwrap();

    assert_eq!(first, oto.entries);
    assert_eq!(oto.len(), 3);
}

#[test]
fn test_comment_and_blank_only_file_loads_empty() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "oto.ini", b"#comment\n\n   \n# another=1,2,3,4,5\n");

    let oto = load(&path);
    assert!(oto.is_empty());
}

#[test]
fn test_empty_file_loads_empty() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "oto.ini", b"");

    let oto = load(&path);
    assert!(oto.is_empty());
    assert_eq!(oto.encoding_used(), "utf-8");
}

#[test]
fn test_malformed_lines_are_skipped() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "oto.ini",
        b"a.wav=a,1,2,3,4,5\nb.wav=1,2,3\njunk without separator\nc.wav=c,6,7,8,9,10\n",
    );

    let oto = load(&path);
    let filenames: Vec<&str> = oto.iter().map(|e| e.filename.as_str()).collect();
    assert_eq!(filenames, vec!["a.wav", "c.wav"]);
}

#[test]
fn test_source_order_is_preserved() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "oto.ini",
        b"z.wav=z,1,1,1,1,1\na.wav=a,2,2,2,2,2\nm.wav=m,3,3,3,3,3\n",
    );

    let oto = load(&path);
    let aliases: Vec<&str> = oto.iter().map(|e| e.alias.as_str()).collect();
    assert_eq!(aliases, vec!["z", "a", "m"]);
}

#[test]
fn test_crlf_and_bom_file() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "oto.ini",
        b"\xEF\xBB\xBFa.wav=a,1,2,3,4,5\r\nb.wav=b,6,7,8,9,10\r\n",
    );

    let oto = load(&path);
    assert_eq!(oto.len(), 2);
    assert_eq!(oto.entries[0].filename, "a.wav");
    assert_eq!(oto.entries[1].overlap, 10);
}

#[test]
fn test_missing_file_is_not_found_and_store_unchanged() {
    let dir = tempdir().unwrap();
    let mut oto = OtoFile::from_entries(vec![OtoEntry::new("a.wav", "a", 1, 2, 3, 4, 5)]);

    let err = oto.load(dir.path().join("missing.ini"), None).unwrap_err();

    assert!(matches!(err, OtoError::NotFound(_)));
    assert_eq!(oto.len(), 1);
    assert_eq!(oto.encoding_used(), "utf-8");
}

#[test]
fn test_ascii_file_detects_utf8() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "oto.ini", b"a.wav=a,1,2,3,4,5\n");

    assert_eq!(load(&path).encoding_used(), "utf-8");
}

#[test]
fn test_shift_jis_file_detects_cp932() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "oto.ini", &sjis_line("10,20,30,40,50"));

    let oto = load(&path);
    assert_eq!(oto.encoding_used(), "cp932");
    assert_eq!(oto.entries[0], OtoEntry::new("あ.wav", "あ", 10, 20, 30, 40, 50));
}

#[test]
fn test_explicit_utf8_on_shift_jis_fails_without_partial_entries() {
    let dir = tempdir().unwrap();
    let mut content = b"ok.wav=ok,1,2,3,4,5\n".to_vec();
    content.extend(sjis_line("1,2,3,4,5"));
    let path = write_file(&dir, "oto.ini", &content);

    let mut oto = OtoFile::new();
    let err = oto.load(&path, Some("utf-8")).unwrap_err();

    assert!(matches!(err, OtoError::Decode { .. }));
    assert!(oto.is_empty());
}

#[test]
fn test_explicit_cp932_label() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "oto.ini", &sjis_line("1,2,3,4,5"));

    let mut oto = OtoFile::new();
    oto.load(&path, Some("cp932")).unwrap();

    assert_eq!(oto.encoding_used(), "cp932");
    assert_eq!(oto.entries[0].alias, "あ");
}

#[test]
fn test_unknown_encoding_label() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "oto.ini", b"a.wav=a,1,2,3,4,5\n");

    let mut oto = OtoFile::new();
    let err = oto.load(&path, Some("not-an-encoding")).unwrap_err();
    assert!(matches!(err, OtoError::UnsupportedEncoding(_)));
}

#[test]
fn test_save_unencodable_entry_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("oto.ini");
    let mut oto = OtoFile::from_entries(vec![OtoEntry::new("あ.wav", "", 1, 2, 3, 4, 5)]);

    let err = oto.save(&path, Some("windows-1252")).unwrap_err();

    assert!(matches!(err, OtoError::Encode { .. }));
    assert!(!path.exists());
    assert_eq!(oto.encoding_used(), "utf-8");
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("voicebank").join("CV").join("oto.ini");
    let mut oto = OtoFile::from_entries(vec![OtoEntry::new("a.wav", "a", 1, 2, 3, 4, 5)]);

    oto.save(&path, None).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "a.wav=a,1,2,3,4,5\n"
    );
}

#[test]
fn test_load_then_save_normalizes_layout() {
    let dir = tempdir().unwrap();
    let input = write_file(
        &dir,
        "in.ini",
        b"# header\nb.wav = 10, 20, 30, 40, 50, b \n\na.wav=10.4,20,30,40,50\n",
    );
    let output = dir.path().join("out.ini");

    let mut oto = OtoFile::new();
    oto.load(&input, None).unwrap();
    oto.save(&output, None).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "b.wav=b,10,20,30,40,50\na.wav=,10,20,30,40,50\n"
    );
}

#[test]
fn test_shift_jis_round_trip_keeps_encoding() {
    let dir = tempdir().unwrap();
    let input = write_file(&dir, "in.ini", &sjis_line("1,2,3,4,5"));
    let output = dir.path().join("out.ini");

    let mut oto = OtoFile::new();
    oto.load(&input, None).unwrap();
    oto.save(&output, None).unwrap();

    assert_eq!(
        std::fs::read(&input).unwrap(),
        std::fs::read(&output).unwrap()
    );
}
