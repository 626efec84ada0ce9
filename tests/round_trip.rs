use std::fs;
use std::path::PathBuf;

use fixture_gen::models::{CREDENTIAL_SENTINEL, POST_SENTINEL};
use fixture_gen::{
    CredentialConfig, CredentialService, FixtureError, PostConfig, PostRecord, PostService,
};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::rstest;

fn scratch(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    (dir, path)
}

/// Generated credential file has the sentinel plus 99 records, and every line
/// survives parse-then-serialize unchanged.
#[test]
fn credential_file_round_trips() {
    let (_dir, path) = scratch("user_pass.txt");
    let mut rng = StdRng::seed_from_u64(2024);
    let mut echoed = Vec::new();

    let lines = CredentialService::generate_file(
        &path,
        &CredentialConfig::default(),
        &mut rng,
        |line| echoed.push(line.to_string()),
    )
    .unwrap();
    assert_eq!(lines, 100);

    let content = fs::read_to_string(&path).unwrap();
    let file_lines: Vec<&str> = content.lines().collect();
    assert_eq!(file_lines.len(), 100);
    assert_eq!(file_lines[0], CREDENTIAL_SENTINEL);
    assert_eq!(&file_lines[1..], echoed.as_slice());

    let columns = CredentialService::parse_file(&path).unwrap();
    assert!(columns.has_sentinel());
    assert_eq!(columns.usernames.len(), columns.passwords.len());
    let rebuilt: Vec<String> = columns.records().map(|r| r.to_string()).collect();
    assert_eq!(rebuilt, file_lines);
}

/// Same check for the post file, plus the range and alphabet properties.
#[test]
fn post_file_round_trips() {
    let (_dir, path) = scratch("post_values.txt");
    let config = PostConfig::default();
    let mut rng = StdRng::seed_from_u64(77);
    let mut echoed = Vec::new();

    let lines = PostService::generate_file(&path, &config, &mut rng, |line| {
        echoed.push(line.to_string());
    })
    .unwrap();
    assert_eq!(lines, 100);

    let content = fs::read_to_string(&path).unwrap();
    let file_lines: Vec<&str> = content.lines().collect();
    assert_eq!(file_lines[0], POST_SENTINEL);
    assert_eq!(&file_lines[1..], echoed.as_slice());

    let columns = PostService::parse_file(&path).unwrap();
    assert_eq!(columns.len(), 100);
    let rebuilt: Vec<String> = columns.records().map(|r| r.to_string()).collect();
    assert_eq!(rebuilt, file_lines);

    for record in columns.records().skip(1) {
        let size = record.image_size_bytes;
        assert!(
            (512 * 1024..=2 * 1024 * 1024).contains(&size)
                || (5 * 1024 * 1024..=10 * 1024 * 1024).contains(&size),
            "size {size} outside both ranges"
        );

        let extension = config
            .extensions
            .iter()
            .find(|ext| record.file_name.ends_with(ext.as_str()))
            .unwrap();
        let stem = &record.file_name[..record.file_name.len() - extension.len()];
        assert_eq!(stem.len(), 10);
        assert!(stem.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!record.post_description.chars().any(char::is_whitespace));
    }
}

#[test]
fn same_seed_gives_identical_files() {
    let (_dir_a, a) = scratch("a.txt");
    let (_dir_b, b) = scratch("b.txt");
    let config = PostConfig::default();

    PostService::generate_file(&a, &config, &mut StdRng::seed_from_u64(5), |_| {}).unwrap();
    PostService::generate_file(&b, &config, &mut StdRng::seed_from_u64(5), |_| {}).unwrap();

    assert_eq!(fs::read_to_string(&a).unwrap(), fs::read_to_string(&b).unwrap());
}

#[test]
fn regenerating_truncates_previous_run() {
    let (_dir, path) = scratch("user_pass.txt");
    let mut rng = StdRng::seed_from_u64(8);
    let small = CredentialConfig {
        record_count: 3,
        ..CredentialConfig::default()
    };

    CredentialService::generate_file(&path, &CredentialConfig::default(), &mut rng, |_| {})
        .unwrap();
    CredentialService::generate_file(&path, &small, &mut rng, |_| {}).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 4);
}

/// With a seven word bank every description is a permutation of all seven.
#[test]
fn seven_word_bank_uses_every_word() {
    let words = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf"];
    let config = PostConfig {
        word_bank: words.iter().map(|w| w.to_string()).collect(),
        ..PostConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(31);

    for _ in 0..50 {
        let description = PostService::generate_description(&config, &mut rng).unwrap();
        assert_eq!(description.len(), words.iter().map(|w| w.len()).sum::<usize>());
        for word in words {
            assert!(description.contains(word), "{word} missing from {description}");
        }
    }
}

#[test]
fn sentinel_line_parses_to_expected_fields() {
    let (_dir, path) = scratch("post_values.txt");
    fs::write(&path, "testing.png abcdefgdescription 204800\n").unwrap();

    let columns = PostService::parse_file(&path).unwrap();
    assert_eq!(columns.file_names, ["testing.png"]);
    assert_eq!(columns.post_descriptions, ["abcdefgdescription"]);
    assert_eq!(columns.image_sizes, [204_800]);
    assert_eq!(
        columns.records().next(),
        Some(PostRecord::new("testing.png", "abcdefgdescription", 204_800))
    );
}

#[test]
fn parsing_preserves_file_order() {
    let (_dir, path) = scratch("user_pass.txt");
    fs::write(&path, "abc@domain.ext 123456\nzed@x.com pw1\namy@y.com pw2\n").unwrap();

    let columns = CredentialService::parse_file(&path).unwrap();
    assert_eq!(columns.usernames, ["abc@domain.ext", "zed@x.com", "amy@y.com"]);
    assert_eq!(columns.passwords, ["123456", "pw1", "pw2"]);
}

#[rstest]
#[case::embedded_space("abc@domain.ext 123456\nuser name secret\n", 2, 3)]
#[case::missing_password("abc@domain.ext 123456\nlonely\n", 2, 1)]
#[case::first_line("one two three\n", 1, 3)]
fn malformed_credential_line_is_rejected(
    #[case] content: &str,
    #[case] line_number: usize,
    #[case] found: usize,
) {
    let (_dir, path) = scratch("user_pass.txt");
    fs::write(&path, content).unwrap();

    match CredentialService::parse_file(&path).unwrap_err() {
        FixtureError::Format {
            line_number: actual_line,
            expected,
            found: actual_found,
            ..
        } => {
            assert_eq!(actual_line, line_number);
            assert_eq!(expected, 2);
            assert_eq!(actual_found, found);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case::two_fields("a.png desc\n", 2)]
#[case::four_fields("a.png two words 10\n", 4)]
fn malformed_post_line_is_rejected(#[case] content: &str, #[case] found: usize) {
    let (_dir, path) = scratch("post_values.txt");
    fs::write(&path, content).unwrap();

    assert!(matches!(
        PostService::parse_file(&path),
        Err(FixtureError::Format { expected: 3, found: f, .. }) if f == found
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let (_dir, path) = scratch("nope.txt");
    assert!(matches!(
        CredentialService::parse_file(&path),
        Err(FixtureError::Io { .. })
    ));
}

#[rstest]
#[case::plus_sign("+204800")]
#[case::leading_zero("0204800")]
#[case::negative("-5")]
fn non_canonical_size_is_rejected(#[case] size: &str) {
    let (_dir, path) = scratch("post_values.txt");
    fs::write(&path, format!("{POST_SENTINEL}\nabc.png words {size}\n")).unwrap();

    assert!(matches!(
        PostService::parse_file(&path),
        Err(FixtureError::InvalidSize { line_number: 2, ref value, .. }) if value == size
    ));
}
