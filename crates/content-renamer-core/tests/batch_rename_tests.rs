mod common;

use common::{
    create_test_file, file_names, stub_collaborators, StubDescriptions, StubExtractor, StubImages,
};
use content_renamer_core::{Config, ContentRenamer, EmptyNamePolicy, Error, RenameStatus};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn renamer(
    images: StubImages,
    extractor: StubExtractor,
    descriptions: StubDescriptions,
) -> ContentRenamer {
    ContentRenamer::new(
        Config::default(),
        stub_collaborators(images, extractor, descriptions),
    )
}

#[test]
fn test_report_and_photo_scenario() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "report.pdf", "quarterly earnings up 10%");
    create_test_file(dir.path(), "photo.jpg", "jpeg bytes");

    let renamer = renamer(
        StubImages::default().with("photo.jpg", "a red car"),
        StubExtractor::default(),
        StubDescriptions::default().with("quarterly earnings up 10%", "Q3 Earnings Report"),
    );

    let (outcomes, claimed) = renamer.run_with(dir.path(), |_| {}).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.status == RenameStatus::Renamed));
    assert_eq!(
        file_names(dir.path()),
        vec!["Q3_Earnings_Report.pdf", "a_red_car.jpg"]
    );
    assert!(claimed.contains("Q3_Earnings_Report"));
    assert!(claimed.contains("a_red_car"));
}

#[test]
fn test_colliding_descriptions_get_suffixes() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "a.txt", "alpha notes");
    create_test_file(dir.path(), "b.md", "beta notes");

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default().otherwise("summary"),
    );

    let outcomes = renamer.run(dir.path()).unwrap();

    let finals: Vec<&str> = outcomes
        .iter()
        .map(|o| o.final_name.as_deref().unwrap())
        .collect();
    assert_eq!(finals, vec!["summary.txt", "summary_1.md"]);
    assert_eq!(file_names(dir.path()), vec!["summary.txt", "summary_1.md"]);
}

#[test]
fn test_own_name_is_kept_without_suffix() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "other.md", "other text");
    create_test_file(dir.path(), "summary.txt", "summary text");

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default().otherwise("summary"),
    );

    let outcomes = renamer.run(dir.path()).unwrap();

    // other.md sees "summary" claimed by the untouched summary.txt
    assert_eq!(outcomes[0].final_name.as_deref(), Some("summary_1.md"));
    assert_eq!(outcomes[1].final_name.as_deref(), Some("summary.txt"));
    assert_eq!(file_names(dir.path()), vec!["summary.txt", "summary_1.md"]);
}

#[test]
fn test_second_run_is_stable() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "IMG_0001.jpg", "pixels");
    create_test_file(dir.path(), "draft.txt", "meeting agenda");

    let renamer = renamer(
        StubImages::default()
            .with("IMG_0001.jpg", "a sunny beach")
            .with("a_sunny_beach.jpg", "a sunny beach"),
        StubExtractor::default(),
        StubDescriptions::default().with("meeting agenda", "Meeting Agenda"),
    );

    renamer.run(dir.path()).unwrap();
    let after_first = file_names(dir.path());
    assert_eq!(after_first, vec!["Meeting_Agenda.txt", "a_sunny_beach.jpg"]);

    let outcomes = renamer.run(dir.path()).unwrap();
    assert!(outcomes.iter().all(|o| o.status == RenameStatus::Renamed));
    assert_eq!(file_names(dir.path()), after_first);
}

#[test]
fn test_suffixed_names_survive_repeated_runs() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "a.txt", "first draft");
    create_test_file(dir.path(), "b.txt", "second draft");

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default().otherwise("summary"),
    );

    renamer.run(dir.path()).unwrap();
    let after_first = file_names(dir.path());
    assert_eq!(after_first, vec!["summary.txt", "summary_1.txt"]);

    for _ in 0..2 {
        let outcomes = renamer.run(dir.path()).unwrap();
        assert!(outcomes.iter().all(|o| o.status == RenameStatus::Renamed));
        assert_eq!(file_names(dir.path()), after_first);
    }
}

#[test]
fn test_description_with_separator_stays_in_directory() {
    let dir = tempdir().unwrap();
    let subdir = dir.path().join("Q3");
    fs::create_dir(&subdir).unwrap();
    create_test_file(dir.path(), "scan.txt", "fourth quarter numbers");

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default().otherwise("Q3/Q4 Report"),
    );

    let outcomes = renamer.run(dir.path()).unwrap();

    assert_eq!(outcomes[0].status, RenameStatus::Renamed);
    assert_eq!(outcomes[0].final_name.as_deref(), Some("Q3_Q4_Report.txt"));
    assert_eq!(file_names(dir.path()), vec!["Q3_Q4_Report.txt"]);
    assert!(file_names(&subdir).is_empty());
}

#[test]
fn test_unsupported_files_are_skipped_and_protected() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "budget.bin", "raw");
    create_test_file(dir.path(), "scan.txt", "numbers for next year");
    create_test_file(dir.path(), "UPPER.PDF", "shouting");

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default().otherwise("budget"),
    );

    let outcomes = renamer.run(dir.path()).unwrap();

    let status_of = |name: &str| {
        outcomes
            .iter()
            .find(|o| o.path.ends_with(name))
            .map(|o| o.status)
            .unwrap()
    };
    assert_eq!(status_of("budget.bin"), RenameStatus::SkippedUnsupported);
    assert_eq!(status_of("UPPER.PDF"), RenameStatus::SkippedUnsupported);
    assert_eq!(status_of("scan.txt"), RenameStatus::Renamed);
    assert_eq!(
        file_names(dir.path()),
        vec!["UPPER.PDF", "budget.bin", "budget_1.txt"]
    );
}

#[test]
fn test_uppercase_image_extension_is_renamed() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "DSC_1234.PNG", "pixels");

    let renamer = renamer(
        StubImages::default().with("DSC_1234.PNG", "two dogs playing"),
        StubExtractor::default(),
        StubDescriptions::default(),
    );

    renamer.run(dir.path()).unwrap();
    assert_eq!(file_names(dir.path()), vec!["two_dogs_playing.PNG"]);
}

#[test]
fn test_failure_does_not_stop_the_batch() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "a_broken.txt", "garbage");
    create_test_file(dir.path(), "b_mystery.jpg", "pixels");
    create_test_file(dir.path(), "c_good.txt", "tax return 2023");

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default().broken("a_broken.txt"),
        StubDescriptions::default().with("tax return 2023", "Tax Return 2023"),
    );

    let outcomes = renamer.run(dir.path()).unwrap();

    assert_eq!(outcomes[0].status, RenameStatus::Failed);
    assert!(outcomes[0].error.as_deref().unwrap().contains("a_broken.txt"));
    assert_eq!(outcomes[1].status, RenameStatus::Failed);
    assert_eq!(outcomes[2].status, RenameStatus::Renamed);
    assert_eq!(
        file_names(dir.path()),
        vec!["Tax_Return_2023.txt", "a_broken.txt", "b_mystery.jpg"]
    );
}

#[test]
fn test_empty_name_fails_by_default() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "quotes.txt", "nothing to say");

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default().otherwise("\"'.'\""),
    );

    let outcomes = renamer.run(dir.path()).unwrap();
    assert_eq!(outcomes[0].status, RenameStatus::Failed);
    assert_eq!(file_names(dir.path()), vec!["quotes.txt"]);
}

#[test]
fn test_empty_name_fallback() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "a.txt", "one");
    create_test_file(dir.path(), "b.txt", "two");

    let config = Config {
        empty_name_policy: EmptyNamePolicy::Fallback("untitled".to_string()),
        ..Default::default()
    };
    let renamer = ContentRenamer::new(
        config,
        stub_collaborators(
            StubImages::default(),
            StubExtractor::default(),
            StubDescriptions::default().otherwise("."),
        ),
    );

    renamer.run(dir.path()).unwrap();
    assert_eq!(file_names(dir.path()), vec!["untitled.txt", "untitled_1.txt"]);
}

#[test]
fn test_stems_unique_across_directories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("holiday");
    create_test_file(dir.path(), "1.jpg", "pixels");
    create_test_file(dir.path(), "2.png", "pixels");
    create_test_file(&nested, "3.jpg", "pixels");
    create_test_file(&nested, "4.heic", "pixels");

    let renamer = renamer(
        StubImages::default()
            .with("1.jpg", "a cat")
            .with("2.png", "a cat")
            .with("3.jpg", "a cat")
            .with("4.heic", "a cat"),
        StubExtractor::default(),
        StubDescriptions::default(),
    );

    let outcomes = renamer.run(dir.path()).unwrap();

    let stems: Vec<String> = outcomes
        .iter()
        .map(|o| {
            Path::new(o.final_name.as_deref().unwrap())
                .file_stem()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    let unique: HashSet<&String> = stems.iter().collect();
    assert_eq!(unique.len(), 4);

    // Extensions survive byte for byte
    let extensions: Vec<String> = outcomes
        .iter()
        .map(|o| {
            let before = o.path.extension().unwrap().to_string_lossy().into_owned();
            let after = Path::new(o.final_name.as_deref().unwrap())
                .extension()
                .unwrap()
                .to_string_lossy()
                .into_owned();
            assert_eq!(before, after);
            after
        })
        .collect();
    assert_eq!(extensions, vec!["jpg", "png", "jpg", "heic"]);

    assert_eq!(file_names(dir.path()), vec!["a_cat.jpg", "a_cat_1.png"]);
    assert_eq!(file_names(&nested), vec!["a_cat_2.jpg", "a_cat_3.heic"]);
}

#[test]
fn test_dry_run_reports_without_renaming() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "photo.jpg", "pixels");

    let config = Config {
        dry_run: true,
        ..Default::default()
    };
    let renamer = ContentRenamer::new(
        config,
        stub_collaborators(
            StubImages::default().with("photo.jpg", "a red car"),
            StubExtractor::default(),
            StubDescriptions::default(),
        ),
    );

    let outcomes = renamer.run(dir.path()).unwrap();
    assert_eq!(outcomes[0].final_name.as_deref(), Some("a_red_car.jpg"));
    assert_eq!(file_names(dir.path()), vec!["photo.jpg"]);
}

#[test]
fn test_outcomes_are_reported_in_order() {
    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "a.txt", "first");
    create_test_file(dir.path(), "b.bin", "second");
    create_test_file(dir.path(), "c.txt", "third");

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default().otherwise("note"),
    );

    let mut seen = Vec::new();
    let (outcomes, _) = renamer
        .run_with(dir.path(), |outcome| seen.push(outcome.status))
        .unwrap();

    assert_eq!(
        seen,
        vec![
            RenameStatus::Renamed,
            RenameStatus::SkippedUnsupported,
            RenameStatus::Renamed
        ]
    );
    assert_eq!(seen.len(), outcomes.len());
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_aborts_before_renaming() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    create_test_file(dir.path(), "a_notes.txt", "meeting notes");
    let locked = dir.path().join("locked");
    create_test_file(&locked, "secret.txt", "hidden");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not bind root
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default().otherwise("Meeting Notes"),
    );
    let result = renamer.run(dir.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    match result {
        Err(Error::Access { path, .. }) => assert_eq!(path, locked),
        other => panic!("expected access error, got {:?}", other),
    }
    assert_eq!(file_names(dir.path()), vec!["a_notes.txt"]);
    assert_eq!(file_names(&locked), vec!["secret.txt"]);
}

#[test]
fn test_missing_root_is_fatal() {
    let renamer = renamer(
        StubImages::default(),
        StubExtractor::default(),
        StubDescriptions::default(),
    );

    let result = renamer.run("/path/that/does/not/exist");
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}
