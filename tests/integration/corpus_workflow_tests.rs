/*!
 * Integration tests for folder runs through the controller
 */

use anyhow::Result;
use karatime::app_config::Config;
use karatime::app_controller::Controller;
use karatime::errors::{AppError, KaraokeError};
use karatime::karaoke::{Line, Syllable};
use karatime::file_utils::FileManager;
use crate::common;

/// Test a full folder run with accepted and discarded documents
#[tokio::test]
async fn test_run_folder_withMixedDocuments_shouldWriteAlignedCorpora() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    common::create_test_file(input.path(), "01_good.ass", &common::valid_document())?;
    common::create_test_file(input.path(), "02_bad.ass", &common::invalid_document())?;
    common::create_test_file(input.path(), "03_good.ass", &common::valid_document())?;
    common::create_test_file(input.path(), "readme.txt", "not a subtitle")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run_folder(input.path().to_path_buf(), output.path().to_path_buf()).await?;

    assert_eq!(summary.documents, 3);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.discarded, 1);
    assert_eq!(summary.lines, 4);

    let syllable_texts: Vec<Vec<String>> =
        serde_json::from_str(&FileManager::read_to_string(output.path().join("syllable_x.json"))?)?;
    let syllable_records: Vec<Vec<Syllable>> =
        serde_json::from_str(&FileManager::read_to_string(output.path().join("syllable_y.json"))?)?;
    let line_texts: Vec<Vec<String>> =
        serde_json::from_str(&FileManager::read_to_string(output.path().join("line_x.json"))?)?;
    let line_records: Vec<Vec<Line>> =
        serde_json::from_str(&FileManager::read_to_string(output.path().join("line_y.json"))?)?;
    let discarded: Vec<String> =
        serde_json::from_str(&FileManager::read_to_string(output.path().join("discarded.json"))?)?;

    assert_eq!(syllable_texts.len(), 2);
    assert_eq!(syllable_records.len(), 2);
    assert_eq!(line_texts.len(), 2);
    assert_eq!(line_records.len(), 2);
    assert_eq!(discarded, vec!["02_bad.ass"]);
    assert_eq!(line_texts[0], vec!["Hi!", "karao"]);
    assert_eq!(syllable_records[0][0], Syllable::new(100, 200, 50, "Hi"));

    Ok(())
}

/// Test that parallel runs keep the input order regardless of concurrency
#[tokio::test]
async fn test_run_folder_withManyDocuments_shouldPreserveOrder() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    for i in 0..12 {
        let text = format!("{{\\k100}}doc{:02}", i);
        let doc = common::ass_document(&[common::dialogue("0:00:00.00", "0:00:01.00", &text)]);
        common::create_test_file(input.path(), &format!("song_{:02}.ass", i), &doc)?;
    }

    let mut config = Config::default();
    config.concurrent_documents = 3;
    let controller = Controller::with_config(config)?;
    controller.run_folder(input.path().to_path_buf(), output.path().to_path_buf()).await?;

    let line_texts: Vec<Vec<String>> =
        serde_json::from_str(&FileManager::read_to_string(output.path().join("line_x.json"))?)?;
    let expected: Vec<Vec<String>> = (0..12).map(|i| vec![format!("doc{:02}", i)]).collect();
    assert_eq!(line_texts, expected);

    Ok(())
}

/// Test that a run discarding everything still succeeds
#[tokio::test]
async fn test_run_folder_withOnlyInvalidDocuments_shouldSucceedWithEmptyCorpora() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    common::create_test_file(input.path(), "bad.ass", &common::invalid_document())?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run_folder(input.path().to_path_buf(), output.path().to_path_buf()).await?;

    assert_eq!(summary.accepted, 0);
    assert_eq!(summary.discarded, 1);
    let line_records: Vec<Vec<Line>> =
        serde_json::from_str(&FileManager::read_to_string(output.path().join("line_y.json"))?)?;
    assert!(line_records.is_empty());

    Ok(())
}

/// Test that a missing input directory is an error, not an empty run
#[tokio::test]
async fn test_run_folder_withMissingInput_shouldFail() -> Result<()> {
    let output = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;
    let result = controller
        .run_folder(output.path().join("missing"), output.path().to_path_buf())
        .await;
    assert!(result.is_err());
    Ok(())
}

/// Test single document checks
#[test]
fn test_check_file_withValidAndInvalidDocuments_shouldReportOutcome() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let good = common::create_test_file(dir.path(), "good.ass", &common::valid_document())?;
    let bad = common::create_test_file(dir.path(), "bad.ass", &common::invalid_document())?;

    let controller = Controller::with_config(Config::default())?;
    assert!(controller.check_file(&good).is_ok());
    assert!(matches!(
        controller.check_file(&bad),
        Err(AppError::Karaoke(KaraokeError::ParityViolation(_)))
    ));
    assert!(matches!(
        controller.check_file(&dir.path().join("missing.ass")),
        Err(AppError::File(_))
    ));

    Ok(())
}

/// Test that invalid configuration is refused by the controller
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.karaoke.tolerance_cs = -5;
    assert!(Controller::with_config(config).is_err());
}

/// Test that a document with overflowing karaoke values is discarded alone
#[tokio::test]
async fn test_run_folder_withOverflowingDocument_shouldDiscardOnlyIt() -> Result<()> {
    let input = common::create_temp_dir()?;
    let output = common::create_temp_dir()?;
    let text = format!("{{\\k{max}}}a{{\\k{max}}}b{{\\k102}}c", max = i64::MAX);
    let overflowing = common::ass_document(&[
        common::dialogue("0:00:01.00", "0:00:02.00", &text),
        common::dialogue("99999999999999999:00:00.00", "0:00:02.00", "{\\k100}a"),
    ]);
    common::create_test_file(input.path(), "01_good.ass", &common::valid_document())?;
    common::create_test_file(input.path(), "02_overflow.ass", &overflowing)?;
    common::create_test_file(input.path(), "03_good.ass", &common::valid_document())?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run_folder(input.path().to_path_buf(), output.path().to_path_buf()).await?;

    assert_eq!(summary.documents, 3);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.discarded, 1);

    let discarded: Vec<String> =
        serde_json::from_str(&FileManager::read_to_string(output.path().join("discarded.json"))?)?;
    assert_eq!(discarded, vec!["02_overflow.ass"]);

    Ok(())
}
