use std::fs;
use tempfile::tempdir;

use tpms_cli::commands::{check, decode, synth};
use tpms_core::encoder::FrameBuilder;

/// Helper: rows for a few sensors, one per line, with comments and blanks
fn create_capture(sensors: &[u32]) -> String {
    let mut out = String::from("# captured rows\n\n");
    for (i, id) in sensors.iter().enumerate() {
        let row = FrameBuilder::new(*id)
            .pressure(200 + i as u16)
            .temperature(15)
            .status(0x0E)
            .lead_bits(i * 5)
            .build()
            .unwrap();
        out.push_str(&row.to_string());
        out.push('\n');
    }
    out
}

#[test]
fn test_decode_basic_file() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("capture.txt");
    let output_path = td.path().join("records.json");

    fs::write(&input_path, create_capture(&[0xA3C2F1, 0x1B2C3D, 0x000042])).unwrap();

    let stats = decode::execute(
        input_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        false,
        None,
    )
    .unwrap();
    assert_eq!(stats.records_found, 3);

    // Parse JSON output
    let output_json = fs::read_to_string(&output_path).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&output_json).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["id"], "A3C2F1");
    assert_eq!(records[0]["type"], "TPMS");
    assert_eq!(records[0]["mic"], "SUM8");
    assert_eq!(records[1]["row"], 1);
    assert_eq!(records[1]["pressure"], 201);
    assert_eq!(records[2]["offset"], 10);
    assert_eq!(records[2]["temperature"], 15);
    assert_eq!(records[2]["status"], "0b00001110");
}

#[test]
fn test_decode_skips_bad_lines() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("mixed.txt");

    let mut content = create_capture(&[0x123456]);
    content.push_str("{12}not-hex\n");
    content.push_str("{112}7fff0000112233446400bf000000\n");
    fs::write(&input_path, content).unwrap();

    let stats = decode::execute(input_path.to_str().unwrap(), None, false, None).unwrap();

    assert_eq!(stats.records_found, 1);
    assert_eq!(stats.checksum_failures, 1);
    assert_eq!(stats.candidates, 2);
}

#[test]
fn test_decode_stats_only_writes_nothing() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("capture.txt");
    let output_path = td.path().join("records.json");

    fs::write(&input_path, create_capture(&[1, 2])).unwrap();

    let stats = decode::execute(
        input_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        true,
        None,
    )
    .unwrap();

    assert_eq!(stats.records_found, 2);
    assert!(!output_path.exists());
}

#[test]
fn test_decode_with_config_file() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("capture.txt");
    let config_path = td.path().join("config.json");
    let output_path = td.path().join("records.json");

    fs::write(&input_path, create_capture(&[0xABCDEF])).unwrap();
    fs::write(&config_path, r#"{"model": "Schrader-SHR3"}"#).unwrap();

    decode::execute(
        input_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        false,
        Some(config_path.to_str().unwrap()),
    )
    .unwrap();

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(records[0]["model"], "Schrader-SHR3");
}

#[test]
fn test_decode_rejects_bad_config() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("capture.txt");
    let config_path = td.path().join("config.json");

    fs::write(&input_path, create_capture(&[1])).unwrap();
    fs::write(&config_path, r#"{"preamble": {"bytes": [], "bits": 0}}"#).unwrap();

    let result = decode::execute(
        input_path.to_str().unwrap(),
        None,
        false,
        Some(config_path.to_str().unwrap()),
    );
    assert!(result.is_err());
}

#[test]
fn test_decode_missing_file() {
    let result = decode::execute("/nonexistent/capture.txt", None, false, None);
    assert!(result.is_err());
}

#[test]
fn test_synth_then_decode() {
    let td = tempdir().unwrap();
    let rows_path = td.path().join("synth.txt");
    let output_path = td.path().join("records.json");

    synth::execute(rows_path.to_str().unwrap(), 0xC0FFEE, 230, -5, 0x8E, 7, 3).unwrap();

    let stats = decode::execute(
        rows_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        false,
        None,
    )
    .unwrap();
    assert_eq!(stats.records_found, 3);

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    for record in &records {
        assert_eq!(record["id"], "C0FFEE");
        assert_eq!(record["temperature"], -5);
        assert_eq!(record["offset"], 7);
    }
}

#[test]
fn test_synth_rejects_wide_id() {
    let td = tempdir().unwrap();
    let rows_path = td.path().join("synth.txt");

    assert!(synth::execute(rows_path.to_str().unwrap(), 0x1000000, 0, 0, 0, 0, 1).is_err());
    assert!(!rows_path.exists());
}

#[test]
fn test_check_valid_frame() {
    let record = check::execute("001122334464000E").unwrap();
    assert_eq!(record.id, "001122");
    assert_eq!(record.pressure, 13124);
}

#[test]
fn test_check_invalid_frames() {
    assert!(check::execute("00112233446400BF").is_err());
    assert!(check::execute("0011223344").is_err());
    assert!(check::execute("not hex").is_err());
}
