//! Edge case tests
//!
//! Tests for unusual but valid report scenarios.

use pwrstat_exporter::collectors::translate;
use pwrstat_exporter::metrics::MetricsCollector;
use pwrstat_exporter::pwrstat::{parse, StatusSource};

#[test]
fn test_partial_report_produces_partial_samples() {
    // Given: A report that only has a few fields
    let record = parse("\tState........ Normal\n\tLoad........ 50 Watt(8 %)\n");

    // When: Translating
    let samples = translate(&record);

    // Then: Only those metrics are produced, with an empty device label
    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|s| s.device.is_empty()));
}

#[test]
fn test_dots_inside_values_are_removed() {
    // Given: A value containing a decimal point
    let record = parse("\tFirmware Number.............. CR01.803\n");

    // Then: The dot is removed along with the leaders
    assert_eq!(record.get("Firmware Number"), Some("CR01803"));
}

#[test]
fn test_trailing_tabs_are_stripped() {
    let record = parse("\t\tState........ Normal\t\t\n");

    assert_eq!(record.get("State"), Some("Normal"));
}

#[test]
fn test_model_name_with_spaces_and_quotes() {
    // Given: A model name that needs label escaping
    let dir = std::env::temp_dir().join(format!("pwrstat-exporter-edge-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let path = dir.join("status.txt");
    std::fs::write(
        &path,
        "\tModel Name........ CP 1500 \"AVR\"\n\tState........ Normal\n",
    )
    .expect("Failed to write report");

    // When: Rendering metrics
    let metrics = MetricsCollector::new(StatusSource::replay(&path))
        .expect("Failed to create metrics");
    let rendered = metrics.render().expect("Failed to render");

    // Then: The label value is escaped
    assert!(rendered.contains(r#"ups_state{device="CP 1500 \"AVR\""} 1"#));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_non_numeric_load_is_omitted_from_render() {
    let dir = std::env::temp_dir().join(format!("pwrstat-exporter-load-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let path = dir.join("status.txt");
    std::fs::write(
        &path,
        "\tModel Name........ CP1000\n\tLoad........ N/A\n\tBattery Capacity........ 99 %\n",
    )
    .expect("Failed to write report");

    let metrics = MetricsCollector::new(StatusSource::replay(&path))
        .expect("Failed to create metrics");
    let rendered = metrics.render().expect("Failed to render");

    assert!(!rendered.contains("ups_load"));
    assert!(rendered.contains("ups_battery_capacity{device=\"CP1000\"} 99"));
    assert!(rendered.contains("pwrstat_up 1"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_empty_report_is_up_with_no_samples() {
    // An empty but readable report is not a source failure
    let dir = std::env::temp_dir().join(format!("pwrstat-exporter-empty-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let path = dir.join("status.txt");
    std::fs::write(&path, "").expect("Failed to write report");

    let metrics = MetricsCollector::new(StatusSource::replay(&path))
        .expect("Failed to create metrics");
    let rendered = metrics.render().expect("Failed to render");

    assert!(rendered.contains("pwrstat_up 1"));
    assert!(!rendered.contains("ups_"));

    let _ = std::fs::remove_dir_all(&dir);
}
