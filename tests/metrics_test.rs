use pwrstat_exporter::metrics::{descriptor_for, MetricsCollector, Translation, DESCRIPTORS};
use pwrstat_exporter::pwrstat::StatusSource;
use std::path::PathBuf;

fn replay_metrics() -> MetricsCollector {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pwrstat_status.txt");
    MetricsCollector::new(StatusSource::replay(path)).expect("Failed to create metrics collector")
}

#[test]
fn test_metrics_registration() {
    // Verify that the collector can be created and registered without panicking
    let metrics = replay_metrics();

    let rendered = metrics.render();
    assert!(rendered.is_ok(), "Failed to render metrics");

    let output = rendered.unwrap();
    for name in [
        "ups_load",
        "ups_state",
        "ups_battery_capacity",
        "ups_remaining_runtime",
        "ups_in_voltage",
        "ups_out_voltage",
        "ups_test_result",
        "pwrstat_up",
    ] {
        assert!(output.contains(name), "Missing {} metric", name);
    }
}

#[test]
fn test_metrics_values_and_labels() {
    let metrics = replay_metrics();

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("ups_load{device=\"CP1000PFCLCDa\"} 114"));
    assert!(rendered.contains("ups_state{device=\"CP1000PFCLCDa\"} 1"));
    assert!(rendered.contains("ups_battery_capacity{device=\"CP1000PFCLCDa\"} 100"));
    assert!(rendered.contains("ups_remaining_runtime{device=\"CP1000PFCLCDa\"} 35"));
    assert!(rendered.contains("ups_in_voltage{device=\"CP1000PFCLCDa\"} 114"));
    assert!(rendered.contains("ups_out_voltage{device=\"CP1000PFCLCDa\"} 114"));
    assert!(rendered.contains("ups_test_result{device=\"CP1000PFCLCDa\"} 1"));
    assert!(rendered.contains("pwrstat_up 1"), "up metric not set correctly");
    assert!(rendered.contains("# TYPE ups_load gauge"));
}

#[test]
fn test_metrics_unavailable_source() {
    let metrics = MetricsCollector::new(StatusSource::replay("/nonexistent/status.txt"))
        .expect("Failed to create metrics collector");

    // Rendering still succeeds; only the up gauge is present
    let rendered = metrics.render().expect("Render should not fail on source outage");
    assert!(rendered.contains("pwrstat_up 0"));
    assert!(!rendered.contains("ups_load"));
    assert_eq!(metrics.ups.up(), 0.0);
}

#[test]
fn test_descriptor_table() {
    assert_eq!(DESCRIPTORS.len(), 7);

    let names: Vec<String> = DESCRIPTORS.iter().map(|d| d.fq_name()).collect();
    assert!(names.contains(&"ups_in_voltage".to_string()));

    let input = descriptor_for("Utility Voltage").expect("Missing Utility Voltage");
    assert_eq!(input.fq_name(), "ups_in_voltage");
    assert_eq!(input.translation, Translation::LeadingNumber);

    let state = descriptor_for("State").expect("Missing State");
    assert_eq!(state.translation, Translation::Equals("Normal"));

    assert!(descriptor_for("Model Name").is_none());
    assert!(descriptor_for("Line Interaction").is_none());
}

#[test]
fn test_translation_rules() {
    assert_eq!(Translation::LeadingNumber.apply("100 %"), Some(100.0));
    assert_eq!(Translation::LeadingNumber.apply("  12.5 V"), Some(12.5));
    assert_eq!(Translation::LeadingNumber.apply("None"), None);
    assert_eq!(Translation::LeadingNumber.apply(""), None);

    assert_eq!(Translation::Equals("Normal").apply("Normal"), Some(1.0));
    assert_eq!(Translation::Equals("Normal").apply("Battery"), Some(0.0));

    let passed = Translation::LeadingTokenEquals("Passed");
    assert_eq!(passed.apply("Passed at 2022/09/21 20:44:29"), Some(1.0));
    assert_eq!(passed.apply("In progress"), Some(0.0));
}
