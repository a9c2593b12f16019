//! Prometheus Metrics Definitions
//!
//! This module defines the metrics exposed by the pwrstat exporter and the
//! registry they are served from.
//!
//! # Metrics
//!
//! Each entry of [`DESCRIPTORS`] maps one field of the `pwrstat -status` report to
//! one gauge. All of them carry a single `device` label holding the UPS model name.
//!
//! | Report field | Metric | Value |
//! |---|---|---|
//! | Load | `ups_load` | Watts |
//! | State | `ups_state` | 1=Normal, 0=anything else |
//! | Battery Capacity | `ups_battery_capacity` | percent |
//! | Remaining Runtime | `ups_remaining_runtime` | minutes |
//! | Utility Voltage | `ups_in_voltage` | volts |
//! | Output Voltage | `ups_out_voltage` | volts |
//! | Test Result | `ups_test_result` | 1=Passed, 0=anything else |
//!
//! The exporter also reports `pwrstat_up` (1 when the last status query succeeded).
//!
//! Samples are produced on demand: the [`UpsCollector`] registered here runs
//! pwrstat every time the registry is gathered, so there is no background loop
//! and no cached state between scrapes.

use crate::collectors::UpsCollector;
use crate::pwrstat::{StatusRecord, StatusSource};
use prometheus::{Encoder, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Namespace of the UPS gauges
pub const NAMESPACE: &str = "ups";

/// The only label carried by the UPS gauges
pub const DEVICE_LABEL: &str = "device";

/// How a report value becomes a sample value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    /// First whitespace-delimited token parsed as a number; units are dropped.
    /// Unparseable values produce no sample.
    LeadingNumber,
    /// 1 if the whole value equals the given text, else 0
    Equals(&'static str),
    /// 1 if the first whitespace-delimited token equals the given text, else 0
    LeadingTokenEquals(&'static str),
}

impl Translation {
    pub fn apply(&self, value: &str) -> Option<f64> {
        match self {
            Self::LeadingNumber => value.split_whitespace().next()?.parse::<f64>().ok(),
            Self::Equals(expected) => Some(flag(value == *expected)),
            Self::LeadingTokenEquals(expected) => {
                Some(flag(value.split_whitespace().next() == Some(*expected)))
            }
        }
    }
}

fn flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

/// One exported UPS metric and the report field it is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub field: &'static str,
    pub name: &'static str,
    pub help: &'static str,
    pub translation: Translation,
}

impl MetricDescriptor {
    /// Full metric name, e.g. `ups_load`
    pub fn fq_name(&self) -> String {
        format!("{}_{}", NAMESPACE, self.name)
    }

    pub fn opts(&self) -> Opts {
        Opts::new(self.name, self.help).namespace(NAMESPACE)
    }

    /// Translate this descriptor's field value, if the field is present and usable
    pub fn value_from(&self, record: &StatusRecord) -> Option<f64> {
        record
            .get(self.field)
            .and_then(|value| self.translation.apply(value))
    }
}

/// Exported UPS metrics, keyed by report field
pub static DESCRIPTORS: [MetricDescriptor; 7] = [
    MetricDescriptor {
        field: "Load",
        name: "load",
        help: "UPS power load (Watt)",
        translation: Translation::LeadingNumber,
    },
    MetricDescriptor {
        field: "State",
        name: "state",
        help: "UPS status (1=Normal, 0=not normal)",
        translation: Translation::Equals("Normal"),
    },
    MetricDescriptor {
        field: "Battery Capacity",
        name: "battery_capacity",
        help: "UPS battery capacity (%)",
        translation: Translation::LeadingNumber,
    },
    MetricDescriptor {
        field: "Remaining Runtime",
        name: "remaining_runtime",
        help: "UPS remaining runtime (min)",
        translation: Translation::LeadingNumber,
    },
    MetricDescriptor {
        field: "Utility Voltage",
        name: "in_voltage",
        help: "UPS input voltage (V)",
        translation: Translation::LeadingNumber,
    },
    MetricDescriptor {
        field: "Output Voltage",
        name: "out_voltage",
        help: "UPS output voltage (V)",
        translation: Translation::LeadingNumber,
    },
    MetricDescriptor {
        field: "Test Result",
        name: "test_result",
        help: "UPS self-test result (1=Passed, 0=not passed)",
        translation: Translation::LeadingTokenEquals("Passed"),
    },
];

/// Look up the descriptor for a report field
pub fn descriptor_for(field: &str) -> Option<&'static MetricDescriptor> {
    DESCRIPTORS.iter().find(|d| d.field == field)
}

/// Metrics registry for the exporter
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,
    pub ups: UpsCollector,
}

impl MetricsCollector {
    pub fn new(source: StatusSource) -> anyhow::Result<Self> {
        let registry = Registry::new();
        let ups = UpsCollector::new(source)?;

        // The registered clone shares the up gauge with `ups`
        registry.register(Box::new(ups.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            ups,
        })
    }

    /// Render metrics in Prometheus text format.
    ///
    /// Gathering runs a fresh status query, so this blocks for as long as the
    /// source takes.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
