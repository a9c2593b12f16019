//! UPS Metrics Collector
//!
//! Runs the status source on every scrape and translates the report fields
//! listed in [`DESCRIPTORS`](crate::metrics::DESCRIPTORS) into gauges.
//!
//! # Metrics Produced
//! - `ups_load`, `ups_state`, `ups_battery_capacity`, `ups_remaining_runtime`,
//!   `ups_in_voltage`, `ups_out_voltage`, `ups_test_result`
//!   - Labels: device
//! - `pwrstat_up` - Whether the last status query succeeded (1=up, 0=down)
//!
//! A field missing from the report, or a numeric field whose leading token does
//! not parse, produces no sample. That is not an error.

use super::{collect_with_handler, CollectionStatus};
use crate::error::Result;
use crate::metrics::{MetricDescriptor, DESCRIPTORS, DEVICE_LABEL};
use crate::pwrstat::{StatusRecord, StatusSource};
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, GaugeVec, Opts};
use std::collections::HashMap;
use tracing::warn;

/// One value derived from a status record
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub descriptor: &'static MetricDescriptor,
    pub value: f64,
    pub device: String,
}

/// `device` label value: the UPS model name, or empty when the report has none
pub fn device_label(record: &StatusRecord) -> String {
    record.model_name().unwrap_or_default().to_string()
}

/// Derive every sample the record supports
pub fn translate(record: &StatusRecord) -> Vec<Sample> {
    let device = device_label(record);
    DESCRIPTORS
        .iter()
        .filter_map(|descriptor| {
            descriptor.value_from(record).map(|value| Sample {
                descriptor,
                value,
                device: device.clone(),
            })
        })
        .collect()
}

fn up_opts() -> Opts {
    Opts::new(
        "up",
        "Whether the last pwrstat status query succeeded (1=up, 0=down)",
    )
    .namespace("pwrstat")
}

/// Prometheus collector backed by a [`StatusSource`]
///
/// Cloning is cheap and clones share the up gauge.
#[derive(Clone)]
pub struct UpsCollector {
    source: StatusSource,
    descs: Vec<Desc>,
    up: Gauge,
}

impl UpsCollector {
    pub fn new(source: StatusSource) -> Result<Self> {
        let descs = DESCRIPTORS
            .iter()
            .map(|d| {
                Desc::new(
                    d.fq_name(),
                    d.help.to_string(),
                    vec![DEVICE_LABEL.to_string()],
                    HashMap::new(),
                )
            })
            .collect::<prometheus::Result<Vec<_>>>()?;

        let up = Gauge::with_opts(up_opts())?;

        Ok(Self { source, descs, up })
    }

    pub fn source(&self) -> &StatusSource {
        &self.source
    }

    /// `pwrstat_up` as of the most recently finished collection
    pub fn up(&self) -> f64 {
        self.up.get()
    }

    /// Fetch a fresh record and translate it
    pub fn scrape(&self) -> Result<Vec<Sample>> {
        let record = self.source.fetch()?;
        Ok(translate(&record))
    }

    /// Fetch a fresh record without emitting anything
    pub fn probe(&self) -> Result<StatusRecord> {
        self.source.fetch()
    }

    fn sample_families(&self, samples: &[Sample]) -> Vec<MetricFamily> {
        let mut families = Vec::with_capacity(samples.len());
        for sample in samples {
            match GaugeVec::new(sample.descriptor.opts(), &[DEVICE_LABEL]) {
                Ok(gauge) => {
                    gauge
                        .with_label_values(&[sample.device.as_str()])
                        .set(sample.value);
                    families.extend(gauge.collect());
                }
                Err(e) => warn!(
                    "Failed to build gauge {}: {}",
                    sample.descriptor.fq_name(),
                    e
                ),
            }
        }
        families
    }

    /// `pwrstat_up` family for this collection only
    fn up_family(&self, status: CollectionStatus) -> Vec<MetricFamily> {
        match Gauge::with_opts(up_opts()) {
            Ok(up) => {
                up.set(status.up_value());
                up.collect()
            }
            Err(e) => {
                warn!("Failed to build gauge pwrstat_up: {}", e);
                Vec::new()
            }
        }
    }
}

impl Collector for UpsCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().chain(self.up.desc()).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut families = Vec::new();

        let status: CollectionStatus =
            collect_with_handler(&self.source.describe(), self.scrape(), |samples| {
                families = self.sample_families(&samples);
            });

        self.up.set(status.up_value());
        families.extend(self.up_family(status));
        families
    }
}
