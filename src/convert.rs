//! Whole-document conversions from fixed-width text.
//!
//! Each function reads every record of `input_text`, routes it through the
//! record layouts and returns the rendered document with its counters. Any
//! error aborts the conversion; there is no partial output.

use log::info;

use crate::error::ConvertError;
use crate::event::{DocEvent, EventCollector};
use crate::json::JsonSink;
use crate::router::{ConversionStats, ConvertOptions, convert};
use crate::xml::XmlSink;

/// Convert to the raw event sequence.
pub fn fixed_to_events(
    input_text: &str,
    options: &ConvertOptions,
) -> Result<(Vec<DocEvent>, ConversionStats), ConvertError> {
    let (collector, stats) = convert(input_text, EventCollector::new(), options)?;
    log_stats("events", &stats);
    Ok((collector.into_events(), stats))
}

/// Convert to XML text, indented unless `options.compact` is set.
pub fn fixed_to_xml(
    input_text: &str,
    options: &ConvertOptions,
) -> Result<(String, ConversionStats), ConvertError> {
    let sink = if options.compact {
        XmlSink::compact()
    } else {
        XmlSink::new()
    };
    let (sink, stats) = convert(input_text, sink, options)?;
    log_stats("xml", &stats);
    Ok((sink.into_string()?, stats))
}

/// Convert to JSON text, pretty-printed unless `options.compact` is set.
pub fn fixed_to_json(
    input_text: &str,
    options: &ConvertOptions,
) -> Result<(String, ConversionStats), ConvertError> {
    let (sink, stats) = convert(input_text, JsonSink::new(), options)?;
    log_stats("json", &stats);
    let value = sink.into_value();
    let json = if options.compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    }
    .map_err(|e| crate::error::HandlerError::new(e.to_string()))?;
    Ok((json, stats))
}

fn log_stats(format: &str, stats: &ConversionStats) {
    info!(
        "converted {} lines to {format}: {} records, {} skipped, {} elements",
        stats.lines, stats.records, stats.skipped, stats.elements
    );
}
