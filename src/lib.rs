//! telechart-rs: animated time-series line chart engine.
//!
//! A chart is one shared primary axis plus value series, shown in a main
//! plot with adaptive ticks and hover tooltip, and an overview strip with a
//! draggable range selector. Every visual change eases in over a short
//! animation; backends only receive ordered, validated draw lists.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEvent, LineChart};
pub use error::{ChartError, ChartResult};
