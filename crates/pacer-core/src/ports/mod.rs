//! Ports - runner から見た外部への差し替え口
//!
//! - **EventSink**: run イベントの送り先
//! - **Clock**: イベントのタイムスタンプ

pub mod clock;
pub mod event_sink;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::{EventSink, NoopEventSink};
