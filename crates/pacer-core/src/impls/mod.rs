//! Impls - ports の実装（開発用・テスト用）

pub mod memory_sink;

pub use self::memory_sink::MemoryEventSink;
