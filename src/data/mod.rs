/// Data layer: core types, loading, and the missing-value policy.
///
/// Architecture:
/// ```text
///  bundled / .csv / .json / .parquet / URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse source → Dataset (missing cells as None)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ missing  │  Drop or Keep incomplete records
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Penguin>, species index
///   └──────────┘
/// ```
pub mod export;
pub mod loader;
pub mod missing;
pub mod model;
