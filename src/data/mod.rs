/// Data layer: core types, cleaning, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawRow per line
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  strip list / byte-literal / entity artefacts
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, sorted categories
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category + score ranges → filtered positions
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
