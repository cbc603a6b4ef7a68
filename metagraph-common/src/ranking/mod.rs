pub mod filter;
pub mod heatmap;
pub mod table;
pub mod top_n;

pub use filter::filter_by_range;
pub use heatmap::heatmap;
pub use table::join_rows;
pub use top_n::{rank_metric, rank_rows, top_n};
