pub mod header;
pub mod stats;
pub mod utils;

pub use header::{draw_header, extract_domain};
pub use stats::{draw_stat_cards, StatCard};
pub use utils::{campaign_status_color, format_count, format_date, format_percent, truncate};
