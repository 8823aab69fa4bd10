pub mod logging;

pub use logging::{log_ids_loaded, log_startup, print_final_stats, truncate_text};
