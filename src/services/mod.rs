pub mod archive;
pub mod date_format;
pub mod delivery;
pub mod docx_xml;
pub mod field_mapper;
pub mod template_renderer;

pub use archive::{assemble_archive, BatchArchive};
pub use date_format::{format_date_id, format_naive_date};
pub use delivery::{archive_file_name, Delivery};
pub use field_mapper::{map_participant_to_fields, PRINT_DATE_KEY};
pub use template_renderer::{render_template, RenderOptions};
