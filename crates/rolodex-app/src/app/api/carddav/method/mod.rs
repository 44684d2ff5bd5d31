pub mod delete;
pub mod get_head;
pub mod options;
pub mod propfind;
pub mod put;
pub mod report;
pub mod unsupported;
