pub mod flow_layout;
pub mod preset_selector;
pub mod sync;
pub mod tag_docker;
pub mod tag_mirror;
