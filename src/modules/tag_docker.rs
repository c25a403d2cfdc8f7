mod td_main;
mod td_ui;

pub use td_main::{DOCKER_TITLE, TagDocker};
