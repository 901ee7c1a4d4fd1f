mod common;
mod settings;
