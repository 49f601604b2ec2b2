pub mod console;
pub mod files;
