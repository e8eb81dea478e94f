//! Utility modules for common functionality

pub mod filesystem;
pub mod patterns;

// Re-export commonly used functions
pub use filesystem::{
    copy_file, copy_tree, ensure_directory_exists, is_git_working_copy, remove_dir_if_exists,
    to_slash,
};
pub use patterns::{expand, expand_filtered, validate_pattern};
