pub mod environment;
pub mod paths;

pub use environment::get_projects_root;
pub use paths::{encode_project_dir, is_descendant, normalize_lexically};
