pub mod walk;

pub use walk::collect_selected_files;
