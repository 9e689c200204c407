pub mod editor;
pub mod task_row;
