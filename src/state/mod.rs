mod context;

pub use context::FormEditor;
