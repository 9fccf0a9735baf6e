// Adapters layer: concrete implementations of the domain ports against the OS.

pub mod process;

pub use process::ProcessRunner;
