pub mod naming;
pub mod testfile;

pub use naming::FileNamer;
