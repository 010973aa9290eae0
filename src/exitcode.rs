//! Process exit codes (BSD sysexits.h compatible)

/// Command line usage error, or arguments that name nothing in the tree
pub const USAGE: i32 = 64;

/// Malformed tree file or duplicate node ids
pub const DATAERR: i32 = 65;

/// Tree file or node does not exist
pub const NOINPUT: i32 = 66;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
