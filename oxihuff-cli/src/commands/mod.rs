//! Command implementations for OxiHuff CLI.

pub mod codes;
pub mod compress;
pub mod decompress;
pub mod roundtrip;

pub use codes::cmd_codes;
pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use roundtrip::cmd_roundtrip;
