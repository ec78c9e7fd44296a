//! The growable byte buffer.
//!
//! - `storage` - the [`Buffer`] type, growth and the append family
//! - `growth` - capacity sizing in whole growth units
//! - `compare` - byte-exact equality and prefix checks
//! - `format` - formatted appends and `fmt::Write`
//! - `stream` - appending from readers and `io::Write`

mod compare;
mod format;
mod growth;
mod storage;
mod stream;

pub use storage::Buffer;
