//! Line-level parsers for device output and chat exports.
//!
//! - [`row`] - `Row: N k=v, ...` content-provider dumps
//! - [`pipe`] - `a|b` output of a direct `sqlite3` query
//! - [`chat`] - `D/M/YY, H:MM am - Sender: text` chat exports
//!
//! All parsers skip lines they do not recognise instead of failing, so
//! warnings and trailing noise in command output never abort a batch.

pub mod chat;
pub mod pipe;
pub mod row;

pub use chat::{ChatParser, parse_chat_line};
pub use pipe::parse_pipe_rows;
pub use row::{RawRow, RowParser};
