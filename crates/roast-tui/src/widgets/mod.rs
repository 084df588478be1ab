//! Custom widgets for the TUI

pub mod header;
pub mod input_box;
pub mod message_list;
pub mod spinner;

pub use header::Header;
pub use input_box::InputBox;
pub use message_list::MessageList;
pub use spinner::Spinner;
