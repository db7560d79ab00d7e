pub mod compose;
pub mod header;
mod messages;
pub mod scrollbar;
pub mod status;
pub mod thinking;

pub use compose::{ComposeFooter, SendButton, SEND_BUTTON_WIDTH};
pub use header::Header;
pub use messages::{MessageList, MessageListState};
pub use scrollbar::Scrollbar;
pub use status::StatusBar;
pub use thinking::ThinkingIndicator;
