pub mod reply;
mod serve;

pub use reply::{answer_reply, error_reply, refused_reply, reply_to, response_code_for};
pub use serve::ServeAutoIp6UseCase;
