pub mod handler;
pub mod msg_event_handler;
pub mod msg_join_handler;
pub mod msg_leave_handler;
pub mod msg_transform_handler;
