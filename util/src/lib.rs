mod order_filter;
mod ordered_receiver;

pub use order_filter::*;
pub use ordered_receiver::*;
