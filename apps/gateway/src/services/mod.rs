pub mod users;
pub mod widget_filter;
pub mod widgets_client;
