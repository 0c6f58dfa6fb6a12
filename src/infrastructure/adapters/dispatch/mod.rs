//! Dispatch Adapters - 投递提交的两种实现

mod http_dispatch_client;
mod local_dispatch_client;

pub use http_dispatch_client::HttpDispatchClient;
pub use local_dispatch_client::LocalDispatchClient;
