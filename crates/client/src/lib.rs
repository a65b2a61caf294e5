//! 客户端目的服务器解析
//!
//! 在发送任何请求之前，客户端先把用户输入的作业标识解析为规范标识，
//! 并确定请求应当发往哪个服务器。

pub mod canonicalizer;
pub mod resolver;
pub mod routing;

pub use canonicalizer::SystemHostnameCanonicalizer;
pub use resolver::{DestinationResolver, Resolution};
pub use routing::{split_server_id, starting_index};
