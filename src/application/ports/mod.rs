//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod dispatch;
mod identity;
mod messaging;
mod repositories;

pub use dispatch::{DeliveryReport, DispatchClientPort, DispatchError, DispatchRequest};
pub use identity::{IdentityError, IdentityVerifierPort, IssuedToken, TokenError, TokenServicePort};
pub use messaging::{ChannelError, MessagingChannelPort, RecipientDirectoryPort};
pub use repositories::{
    CommandLogRecord, CommandLogRepositoryPort, LogFilter, NewCommandLog, RepositoryError,
    RestaurantRecord, RestaurantRepositoryPort, StatusUpdate, UpdateResult, UserRecord,
    UserRepositoryPort, format_timestamp, LOG_EXPORT_LIMIT, LOG_LIST_LIMIT,
};
