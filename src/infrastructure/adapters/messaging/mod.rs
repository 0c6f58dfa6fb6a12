//! Messaging Adapters - 消息渠道与收件人目录

mod static_directory;
mod whatsapp_channel;

pub use static_directory::{RecipientRoute, StaticRecipientDirectory};
pub use whatsapp_channel::{WhatsAppChannel, WhatsAppConfig};
