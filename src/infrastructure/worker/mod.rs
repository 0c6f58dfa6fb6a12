//! Worker Layer - Background Task Processing
//!
//! DeliveryWorker 负责渠道投递与重试，ReconcileWorker 负责结果回写

mod delivery_worker;
mod reconcile_worker;

pub use delivery_worker::{DeliveryWorker, DeliveryWorkerConfig};
pub use reconcile_worker::{ReconcileWorker, REPORT_CHANNEL_CAPACITY};
