//! Desktop notification sent when the countdown runs out

use notify_rust::Notification;
use tracing::debug;

use crate::engine::ExpiryReport;
use crate::error::AppError;

pub trait Notifier {
    fn notify(&self, report: &ExpiryReport) -> Result<(), AppError>;
}

#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, report: &ExpiryReport) -> Result<(), AppError> {
        debug!("sending expiry notification");
        Notification::new()
            .appname("stint")
            .summary("Stint - Time is up")
            .body(&report.message())
            .show()
            .map(|_| ())
            .map_err(|e| AppError::Notify(e.to_string()))
    }
}
