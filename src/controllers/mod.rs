//! Page controllers: the client-side data-synchronization lifecycle.
//!
//! One controller per page. Each depends only on the gateway traits, never on
//! another controller; the composition root instantiates a controller, drives
//! its operations and renders its state. Capabilities the UI shell provides
//! (confirmation prompts, transient notifications) are injected as traits so
//! tests can swap them out.

use async_trait::async_trait;

pub mod campaign_form;
pub mod campaigns;
pub mod dashboard;
pub mod news;

/// Blocking yes/no prompt shown before destructive actions.
#[async_trait]
pub trait ConfirmPrompt {
    async fn confirm(&self, message: &str) -> bool;
}

/// Transient notification sink (toasts in the reference UI).
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
