//! Logout redirect dispatch.

use crate::context::RequestContext;
use crate::host::RedirectSink;

/// The fixed logout path, resolved against the active site mount.
pub const LOGOUT_PATH: &str = "/logout";

/// Builds and dispatches the redirect to the logout path when
/// reconciliation fails.
#[derive(Debug, Default)]
pub struct LogoutRedirector;

impl LogoutRedirector {
    /// Create a redirector.
    pub fn new() -> Self {
        Self
    }

    /// Build the logout link scoped to the request's site mount.
    pub fn logout_link(&self, ctx: &RequestContext) -> String {
        let mount = ctx.mount_path.trim_end_matches('/');
        format!("{}{}", mount, LOGOUT_PATH)
    }

    /// Dispatch the redirect. Returns whether the forward happened; failure
    /// is logged and non-fatal, and the caller decides whether the rest of
    /// the request still runs.
    pub fn dispatch(&self, ctx: &RequestContext, sink: &mut dyn RedirectSink) -> bool {
        let link = self.logout_link(ctx);
        match sink.forward(&link) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(
                    request = %ctx.request_id,
                    path = %link,
                    error = %err,
                    "failed to dispatch logout redirect"
                );
                false
            }
        }
    }
}
