//! User-facing notification contracts.
//!
//! Flows never render anything themselves. When a condition needs the user's attention they hand
//! a [`Notification`] to the injected [`Notifier`] and carry on without waiting for it.

// self
use crate::{_prelude::*, error::ErrorCode};

/// Fire-and-forget sink for user-visible notifications (toasts, banners, status lines).
pub trait Notifier
where
	Self: Send + Sync,
{
	/// Hands `notification` to the UI layer. Must not block.
	fn notify(&self, notification: Notification);
}

/// Message describing a condition the user should see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
	/// Stable code UI layers translate into localized text.
	pub code: ErrorCode,
	/// English fallback text.
	pub message: String,
}
impl Notification {
	/// Creates an error notification for `code`.
	pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
		Self { code, message: message.into() }
	}
}
impl From<&Error> for Notification {
	fn from(err: &Error) -> Self {
		Self::error(err.code(), err.to_string())
	}
}
impl Display for Notification {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}: {}", self.code, self.message)
	}
}

/// Default notifier that forwards notifications to the `tracing` pipeline (when enabled).
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;
impl Notifier for LogNotifier {
	fn notify(&self, notification: Notification) {
		#[cfg(feature = "tracing")]
		{
			tracing::error!(
				code = notification.code.as_str(),
				message = %notification.message,
				"User notification raised."
			);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = notification;
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn notification_from_error_uses_code_and_message() {
		let notification = Notification::from(&Error::TokenRequestInvalidResponse);

		assert_eq!(notification.code, ErrorCode::AuthTokenRequestInvalidResponse);
		assert_eq!(
			notification.to_string(),
			"AUTH_TOKEN_REQUEST_INVALID_RESPONSE: Token endpoint returned a response without a valid access token."
		);
	}

	#[test]
	fn log_notifier_accepts_notifications() {
		LogNotifier.notify(Notification::error(ErrorCode::AuthTokenRequestFailed, "offline"));
	}
}
