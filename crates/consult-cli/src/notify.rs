use consult_config::{NotificationBackend, NotificationsConfig};
use consult_core::{Notice, Notifier, NotifyError};
#[cfg(not(feature = "desktop-notify"))]
use crate::error::invalid_input;
#[cfg(feature = "desktop-notify")]
use tracing::warn;

pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        if notice.is_error() {
            eprintln!("{}: {}", notice.title(), notice.description());
        } else {
            println!("{}: {}", notice.title(), notice.description());
        }
        Ok(())
    }
}

#[cfg(feature = "desktop-notify")]
pub struct DesktopNotifier;

#[cfg(feature = "desktop-notify")]
impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .summary(notice.title())
            .body(&notice.description())
            .show()
            .map_err(|err| NotifyError(err.to_string()))?;
        Ok(())
    }
}

pub enum CliNotifier {
    Silent,
    Stdout(StdoutNotifier),
    #[cfg(feature = "desktop-notify")]
    Desktop {
        desktop: DesktopNotifier,
        fallback: Option<StdoutNotifier>,
    },
}

impl Notifier for CliNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        match self {
            CliNotifier::Silent => Ok(()),
            CliNotifier::Stdout(stdout) => stdout.notify(notice),
            #[cfg(feature = "desktop-notify")]
            CliNotifier::Desktop { desktop, fallback } => match desktop.notify(notice) {
                Ok(()) => Ok(()),
                Err(err) => match fallback {
                    Some(stdout) => {
                        warn!(error = %err, "desktop notification failed, falling back to stdout");
                        stdout.notify(notice)
                    }
                    None => Err(err),
                },
            },
        }
    }
}

/// Stdout notifications are dropped in `--json` mode to keep output parseable.
pub fn build_notifier(config: &NotificationsConfig, json_mode: bool) -> anyhow::Result<CliNotifier> {
    if !config.enabled {
        return Ok(CliNotifier::Silent);
    }

    match config.backend {
        NotificationBackend::Stdout => {
            if json_mode {
                Ok(CliNotifier::Silent)
            } else {
                Ok(CliNotifier::Stdout(StdoutNotifier))
            }
        }
        NotificationBackend::Desktop => {
            #[cfg(feature = "desktop-notify")]
            {
                let fallback = if json_mode { None } else { Some(StdoutNotifier) };
                Ok(CliNotifier::Desktop {
                    desktop: DesktopNotifier,
                    fallback,
                })
            }

            #[cfg(not(feature = "desktop-notify"))]
            {
                Err(invalid_input(
                    "desktop notifications unavailable (build with desktop-notify feature)",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_notifier, CliNotifier};
    use consult_config::{NotificationBackend, NotificationsConfig};

    #[test]
    fn disabled_notifications_are_silent() {
        let config = NotificationsConfig {
            enabled: false,
            backend: NotificationBackend::Desktop,
        };
        let notifier = build_notifier(&config, false).expect("notifier");
        assert!(matches!(notifier, CliNotifier::Silent));
    }

    #[test]
    fn stdout_backend_is_silenced_in_json_mode() {
        let config = NotificationsConfig {
            enabled: true,
            backend: NotificationBackend::Stdout,
        };
        assert!(matches!(
            build_notifier(&config, true).expect("notifier"),
            CliNotifier::Silent
        ));
        assert!(matches!(
            build_notifier(&config, false).expect("notifier"),
            CliNotifier::Stdout(_)
        ));
    }
}
